use prometheus::{Gauge, GaugeVec, IntGauge, IntGaugeVec, Registry, TextEncoder, opts};

use crate::report::Report;

pub struct PromMetrics {
    pub records: IntGauge,
    pub skipped_lines: IntGauge,
    pub not_found: IntGauge,
    pub bot_success_ratio: Gauge,
    pub bot_requests: GaugeVec,
    pub daily_requests: IntGaugeVec,
    pub registry: Registry,
}

impl PromMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let records = IntGauge::with_opts(opts!("access_log_records", "Parsed log records"))?;
        let skipped_lines = IntGauge::with_opts(opts!(
            "access_log_skipped_lines",
            "Lines that did not parse"
        ))?;
        let not_found =
            IntGauge::with_opts(opts!("access_log_not_found", "Responses with status 404"))?;
        let bot_success_ratio = Gauge::with_opts(opts!(
            "access_log_bot_success_ratio",
            "Fraction of bot requests answered with 200"
        ))?;
        let bot_requests = GaugeVec::new(
            opts!("access_log_bot_requests", "Requests per bot name"),
            &["bot"],
        )?;
        let daily_requests = IntGaugeVec::new(
            opts!("access_log_daily_requests", "Requests per calendar day"),
            &["date"],
        )?;

        registry.register(Box::new(records.clone()))?;
        registry.register(Box::new(skipped_lines.clone()))?;
        registry.register(Box::new(not_found.clone()))?;
        registry.register(Box::new(bot_requests.clone()))?;
        registry.register(Box::new(daily_requests.clone()))?;

        Ok(Self {
            records,
            skipped_lines,
            not_found,
            bot_success_ratio,
            bot_requests,
            daily_requests,
            registry,
        })
    }

    /// Consumes the metrics so the ratio gauge is registered at most once.
    pub fn observe(self, report: &Report) -> prometheus::Result<Self> {
        self.records.set(report.records as i64);
        self.skipped_lines.set(report.skipped_lines as i64);
        self.not_found.set(report.not_found as i64);

        // an undefined ratio is left out rather than exported as 0
        if let Some(rate) = report.failure_rate {
            self.bot_success_ratio.set(rate);
            self.registry
                .register(Box::new(self.bot_success_ratio.clone()))?;
        }

        for entry in &report.bot_names {
            self.bot_requests
                .with_label_values(&[entry.name.as_str()])
                .set(entry.value);
        }
        for day in &report.daily_requests {
            self.daily_requests
                .with_label_values(&[&day.date.to_string()])
                .set(day.count as i64);
        }
        Ok(self)
    }

    pub fn encode(&self) -> prometheus::Result<String> {
        let mut buffer = String::new();
        TextEncoder::new().encode_utf8(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::Pipeline,
        report::{ReportFormat, ReportOptions},
    };

    #[test]
    fn exposition_lists_bots_and_days() {
        let ingested = Pipeline::new().run([
            r#"203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET / HTTP/1.1" 200 1 "-" "Testbot/1.0" "-""#,
            r#"203.0.113.5 - - [10/Oct/2023:13:56:10 +0000] "GET /x HTTP/1.1" 404 1 "-" "Mozilla/5.0" "-""#,
        ]);
        let text = Report::build(&ingested, ReportOptions::default())
            .render(ReportFormat::Prometheus)
            .unwrap();
        assert!(text.contains(r#"access_log_bot_requests{bot="Testbot"} 1"#), "{text}");
        assert!(text.contains(r#"access_log_daily_requests{date="2023-10-10"} 2"#), "{text}");
        assert!(text.contains("access_log_not_found 1"), "{text}");
        assert!(text.contains("access_log_bot_success_ratio 1"), "{text}");
    }

    #[test]
    fn undefined_ratio_is_omitted() {
        let ingested = Pipeline::new().run([
            r#"203.0.113.5 - - [10/Oct/2023:13:56:10 +0000] "GET /x HTTP/1.1" 404 1 "-" "Mozilla/5.0" "-""#,
        ]);
        let text = Report::build(&ingested, ReportOptions::default())
            .render(ReportFormat::Prometheus)
            .unwrap();
        assert!(!text.contains("access_log_bot_success_ratio"), "{text}");
        assert!(text.contains("access_log_records 1"), "{text}");
    }

    #[test]
    fn rendering_twice_exports_the_ratio_once_each_time() {
        let ingested = Pipeline::new().run([
            r#"203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET / HTTP/1.1" 200 1 "-" "Testbot/1.0" "-""#,
        ]);
        let report = Report::build(&ingested, ReportOptions::default());
        let first = report.render(ReportFormat::Prometheus).unwrap();
        let second = report.render(ReportFormat::Prometheus).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first
                .lines()
                .filter(|l| l.starts_with("access_log_bot_success_ratio "))
                .count(),
            1
        );
    }

    #[test]
    fn observed_metrics_are_reusable_for_encoding() {
        let ingested = Pipeline::new().run([
            r#"203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET / HTTP/1.1" 200 1 "-" "Testbot/1.0" "-""#,
        ]);
        let report = Report::build(&ingested, ReportOptions::default());
        let metrics = PromMetrics::new().unwrap().observe(&report).unwrap();
        assert_eq!(metrics.encode().unwrap(), metrics.encode().unwrap());
        assert_eq!(metrics.bot_success_ratio.get(), 1.0);
    }
}
