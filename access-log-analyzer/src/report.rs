use std::fmt;

use chrono::NaiveDate;
use clap::ValueEnum;
use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::{
    analytics::{Analytics, Tally},
    invariants::BotName,
    pipeline::Ingested,
    prometheus::PromMetrics,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Prometheus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotNameEntry {
    pub name: BotName,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReportOptions {
    pub normalize: bool,
    pub tally: Tally,
    pub top: Option<usize>,
}

/// Everything the analytics produce for one run, ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub records: usize,
    pub skipped_lines: usize,
    pub failure_rate: Option<f64>,
    pub not_found: usize,
    pub normalized: bool,
    pub bot_names: Vec<BotNameEntry>,
    pub daily_requests: Vec<DailyCount>,
}

impl Report {
    pub fn build(ingested: &Ingested, options: ReportOptions) -> Self {
        let analytics = Analytics::new(&ingested.store);
        let mut bot_names: Vec<_> = analytics
            .bot_name_frequency(options.normalize, options.tally)
            .into_iter()
            .map(|(name, value)| BotNameEntry { name, value })
            .collect();
        if let Some(n) = options.top {
            bot_names.truncate(n);
        }
        Self {
            records: ingested.store.len(),
            skipped_lines: ingested.skipped(),
            failure_rate: analytics.failure_rate().ok(),
            not_found: analytics.not_found_count(),
            normalized: options.normalize,
            bot_names,
            daily_requests: analytics
                .daily_request_counts()
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
        }
    }

    pub fn render(&self, format: ReportFormat) -> anyhow::Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_string()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Prometheus => {
                let metrics = PromMetrics::new()?.observe(self)?;
                Ok(metrics.encode()?)
            }
        }
    }

}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = |v: usize| v.to_formatted_string(&Locale::en);
        let rate = match self.failure_rate {
            Some(rate) => format!("{rate:.4}"),
            None => "undefined (no bot requests)".into(),
        };
        writeln!(f, "records         {}", n(self.records))?;
        writeln!(f, "skipped lines   {}", n(self.skipped_lines))?;
        writeln!(f, "not found (404) {}", n(self.not_found))?;
        writeln!(f, "bot 200 ratio   {rate}")?;

        writeln!(f, "\nbot names")?;
        if self.bot_names.is_empty() {
            writeln!(f, "  (none)")?;
        }
        let width = self
            .bot_names
            .iter()
            .map(|e| e.name.as_str().len())
            .max()
            .unwrap_or(0);
        for entry in &self.bot_names {
            let value = if self.normalized {
                format!("{:.5}", entry.value)
            } else {
                n(entry.value as usize)
            };
            writeln!(f, "  {:<width$}  {value}", entry.name.as_str())?;
        }

        writeln!(f, "\nrequests per day")?;
        if self.daily_requests.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for day in &self.daily_requests {
            writeln!(f, "  {}  {}", day.date, n(day.count))?;
        }
        Ok(())
    }
}
