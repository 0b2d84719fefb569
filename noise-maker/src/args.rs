use std::path::PathBuf;

use clap::Parser;
use derive_getters::Getters;

const MAX_DAYS: i64 = 36_500;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Generate fake combined access logs for testing", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value_t = 1000)]
    count: usize,

    /// Fixed seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Spread timestamps over this many days ending now.
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(0..=MAX_DAYS))]
    days: u32,

    /// Fraction of lines that are deliberately malformed.
    #[arg(long, default_value_t = 0.0, value_parser = parse_rate)]
    garbage_rate: f64,

    /// Write here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("{raw} is not between 0 and 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_accepts_unit_interval() {
        assert_eq!(parse_rate("0"), Ok(0.0));
        assert_eq!(parse_rate("0.25"), Ok(0.25));
        assert_eq!(parse_rate("1"), Ok(1.0));
    }

    #[test]
    fn rate_rejects_nan_and_out_of_range() {
        for raw in ["NaN", "nan", "-0.1", "1.5", "inf", "abc"] {
            assert!(parse_rate(raw).is_err(), "{raw} accepted");
        }
    }

    #[test]
    fn days_are_bounded() {
        assert!(CliArgs::try_parse_from(["noise-maker", "--days", "36500"]).is_ok());
        assert!(CliArgs::try_parse_from(["noise-maker", "--days", "100000000"]).is_err());
    }
}
