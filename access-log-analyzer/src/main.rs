use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use access_log_analyzer::{
    Pipeline, Report, ReportFormat, ReportOptions, Tally, ingest::collect_lines,
};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
#[command(about = "Bot and traffic statistics from combined access logs")]
struct Args {
    /// Log file to read; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Report bot names as shares of the total instead of counts.
    #[arg(long)]
    normalize: bool,

    #[arg(long, value_enum, default_value_t = Tally::Corrected)]
    tally: Tally,

    /// Keep only the N most frequent bot names.
    #[arg(long)]
    top: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let lines = match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            collect_lines(BufReader::new(file))
                .with_context(|| format!("reading {}", path.display()))?
        }
        None => collect_lines(io::stdin().lock()).context("reading stdin")?,
    };
    info!(lines = lines.len(), "input loaded");

    let ingested = Pipeline::new().run(&lines);
    let report = Report::build(
        &ingested,
        ReportOptions {
            normalize: args.normalize,
            tally: args.tally,
            top: args.top,
        },
    );
    let rendered = report.render(args.format)?;
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
