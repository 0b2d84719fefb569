mod args;
mod generator;
mod stream;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::Context;
use args::CliArgs;
use clap::Parser;
use stream::{StreamConfig, write_log_stream};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = StreamConfig {
        count: *args.count(),
        seed: *args.seed(),
        days: *args.days(),
        garbage_rate: *args.garbage_rate(),
    };

    let mut out: Box<dyn Write> = match args.output() {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_log_stream(&config, &mut out).context("writing log lines")?;
    Ok(())
}
