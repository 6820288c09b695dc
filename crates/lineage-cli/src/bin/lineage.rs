use anyhow::Result;
use clap::Parser;
use std::io::Write;

use lineage_cli::args::CliArgs;
use lineage_cli::{driver, tracing_config};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_config::init_tracing(&args);

    let output = driver::run(&args)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
