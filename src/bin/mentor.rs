//! Mentor CLI Binary
//!
//! Command-line interface for workspace and learning-path state management.

use anyhow::Context;
use clap::Parser;
use mentor::config::ConfigLoader;
use mentor::logging::init_logging;
use mentor::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging).context("initializing logging")?;

    let context = CliContext::new(cli.data_dir.clone(), cli.key.clone(), cli.config.clone())
        .context("initializing snapshot store")?;
    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
