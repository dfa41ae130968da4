//! Financier CLI - Personal finance summarizer
//!
//! Usage:
//!   financier [DATA_FILE]           Analyze a CSV, JSON or Excel table
//!   financier --snapshot            Date-stamp every output file
//!   financier --output-dir DIR      Write outputs somewhere other than reports/

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use financier_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let options = commands::AnalyzeOptions::resolve(&cli, &config);

    commands::cmd_analyze(&options, &config)?;
    Ok(())
}
