//! CLI argument definitions using clap
//!
//! This module contains the clap struct for parsing CLI arguments.
//! The actual command implementation is in the `commands` module.

use std::path::PathBuf;

use clap::Parser;
use financier_core::MAX_PROJECTION_MONTHS;

/// Financier - For when the week's not long enough
#[derive(Parser, Debug)]
#[command(name = "financier")]
#[command(about = "Analyze your personal finances from a CSV, JSON or Excel table", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:
  financier                                 # Use the configured default file
  financier data/example.csv                # CSV file
  financier data/example.json               # JSON file
  financier budget.xlsx                     # Excel file
  financier --snapshot                      # Append today's date to output names
  financier --output-dir reports/           # Save to a custom directory
  financier --no-dashboard                  # Skip the HTML dashboard
  financier --no-charts                     # Skip the chart data export")]
pub struct Cli {
    /// Data file (CSV, JSON, or Excel) with category,item,amount,type,frequency columns
    pub data_file: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/financier/config.toml, then built-in defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the report, chart data and dashboard (default: reports/)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Append the date to output file names (e.g. financial_report_2024-01-15.txt)
    #[arg(long)]
    pub snapshot: bool,

    /// Skip generating the HTML dashboard
    #[arg(long)]
    pub no_dashboard: bool,

    /// Skip exporting chart data
    #[arg(long)]
    pub no_charts: bool,

    /// Abort on the first invalid row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Projection horizon in months (at most 1200)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_PROJECTION_MONTHS as i64))]
    pub months: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
