//! Analyze command: load → validate → aggregate → render

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use financier_core::{
    aggregate, analyze_health, chart_data, load_and_validate, project, render_dashboard,
    render_report, Config, DashboardInput, ReportInput,
};
use tracing::warn;

use super::output::{ensure_output_dir, snapshot_suffix, write_output, OutputPaths};
use crate::cli::Cli;

const BANNER: &str = r#"
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║                  WEEKEND FINANCIER                        ║
║                                                           ║
║          "For when the week's not long enough"            ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝
"#;

/// Fully resolved options for one run (CLI flags over config values)
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub data_file: PathBuf,
    pub output_dir: PathBuf,
    pub snapshot: bool,
    pub no_dashboard: bool,
    pub no_charts: bool,
    pub strict: bool,
    pub months: u32,
    /// Date used for snapshot names and the dashboard timestamp
    pub today: NaiveDate,
}

impl AnalyzeOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            data_file: cli
                .data_file
                .clone()
                .unwrap_or_else(|| config.paths.data_file.clone()),
            output_dir: cli
                .output_dir
                .clone()
                .unwrap_or_else(|| config.paths.output_dir.clone()),
            snapshot: cli.snapshot,
            no_dashboard: cli.no_dashboard,
            no_charts: cli.no_charts,
            strict: cli.strict,
            months: cli.months.unwrap_or(config.projection.months),
            today: Local::now().date_naive(),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub report: PathBuf,
    pub charts: Option<PathBuf>,
    pub dashboard: Option<PathBuf>,
    pub records: usize,
    pub rejected: usize,
}

pub fn cmd_analyze(options: &AnalyzeOptions, config: &Config) -> Result<AnalyzeOutcome> {
    println!("{}", BANNER);

    let data_file = &options.data_file;
    if data_file == &config.paths.data_file {
        println!("📂 Using default file: {}", data_file.display());
    } else {
        println!("📂 Using file: {}", data_file.display());
    }

    ensure_output_dir(&options.output_dir)?;
    let suffix = snapshot_suffix(options.snapshot, options.today);
    let paths = OutputPaths::new(&options.output_dir, &suffix);

    println!("   Saving outputs to: {}/", options.output_dir.display());
    if options.snapshot {
        println!("   Taking snapshot - appending date to filenames: {}", suffix);
    }

    let validated = load_and_validate(data_file)
        .with_context(|| format!("Failed to load {}", data_file.display()))?;

    for err in &validated.rejected {
        if options.strict {
            bail!("Invalid row in {}: {}", data_file.display(), err);
        }
        warn!("Skipping {}", err);
    }

    println!(
        "   Loaded {} financial records ({} skipped)",
        validated.records.len(),
        validated.rejected.len()
    );

    let mut projection_config = config.projection.clone();
    projection_config.months = options.months;

    let summary = aggregate(&validated.records);
    let health = analyze_health(&summary, &validated.records, &config.health);
    let projection = project(&summary, &validated.records, &projection_config);

    let source = data_file.display().to_string();
    let report = render_report(&ReportInput {
        source: &source,
        summary: &summary,
        health: &health,
        projection: &projection,
        rejected: &validated.rejected,
    });
    print!("{}", report);
    write_output(&paths.report, &report)?;

    let charts = if options.no_charts {
        None
    } else {
        let data = chart_data(&summary, &projection);
        let json = serde_json::to_string_pretty(&data).context("Failed to serialize chart data")?;
        write_output(&paths.charts, &json)?;
        println!("\n📊 Chart data saved to {}", paths.charts.display());
        Some(paths.charts.clone())
    };

    let dashboard = if options.no_dashboard {
        None
    } else {
        let generated_at = options.today.format("%Y-%m-%d").to_string();
        let html = render_dashboard(&DashboardInput {
            title: "Financial Dashboard",
            generated_at: &generated_at,
            records: &validated.records,
            summary: &summary,
            health: &health,
            projection: &projection,
        })
        .context("Failed to render dashboard")?;
        write_output(&paths.dashboard, &html)?;
        println!("\n🌐 Dashboard saved to {}", paths.dashboard.display());
        println!("   Open it in your browser to view it.");
        Some(paths.dashboard.clone())
    };

    println!("\n✅ Financial analysis complete!");
    println!("   Report saved to: {}", paths.report.display());

    Ok(AnalyzeOutcome {
        report: paths.report,
        charts,
        dashboard,
        records: validated.records.len(),
        rejected: validated.rejected.len(),
    })
}
