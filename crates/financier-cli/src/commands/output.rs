//! Output directory management and snapshot file naming

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// File name suffix for a snapshot taken on `date` (`_2024-01-15`), or empty
pub fn snapshot_suffix(snapshot: bool, date: NaiveDate) -> String {
    if snapshot {
        format!("_{}", date.format("%Y-%m-%d"))
    } else {
        String::new()
    }
}

/// Names of the files written by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub report: PathBuf,
    pub charts: PathBuf,
    pub dashboard: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, suffix: &str) -> Self {
        Self {
            report: dir.join(format!("financial_report{}.txt", suffix)),
            charts: dir.join(format!("chart_data{}.json", suffix)),
            dashboard: dir.join(format!("financial_dashboard{}.html", suffix)),
        }
    }
}

/// Create the output directory (and parents) if needed
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Write a file, attaching the path to any error
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
