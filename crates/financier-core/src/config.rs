//! Configuration for report paths, health thresholds and projections
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path (`--config`), or the override in the data dir
//!    (~/.local/share/financier/config.toml) when it exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/financier.toml");

/// Longest projection horizon accepted from config or the command line (100 years)
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub paths: PathsConfig,
    pub health: HealthConfig,
    pub projection: ProjectionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    pub data_file: PathBuf,
    pub output_dir: PathBuf,
}

/// Thresholds used by the health analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthConfig {
    pub emergency_fund_item: String,
    pub months_excellent: Decimal,
    pub months_adequate: Decimal,
    pub savings_rate_excellent: Decimal,
    pub savings_rate_good: Decimal,
    pub debt_to_income_low: Decimal,
    pub debt_to_income_moderate: Decimal,
}

/// Inputs to the forward projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    pub months: u32,
    pub annual_return: Decimal,
    pub emergency_fund_item: String,
    pub emergency_fund_contribution_item: String,
    pub retirement_item: String,
    pub retirement_contribution_item: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/example.csv"),
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            emergency_fund_item: "Emergency Fund Balance".to_string(),
            months_excellent: Decimal::from(6),
            months_adequate: Decimal::from(3),
            savings_rate_excellent: Decimal::new(20, 2),
            savings_rate_good: Decimal::new(10, 2),
            debt_to_income_low: Decimal::from(2),
            debt_to_income_moderate: Decimal::from(4),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            months: 12,
            annual_return: Decimal::new(7, 2),
            emergency_fund_item: "Emergency Fund Balance".to_string(),
            emergency_fund_contribution_item: "Emergency Fund".to_string(),
            retirement_item: "Retirement Account".to_string(),
            retirement_contribution_item: "Retirement Contribution".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            paths: PathsConfig::default(),
            health: HealthConfig::default(),
            projection: ProjectionConfig::default(),
        })
    }
}

impl Config {
    /// Load from an explicit path, the data-dir override, or the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        load_config(path)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("financier").join("config.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let content = if let Some(path) = override_path {
        debug!("Loading config from {}", path.display());
        fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?
    } else {
        match default_config_path() {
            Some(default_path) if default_path.exists() => {
                debug!("Loading config override from {}", default_path.display());
                fs::read_to_string(&default_path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        }
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    paths: Option<RawPaths>,
    health: Option<RawHealth>,
    projection: Option<RawProjection>,
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    data_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    emergency_fund_item: Option<String>,
    months_excellent: Option<f64>,
    months_adequate: Option<f64>,
    savings_rate_excellent: Option<f64>,
    savings_rate_good: Option<f64>,
    debt_to_income_low: Option<f64>,
    debt_to_income_moderate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    months: Option<u32>,
    annual_return: Option<f64>,
    emergency_fund_item: Option<String>,
    emergency_fund_contribution_item: Option<String>,
    retirement_item: Option<String>,
    retirement_contribution_item: Option<String>,
}

/// Convert a config number through its shortest decimal form so 0.07 stays 0.07
fn to_decimal(key: &str, value: f64) -> Result<Decimal> {
    Decimal::from_str(&value.to_string())
        .map_err(|_| Error::Config(format!("Invalid number for {}: {}", key, value)))
}

fn apply(target: &mut Decimal, key: &str, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        *target = to_decimal(key, v)?;
    }
    Ok(())
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut paths = PathsConfig::default();
    let mut health = HealthConfig::default();
    let mut projection = ProjectionConfig::default();

    if let Some(p) = raw.paths {
        if let Some(data_file) = p.data_file {
            paths.data_file = data_file;
        }
        if let Some(output_dir) = p.output_dir {
            paths.output_dir = output_dir;
        }
    }

    if let Some(h) = raw.health {
        if let Some(item) = h.emergency_fund_item {
            health.emergency_fund_item = item;
        }
        apply(&mut health.months_excellent, "months_excellent", h.months_excellent)?;
        apply(&mut health.months_adequate, "months_adequate", h.months_adequate)?;
        apply(
            &mut health.savings_rate_excellent,
            "savings_rate_excellent",
            h.savings_rate_excellent,
        )?;
        apply(&mut health.savings_rate_good, "savings_rate_good", h.savings_rate_good)?;
        apply(&mut health.debt_to_income_low, "debt_to_income_low", h.debt_to_income_low)?;
        apply(
            &mut health.debt_to_income_moderate,
            "debt_to_income_moderate",
            h.debt_to_income_moderate,
        )?;
    }

    if let Some(p) = raw.projection {
        if let Some(months) = p.months {
            if months > MAX_PROJECTION_MONTHS {
                return Err(Error::Config(format!(
                    "projection.months must be at most {}, got {}",
                    MAX_PROJECTION_MONTHS, months
                )));
            }
            projection.months = months;
        }
        apply(&mut projection.annual_return, "annual_return", p.annual_return)?;
        if let Some(item) = p.emergency_fund_item {
            projection.emergency_fund_item = item;
        }
        if let Some(item) = p.emergency_fund_contribution_item {
            projection.emergency_fund_contribution_item = item;
        }
        if let Some(item) = p.retirement_item {
            projection.retirement_item = item;
        }
        if let Some(item) = p.retirement_contribution_item {
            projection.retirement_contribution_item = item;
        }
    }

    Ok(Config {
        paths,
        health,
        projection,
    })
}
