//! Financier Core Library
//!
//! Shared functionality for the Financier personal finance summarizer:
//! - Loaders for CSV, JSON and spreadsheet line-item tables
//! - Record validation with per-row diagnostics
//! - Aggregation of recurring amounts onto a monthly basis
//! - Health analysis and forward projections
//! - Text report and HTML dashboard rendering
//! - TOML configuration with embedded defaults

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod import;
pub mod models;
pub mod projection;
pub mod report;

pub use aggregate::{aggregate, monthly_equivalent, CategoryTotal, Summary};
pub use config::{Config, HealthConfig, PathsConfig, ProjectionConfig, MAX_PROJECTION_MONTHS};
pub use dashboard::{chart_data, render_dashboard, ChartData, DashboardInput};
pub use error::{Error, Result, ValidationError, ValidationErrorKind};
pub use health::{analyze_health, HealthReport, Recommendation, Status};
pub use import::{load_and_validate, load_file, SourceFormat};
pub use models::{validate_rows, Frequency, RawRow, RawValue, Record, RecordType, Validated};
pub use projection::{project, Projection, ProjectionPoint};
pub use report::{
    format_currency, format_fixed, format_percent, render_report, round_display, ReportInput,
};
