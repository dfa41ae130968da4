//! Error types for Financier

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Unsupported file format: {0}. Supported formats: .csv, .json, .xlsx, .xls, .xlsm, .ods")]
    UnsupportedFormat(String),

    #[error("Unreadable source: {0}")]
    UnreadableSource(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True for failures to read the input itself (missing file, wrong
    /// extension, corrupt sheet), as opposed to a bad row inside it.
    pub fn is_source_error(&self) -> bool {
        !matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single input row that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Record {row}: {kind}")]
pub struct ValidationError {
    /// 1-based data row index in the source file (header excluded)
    pub row: usize,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(row: usize, kind: ValidationErrorKind) -> Self {
        Self { row, kind }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match &self.kind {
            ValidationErrorKind::MissingField { field } => field,
            ValidationErrorKind::InvalidEnum { field, .. } => field,
            ValidationErrorKind::InvalidAmount { .. } => "amount",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("invalid {field} '{value}'")]
    InvalidEnum { field: String, value: String },

    #[error("'amount' must be a non-negative number, got '{value}'")]
    InvalidAmount { value: String },
}
