//! Loaders that turn CSV, JSON and spreadsheet files into raw rows
//!
//! Every loader produces the same `RawRow` shape so validation and
//! aggregation never branch on the source format.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{validate_rows, RawRow, RawValue, Validated};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Spreadsheet,
}

impl SourceFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(Self::Spreadsheet),
            "" => Err(Error::UnsupportedFormat("(no extension)".into())),
            other => Err(Error::UnsupportedFormat(format!(".{}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

/// Load raw rows from a file, choosing the loader by extension
pub fn load_file(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(Error::UnreadableSource(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let format = SourceFormat::from_path(path)?;
    let rows = match format {
        SourceFormat::Csv => parse_csv(File::open(path)?)?,
        SourceFormat::Json => parse_json(BufReader::new(File::open(path)?))?,
        SourceFormat::Spreadsheet => load_spreadsheet(path)?,
    };

    debug!(
        "Loaded {} {} rows from {}",
        rows.len(),
        format.as_str(),
        path.display()
    );
    Ok(rows)
}

/// Load a file and validate every row
pub fn load_and_validate(path: &Path) -> Result<Validated> {
    let rows = load_file(path)?;
    Ok(validate_rows(&rows))
}

/// Convert a CSV record to a raw row using headers as keys
fn record_to_row(index: usize, headers: &StringRecord, record: &StringRecord) -> RawRow {
    let mut row = RawRow::new(index);
    for (i, header) in headers.iter().enumerate() {
        if let Some(value) = record.get(i) {
            row.insert(header, RawValue::Text(value.to_string()));
        }
    }
    row
}

/// Parse CSV with a header line; extra columns are carried but ignored later
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        rows.push(record_to_row(i + 1, &headers, &record));
    }

    debug!("Parsed {} CSV rows", rows.len());
    Ok(rows)
}

/// Parse JSON: either an array of objects, or an object holding that array
/// under a `data` or `records` key
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let value: Value = serde_json::from_reader(reader)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("records")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::UnreadableSource(
                    "JSON file must contain a list of records or a dict with 'data' or 'records' key"
                        .into(),
                ))
            }
        },
        _ => {
            return Err(Error::UnreadableSource(
                "JSON file must contain a list of records".into(),
            ))
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        // A non-object element becomes an empty row and is rejected on its own
        let mut row = RawRow::new(i + 1);
        match item {
            Value::Object(map) => {
                for (key, value) in map {
                    row.insert(&key, json_to_raw(value));
                }
            }
            other => debug!("JSON record {} is not an object: {}", i + 1, other),
        }
        rows.push(row);
    }

    debug!("Parsed {} JSON rows", rows.len());
    Ok(rows)
}

fn json_to_raw(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(b),
        Value::Number(n) => n
            .as_f64()
            .map(RawValue::Number)
            .unwrap_or_else(|| RawValue::Text(n.to_string())),
        Value::String(s) => RawValue::Text(s),
        other => RawValue::Text(other.to_string()),
    }
}

/// Load the first sheet of a workbook; the first row holds the headers
pub fn load_spreadsheet(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        Error::UnreadableSource(format!("No worksheets found in {}", path.display()))
    })??;

    let mut sheet_rows = range.rows();
    let Some(header_cells) = sheet_rows.next() else {
        debug!("Spreadsheet {} is empty", path.display());
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_cells.iter().map(|c| c.to_string()).collect();

    // Row indices count sheet rows below the header, blank ones included
    let mut rows = Vec::new();
    for (i, cells) in sheet_rows.enumerate() {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let mut row = RawRow::new(i + 1);
        for (header, cell) in headers.iter().zip(cells) {
            if !header.trim().is_empty() {
                row.insert(header, cell_to_raw(cell));
            }
        }
        rows.push(row);
    }

    debug!("Parsed {} spreadsheet rows", rows.len());
    Ok(rows)
}

fn cell_to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Null,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Bool(*b),
        other => RawValue::Text(other.to_string()),
    }
}
