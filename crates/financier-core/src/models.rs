//! Domain models for Financier

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrorKind};

/// What a line item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense,
    Savings,
    Debt,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Savings => "savings",
            Self::Debt => "debt",
        }
    }

    /// Display name for the monthly flow of this type
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expenses",
            Self::Savings => "Savings",
            Self::Debt => "Debt Payments",
        }
    }

    pub fn all() -> &'static [RecordType] {
        &[Self::Income, Self::Expense, Self::Savings, Self::Debt]
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "savings" => Ok(Self::Savings),
            "debt" => Ok(Self::Debt),
            _ => Err(format!("Unknown type: {}", s)),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often a line item recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Monthly,
    Yearly,
    Weekly,
    /// A point-in-time amount, treated as a balance rather than a flow
    OneTime,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Weekly => "weekly",
            Self::OneTime => "one-time",
        }
    }

    /// Whether amounts with this frequency are recurring cash flows
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::OneTime)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "weekly" => Ok(Self::Weekly),
            "one-time" | "one_time" | "onetime" | "once" => Ok(Self::OneTime),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cell value as produced by a loader, before validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl RawValue {
    /// Textual form of the value, or None for null and blank cells
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One input row: field name to raw value, with its position in the source
///
/// Field names are stored trimmed and lower-cased so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    row: usize,
    fields: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            fields: Vec::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<RawValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Insert a field; a repeated header keeps its first value
    pub fn insert(&mut self, key: &str, value: RawValue) {
        let key = key.trim().to_lowercase();
        if self.fields.iter().all(|(k, _)| *k != key) {
            self.fields.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        let key = key.to_lowercase();
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// 1-based data row index
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A validated financial line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub category: Option<String>,
    pub item: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub frequency: Frequency,
}

impl Record {
    pub fn new(
        item: impl Into<String>,
        amount: Decimal,
        record_type: RecordType,
        frequency: Frequency,
    ) -> Self {
        Self {
            category: None,
            item: item.into(),
            amount,
            record_type,
            frequency,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Grouping key for category breakdowns: the category, else the item name
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or(&self.item)
    }

    /// Validate and coerce one raw row
    pub fn parse(raw: &RawRow) -> std::result::Result<Self, ValidationError> {
        let row = raw.row();
        let fail = |kind| ValidationError::new(row, kind);

        let item = raw
            .get("item")
            .and_then(RawValue::as_text)
            .ok_or_else(|| fail(missing("item")))?;

        let amount = parse_amount(raw.get("amount")).map_err(fail)?;
        let record_type = parse_enum::<RecordType>(raw.get("type"), "type").map_err(fail)?;
        let frequency = parse_enum::<Frequency>(raw.get("frequency"), "frequency").map_err(fail)?;

        let category = raw.get("category").and_then(RawValue::as_text);

        Ok(Self {
            category,
            item,
            amount,
            record_type,
            frequency,
        })
    }
}

fn missing(field: &str) -> ValidationErrorKind {
    ValidationErrorKind::MissingField {
        field: field.to_string(),
    }
}

fn parse_enum<T: FromStr>(
    value: Option<&RawValue>,
    field: &str,
) -> std::result::Result<T, ValidationErrorKind> {
    let text = value
        .and_then(RawValue::as_text)
        .ok_or_else(|| missing(field))?;
    text.parse().map_err(|_| ValidationErrorKind::InvalidEnum {
        field: field.to_string(),
        value: text,
    })
}

/// Parse an amount, accepting currency symbols and thousands separators
fn parse_amount(value: Option<&RawValue>) -> std::result::Result<Decimal, ValidationErrorKind> {
    let text = value
        .and_then(RawValue::as_text)
        .ok_or_else(|| missing("amount"))?;
    let cleaned = text.replace(['$', ',', ' '], "");

    let invalid = || ValidationErrorKind::InvalidAmount {
        value: text.clone(),
    };

    let amount = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| invalid())?;

    if amount < Decimal::ZERO {
        return Err(invalid());
    }
    Ok(amount.normalize())
}

/// Outcome of validating a full set of rows
#[derive(Debug, Clone, Default, Serialize)]
pub struct Validated {
    /// Valid records in source order
    pub records: Vec<Record>,
    /// One diagnostic per rejected row, in source order
    pub rejected: Vec<ValidationError>,
}

impl Validated {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validate every row, keeping source order for both outcomes
pub fn validate_rows(rows: &[RawRow]) -> Validated {
    let mut validated = Validated::default();
    for raw in rows {
        match Record::parse(raw) {
            Ok(record) => validated.records.push(record),
            Err(e) => validated.rejected.push(e),
        }
    }
    validated
}
