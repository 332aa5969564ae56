//! Core data structures for parsed CSV rows and planet summaries.
//!
//! Defines field values, header-mapped records, the row type returned by
//! the parse entry points, and the processing statistics reported back
//! to the CLI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// A single cell after optional conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Loose numeric reading of a value.
    ///
    /// Blank text reads as `0.0` and unparsable text as `NaN`, so a NaN never
    /// satisfies a range comparison.
    pub fn to_f64(&self) -> f64 {
        match self {
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            FieldValue::Integer(value) => *value as f64,
            FieldValue::Float(value) => *value,
            FieldValue::Bool(true) => 1.0,
            FieldValue::Bool(false) | FieldValue::Null => 0.0,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{:?}", text),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

/// Header-mapped record: field name to value.
///
/// Duplicate header names keep the value of the right-most column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of a field; `None` if absent or converted to a non-text value
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// One element of a parse result
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    /// Positional fields, produced when no header is configured
    Fields(Vec<String>),
    /// Named fields, produced in header mode
    Mapped(Record),
}

impl ParsedRow {
    pub fn as_fields(&self) -> Option<&[String]> {
        match self {
            ParsedRow::Fields(fields) => Some(fields),
            ParsedRow::Mapped(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ParsedRow::Mapped(record) => Some(record),
            ParsedRow::Fields(_) => None,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            ParsedRow::Mapped(record) => Some(record),
            ParsedRow::Fields(_) => None,
        }
    }
}

/// Projection of a record onto a fixed, ordered column list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetSummary {
    pub columns: Vec<(String, FieldValue)>,
}

impl PlanetSummary {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("kepler_name").and_then(FieldValue::as_str)
    }
}

impl fmt::Display for PlanetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        f.write_str(" }")
    }
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub rows_read: usize,
    pub planets_found: usize,
    pub dataset_path: PathBuf,
    pub processing_time_ms: u128,
}

/// Output of a processing run
#[derive(Debug, Default)]
pub struct ProcessingResult {
    pub planets: Vec<PlanetSummary>,
    pub stats: ProcessingStats,
}
