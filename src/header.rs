//! Header mapping and the parse entry points.
//!
//! Turns the raw records produced by [`crate::reader`] into named records,
//! taking field names from the first row or from an explicit list, and
//! running optional per-field converters over the raw strings.

use crate::config::ReaderOptions;
use crate::error::{KeplerError, Result};
use crate::models::{FieldValue, ParsedRow, Record};
use crate::reader::read_matrix;
use std::fmt;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tracing::debug;

/// Converts a raw field string into a typed value; `Err` carries the reason
pub type FieldConverter =
    Arc<dyn Fn(&str) -> std::result::Result<FieldValue, String> + Send + Sync>;

/// A named column with an optional converter
#[derive(Clone)]
pub struct HeaderField {
    pub name: String,
    pub converter: Option<FieldConverter>,
}

impl HeaderField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            converter: None,
        }
    }

    pub fn with_converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<FieldValue, String> + Send + Sync + 'static,
    {
        self.converter = Some(Arc::new(converter));
        self
    }

    pub fn converted(name: impl Into<String>, converter: FieldConverter) -> Self {
        Self {
            name: name.into(),
            converter: Some(converter),
        }
    }

    fn convert(&self, raw: String) -> Result<FieldValue> {
        match &self.converter {
            None => Ok(FieldValue::Text(raw)),
            Some(converter) => converter(&raw).map_err(|reason| KeplerError::Conversion {
                field: self.name.clone(),
                value: raw,
                reason,
            }),
        }
    }
}

impl fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderField")
            .field("name", &self.name)
            .field("converter", &self.converter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Where field names come from
#[derive(Debug, Clone, Default)]
pub enum HeaderSpec {
    /// Positional records, no mapping
    #[default]
    None,
    /// Consume the first record as the list of names
    FirstRow,
    /// Explicit names; every record is data
    Names(Vec<String>),
    /// Explicit names with optional converters; every record is data
    Fields(Vec<HeaderField>),
}

impl HeaderSpec {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HeaderSpec::Names(names.into_iter().map(Into::into).collect())
    }
}

/// Ready-made converters for common column types
pub mod converters {
    use super::FieldConverter;
    use crate::models::FieldValue;
    use std::sync::Arc;

    pub fn integer() -> FieldConverter {
        Arc::new(|raw: &str| {
            raw.trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|e| e.to_string())
        })
    }

    pub fn float() -> FieldConverter {
        Arc::new(|raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|e| e.to_string())
        })
    }

    pub fn boolean() -> FieldConverter {
        Arc::new(|raw: &str| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(FieldValue::Bool(true)),
            "false" | "0" => Ok(FieldValue::Bool(false)),
            other => Err(format!("not a boolean: {}", other)),
        })
    }

    /// Blank input becomes `Null`; anything else goes through `inner`
    pub fn nullable(inner: FieldConverter) -> FieldConverter {
        Arc::new(move |raw: &str| {
            if raw.trim().is_empty() {
                Ok(FieldValue::Null)
            } else {
                inner(raw)
            }
        })
    }
}

/// Apply `spec` to raw records.
///
/// Row numbers in [`KeplerError::HeaderFieldCount`] are 1-based positions in
/// the raw record sequence, so the consumed header row counts as row 1.
pub fn map_rows(rows: Vec<Vec<String>>, spec: &HeaderSpec) -> Result<Vec<ParsedRow>> {
    let mut rows = rows.into_iter();

    let (fields, mut row_number) = match spec {
        HeaderSpec::None => return Ok(rows.map(ParsedRow::Fields).collect()),
        HeaderSpec::FirstRow => {
            let head = rows.next().ok_or(KeplerError::MissingHeader)?;
            let fields: Vec<HeaderField> = head.into_iter().map(HeaderField::new).collect();
            (fields, 1)
        }
        HeaderSpec::Names(names) => (names.iter().map(HeaderField::new).collect(), 0),
        HeaderSpec::Fields(fields) => (fields.clone(), 0),
    };

    debug!(
        "Mapping records onto {} header fields: {:?}",
        fields.len(),
        fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
    );

    rows.map(|row| {
        row_number += 1;
        map_row(row, &fields, row_number).map(ParsedRow::Mapped)
    })
    .collect()
}

fn map_row(row: Vec<String>, fields: &[HeaderField], row_number: usize) -> Result<Record> {
    if row.len() != fields.len() {
        return Err(KeplerError::HeaderFieldCount {
            row: row_number,
            expected: fields.len(),
            found: row.len(),
        });
    }

    let mut record = Record::with_capacity(fields.len());
    for (field, raw) in fields.iter().zip(row) {
        let value = field.convert(raw)?;
        record.insert(field.name.clone(), value);
    }
    Ok(record)
}

/// Parse a whole stream according to `options`
pub async fn parse<R>(reader: R, options: &ReaderOptions) -> Result<Vec<ParsedRow>>
where
    R: AsyncBufRead + Unpin,
{
    let rows = read_matrix(reader, options).await?;
    map_rows(rows, &options.header)
}

pub async fn parse_str(input: &str, options: &ReaderOptions) -> Result<Vec<ParsedRow>> {
    parse(input.as_bytes(), options).await
}

/// Parse, then pass every row through a whole-record converter
pub async fn parse_with<R, T, F>(reader: R, options: &ReaderOptions, convert: F) -> Result<Vec<T>>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(ParsedRow) -> Result<T>,
{
    parse(reader, options).await?.into_iter().map(convert).collect()
}
