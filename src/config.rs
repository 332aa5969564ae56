//! Configuration management and validation.
//!
//! Provides the CSV reader options, the habitability thresholds used to
//! select planets, and the aggregate configuration handed to the
//! processor.

use crate::constants::{
    COL_DISPOSITION, COL_PLANET_RADIUS, COL_STELLAR_MASS, COL_STELLAR_RADIUS,
    CONFIRMED_DISPOSITION, DATASET_COMMENT, DEFAULT_DELIMITER, PLANET_RADIUS_BOUNDS,
    RESERVED_CHARS, STELLAR_MASS_BOUNDS, STELLAR_RADIUS_BOUNDS, SUMMARY_COLUMNS,
};
use crate::error::{KeplerError, ParseError, Result};
use crate::header::HeaderSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options controlling how records are tokenized and mapped
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Field delimiter
    pub comma: char,

    /// Lines starting with this character are skipped
    pub comment: Option<char>,

    /// Strip leading whitespace from every field before parsing it
    pub trim_leading_space: bool,

    /// Accept stray quotes instead of failing
    pub lazy_quotes: bool,

    /// `None` disables the width check, `Some(0)` infers the width from the
    /// first record, `Some(n)` requires exactly `n` fields
    pub fields_per_record: Option<usize>,

    /// How field names are obtained, if at all
    pub header: HeaderSpec,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            comma: DEFAULT_DELIMITER,
            comment: None,
            trim_leading_space: false,
            lazy_quotes: false,
            fields_per_record: None,
            header: HeaderSpec::None,
        }
    }
}

impl ReaderOptions {
    /// Options for the NASA exoplanet archive export: header row, `#` comments
    pub fn for_dataset() -> Self {
        Self::default()
            .with_header(HeaderSpec::FirstRow)
            .with_comment(DATASET_COMMENT)
    }

    pub fn with_comma(mut self, comma: char) -> Self {
        self.comma = comma;
        self
    }

    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn without_comment(mut self) -> Self {
        self.comment = None;
        self
    }

    pub fn with_trim_leading_space(mut self) -> Self {
        self.trim_leading_space = true;
        self
    }

    pub fn with_lazy_quotes(mut self) -> Self {
        self.lazy_quotes = true;
        self
    }

    pub fn with_fields_per_record(mut self, fields: usize) -> Self {
        self.fields_per_record = Some(fields);
        self
    }

    pub fn with_header(mut self, header: HeaderSpec) -> Self {
        self.header = header;
        self
    }

    /// Reject delimiter/comment combinations the tokenizer cannot handle
    pub fn validate(&self) -> std::result::Result<(), ParseError> {
        let comment_reserved = self
            .comment
            .is_some_and(|comment| RESERVED_CHARS.contains(&comment));

        if RESERVED_CHARS.contains(&self.comma)
            || comment_reserved
            || self.comment == Some(self.comma)
        {
            debug!(
                "Rejected reader options: comma={:?}, comment={:?}",
                self.comma, self.comment
            );
            return Err(ParseError::invalid_delimiter());
        }

        Ok(())
    }
}

/// Open interval used for a numeric threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Strict `min < value < max`; NaN is never contained
    pub fn contains(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Thresholds a planet must satisfy to be reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitabilityCriteria {
    /// Column holding the disposition flag
    pub disposition_column: String,

    /// Required disposition value (exact match)
    pub disposition: String,

    /// Numeric range checks as (column, bounds)
    pub ranges: Vec<(String, Bounds)>,

    /// Columns kept in the summary, in order
    pub summary_columns: Vec<String>,
}

impl Default for HabitabilityCriteria {
    fn default() -> Self {
        Self {
            disposition_column: COL_DISPOSITION.to_string(),
            disposition: CONFIRMED_DISPOSITION.to_string(),
            ranges: vec![
                (COL_PLANET_RADIUS.to_string(), PLANET_RADIUS_BOUNDS.into()),
                (COL_STELLAR_RADIUS.to_string(), STELLAR_RADIUS_BOUNDS.into()),
                (COL_STELLAR_MASS.to_string(), STELLAR_MASS_BOUNDS.into()),
            ],
            summary_columns: SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl HabitabilityCriteria {
    pub fn with_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.disposition = disposition.into();
        self
    }

    /// Replace the bounds for `column`, adding the check if it is new
    pub fn with_range(mut self, column: impl Into<String>, bounds: Bounds) -> Self {
        let column = column.into();
        match self.ranges.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = bounds,
            None => self.ranges.push((column, bounds)),
        }
        self
    }

    pub fn with_summary_columns(mut self, columns: Vec<String>) -> Self {
        self.summary_columns = columns;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (column, bounds) in &self.ranges {
            if !(bounds.min < bounds.max) {
                return Err(KeplerError::Configuration {
                    message: format!(
                        "Empty range for column '{}': {} .. {}",
                        column, bounds.min, bounds.max
                    ),
                });
            }
        }

        if self.summary_columns.is_empty() {
            return Err(KeplerError::Configuration {
                message: "At least one summary column is required".to_string(),
            });
        }

        Ok(())
    }
}

/// Global configuration for a processing run
#[derive(Debug, Clone)]
pub struct KeplerConfig {
    pub reader: ReaderOptions,
    pub criteria: HabitabilityCriteria,
}

impl Default for KeplerConfig {
    fn default() -> Self {
        Self {
            reader: ReaderOptions::for_dataset(),
            criteria: HabitabilityCriteria::default(),
        }
    }
}

impl KeplerConfig {
    pub fn with_reader(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_criteria(mut self, criteria: HabitabilityCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Validate both halves; the processor needs named columns
    pub fn validate(&self) -> Result<()> {
        self.reader.validate()?;
        if matches!(self.reader.header, HeaderSpec::None) {
            return Err(KeplerError::Configuration {
                message: "Planet filtering needs a header to resolve column names".to_string(),
            });
        }
        self.criteria.validate()
    }
}
