//! Error handling for CSV reading and planet processing.
//!
//! Parse failures carry the record's starting line, the physical line and
//! character column of the fault, and a [`ParseErrorKind`] so callers can
//! match on the failure rather than on message text.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What went wrong while tokenizing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `"` appeared inside a field that did not start with one
    BareQuote,
    /// A quoted field was not closed, or its closing quote was followed by junk
    Quote,
    /// Delimiter or comment character is unusable
    InvalidDelimiter,
    /// Record width differs from the configured or inferred width
    FieldCount,
}

impl ParseErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ParseErrorKind::BareQuote => "bare \" in non-quoted-field",
            ParseErrorKind::Quote => "extraneous or missing \" in quoted-field",
            ParseErrorKind::InvalidDelimiter => "invalid delimiter",
            ParseErrorKind::FieldCount => "wrong number of fields",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Positioned CSV parse failure.
///
/// Lines are 1-based physical line numbers. `column` is a 1-based count of
/// characters (not bytes) and is `None` for failures that concern a whole
/// record or the reader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub start_line: usize,
    pub line: usize,
    pub column: Option<usize>,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(
        start_line: usize,
        line: usize,
        column: Option<usize>,
        kind: ParseErrorKind,
    ) -> Self {
        Self {
            start_line,
            line,
            column,
            kind,
        }
    }

    pub(crate) fn invalid_delimiter() -> Self {
        Self::new(0, 0, None, ParseErrorKind::InvalidDelimiter)
    }

    pub(crate) fn field_count(line: usize) -> Self {
        Self::new(line, line, None, ParseErrorKind::FieldCount)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.column) {
            (ParseErrorKind::InvalidDelimiter, _) => write!(f, "{}", self.kind),
            (ParseErrorKind::FieldCount, _) | (_, None) => {
                write!(f, "record on line {}: {}", self.line, self.kind)
            }
            (_, Some(column)) if self.start_line != self.line => write!(
                f,
                "record on line {}; parse error on line {}, column {}: {}",
                self.start_line, self.line, column, self.kind
            ),
            (_, Some(column)) => write!(
                f,
                "parse error on line {}, column {}: {}",
                self.line, column, self.kind
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Error, Debug)]
pub enum KeplerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Header expects {expected} fields but data row {row} has {found}")]
    HeaderFieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Header row requested but the input contains no records")]
    MissingHeader,

    #[error("Could not convert field '{field}' value '{value}': {reason}")]
    Conversion {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset not found at path: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl KeplerError {
    /// The positioned parse error, when this failure came from the tokenizer
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            KeplerError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KeplerError>;
