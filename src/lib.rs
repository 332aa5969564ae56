//! Kepler Processor Library
//!
//! An async CSV record reader plus a small pipeline that selects
//! potentially habitable planets from the NASA Kepler Objects of Interest
//! table.
//!
//! This library provides tools for:
//! - Tokenizing CSV with RFC 4180 quoting, multi-line fields, comment lines
//!   and configurable delimiters ([`reader`])
//! - Mapping records onto header names with per-field converters ([`header`])
//! - Filtering planets by disposition and numeric thresholds ([`filter`])
//! - Running the whole pipeline over a dataset file ([`processor`])
//!
//! ## Usage
//!
//! ```rust
//! use kepler_processor::{HeaderSpec, ReaderOptions, parse_str};
//!
//! # async fn example() -> kepler_processor::Result<()> {
//! let options = ReaderOptions::default().with_header(HeaderSpec::FirstRow);
//! let rows = parse_str("name,age\nAda,30\n", &options).await?;
//!
//! let record = rows[0].as_record().unwrap();
//! assert_eq!(record.get_str("name"), Some("Ada"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod header;
pub mod models;
pub mod processor;
pub mod reader;

// Re-export commonly used types
pub use config::{Bounds, HabitabilityCriteria, KeplerConfig, ReaderOptions};
pub use error::{KeplerError, ParseError, ParseErrorKind, Result};
pub use filter::PlanetFilter;
pub use header::{
    FieldConverter, HeaderField, HeaderSpec, converters, parse, parse_str, parse_with,
};
pub use models::{
    FieldValue, ParsedRow, PlanetSummary, ProcessingResult, ProcessingStats, Record,
};
pub use processor::PlanetProcessor;
pub use reader::{RecordReader, read_matrix};
