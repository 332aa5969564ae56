//! Async CSV record tokenizer.
//!
//! Reads one logical record at a time from any [`AsyncBufRead`], following
//! RFC 4180 quoting: quoted fields may contain the delimiter, doubled quotes
//! and line breaks. Every physical line read is an await point, so a reader
//! over a file or socket never blocks the runtime.

use crate::config::ReaderOptions;
use crate::constants::QUOTE;
use crate::error::{ParseError, ParseErrorKind, Result};
use futures::stream::{self, Stream};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Width policy applied to accepted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldWidth {
    Unchecked,
    Infer,
    Fixed(usize),
}

impl FieldWidth {
    fn from_option(fields_per_record: Option<usize>) -> Self {
        match fields_per_record {
            None => FieldWidth::Unchecked,
            Some(0) => FieldWidth::Infer,
            Some(n) => FieldWidth::Fixed(n),
        }
    }

    fn check(&mut self, found: usize, line: usize) -> std::result::Result<(), ParseError> {
        match *self {
            FieldWidth::Unchecked => Ok(()),
            FieldWidth::Infer => {
                *self = FieldWidth::Fixed(found);
                Ok(())
            }
            FieldWidth::Fixed(expected) if expected == found => Ok(()),
            FieldWidth::Fixed(_) => Err(ParseError::field_count(line)),
        }
    }
}

/// Stateful reader producing raw records from a buffered async stream
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: R,
    options: ReaderOptions,
    /// Physical lines consumed so far
    line: usize,
    /// Line on which the most recently read record started
    record_line: usize,
}

impl<R: AsyncBufRead + Unpin> RecordReader<R> {
    /// Wrap `reader`, validating the delimiter configuration up front
    pub fn new(reader: R, options: ReaderOptions) -> std::result::Result<Self, ParseError> {
        options.validate()?;
        Ok(Self {
            reader,
            options,
            line: 0,
            record_line: 0,
        })
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Number of physical lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    /// Starting line of the record most recently returned by [`Self::read_record`]
    pub fn record_line(&self) -> usize {
        self.record_line
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    async fn is_eof(&mut self) -> Result<bool> {
        Ok(self.reader.fill_buf().await?.is_empty())
    }

    /// Next physical line without its terminator
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        self.line += 1;

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        } else if line.ends_with('\r') {
            // No terminator means end of stream
            line.pop();
        }

        Ok(Some(line))
    }

    /// Read one logical record.
    ///
    /// Returns `Ok(None)` once the stream is exhausted, and an empty field
    /// list for blank lines and comment lines.
    pub async fn read_record(&mut self) -> Result<Option<Vec<String>>> {
        let Some(mut full) = self.read_line().await? else {
            return Ok(None);
        };
        let start_line = self.line;
        self.record_line = start_line;

        if full.is_empty()
            || self
                .options
                .comment
                .is_some_and(|comment| full.starts_with(comment))
        {
            return Ok(Some(Vec::new()));
        }

        let comma = self.options.comma;
        let lazy_quotes = self.options.lazy_quotes;
        let mut pos = 0;
        let mut buffer = String::with_capacity(full.len());
        let mut field_ends = Vec::new();

        'fields: loop {
            if self.options.trim_leading_space {
                let rest = &full[pos..];
                pos += rest.len() - rest.trim_start().len();
            }

            if !full[pos..].starts_with(QUOTE) {
                let rest = &full[pos..];
                let delimiter = rest.find(comma);
                let field = &rest[..delimiter.unwrap_or(rest.len())];

                if !lazy_quotes {
                    if let Some(quote) = field.find(QUOTE) {
                        return Err(ParseError::new(
                            start_line,
                            self.line,
                            Some(column_at(&full, pos + quote)),
                            ParseErrorKind::BareQuote,
                        )
                        .into());
                    }
                }

                buffer.push_str(field);
                field_ends.push(buffer.len());

                match delimiter {
                    Some(i) => {
                        pos += i + comma.len_utf8();
                        continue 'fields;
                    }
                    None => break 'fields,
                }
            }

            pos += QUOTE.len_utf8();
            loop {
                let rest = &full[pos..];
                if let Some(i) = rest.find(QUOTE) {
                    buffer.push_str(&rest[..i]);
                    pos += i + QUOTE.len_utf8();

                    let after = &full[pos..];
                    if after.starts_with(QUOTE) {
                        buffer.push(QUOTE);
                        pos += QUOTE.len_utf8();
                    } else if after.starts_with(comma) {
                        pos += comma.len_utf8();
                        field_ends.push(buffer.len());
                        continue 'fields;
                    } else if after.is_empty() {
                        field_ends.push(buffer.len());
                        break 'fields;
                    } else if lazy_quotes {
                        buffer.push(QUOTE);
                    } else {
                        return Err(ParseError::new(
                            start_line,
                            self.line,
                            Some(column_at(&full, pos - QUOTE.len_utf8())),
                            ParseErrorKind::Quote,
                        )
                        .into());
                    }
                } else if !rest.is_empty() || !self.is_eof().await? {
                    buffer.push_str(rest);
                    match self.read_line().await? {
                        Some(next) => {
                            full = next;
                            pos = 0;
                            buffer.push('\n');
                        }
                        None => {
                            self.unterminated(start_line, &full)?;
                            field_ends.push(buffer.len());
                            break 'fields;
                        }
                    }
                } else {
                    self.unterminated(start_line, &full)?;
                    field_ends.push(buffer.len());
                    break 'fields;
                }
            }
        }

        Ok(Some(split_fields(&buffer, &field_ends)))
    }

    /// End of input inside a quoted field; tolerated only with lazy quotes
    fn unterminated(&self, start_line: usize, full: &str) -> std::result::Result<(), ParseError> {
        if self.options.lazy_quotes {
            return Ok(());
        }
        Err(ParseError::new(
            start_line,
            self.line,
            Some(full.chars().count() + 1),
            ParseErrorKind::Quote,
        ))
    }

    /// Next non-empty record that passes the width policy
    async fn next_accepted(&mut self, width: &mut FieldWidth) -> Result<Option<Vec<String>>> {
        while let Some(record) = self.read_record().await? {
            if record.is_empty() {
                continue;
            }
            width.check(record.len(), self.record_line)?;
            return Ok(Some(record));
        }
        Ok(None)
    }

    /// Read every remaining record, skipping blank and comment lines
    pub async fn read_matrix(&mut self) -> Result<Vec<Vec<String>>> {
        let mut width = FieldWidth::from_option(self.options.fields_per_record);
        let mut records = Vec::new();

        while let Some(record) = self.next_accepted(&mut width).await? {
            records.push(record);
        }

        debug!(
            "Read {} records from {} lines (width policy: {:?})",
            records.len(),
            self.line,
            width
        );
        Ok(records)
    }

    /// Accepted records as a stream, with the same rules as [`Self::read_matrix`]
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<String>>> {
        let width = FieldWidth::from_option(self.options.fields_per_record);
        stream::try_unfold((self, width), |(mut reader, mut width)| async move {
            let next = reader.next_accepted(&mut width).await;
            next.map(|record| record.map(|fields| (fields, (reader, width))))
        })
    }
}

/// Validate `options` and read the whole of `reader` into raw records
pub async fn read_matrix<R>(reader: R, options: &ReaderOptions) -> Result<Vec<Vec<String>>>
where
    R: AsyncBufRead + Unpin,
{
    RecordReader::new(reader, options.clone())?
        .read_matrix()
        .await
}

/// 1-based character column of `byte_offset` within `line`
fn column_at(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

fn split_fields(buffer: &str, field_ends: &[usize]) -> Vec<String> {
    let mut fields = Vec::with_capacity(field_ends.len());
    let mut start = 0;
    for &end in field_ends {
        fields.push(buffer[start..end].to_string());
        start = end;
    }
    fields
}
