//! CSV dialect handling
//!
//! This module centralizes all CSV format concerns, providing:
//! - `CsvFormat`, the delimiter + quoting pair every operation takes
//! - Reader and writer builders configured from a `CsvFormat`
//! - Record projection helpers for header handling
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{CsvError, Quoting, Record, Result, Row};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

/// Default field delimiter
pub const DEFAULT_DELIMITER: &str = ",";

/// Dialect used to read or write a file
///
/// The delimiter is kept as a string because callers hand it over in that
/// form; it is validated when a reader or writer is built.
///
/// # Examples
///
/// ```
/// use csv_keywords::io::CsvFormat;
/// use csv_keywords::Quoting;
///
/// let format = CsvFormat::default()
///     .with_delimiter(";")
///     .with_quoting(Quoting::All);
/// assert!(format.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFormat {
    pub delimiter: String,
    pub quoting: Quoting,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            quoting: Quoting::default(),
        }
    }
}

impl CsvFormat {
    pub fn new(delimiter: impl Into<String>, quoting: Quoting) -> Self {
        Self {
            delimiter: delimiter.into(),
            quoting,
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// The delimiter as the single byte the csv crate expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(CsvError::InvalidDelimiter {
                delimiter: self.delimiter.clone(),
            }),
        }
    }

    /// Check the dialect without building anything
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte().map(|_| ())
    }

    /// Reader builder for this dialect
    ///
    /// Headers are never consumed by the csv crate itself: header handling
    /// belongs to the record reader so that line positions stay under our
    /// control. Rows may differ in length: `append` writes flattened records
    /// after a shorter header, and those must read back.
    pub fn reader_builder(&self) -> Result<ReaderBuilder> {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter_byte()?)
            .quoting(self.quoting.reads_quotes())
            .has_headers(false)
            .flexible(true)
            .buffer_capacity(8 * 1024);
        Ok(builder)
    }

    /// Writer builder for this dialect
    ///
    /// Flattened records from `append` may differ in length from earlier
    /// rows, so the writer does not enforce equal lengths.
    pub fn writer_builder(&self) -> Result<WriterBuilder> {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter_byte()?)
            .quote_style(self.quoting.quote_style())
            .has_headers(false)
            .flexible(true);
        Ok(builder)
    }
}

/// Fieldnames to write for a batch of records
///
/// Explicit fieldnames win; otherwise the first record's keys are used.
pub fn resolve_fieldnames(records: &[Record], fieldnames: Option<&[String]>) -> Vec<String> {
    match fieldnames {
        Some(names) => names.to_vec(),
        None => records
            .first()
            .map(|record| record.keys().map(str::to_string).collect())
            .unwrap_or_default(),
    }
}

/// Reject records carrying keys outside `fieldnames`
pub fn check_record_fields(records: &[Record], fieldnames: &[String]) -> Result<()> {
    for record in records {
        if let Some(extra) = record
            .keys()
            .find(|key| !fieldnames.iter().any(|name| name == key))
        {
            return Err(CsvError::unknown_field(extra));
        }
    }
    Ok(())
}

/// Project every record onto `fieldnames`, header row first
pub fn records_to_rows(records: &[Record], fieldnames: &[String]) -> Vec<Row> {
    std::iter::once(fieldnames.to_vec())
        .chain(records.iter().map(|record| record.to_row(fieldnames)))
        .collect()
}
