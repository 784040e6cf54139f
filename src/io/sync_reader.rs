//! Synchronous CSV readers with iterator interface
//!
//! Provides streaming iterators over the rows or records of a CSV file, with
//! optional selection of zero-based line positions.
//!
//! # Design
//!
//! `RowReader` wraps a `csv::Reader` configured from a [`CsvFormat`] and reads
//! one physical record at a time into a reused `StringRecord`. `RecordReader`
//! sits on top of it and pairs each row with the header (or explicit
//! fieldnames).
//!
//! ```no_run
//! use csv_keywords::io::{CsvFormat, LineSelection, RowReader};
//! use std::path::Path;
//!
//! let selection: LineSelection = [0, 2].into_iter().collect();
//! let reader = RowReader::open(Path::new("data.csv"), &CsvFormat::default(), Some(selection)).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(row) => println!("{:?}", row),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Opening errors (file not found, bad delimiter) are returned from `open()`
//! - A malformed record (invalid UTF-8, I/O failure mid-file) is yielded once
//!   as an `Err` item carrying the file and line, after which the iterator is
//!   exhausted
//! - `RowReader` accepts rows of any length. `RecordReader` treats a row whose
//!   field count differs from the header as malformed
//! - Rows yielded before the error remain valid
//!
//! # Line Positions
//!
//! Positions count data rows from zero. For `RecordReader` with an inferred
//! header the header row is not counted. Output always follows file order and
//! reading stops as soon as every selected position has been yielded.
//!
//! Blank lines are skipped by the csv parser and take no position, so on a
//! file with blank lines a position counts non-empty rows only, not physical
//! lines.

use crate::io::csv_format::CsvFormat;
use crate::types::{CsvError, Record, Result, Row};
use csv::StringRecord;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Set of zero-based row positions to read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSelection {
    pending: BTreeSet<u64>,
}

impl LineSelection {
    /// Consume `position` if it was requested
    fn take(&mut self, position: u64) -> bool {
        self.pending.remove(&position)
    }

    /// Whether every requested position has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FromIterator<u64> for LineSelection {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}

/// Parses `"0, 2 5"`: numbers separated by commas and/or whitespace
impl FromStr for LineSelection {
    type Err = CsvError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u64>().map_err(|_| CsvError::InvalidLineNumber {
                    value: token.to_string(),
                })
            })
            .collect()
    }
}

/// Streaming reader over the rows of a CSV file
#[derive(Debug)]
pub struct RowReader {
    path: PathBuf,
    reader: csv::Reader<File>,
    record: StringRecord,
    position: u64,
    line: Option<u64>,
    selection: Option<LineSelection>,
    done: bool,
}

impl RowReader {
    /// Open `path` for streaming
    ///
    /// # Returns
    ///
    /// * `Ok(RowReader)` if the file opened and the dialect is valid
    /// * `Err(CsvError::FileNotFound)` if the file does not exist
    pub fn open(path: &Path, format: &CsvFormat, selection: Option<LineSelection>) -> Result<Self> {
        let builder = format.reader_builder()?;
        let file = File::open(path).map_err(|e| CsvError::io(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: builder.from_reader(file),
            record: StringRecord::new(),
            position: 0,
            line: None,
            selection,
            done: false,
        })
    }

    /// Read one physical row without counting it as a data position
    ///
    /// Used to consume a header row.
    pub(crate) fn read_unpositioned(&mut self) -> Option<Result<Row>> {
        if self.done {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                self.line = self.record.position().map(|pos| pos.line());
                Some(Ok(self.record.iter().map(str::to_string).collect()))
            }
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(CsvError::csv(&self.path, e)))
            }
        }
    }

    /// Build a parse error located at the current line and end the stream
    pub(crate) fn fail(&mut self, message: String) -> CsvError {
        self.done = true;
        CsvError::Parse {
            path: self.path.display().to_string(),
            line: self.line,
            message,
        }
    }
}

impl Iterator for RowReader {
    type Item = Result<Row>;

    /// Yield the next selected row
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Row))` - next row in file order that matches the selection
    /// * `Some(Err(CsvError))` - malformed record; the iterator ends after it
    /// * `None` - end of file, or every selected position was already yielded
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self
                .selection
                .as_ref()
                .is_some_and(LineSelection::is_exhausted)
            {
                self.done = true;
            }

            let row = match self.read_unpositioned()? {
                Ok(row) => row,
                Err(e) => return Some(Err(e)),
            };

            let position = self.position;
            self.position += 1;

            match self.selection.as_mut() {
                None => return Some(Ok(row)),
                Some(selection) => {
                    if selection.take(position) {
                        return Some(Ok(row));
                    }
                }
            }
        }
    }
}

/// Streaming reader over the records of a CSV file
///
/// Each row is paired with the header names. A row whose field count differs
/// from the header is a parse error: no overflow key is invented and no short
/// record is produced.
#[derive(Debug)]
pub struct RecordReader {
    rows: RowReader,
    header: Vec<String>,
    pending_error: Option<CsvError>,
}

impl RecordReader {
    /// Open `path` for streaming records
    ///
    /// Without `fieldnames` the first physical row is consumed as the header.
    /// With `fieldnames` every physical row is data.
    pub fn open(
        path: &Path,
        format: &CsvFormat,
        fieldnames: Option<Vec<String>>,
        selection: Option<LineSelection>,
    ) -> Result<Self> {
        let mut rows = RowReader::open(path, format, selection)?;
        let mut pending_error = None;

        let header = match fieldnames {
            Some(names) => names,
            None => match rows.read_unpositioned() {
                Some(Ok(header)) => header,
                Some(Err(e)) => {
                    pending_error = Some(e);
                    Vec::new()
                }
                None => Vec::new(),
            },
        };

        Ok(Self {
            rows,
            header,
            pending_error,
        })
    }

    /// Field names used as record keys
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

impl Iterator for RecordReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_error.take() {
            return Some(Err(e));
        }

        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };

        if row.len() != self.header.len() {
            let message = format!(
                "record has {} fields, but the header has {} fields",
                row.len(),
                self.header.len()
            );
            return Some(Err(self.rows.fail(message)));
        }

        Some(Ok(Record::from_header(&self.header, row)))
    }
}
