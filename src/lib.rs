//! CSV Keywords Library
//! # Overview
//!
//! This library reads, writes and incrementally updates CSV files through a
//! stateless [`CsvAccessor`], the shape test-automation suites expect from a
//! keyword library.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Row, Record, Quoting, CsvError)
//! - [`io`] - Dialect handling, streaming readers and append-mode writers
//! - [`core`] - The accessor operations and atomic file replacement
//!
//! # Operations
//!
//! - **empty**: truncate a file, creating it if absent
//! - **read_rows / read_records**: bulk or selective (by zero-based line set) reads
//! - **append**: add rows, or records flattened into key/value rows, without a header
//! - **write_from_records**: replace a file with a header row and records
//! - **find_record**: first record whose key column equals a value
//! - **update_one_record**: set one field of the first matching record, via
//!   a temp file renamed over the original
//!
//! # Quoting
//!
//! Four modes, with the conventional integer codes:
//! - `0` **Minimal**: quote only when needed
//! - `1` **All**: quote every field
//! - `2` **NonNumeric**: quote every non-numeric field
//! - `3` **None**: never quote

// Module declarations
pub mod core;
pub mod io;
pub mod types;

pub use core::{AppendData, CsvAccessor, DEFAULT_KEY_FIELD, DEFAULT_RESULT_FIELD};
pub use io::{CsvFormat, LineSelection, RecordReader, RowReader};
pub use types::{CsvError, Quoting, Record, Result, Row};
