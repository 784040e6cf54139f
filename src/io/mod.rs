//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - Dialect handling (delimiter, quoting, header projection)
//! - `sync_reader` - Streaming row and record readers with line selection
//! - `writer` - Append-mode writers

pub mod csv_format;
pub mod sync_reader;
pub mod writer;

pub use csv_format::{CsvFormat, DEFAULT_DELIMITER};
pub use sync_reader::{LineSelection, RecordReader, RowReader};
