//! Error types for the CSV keyword library
//!
//! This module defines every error an accessor operation can surface.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: file not found, permission denied, failed rename
//! - **CSV Parsing Errors**: invalid UTF-8, records that do not match their header
//! - **Argument Errors**: bad delimiter, unknown quoting code, unparsable line numbers
//! - **Write Errors**: a field that cannot be written with quoting disabled
//! - **Field Errors**: a column name that is not part of the header

use std::path::Path;
use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CsvError>;

/// Main error type for CSV operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// File not found at the specified path
    ///
    /// Raised by every read path; never translated into an empty result.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error on {path}: {message}")]
    Io {
        /// File being accessed
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable but truncating: rows read before it stay valid.
    #[error("CSV parse error in {path}{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// File being parsed
        path: String,
        /// Line number where the offending record starts (if known)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Delimiter is not a single ASCII character
    #[error("Invalid delimiter '{delimiter}': expected a single ASCII character")]
    InvalidDelimiter {
        /// The rejected delimiter
        delimiter: String,
    },

    /// Quoting mode could not be recognised
    #[error("Invalid quoting mode '{value}': expected 0-3 or minimal, all, nonnumeric, none")]
    InvalidQuoting {
        /// The rejected value
        value: String,
    },

    /// A requested line number is not a non-negative integer
    #[error("Invalid line number '{value}'")]
    InvalidLineNumber {
        /// The rejected token
        value: String,
    },

    /// Field name absent from the header or fieldnames
    #[error("Unknown field '{field}'")]
    UnknownField {
        /// The field that was not found
        field: String,
    },

    /// Field cannot be written unquoted
    ///
    /// With quoting disabled a field holding the delimiter, a quote or a line
    /// break would change the row's shape, so nothing is written.
    #[error("Field '{field}' in {path} needs quoting, but quoting is none")]
    NeedsQuoting {
        /// Target path
        path: String,
        /// The offending field
        field: String,
    },

    /// Temp file could not replace the target
    #[error("Failed to replace {path}: {message}")]
    Persist {
        /// Target path
        path: String,
        /// Description of the failure
        message: String,
    },
}

impl CsvError {
    /// Attach a path to an I/O error, keeping "not found" distinct
    pub fn io(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            CsvError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            CsvError::Io {
                path: path.display().to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Attach a path to a csv error
    ///
    /// I/O failures surfaced through the csv reader keep their I/O category,
    /// everything else becomes a parse error carrying the record's line.
    pub fn csv(path: &Path, error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(e) => CsvError::io(path, e),
            _ => CsvError::Parse {
                path: path.display().to_string(),
                line,
                message,
            },
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(field: &str) -> Self {
        CsvError::UnknownField {
            field: field.to_string(),
        }
    }

    /// Whether this error only truncates a read rather than aborting it
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CsvError::Parse { .. })
    }
}
