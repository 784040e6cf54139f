//! Types module
//!
//! Contains core data structures used throughout the library.
//! - `record`: Row and Record
//! - `quoting`: Quoting modes
//! - `error`: Error types

pub mod error;
pub mod quoting;
pub mod record;

pub use error::{CsvError, Result};
pub use quoting::Quoting;
pub use record::{Record, Row};
