//! Core module
//!
//! This module contains the file operations built on top of `io`:
//! - `accessor` - The stateless `CsvAccessor` with every public operation
//! - `update` - Atomic write-then-rename replacement of a file

pub mod accessor;
pub mod update;

pub use accessor::{AppendData, CsvAccessor, DEFAULT_KEY_FIELD, DEFAULT_RESULT_FIELD};
pub use update::replace_atomically;
