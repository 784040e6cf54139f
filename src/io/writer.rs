//! CSV output
//!
//! Every write goes through a file opened in append mode, created if absent.
//! `write_rows` appends to whatever is already there; `overwrite_rows`
//! truncates the same handle first.

use crate::io::csv_format::CsvFormat;
use crate::types::{CsvError, Quoting, Result, Row};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

fn open_for_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| CsvError::io(path, e))
}

/// Reject fields that cannot be written without quotes
///
/// Only applies to `Quoting::None`, where the writer never quotes.
pub fn check_unquoted_fields(rows: &[Row], format: &CsvFormat, path: &Path) -> Result<()> {
    if format.quoting != Quoting::None {
        return Ok(());
    }
    let delimiter = format.delimiter_byte()?;
    let needs_quoting =
        |field: &str| field.bytes().any(|b| b == delimiter || matches!(b, b'"' | b'\n' | b'\r'));

    match rows.iter().flatten().find(|field| needs_quoting(field)) {
        Some(field) => Err(CsvError::NeedsQuoting {
            path: path.display().to_string(),
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

/// Serialize `rows` into `output` using `format`
///
/// Every row is checked before the first byte is written. Returns the number
/// of rows written.
pub fn write_csv<W: Write>(output: W, rows: &[Row], format: &CsvFormat, path: &Path) -> Result<usize> {
    check_unquoted_fields(rows, format, path)?;
    let mut writer = format.writer_builder()?.from_writer(output);

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| CsvError::csv(path, e))?;
    }

    writer.flush().map_err(|e| CsvError::io(path, e))?;
    Ok(rows.len())
}

/// Append `rows` to `path` without touching existing content
pub fn append_rows(path: &Path, rows: &[Row], format: &CsvFormat) -> Result<usize> {
    format.validate()?;
    check_unquoted_fields(rows, format, path)?;
    let file = open_for_append(path)?;
    write_csv(file, rows, format, path)
}

/// Replace the content of `path` with `rows`
///
/// Opens the file for append like every other write, then truncates the
/// handle before writing.
pub fn overwrite_rows(path: &Path, rows: &[Row], format: &CsvFormat) -> Result<usize> {
    format.validate()?;
    check_unquoted_fields(rows, format, path)?;
    let file = open_for_append(path)?;
    file.set_len(0).map_err(|e| CsvError::io(path, e))?;
    write_csv(file, rows, format, path)
}

/// Truncate `path` to zero length, creating it if absent
pub fn truncate(path: &Path) -> Result<()> {
    File::create(path)
        .map(|_| ())
        .map_err(|e| CsvError::io(path, e))
}
