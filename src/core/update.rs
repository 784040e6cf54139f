//! Write-then-rename replacement of a CSV file
//!
//! The new content goes to a temp file in the target's own directory so the
//! final rename stays on one filesystem. Until `persist` succeeds the original
//! file is never opened for writing, and the temp file is removed when the
//! `NamedTempFile` is dropped on any error path.

use crate::io::csv_format::CsvFormat;
use crate::io::writer::write_csv;
use crate::types::{CsvError, Result, Row};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// Directory the temp file is created in
fn target_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Replace `path` with `rows`, atomically
pub fn replace_atomically(path: &Path, rows: &[Row], format: &CsvFormat) -> Result<()> {
    replace_atomically_with(path, rows, format, |_| Ok(()))
}

/// Same as [`replace_atomically`], running `before_commit` between the temp
/// write and the rename
///
/// An error from `before_commit` aborts the replacement.
pub(crate) fn replace_atomically_with<F>(
    path: &Path,
    rows: &[Row],
    format: &CsvFormat,
    before_commit: F,
) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    format.validate()?;
    let mut tmp = NamedTempFile::new_in(target_dir(path)).map_err(|e| CsvError::io(path, e))?;

    write_csv(tmp.as_file_mut(), rows, format, path)?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CsvError::io(tmp.path(), e))?;

    // NamedTempFile is created 0600; keep the original's mode
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| CsvError::io(tmp.path(), e))?;
    }

    before_commit(tmp.path())?;

    tmp.persist(path).map_err(|e| CsvError::Persist {
        path: path.display().to_string(),
        message: e.error.to_string(),
    })?;
    Ok(())
}
