//! CSV accessor
//!
//! The stateless entry point for every file operation: bulk reads, selective
//! reads, writes and appends, and the find/update pair that works on a
//! header-keyed file. Each call opens, consumes and closes its file.
//!
//! # Error Handling
//!
//! - A missing file on any read path is `CsvError::FileNotFound`
//! - In `read_rows` / `read_records` a malformed record is logged with file
//!   and line and ends the read; the rows before it are returned
//! - `find_record` and `update_one_record` read the whole file and fail on a
//!   malformed record, so an update never rewrites a truncated file

use crate::core::update::replace_atomically_with;
use crate::io::csv_format::{check_record_fields, records_to_rows, resolve_fieldnames, CsvFormat};
use crate::io::sync_reader::{LineSelection, RecordReader, RowReader};
use crate::io::writer::{append_rows, overwrite_rows, truncate};
use crate::types::{CsvError, Record, Result, Row};
use std::path::Path;
use tracing::{debug, error, warn};

/// Default key column used by [`CsvAccessor::update_test_result`] and
/// [`CsvAccessor::get_test_data`]
pub const DEFAULT_KEY_FIELD: &str = "test_name";

/// Default result column used by [`CsvAccessor::update_test_result`]
pub const DEFAULT_RESULT_FIELD: &str = "test_result";

/// Input to [`CsvAccessor::append`]
#[derive(Debug, Clone, PartialEq)]
pub enum AppendData {
    /// Rows written as-is
    Rows(Vec<Row>),
    /// Records flattened into `key, value, key, value, ...` rows, no header
    Records(Vec<Record>),
}

impl AppendData {
    fn into_rows(self) -> Vec<Row> {
        match self {
            AppendData::Rows(rows) => rows,
            AppendData::Records(records) => records.iter().map(Record::to_flat_row).collect(),
        }
    }
}

impl From<Vec<Row>> for AppendData {
    fn from(rows: Vec<Row>) -> Self {
        AppendData::Rows(rows)
    }
}

impl From<Vec<Record>> for AppendData {
    fn from(records: Vec<Record>) -> Self {
        AppendData::Records(records)
    }
}

/// Drain `items`, stopping at the first parse error
///
/// The parse error is logged and the rows read so far are kept. Any other
/// error is returned.
fn collect_until_parse_error<T>(items: impl Iterator<Item = Result<T>>) -> Result<Vec<T>> {
    let mut collected = Vec::new();
    for item in items {
        match item {
            Ok(value) => collected.push(value),
            Err(CsvError::Parse {
                path,
                line,
                message,
            }) => {
                error!(file = %path, line = ?line, rows_read = collected.len(), "{}", message);
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(collected)
}

/// Fail unless `field` is one of the header names
fn require_field(header: &[String], field: &str) -> Result<()> {
    if header.iter().any(|name| name == field) {
        Ok(())
    } else {
        Err(CsvError::unknown_field(field))
    }
}

/// Stateless accessor exposing every CSV operation
///
/// # Examples
///
/// ```no_run
/// use csv_keywords::{CsvAccessor, CsvFormat};
/// use std::path::Path;
///
/// let csv = CsvAccessor::new();
/// let path = Path::new("report.csv");
///
/// let record = csv.find_record(path, "2", "id").unwrap();
/// if record.is_empty() {
///     println!("no such id");
/// }
/// csv.update_one_record(path, "2", "done", "id", "status").unwrap();
/// let rows = csv.read_rows(path, &CsvFormat::default(), None).unwrap();
/// println!("{} rows", rows.len());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvAccessor;

impl CsvAccessor {
    pub fn new() -> Self {
        CsvAccessor
    }

    /// Truncate `path` to zero length, creating it if absent
    pub fn empty(&self, path: &Path) -> Result<()> {
        truncate(path)?;
        debug!(file = %path.display(), "emptied");
        Ok(())
    }

    /// Read rows, optionally only those at the selected zero-based positions
    ///
    /// Output follows file order. A malformed record ends the read early; the
    /// rows before it are returned.
    pub fn read_rows(
        &self,
        path: &Path,
        format: &CsvFormat,
        line_numbers: Option<LineSelection>,
    ) -> Result<Vec<Row>> {
        let reader = RowReader::open(path, format, line_numbers)?;
        let rows = collect_until_parse_error(reader)?;
        debug!(file = %path.display(), rows = rows.len(), "read rows");
        Ok(rows)
    }

    /// Read records keyed by the header row or by `fieldnames`
    ///
    /// Without `fieldnames` the first row is the header and is not counted in
    /// `line_numbers`. With `fieldnames` every row is data. A row whose field
    /// count differs from the keys ends the read like any malformed record.
    pub fn read_records(
        &self,
        path: &Path,
        format: &CsvFormat,
        fieldnames: Option<Vec<String>>,
        line_numbers: Option<LineSelection>,
    ) -> Result<Vec<Record>> {
        let reader = RecordReader::open(path, format, fieldnames, line_numbers)?;
        let records = collect_until_parse_error(reader)?;
        debug!(file = %path.display(), records = records.len(), "read records");
        Ok(records)
    }

    /// Append rows or flattened records to `path`, creating it if absent
    ///
    /// No header is ever written and existing content is never rewritten.
    pub fn append(&self, path: &Path, data: AppendData, format: &CsvFormat) -> Result<()> {
        let rows = data.into_rows();
        let written = append_rows(path, &rows, format)?;
        debug!(file = %path.display(), rows = written, "appended");
        Ok(())
    }

    /// Write `data` under a single header row, replacing the file's content
    ///
    /// Fieldnames default to the first record's keys. Missing fields are
    /// written empty; a key outside the fieldnames is rejected before the file
    /// is touched.
    pub fn write_from_records(
        &self,
        path: &Path,
        data: &[Record],
        fieldnames: Option<&[String]>,
        format: &CsvFormat,
    ) -> Result<()> {
        let fieldnames = resolve_fieldnames(data, fieldnames);
        check_record_fields(data, &fieldnames)?;

        let rows = if fieldnames.is_empty() {
            Vec::new()
        } else {
            records_to_rows(data, &fieldnames)
        };
        let written = overwrite_rows(path, &rows, format)?;
        debug!(file = %path.display(), rows = written, "wrote records with header");
        Ok(())
    }

    /// Set `result_field_name` on the first record whose `key_field_name`
    /// equals `match_field_value`
    ///
    /// The file is rewritten through a temp file and a rename, so a failure
    /// leaves the original untouched. When no record matches nothing is
    /// written.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if a record was updated
    /// * `Ok(false)` if no record matched
    /// * `Err(CsvError::UnknownField)` if either column is not in the header
    pub fn update_one_record(
        &self,
        path: &Path,
        match_field_value: &str,
        new_result_value: &str,
        key_field_name: &str,
        result_field_name: &str,
    ) -> Result<bool> {
        self.update_one_record_with(
            path,
            match_field_value,
            new_result_value,
            key_field_name,
            result_field_name,
            |_| Ok(()),
        )
    }

    pub(crate) fn update_one_record_with<F>(
        &self,
        path: &Path,
        match_field_value: &str,
        new_result_value: &str,
        key_field_name: &str,
        result_field_name: &str,
        before_commit: F,
    ) -> Result<bool>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let format = CsvFormat::default();
        let reader = RecordReader::open(path, &format, None, None)?;
        let header = reader.header().to_vec();
        let mut records = reader.collect::<Result<Vec<_>>>()?;

        if header.is_empty() {
            warn!(file = %path.display(), "no header, nothing to update");
            return Ok(false);
        }
        require_field(&header, key_field_name)?;
        require_field(&header, result_field_name)?;

        let Some(record) = records
            .iter_mut()
            .find(|record| record.get(key_field_name) == Some(match_field_value))
        else {
            warn!(
                file = %path.display(),
                key = key_field_name,
                value = match_field_value,
                "no matching record, file left unchanged"
            );
            return Ok(false);
        };
        record.insert(result_field_name, new_result_value);

        let rows = records_to_rows(&records, &header);
        replace_atomically_with(path, &rows, &format, before_commit)?;
        debug!(
            file = %path.display(),
            key = key_field_name,
            value = match_field_value,
            field = result_field_name,
            "updated record"
        );
        Ok(true)
    }

    /// First record whose `key_field_name` equals `match_value`
    ///
    /// Returns an empty record when nothing matches.
    pub fn find_record(&self, path: &Path, match_value: &str, key_field_name: &str) -> Result<Record> {
        let reader = RecordReader::open(path, &CsvFormat::default(), None, None)?;
        if !reader.header().is_empty() {
            require_field(reader.header(), key_field_name)?;
        }

        for record in reader {
            let record = record?;
            if record.get(key_field_name) == Some(match_value) {
                return Ok(record);
            }
        }
        Ok(Record::new())
    }

    /// [`update_one_record`](Self::update_one_record) keyed on the
    /// `test_name` column, writing to `test_result`
    pub fn update_test_result(&self, path: &Path, test_name: &str, test_result: &str) -> Result<bool> {
        self.update_one_record(
            path,
            test_name,
            test_result,
            DEFAULT_KEY_FIELD,
            DEFAULT_RESULT_FIELD,
        )
    }

    /// [`find_record`](Self::find_record) keyed on the `test_name` column
    pub fn get_test_data(&self, path: &Path, test_name: &str) -> Result<Record> {
        self.find_record(path, test_name, DEFAULT_KEY_FIELD)
    }
}
