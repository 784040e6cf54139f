//! Row and record types
//!
//! A [`Row`] is the positional view of one CSV line. A [`Record`] is the
//! field-name-keyed view of the same line; it keeps insertion order so that
//! fieldnames derived from a record's keys come out in the order they were
//! written.

/// Ordered sequence of string fields from one CSV line
pub type Row = Vec<String>;

/// Field-name-keyed view of a row
///
/// Keys are unique. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair each header name with the field at the same position
    ///
    /// Callers are expected to have checked that both sides have the same length.
    /// Duplicate header names collapse into one key holding the last value.
    pub fn from_header(header: &[String], row: Row) -> Self {
        header.iter().cloned().zip(row).collect()
    }

    /// Value for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, returning the previous value if the key existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Whether the record has an entry for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Project the record onto `fieldnames`
    ///
    /// Missing fields become empty strings.
    pub fn to_row(&self, fieldnames: &[String]) -> Row {
        fieldnames
            .iter()
            .map(|name| self.get(name).unwrap_or_default().to_string())
            .collect()
    }

    /// Flatten into `key, value, key, value, ...`
    pub fn to_flat_row(&self) -> Row {
        self.fields
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
