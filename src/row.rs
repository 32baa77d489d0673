//! Header lookup and per-row field access over `csv` records.

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::{DataError, Result};
use crate::value::Value;

/// A resolved column: its header label and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

/// Column names of a CSV file mapped to their positions.
///
/// When a name appears more than once the last occurrence wins.
#[derive(Debug, Clone)]
pub struct Header {
    positions: HashMap<String, usize>,
}

impl Header {
    /// Builds a header using labels exactly as written.
    pub fn exact(record: &StringRecord) -> Self {
        Self::build(record, |s| s.to_string())
    }

    /// Builds a header with every label lowercased.
    pub fn lowercased(record: &StringRecord) -> Self {
        Self::build(record, str::to_lowercase)
    }

    fn build(record: &StringRecord, normalize: impl Fn(&str) -> String) -> Self {
        let positions = record
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize(name), i))
            .collect();
        Self { positions }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Resolves `name` or fails with [`DataError::MissingColumn`].
    ///
    /// `path` only feeds the error message.
    pub fn column(&self, name: &str, path: &str) -> Result<Column> {
        self.positions
            .get(name)
            .map(|&index| Column {
                name: name.to_string(),
                index,
            })
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
                path: path.to_string(),
            })
    }
}

/// One data line of a CSV file, with its 1-based row number.
pub struct RawRow<'a> {
    record: &'a StringRecord,
    pub row: u64,
}

impl<'a> RawRow<'a> {
    pub fn new(record: &'a StringRecord, row: u64) -> Self {
        Self { record, row }
    }

    /// The unparsed field under `column`.
    pub fn raw(&self, column: &Column) -> Result<&'a str> {
        self.record
            .get(column.index)
            .ok_or_else(|| DataError::MissingField {
                column: column.name.clone(),
                row: self.row,
            })
    }

    /// Field coerced with [`Value::coerce`].
    pub fn value(&self, column: &Column) -> Result<Value> {
        self.raw(column).map(Value::coerce)
    }

    /// Field coerced with [`Value::coerce_or_zero`].
    pub fn value_or_zero(&self, column: &Column) -> Result<Value> {
        self.raw(column).map(Value::coerce_or_zero)
    }
}
