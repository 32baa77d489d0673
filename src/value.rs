//! Loosely typed CSV field values and the coercion rules applied to them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DataError, Result};

/// A CSV field after numeric coercion.
///
/// Serializes as the bare number or string it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Integer parse, then float parse, else the original string.
    ///
    /// Surrounding whitespace is ignored by the numeric parses but kept in
    /// the text fallback.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(raw.to_string())
    }

    /// Same as [`Value::coerce`], except blank fields become `Integer(0)`.
    ///
    /// Used for yearly completions files, where suppressed counts are left
    /// empty.
    pub fn coerce_or_zero(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Value::Integer(0)
        } else {
            Value::coerce(raw)
        }
    }

    /// Numeric view of the value, for comparisons.
    pub fn as_f64(&self, column: &str, row: u64) -> Result<f64> {
        match self {
            Value::Integer(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::Text(_) => Err(self.mismatch(column, row, "a number")),
        }
    }

    /// Whole-number view of the value, for identifiers and counts.
    ///
    /// Floats are accepted only when they have no fractional part.
    pub fn as_integral(&self, column: &str, row: u64) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Ok(*f as i64)
            }
            _ => Err(self.mismatch(column, row, "a whole number")),
        }
    }

    /// Numeric equality with an integer code. Text never matches.
    pub fn equals_code(&self, code: i64) -> bool {
        match self {
            Value::Integer(i) => *i == code,
            Value::Float(f) => *f == code as f64,
            Value::Text(_) => false,
        }
    }

    fn mismatch(&self, column: &str, row: u64, expected: &'static str) -> DataError {
        DataError::TypeMismatch {
            column: column.to_string(),
            row,
            expected,
            found: self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}
