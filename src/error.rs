//! Error types for data-shape failures in the input CSVs.

/// Failures caused by the content of an input file rather than by I/O.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A field was present but could not be used as the required type.
    #[error("column `{column}` on row {row}: expected {expected}, found {found:?}")]
    TypeMismatch {
        column: String,
        row: u64,
        expected: &'static str,
        found: String,
    },

    /// The header does not contain a column the pipeline depends on.
    #[error("column `{column}` not found in header of {path}")]
    MissingColumn { column: String, path: String },

    /// Summing degree counts left the range of an `i64`.
    #[error("degree total for unitid {unitid} overflows on row {row}")]
    CountOverflow { unitid: i64, row: u64 },

    /// A row ended before reaching a required column.
    #[error("row {row} has no value for column `{column}`")]
    MissingField { column: String, row: u64 },
}

/// Alias for Result with [`DataError`]
pub type Result<T> = std::result::Result<T, DataError>;
