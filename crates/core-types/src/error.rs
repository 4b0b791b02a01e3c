use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unparseable date '{0}'")]
    InvalidDate(String),

    #[error("Index must be strictly increasing: {previous} is followed by {next}")]
    UnorderedIndex { previous: String, next: String },

    #[error("Column '{0}' already exists in the table")]
    DuplicateColumn(String),

    #[error("Column '{0}' was not found in the table")]
    ColumnNotFound(String),

    #[error("Column '{column}' has {found} values but the index has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Frame operation failed: {0}")]
    Frame(#[from] PolarsError),
}
