use core_types::CoreError;
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read or write '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Column '{column}' is missing from '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("'{path}' row {row}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("Month {month} appears more than once in '{path}'")]
    DuplicateMonth { path: PathBuf, month: String },

    #[error("Table error: {0}")]
    Table(#[from] CoreError),
}
