use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Table error: {0}")]
    Table(#[from] CoreError),

    #[error("Failed to write chart to '{path}': {source}")]
    ChartWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
