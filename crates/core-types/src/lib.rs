//! # Parity Core Types
//!
//! Layer 0 of the workspace: the year-month key, the polars-backed monthly
//! time series table every stage passes along, and the canonical column names.

pub mod columns;
pub mod enums;
pub mod error;
pub mod month;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::Asset;
pub use error::CoreError;
pub use month::YearMonth;
pub use table::{INDEX_COLUMN, TimeSeriesTable};
