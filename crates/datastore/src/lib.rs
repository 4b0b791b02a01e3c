//! # Parity Datastore
//!
//! The file adapter of the workspace. It reads and writes CSV through polars
//! and hands the rest of the application plain `TimeSeriesTable`s.
//!
//! ## Public API
//!
//! - `load_source` / `load_inputs`: read the monthly input files by column name.
//! - `align`: join the inputs on the stock table's months and drop the warm-up rows.
//! - `write_table` / `export_all` / `read_table`: export tables and load them back.
//! - `DataError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod error;
pub mod exporter;
pub mod loader;

// Re-export the key components to create a clean, public-facing API.
pub use aligner::{SourceTables, align, load_inputs};
pub use error::DataError;
pub use exporter::{export_all, files, read_table, write_table};
pub use loader::load_source;
