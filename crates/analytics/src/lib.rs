//! # Parity Analytics
//!
//! This crate turns the aligned monthly table into strategy return series and
//! judges them. It is pure logic: every input arrives as a `TimeSeriesTable`
//! and every result is returned to the caller.
//!
//! ## Public API
//!
//! - `PortfolioBuilder`: derives excess returns, lagged trailing volatilities,
//!   the fixed-weight benchmark and the three risk-parity tables.
//! - `summarize`: annualized mean, volatility, Sharpe ratio and average weights
//!   of every strategy over a window, as a `SummaryReport`.
//! - `render_sharpe_chart`: the Sharpe ratio bar chart of a report.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod chart;
pub mod engine;
pub mod error;
pub mod report;
pub mod stats;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use chart::{chart_file_name, render_sharpe_chart, sharpe_chart};
pub use engine::{PortfolioBuilder, PortfolioTables};
pub use error::AnalyticsError;
pub use report::{Strategy, StrategySummary, SummaryReport};
pub use summary::summarize;
