use crate::error::ConfigError;
use core_types::{YearMonth, columns};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every field has a default equal to the parameters of the
/// 1930-2019 risk parity study, so an absent `config.toml` reproduces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub inputs: Inputs,
    pub alignment: Alignment,
    pub portfolio: PortfolioParams,
    pub report: ReportSettings,
}

/// The three monthly input files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inputs {
    /// Stock returns; this table's keys anchor the join.
    pub stocks: InputSource,
    /// Treasury (bond) returns.
    pub treasuries: InputSource,
    /// Fama-French three factors and the risk-free rate, in percentage points.
    pub factors: InputSource,
}

/// Where one input table lives and how its columns map onto canonical names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    pub path: PathBuf,
    /// Header of the column holding the observation date.
    pub date_column: String,
    /// Source columns to keep, renamed to their canonical names.
    pub columns: Vec<ColumnMapping>,
    /// Every kept value is multiplied by this factor on load.
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub source: String,
    pub target: String,
}

impl ColumnMapping {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Contains parameters for joining the inputs into one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alignment {
    /// Leading rows of the joined table dropped before any derivation.
    /// The stock file is expected to start one year before the usable data.
    pub warmup_rows: usize,
}

/// Contains parameters for the portfolio construction formulas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioParams {
    /// Stock weight of the fixed-weight benchmark.
    pub weight_stock: f64,
    /// Bond weight of the fixed-weight benchmark.
    pub weight_bond: f64,
    /// Number of lagged months in the trailing volatility estimate.
    pub volatility_window: usize,
    /// Observations per year, used for annualization.
    pub periods_per_year: usize,
    /// First month with a defined benchmark return.
    pub benchmark_start: YearMonth,
    /// Window over which the levered strategies' target volatilities are measured.
    pub leverage_start: YearMonth,
    pub leverage_end: YearMonth,
}

/// Contains parameters for the summary report and the exported files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// The default summary window.
    pub start: YearMonth,
    pub end: YearMonth,
    /// Directory receiving the exported CSV tables and the chart.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Inputs::default(),
            alignment: Alignment { warmup_rows: 12 },
            portfolio: PortfolioParams::default(),
            report: ReportSettings::default(),
        }
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            stocks: InputSource {
                path: PathBuf::from("CRSP_StockIndex_Monthly.csv"),
                date_column: "Date".to_string(),
                columns: vec![ColumnMapping::new("vwretd", columns::STOCKS)],
                scale: 1.0,
            },
            treasuries: InputSource {
                path: PathBuf::from("CRSP_TreasuriesIndex_Monthly.csv"),
                date_column: "Date".to_string(),
                columns: vec![ColumnMapping::new("b10ret", columns::BONDS)],
                scale: 1.0,
            },
            factors: InputSource {
                path: PathBuf::from("FF3Factors_Monthly-1.csv"),
                date_column: "Date".to_string(),
                columns: [columns::MKT_RF, columns::SMB, columns::HML, columns::RF]
                    .into_iter()
                    .map(|name| ColumnMapping::new(name, name))
                    .collect(),
                // Percentage points to decimal.
                scale: 0.01,
            },
        }
    }
}

impl Default for PortfolioParams {
    fn default() -> Self {
        Self {
            weight_stock: 0.6,
            weight_bond: 0.4,
            volatility_window: 36,
            periods_per_year: 12,
            benchmark_start: month(1930, 1),
            leverage_start: month(1930, 1),
            leverage_end: month(2019, 12),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            start: month(1930, 1),
            end: month(2019, 12),
            output_dir: PathBuf::from("."),
        }
    }
}

// The literals above are always valid months.
fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap_or_else(|_| unreachable!("invalid default month"))
}

impl Config {
    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |setting: &str, message: String| Err(ConfigError::invalid(setting, message));

        let mapped: Vec<&str> = self
            .sources()
            .into_iter()
            .flat_map(|(_, source)| source.columns.iter().map(|c| c.target.as_str()))
            .collect();
        if mapped != columns::ALIGNED {
            return invalid(
                "inputs.*.columns",
                format!(
                    "targets must be {:?} in that order, got {:?}",
                    columns::ALIGNED,
                    mapped
                ),
            );
        }

        for (name, source) in self.sources() {
            if !source.scale.is_finite() || source.scale == 0.0 {
                return invalid(
                    &format!("inputs.{name}.scale"),
                    format!("must be a finite, non-zero number, got {}", source.scale),
                );
            }
            if source.date_column.trim().is_empty() {
                return invalid(&format!("inputs.{name}.date_column"), "must not be empty".to_string());
            }
        }

        let p = &self.portfolio;
        if !p.weight_stock.is_finite() || !p.weight_bond.is_finite() {
            return invalid(
                "portfolio.weight_stock / portfolio.weight_bond",
                format!("benchmark weights must be finite, got {} and {}", p.weight_stock, p.weight_bond),
            );
        }
        if p.volatility_window < 2 {
            return invalid(
                "portfolio.volatility_window",
                format!("must be at least 2 months, got {}", p.volatility_window),
            );
        }
        if p.periods_per_year == 0 {
            return invalid("portfolio.periods_per_year", "must be greater than 0".to_string());
        }
        if p.leverage_start > p.leverage_end {
            return invalid(
                "portfolio.leverage_start",
                format!("{} is after leverage_end {}", p.leverage_start, p.leverage_end),
            );
        }
        if self.report.start > self.report.end {
            return invalid(
                "report.start",
                format!("{} is after report.end {}", self.report.start, self.report.end),
            );
        }

        Ok(())
    }

    fn sources(&self) -> [(&'static str, &InputSource); 3] {
        [
            ("stocks", &self.inputs.stocks),
            ("treasuries", &self.inputs.treasuries),
            ("factors", &self.inputs.factors),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_1930_2019_study() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.alignment.warmup_rows, 12);
        assert_eq!(config.portfolio.weight_stock, 0.6);
        assert_eq!(config.portfolio.weight_bond, 0.4);
        assert_eq!(config.portfolio.volatility_window, 36);
        assert_eq!(config.portfolio.benchmark_start.to_string(), "1930-01");
        assert_eq!(config.portfolio.leverage_end.to_string(), "2019-12");
        assert_eq!(config.report.start.to_string(), "1930-01");
        assert_eq!(config.inputs.factors.scale, 0.01);
    }

    #[test]
    fn rejects_mappings_that_miss_a_canonical_column() {
        let mut config = Config::default();
        config.inputs.factors.columns.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { setting, .. }) if setting == "inputs.*.columns"
        ));
    }

    #[test]
    fn rejects_inverted_windows() {
        let mut config = Config::default();
        config.report.start = month(2020, 1);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.portfolio.volatility_window = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn errors_name_the_offending_setting() {
        let mut config = Config::default();
        config.inputs.treasuries.scale = 0.0;
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("inputs.treasuries.scale"), "{message}");

        let mut config = Config::default();
        config.report.start = month(2020, 1);
        let message = config.validate().unwrap_err().to_string();
        assert_eq!(message, "Invalid setting `report.start`: 2020-01 is after report.end 2019-12");
    }
}
