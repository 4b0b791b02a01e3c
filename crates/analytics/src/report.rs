use core_types::{YearMonth, columns};
use serde::{Deserialize, Serialize};

/// The five portfolio construction strategies being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    SixtyForty,
    AllStock,
    Unlevered,
    Levered1,
    Levered2,
}

impl Strategy {
    /// Report order.
    pub const ALL: [Strategy; 5] = [
        Strategy::SixtyForty,
        Strategy::AllStock,
        Strategy::Unlevered,
        Strategy::Levered1,
        Strategy::Levered2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SixtyForty => "60/40",
            Strategy::AllStock => "All Stock",
            Strategy::Unlevered => "Unlevered",
            Strategy::Levered1 => "Levered1",
            Strategy::Levered2 => "Levered2",
        }
    }

    /// The monthly excess return column of the merged table.
    pub fn return_column(&self) -> &'static str {
        match self {
            Strategy::SixtyForty => columns::SIXTY_FORTY,
            Strategy::AllStock => columns::ER_STOCK,
            Strategy::Unlevered => columns::EXCESS_RETS,
            Strategy::Levered1 => columns::EXCESS_RETS1,
            Strategy::Levered2 => columns::EXCESS_RETS2,
        }
    }

    /// Stock and bond weight columns for strategies with time-varying weights.
    pub fn weight_columns(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Strategy::SixtyForty | Strategy::AllStock => None,
            Strategy::Unlevered => Some((columns::PERCENT_STOCK, columns::PERCENT_BOND)),
            Strategy::Levered1 => Some((columns::PERCENT_STOCK1, columns::PERCENT_BOND1)),
            Strategy::Levered2 => Some((columns::PERCENT_STOCK2, columns::PERCENT_BOND2)),
        }
    }
}

/// Annualized statistics of one strategy over the report window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    /// Row label embedding the window, e.g. `60/40 1930-01 - 2019-12`.
    pub label: String,
    pub mean: f64,
    pub stdev: f64,
    /// `mean / stdev`; infinite or NaN when the stdev is zero.
    pub sharpe: f64,
    pub avg_stock_weight: f64,
    pub avg_bond_weight: f64,
}

/// The summary table for one window: one row per strategy, in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub start: YearMonth,
    pub end: YearMonth,
    pub rows: Vec<StrategySummary>,
}

impl SummaryReport {
    pub fn title(&self) -> String {
        format!("Sharpe Ratios {} to {}", self.start, self.end)
    }

    pub fn get(&self, strategy: Strategy) -> Option<&StrategySummary> {
        self.rows.iter().find(|row| row.strategy == strategy)
    }
}
