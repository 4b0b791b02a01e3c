use crate::columns;
use serde::{Deserialize, Serialize};

/// The two asset classes every strategy allocates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Stock,
    Bond,
}

impl Asset {
    pub const ALL: [Asset; 2] = [Asset::Stock, Asset::Bond];

    /// The nominal monthly return column in the aligned table.
    pub fn return_column(&self) -> &'static str {
        match self {
            Asset::Stock => columns::STOCKS,
            Asset::Bond => columns::BONDS,
        }
    }

    /// The excess-over-risk-free return column.
    pub fn excess_column(&self) -> &'static str {
        match self {
            Asset::Stock => columns::ER_STOCK,
            Asset::Bond => columns::ER_BOND,
        }
    }

    /// The trailing annualized volatility column.
    pub fn stdev_column(&self) -> &'static str {
        match self {
            Asset::Stock => columns::STDEV_STOCK,
            Asset::Bond => columns::STDEV_BOND,
        }
    }
}
