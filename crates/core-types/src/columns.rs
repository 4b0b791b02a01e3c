//! Canonical column names shared by the loader, the transformer and the exporter.

pub const STOCKS: &str = "Stocks";
pub const BONDS: &str = "Bonds";
pub const MKT_RF: &str = "Mkt-RF";
pub const SMB: &str = "SMB";
pub const HML: &str = "HML";
pub const RF: &str = "RF";

/// Column order of the aligned table.
pub const ALIGNED: [&str; 6] = [STOCKS, BONDS, MKT_RF, SMB, HML, RF];

pub const ER_STOCK: &str = "ER Stock";
pub const ER_BOND: &str = "ER Bond";
pub const STDEV_STOCK: &str = "Stdev Stock";
pub const STDEV_BOND: &str = "Stdev Bond";
pub const SIXTY_FORTY: &str = "60/40 Rets";

pub const KT: &str = "Kt";
pub const PERCENT_STOCK: &str = "percent_stock";
pub const PERCENT_BOND: &str = "percent_bond";
pub const EXCESS_RETS: &str = "Excess Rets";

pub const K1_KT: &str = "k1/Kt";
pub const PERCENT_STOCK1: &str = "percent_stock1";
pub const PERCENT_BOND1: &str = "percent_bond1";
pub const EXCESS_RETS1: &str = "Excess Rets 1";

pub const K2_KT: &str = "k2/Kt";
pub const PERCENT_STOCK2: &str = "percent_stock2";
pub const PERCENT_BOND2: &str = "percent_bond2";
pub const EXCESS_RETS2: &str = "Excess Rets 2";
