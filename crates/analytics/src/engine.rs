use crate::error::AnalyticsError;
use crate::stats::{lagged_rolling_std, present, sample_std};
use configuration::PortfolioParams;
use core_types::{Asset, TimeSeriesTable, columns};

/// Every table the transformer derives from the aligned inputs.
#[derive(Debug, Clone)]
pub struct PortfolioTables {
    /// Aligned inputs plus excess returns, trailing volatilities and the benchmark.
    pub data: TimeSeriesTable,
    /// `Kt`, `percent_stock`, `percent_bond`, `Excess Rets`.
    pub unlevered: TimeSeriesTable,
    /// `k1/Kt`, `percent_stock1`, `percent_bond1`, `Excess Rets 1`.
    pub levered1: TimeSeriesTable,
    /// `k2/Kt`, `percent_stock2`, `percent_bond2`, `Excess Rets 2`.
    pub levered2: TimeSeriesTable,
    /// Annualized all-stock volatility over the leverage window.
    pub k1: f64,
    /// Annualized benchmark volatility over the leverage window.
    pub k2: f64,
}

impl PortfolioTables {
    /// The data table joined with all three strategy tables.
    pub fn merged(&self) -> Result<TimeSeriesTable, AnalyticsError> {
        Ok(self
            .data
            .left_join(&self.unlevered)?
            .left_join(&self.levered1)?
            .left_join(&self.levered2)?)
    }
}

/// Column names of one risk-parity table.
struct ParityColumns {
    leverage: &'static str,
    stock: &'static str,
    bond: &'static str,
    returns: &'static str,
}

const LEVERED1: ParityColumns = ParityColumns {
    leverage: columns::K1_KT,
    stock: columns::PERCENT_STOCK1,
    bond: columns::PERCENT_BOND1,
    returns: columns::EXCESS_RETS1,
};

const LEVERED2: ParityColumns = ParityColumns {
    leverage: columns::K2_KT,
    stock: columns::PERCENT_STOCK2,
    bond: columns::PERCENT_BOND2,
    returns: columns::EXCESS_RETS2,
};

/// A stateless builder deriving return, volatility and weight schedules from
/// the aligned monthly table.
///
/// Months without a full volatility lookback get missing weights and returns.
/// A zero volatility is not an error: the IEEE infinities and NaNs it produces
/// flow through to the summary unchanged.
#[derive(Debug, Clone)]
pub struct PortfolioBuilder {
    params: PortfolioParams,
}

impl PortfolioBuilder {
    pub fn new(params: PortfolioParams) -> Self {
        Self { params }
    }

    /// The main entry point: derives every table from the aligned inputs.
    pub fn build(&self, aligned: &TimeSeriesTable) -> Result<PortfolioTables, AnalyticsError> {
        let data = self.derive_returns(aligned)?;
        let unlevered = self.unlevered(&data)?;

        let k1 = self.target_volatility(&data, columns::ER_STOCK)?;
        let k2 = self.target_volatility(&data, columns::SIXTY_FORTY)?;
        tracing::info!(k1, k2, "Computed leverage targets.");

        let levered1 = self.levered(&data, &unlevered, k1, &LEVERED1)?;
        let levered2 = self.levered(&data, &unlevered, k2, &LEVERED2)?;

        Ok(PortfolioTables {
            data,
            unlevered,
            levered1,
            levered2,
            k1,
            k2,
        })
    }

    fn annualizer(&self) -> f64 {
        (self.params.periods_per_year as f64).sqrt()
    }

    /// Adds excess returns, lagged trailing volatilities and the fixed-weight benchmark.
    fn derive_returns(&self, aligned: &TimeSeriesTable) -> Result<TimeSeriesTable, AnalyticsError> {
        let mut data = aligned.clone();
        let rf = aligned.column(columns::RF)?;

        for asset in Asset::ALL {
            let excess: Vec<f64> = aligned
                .column(asset.return_column())?
                .iter()
                .zip(&rf)
                .map(|(r, f)| r - f)
                .collect();
            data.add_column(asset.excess_column(), excess)?;
        }

        let annualizer = self.annualizer();
        for asset in Asset::ALL {
            let stdev = lagged_rolling_std(&data.column(asset.excess_column())?, self.params.volatility_window)
                .into_iter()
                .map(|s| s * annualizer)
                .collect();
            data.add_column(asset.stdev_column(), stdev)?;
        }

        let er_stock = data.column(columns::ER_STOCK)?;
        let er_bond = data.column(columns::ER_BOND)?;
        let benchmark: Vec<f64> = data
            .index()
            .iter()
            .zip(er_stock.iter().zip(&er_bond))
            .map(|(month, (s, b))| {
                if *month >= self.params.benchmark_start {
                    self.params.weight_stock * s + self.params.weight_bond * b
                } else {
                    f64::NAN
                }
            })
            .collect();
        data.add_column(columns::SIXTY_FORTY, benchmark)?;

        tracing::debug!(
            window = self.params.volatility_window,
            benchmark_start = %self.params.benchmark_start,
            "Derived excess returns and trailing volatilities."
        );
        Ok(data)
    }

    /// Inverse-volatility weights normalized to sum to one.
    fn unlevered(&self, data: &TimeSeriesTable) -> Result<TimeSeriesTable, AnalyticsError> {
        let stdev_stock = data.column(columns::STDEV_STOCK)?;
        let stdev_bond = data.column(columns::STDEV_BOND)?;

        let kt: Vec<f64> = stdev_stock
            .iter()
            .zip(&stdev_bond)
            .map(|(s, b)| 1.0 / (1.0 / s + 1.0 / b))
            .collect();
        let percent_stock: Vec<f64> = stdev_stock.iter().zip(&kt).map(|(s, k)| (1.0 / s) * k).collect();
        let percent_bond: Vec<f64> = stdev_bond.iter().zip(&kt).map(|(b, k)| (1.0 / b) * k).collect();
        let returns = realized_returns(data, &percent_stock, &percent_bond)?;

        Ok(TimeSeriesTable::new(data.index().to_vec())?
            .with_column(columns::KT, kt)?
            .with_column(columns::PERCENT_STOCK, percent_stock)?
            .with_column(columns::PERCENT_BOND, percent_bond)?
            .with_column(columns::EXCESS_RETS, returns)?)
    }

    /// Inverse-volatility weights scaled by the constant `k`; they need not sum to one.
    fn levered(
        &self,
        data: &TimeSeriesTable,
        unlevered: &TimeSeriesTable,
        k: f64,
        names: &ParityColumns,
    ) -> Result<TimeSeriesTable, AnalyticsError> {
        let leverage: Vec<f64> = unlevered.column(columns::KT)?.iter().map(|kt| k / kt).collect();
        let percent_stock: Vec<f64> = data
            .column(columns::STDEV_STOCK)?
            .iter()
            .map(|s| k * (1.0 / s))
            .collect();
        let percent_bond: Vec<f64> = data
            .column(columns::STDEV_BOND)?
            .iter()
            .map(|b| k * (1.0 / b))
            .collect();
        let returns = realized_returns(data, &percent_stock, &percent_bond)?;

        Ok(TimeSeriesTable::new(data.index().to_vec())?
            .with_column(names.leverage, leverage)?
            .with_column(names.stock, percent_stock)?
            .with_column(names.bond, percent_bond)?
            .with_column(names.returns, returns)?)
    }

    /// Annualized sample volatility of `column` over the fixed leverage window.
    ///
    /// Fewer than two observations give `NaN`, which leaves the levered
    /// weights and returns missing rather than failing the build.
    fn target_volatility(&self, data: &TimeSeriesTable, column: &str) -> Result<f64, AnalyticsError> {
        let window = data.slice(self.params.leverage_start, self.params.leverage_end)?;
        let values = present(&window.column(column)?);
        if values.len() < 2 {
            tracing::warn!(
                column,
                observations = values.len(),
                start = %self.params.leverage_start,
                end = %self.params.leverage_end,
                "Too few observations for a leverage target; levered strategies will be missing."
            );
            return Ok(f64::NAN);
        }
        Ok(sample_std(&values) * self.annualizer())
    }
}

/// `w_stock(t) * ER Stock(t) + w_bond(t) * ER Bond(t)`.
fn realized_returns(
    data: &TimeSeriesTable,
    weight_stock: &[f64],
    weight_bond: &[f64],
) -> Result<Vec<f64>, AnalyticsError> {
    let er_stock = data.column(columns::ER_STOCK)?;
    let er_bond = data.column(columns::ER_BOND)?;
    Ok(weight_stock
        .iter()
        .zip(weight_bond)
        .zip(er_stock.iter().zip(&er_bond))
        .map(|((ws, wb), (s, b))| ws * s + wb * b)
        .collect())
}
