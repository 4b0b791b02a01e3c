use crate::error::AnalyticsError;
use crate::report::{Strategy, StrategySummary, SummaryReport};
use crate::stats::{mean, present, sample_std};
use configuration::PortfolioParams;
use core_types::{TimeSeriesTable, YearMonth};

/// Summarizes every strategy over `[start, end]` (inclusive) of the merged table.
///
/// Means are annualized by `periods_per_year`, standard deviations by its
/// square root, and the Sharpe ratio is their quotient with no risk-free
/// adjustment since the returns are already excess returns. Missing months
/// are skipped. The fixed strategies report their constant weights.
pub fn summarize(
    merged: &TimeSeriesTable,
    start: YearMonth,
    end: YearMonth,
    params: &PortfolioParams,
) -> Result<SummaryReport, AnalyticsError> {
    let window = merged.slice(start, end)?;
    if window.is_empty() {
        return Err(AnalyticsError::NotEnoughData(format!(
            "no rows between {start} and {end}"
        )));
    }

    let periods = params.periods_per_year as f64;
    let mut rows = Vec::with_capacity(Strategy::ALL.len());

    for strategy in Strategy::ALL {
        let column = window.column(strategy.return_column())?;
        let returns = present(&column);
        let skipped = column.len() - returns.len();
        if skipped > 0 {
            tracing::warn!(
                strategy = strategy.name(),
                skipped,
                "Skipping months with missing returns."
            );
        }

        let annual_mean = mean(&returns) * periods;
        let annual_stdev = sample_std(&returns) * periods.sqrt();

        let (avg_stock_weight, avg_bond_weight) = match strategy.weight_columns() {
            Some((stock, bond)) => (
                mean(&present(&window.column(stock)?)),
                mean(&present(&window.column(bond)?)),
            ),
            None if strategy == Strategy::SixtyForty => (params.weight_stock, params.weight_bond),
            None => (1.0, 0.0),
        };

        rows.push(StrategySummary {
            strategy,
            label: format!("{} {} - {}", strategy.name(), start, end),
            mean: annual_mean,
            stdev: annual_stdev,
            sharpe: annual_mean / annual_stdev,
            avg_stock_weight,
            avg_bond_weight,
        });
    }

    tracing::debug!(%start, %end, rows = window.len(), "Summarized window.");
    Ok(SummaryReport { start, end, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PortfolioBuilder;
    use approx::assert_relative_eq;
    use core_types::columns;

    fn month(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn merged() -> TimeSeriesTable {
        let n = 120;
        let mut key = month(1927, 1);
        let mut index = Vec::with_capacity(n);
        for _ in 0..n {
            index.push(key);
            key = key.succ();
        }
        let series = |a: f64, b: f64| -> Vec<f64> {
            (0..n).map(|i| a * ((i * 13 % 7) as f64 - 3.0) + b).collect()
        };
        let aligned = TimeSeriesTable::new(index)
            .unwrap()
            .with_column("Stocks", series(0.02, 0.008))
            .unwrap()
            .with_column("Bonds", series(-0.004, 0.003))
            .unwrap()
            .with_column("Mkt-RF", vec![0.0; n])
            .unwrap()
            .with_column("SMB", vec![0.0; n])
            .unwrap()
            .with_column("HML", vec![0.0; n])
            .unwrap()
            .with_column("RF", vec![0.001; n])
            .unwrap();
        let params = PortfolioParams {
            leverage_end: month(1936, 12),
            ..PortfolioParams::default()
        };
        PortfolioBuilder::new(params).build(&aligned).unwrap().merged().unwrap()
    }

    #[test]
    fn sharpe_matches_direct_recomputation() {
        let merged = merged();
        let (start, end) = (month(1930, 1), month(1935, 6));
        let report = summarize(&merged, start, end, &PortfolioParams::default()).unwrap();
        let window = merged.slice(start, end).unwrap();

        assert_eq!(report.rows.len(), 5);
        for row in &report.rows {
            let monthly = window.column(row.strategy.return_column()).unwrap();
            let m = monthly.iter().sum::<f64>() / monthly.len() as f64;
            let var = monthly.iter().map(|r| (r - m).powi(2)).sum::<f64>() / (monthly.len() - 1) as f64;
            let expected = (m * 12.0) / (var.sqrt() * 12f64.sqrt());
            assert_relative_eq!(row.sharpe, expected, max_relative = 1e-9);
            assert_relative_eq!(row.sharpe, row.mean / row.stdev);
        }
    }

    #[test]
    fn labels_and_fixed_weights() {
        let report = summarize(&merged(), month(1930, 1), month(1935, 12), &PortfolioParams::default()).unwrap();

        assert_eq!(report.rows[0].label, "60/40 1930-01 - 1935-12");
        assert_eq!(report.rows[4].label, "Levered2 1930-01 - 1935-12");
        assert_eq!(report.title(), "Sharpe Ratios 1930-01 to 1935-12");

        let benchmark = report.get(Strategy::SixtyForty).unwrap();
        assert_eq!((benchmark.avg_stock_weight, benchmark.avg_bond_weight), (0.6, 0.4));
        let all_stock = report.get(Strategy::AllStock).unwrap();
        assert_eq!((all_stock.avg_stock_weight, all_stock.avg_bond_weight), (1.0, 0.0));

        let unlevered = report.get(Strategy::Unlevered).unwrap();
        assert_relative_eq!(unlevered.avg_stock_weight + unlevered.avg_bond_weight, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn average_weights_are_window_means() {
        let merged = merged();
        let (start, end) = (month(1931, 1), month(1933, 12));
        let report = summarize(&merged, start, end, &PortfolioParams::default()).unwrap();
        let window = merged.slice(start, end).unwrap();

        let ps1 = window.column(columns::PERCENT_STOCK1).unwrap();
        let levered1 = report.get(Strategy::Levered1).unwrap();
        assert_relative_eq!(
            levered1.avg_stock_weight,
            ps1.iter().sum::<f64>() / ps1.len() as f64,
            max_relative = 1e-12
        );
    }

    #[test]
    fn empty_or_inverted_windows_are_errors() {
        let merged = merged();
        let params = PortfolioParams::default();
        assert!(matches!(
            summarize(&merged, month(1990, 1), month(1990, 12), &params),
            Err(AnalyticsError::NotEnoughData(_))
        ));
        assert!(matches!(
            summarize(&merged, month(1935, 1), month(1930, 1), &params),
            Err(AnalyticsError::Table(_))
        ));
    }
}
