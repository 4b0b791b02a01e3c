//! End-to-end runs over synthetic monthly input files.

use analytics::{PortfolioBuilder, Strategy, SummaryReport, summarize};
use configuration::{Config, InputSource, Inputs};
use core_types::{YearMonth, columns};
use datastore::{align, export_all, files, load_inputs, read_table};
use std::fmt::Write as _;
use std::path::Path;

const MONTHS: usize = 600;

fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

/// Month-end dates from 1926-01 in the layout of the CRSP files.
fn dates() -> Vec<String> {
    let mut key = month(1926, 1);
    (0..MONTHS)
        .map(|_| {
            let date = format!("{key}-28");
            key = key.succ();
            date
        })
        .collect()
}

/// Writes the three input files. Factors are written in percentage points.
fn write_inputs(dir: &Path, stock: impl Fn(usize) -> f64, bond: impl Fn(usize) -> f64, rf_pct: impl Fn(usize) -> f64) -> Inputs {
    let dates = dates();
    let mut stocks = String::from("Date,vwretd\n");
    let mut bonds = String::from("Date,b10ret\n");
    let mut factors = String::from("Date,Mkt-RF,SMB,HML,RF\n");
    for (i, date) in dates.iter().enumerate() {
        writeln!(stocks, "{date},{}", stock(i)).unwrap();
        writeln!(bonds, "{date},{}", bond(i)).unwrap();
        writeln!(factors, "{date},0.5,0.1,-0.1,{}", rf_pct(i)).unwrap();
    }
    std::fs::write(dir.join("stocks.csv"), stocks).unwrap();
    std::fs::write(dir.join("bonds.csv"), bonds).unwrap();
    std::fs::write(dir.join("factors.csv"), factors).unwrap();

    let defaults = Inputs::default();
    let relocate = |source: InputSource, name: &str| InputSource {
        path: dir.join(name),
        ..source
    };
    Inputs {
        stocks: relocate(defaults.stocks, "stocks.csv"),
        treasuries: relocate(defaults.treasuries, "bonds.csv"),
        factors: relocate(defaults.factors, "factors.csv"),
    }
}

fn same(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

fn assert_same_report(a: &SummaryReport, b: &SummaryReport) {
    assert_eq!(a.rows.len(), b.rows.len());
    for (x, y) in a.rows.iter().zip(&b.rows) {
        assert_eq!(x.label, y.label);
        for (u, v) in [
            (x.mean, y.mean),
            (x.stdev, y.stdev),
            (x.sharpe, y.sharpe),
            (x.avg_stock_weight, y.avg_stock_weight),
            (x.avg_bond_weight, y.avg_bond_weight),
        ] {
            assert!(same(u, v), "{}: {u} != {v}", x.label);
        }
    }
}

#[test]
fn constant_excess_returns_surface_zero_volatility() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        inputs: write_inputs(dir.path(), |_| 0.01, |_| 0.005, |_| 0.0),
        ..Config::default()
    };

    let sources = load_inputs(&config.inputs).unwrap();
    let aligned = align(&sources, config.alignment.warmup_rows).unwrap();
    assert_eq!(aligned.index()[0], month(1927, 1));
    assert_eq!(aligned.len(), MONTHS - 12);

    let tables = PortfolioBuilder::new(config.portfolio.clone()).build(&aligned).unwrap();
    let start = tables.data.position(month(1930, 1)).unwrap();

    for name in [columns::STDEV_STOCK, columns::STDEV_BOND] {
        let stdev = tables.data.column(name).unwrap();
        assert!(stdev[..start].iter().all(|v| v.is_nan()), "{name}");
        assert!(stdev[start..].iter().all(|v| *v == 0.0), "{name}");
    }
    assert_eq!(tables.k1, 0.0);
    assert_eq!(tables.k2, 0.0);

    // Zero volatility leaves the inverse-volatility weights undefined, not zero.
    let weights = tables.unlevered.column(columns::PERCENT_STOCK).unwrap();
    assert!(weights.iter().all(|w| w.is_nan()));

    let merged = tables.merged().unwrap();
    let report = summarize(&merged, config.report.start, config.report.end, &config.portfolio).unwrap();

    for strategy in [Strategy::SixtyForty, Strategy::AllStock] {
        let row = report.get(strategy).unwrap();
        assert_eq!(row.stdev, 0.0);
        assert!(row.sharpe.is_infinite() && row.sharpe > 0.0, "{}", row.label);
    }
    for strategy in [Strategy::Unlevered, Strategy::Levered1, Strategy::Levered2] {
        let row = report.get(strategy).unwrap();
        assert!(row.sharpe.is_nan(), "{}", row.label);
    }
}

#[test]
fn exported_tables_reproduce_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_inputs(
        dir.path(),
        |i| 0.01 + 0.04 * ((i as f64) * 0.37).sin(),
        |i| 0.004 + 0.01 * ((i as f64) * 0.91).cos(),
        |i| 0.2 + 0.05 * (i % 4) as f64,
    );
    let config = Config {
        inputs,
        ..Config::default()
    };

    let sources = load_inputs(&config.inputs).unwrap();
    let aligned = align(&sources, config.alignment.warmup_rows).unwrap();
    let tables = PortfolioBuilder::new(config.portfolio.clone()).build(&aligned).unwrap();
    let merged = tables.merged().unwrap();

    let (start, end) = (month(1935, 1), month(1970, 12));
    let report = summarize(&merged, start, end, &config.portfolio).unwrap();
    assert!(report.rows.iter().all(|row| row.sharpe.is_finite()));

    let out = dir.path().join("out");
    export_all(
        &out,
        &[
            (files::DATA, &tables.data),
            (files::UNLEVERED, &tables.unlevered),
            (files::LEVERED1, &tables.levered1),
            (files::LEVERED2, &tables.levered2),
            (files::FULL, &merged),
        ],
    )
    .unwrap();

    let reloaded = read_table(&out.join(files::FULL)).unwrap();
    let again = summarize(&reloaded, start, end, &config.portfolio).unwrap();
    assert_same_report(&report, &again);

    let unlevered = read_table(&out.join(files::UNLEVERED)).unwrap();
    assert_eq!(
        unlevered.column_names(),
        vec![columns::KT, columns::PERCENT_STOCK, columns::PERCENT_BOND, columns::EXCESS_RETS]
    );
}
