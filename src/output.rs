//! Console rendering of summary reports.

use analytics::SummaryReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};

/// Renders the report as a table, one row per strategy.
pub fn summary_table(report: &SummaryReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Mean", "Stdev", "Sharpe", "Avg Stock Wt", "Avg Bond Wt"]);

    for row in &report.rows {
        table.add_row(vec![
            row.label.clone(),
            format_stat(row.mean),
            format_stat(row.stdev),
            format_stat(row.sharpe),
            format_stat(row.avg_stock_weight),
            format_stat(row.avg_bond_weight),
        ]);
    }

    for index in 1..=5 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

pub fn print_summary(report: &SummaryReport) {
    println!();
    println!("                     Statistics for Designated Period");
    println!();
    println!("{}", summary_table(report));
}

/// Six decimals; missing values print as `NaN`, infinities as `inf`.
fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else {
        format!("{value:.6}")
    }
}
