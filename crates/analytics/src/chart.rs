use crate::error::AnalyticsError;
use crate::report::SummaryReport;
use plotly::{Bar, Layout, Plot};
use std::path::Path;

/// Builds a bar chart of the report's Sharpe ratios, one bar per strategy.
pub fn sharpe_chart(report: &SummaryReport) -> Plot {
    let labels: Vec<String> = report.rows.iter().map(|row| row.label.clone()).collect();
    let sharpe: Vec<f64> = report.rows.iter().map(|row| row.sharpe).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(labels, sharpe).name("Sharpe"));
    plot.set_layout(Layout::new().title(report.title().as_str()).show_legend(true));
    plot
}

/// Writes the Sharpe ratio chart to `path` as a self-contained HTML page.
pub fn render_sharpe_chart(report: &SummaryReport, path: &Path) -> Result<(), AnalyticsError> {
    let html = sharpe_chart(report).to_html();
    std::fs::write(path, html).map_err(|e| AnalyticsError::ChartWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "Rendered Sharpe ratio chart.");
    Ok(())
}

/// Default chart file name for a report window.
pub fn chart_file_name(report: &SummaryReport) -> String {
    format!("Sharpe Ratios {} to {}.html", report.start, report.end)
}
