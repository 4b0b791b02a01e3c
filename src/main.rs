use analytics::{PortfolioBuilder, PortfolioTables, SummaryReport, chart_file_name, render_sharpe_chart, summarize};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, ConfigArgs, load_config};
use core_types::{TimeSeriesTable, YearMonth};
use datastore::{align, export_all, files, load_inputs, read_table};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod output;

/// The main entry point for the risk-parity comparison.
fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install the log subscriber: {e}");
    }

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Summarize(args) => handle_summarize(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Historical risk and return of 60/40, all-stock and risk-parity portfolios.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the inputs, build every strategy, print the configured window's
    /// summary, chart it and export all tables.
    Run(RunArgs),
    /// Print and chart the summary for an arbitrary window.
    Summarize(SummarizeArgs),
}

#[derive(Parser)]
struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct SummarizeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// First month of the window (format: YYYY-MM).
    #[arg(long)]
    from: YearMonth,

    /// Last month of the window, inclusive (format: YYYY-MM).
    #[arg(long)]
    to: YearMonth,

    /// Summarize a previously exported full merged table instead of the inputs.
    #[arg(long)]
    from_csv: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Runs the whole pipeline for the configured report window.
fn handle_run(args: RunArgs) -> Result<()> {
    let config = load_config(&args.config.config).context("Failed to load configuration")?;

    let tables = build_tables(&config)?;
    let merged = tables.merged()?;

    let report = summarize(&merged, config.report.start, config.report.end, &config.portfolio)?;
    publish(&config, &report)?;

    export_all(
        &config.report.output_dir,
        &[
            (files::DATA, &tables.data),
            (files::UNLEVERED, &tables.unlevered),
            (files::LEVERED1, &tables.levered1),
            (files::LEVERED2, &tables.levered2),
            (files::FULL, &merged),
        ],
    )
    .context("Failed to export tables")?;

    tracing::info!("Run complete.");
    Ok(())
}

/// Summarizes one window, from the inputs or from an exported merged table.
fn handle_summarize(args: SummarizeArgs) -> Result<()> {
    let config = load_config(&args.config.config).context("Failed to load configuration")?;

    let merged: TimeSeriesTable = match &args.from_csv {
        Some(path) => read_table(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => build_tables(&config)?.merged()?,
    };

    let report = summarize(&merged, args.from, args.to, &config.portfolio)?;
    publish(&config, &report)
}

/// Loads and aligns the inputs, then derives every strategy table.
fn build_tables(config: &Config) -> Result<PortfolioTables> {
    let sources = load_inputs(&config.inputs).context("Failed to load input files")?;
    let aligned = align(&sources, config.alignment.warmup_rows).context("Failed to align input tables")?;
    let tables = PortfolioBuilder::new(config.portfolio.clone()).build(&aligned)?;
    Ok(tables)
}

/// Prints the summary table and writes its Sharpe ratio chart.
fn publish(config: &Config, report: &SummaryReport) -> Result<()> {
    output::print_summary(report);

    std::fs::create_dir_all(&config.report.output_dir).with_context(|| {
        format!("Failed to create output directory {}", config.report.output_dir.display())
    })?;
    let chart_path = config.report.output_dir.join(chart_file_name(report));
    render_sharpe_chart(report, &chart_path)?;
    Ok(())
}
