use crate::error::DataError;
use crate::loader::load_source;
use configuration::Inputs;
use core_types::{TimeSeriesTable, columns};

/// The three input tables as loaded, before alignment.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub stocks: TimeSeriesTable,
    pub treasuries: TimeSeriesTable,
    pub factors: TimeSeriesTable,
}

/// Loads all three inputs. The first failure aborts the run.
pub fn load_inputs(inputs: &Inputs) -> Result<SourceTables, DataError> {
    Ok(SourceTables {
        stocks: load_source(&inputs.stocks)?,
        treasuries: load_source(&inputs.treasuries)?,
        factors: load_source(&inputs.factors)?,
    })
}

/// Joins the inputs on the stock table's months and drops the warm-up rows.
///
/// Months missing from the treasury or factor tables get missing values;
/// months missing from the stock table are dropped. The result holds exactly
/// the canonical columns, in canonical order. The warm-up rows are dropped
/// unconditionally, so a stock table no longer than the warm-up aligns to an
/// empty table.
pub fn align(tables: &SourceTables, warmup_rows: usize) -> Result<TimeSeriesTable, DataError> {
    let joined = tables
        .stocks
        .left_join(&tables.treasuries)?
        .left_join(&tables.factors)?
        .select(&columns::ALIGNED)?;

    let aligned = joined.drop_head(warmup_rows);
    match (aligned.index().first(), aligned.index().last()) {
        (Some(first), Some(last)) => {
            tracing::info!(rows = aligned.len(), %first, %last, "Aligned input tables.");
        }
        _ => tracing::warn!(
            available = joined.len(),
            warmup_rows,
            "No rows remain after dropping the warm-up rows."
        ),
    }
    Ok(aligned)
}
