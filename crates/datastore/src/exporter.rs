use crate::error::DataError;
use crate::loader::{parse_value, read_text_frame, text_column};
use core_types::{CoreError, INDEX_COLUMN, TimeSeriesTable, YearMonth};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// File names of the exported tables.
pub mod files {
    pub const DATA: &str = "Data and 60-40 Portfolio.csv";
    pub const UNLEVERED: &str = "Unlevered Portfolio.csv";
    pub const LEVERED1: &str = "Levered RP 1 Portfolio.csv";
    pub const LEVERED2: &str = "Levered RP 2 Portfolio.csv";
    pub const FULL: &str = "Full Merged Dataframe.csv";
}

/// Writes `table` as CSV: the `Datetime` key column first, then every column in order.
///
/// Missing values become empty cells and infinities are written as `inf` / `-inf`.
pub fn write_table(table: &TimeSeriesTable, path: &Path) -> Result<(), DataError> {
    let mut frame = export_frame(table)?;
    let mut file = File::create(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .finish(&mut frame)
        .map_err(|e| DataError::Csv {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Reads a table previously written by [`write_table`].
pub fn read_table(path: &Path) -> Result<TimeSeriesTable, DataError> {
    let frame = read_text_frame(path)?;
    let names: Vec<String> = frame.get_column_names().iter().map(|name| name.to_string()).collect();
    if names.first().map(String::as_str) != Some(INDEX_COLUMN) {
        return Err(DataError::MissingColumn {
            path: path.to_path_buf(),
            column: INDEX_COLUMN.to_string(),
        });
    }
    let invalid = |row: usize, message: String| DataError::InvalidRow {
        path: path.to_path_buf(),
        row: row + 2,
        message,
    };

    let index = text_column(&frame, path, INDEX_COLUMN)?
        .iter()
        .enumerate()
        .map(|(row, raw)| raw.parse::<YearMonth>().map_err(|e| invalid(row, e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = TimeSeriesTable::new(index)?;
    for name in &names[1..] {
        let values = text_column(&frame, path, name)?
            .iter()
            .enumerate()
            .map(|(row, raw)| parse_value(raw).ok_or_else(|| invalid(row, format!("'{raw}' is not a number"))))
            .collect::<Result<Vec<_>, _>>()?;
        table.add_column(name.as_str(), values)?;
    }
    Ok(table)
}

/// Writes each named table into `dir`, creating the directory if needed.
///
/// Exports are independent: the first failure aborts the remaining writes.
pub fn export_all(dir: &Path, tables: &[(&str, &TimeSeriesTable)]) -> Result<Vec<PathBuf>, DataError> {
    std::fs::create_dir_all(dir).map_err(|e| DataError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(tables.len());
    for (file_name, table) in tables {
        let path = dir.join(file_name);
        write_table(table, &path)?;
        tracing::info!(path = %path.display(), rows = table.len(), "Exported table.");
        written.push(path);
    }
    Ok(written)
}

/// The table's frame with `NaN` turned into nulls, which the writer leaves empty.
fn export_frame(table: &TimeSeriesTable) -> Result<DataFrame, DataError> {
    let mut columns = Vec::with_capacity(table.column_names().len() + 1);
    columns.push(table.frame().column(INDEX_COLUMN).map_err(CoreError::from)?.clone());
    for name in table.column_names() {
        let values: Vec<Option<f64>> = table
            .column(name)?
            .into_iter()
            .map(|v| (!v.is_nan()).then_some(v))
            .collect();
        columns.push(Series::new(name, values));
    }
    Ok(DataFrame::new(columns).map_err(CoreError::from)?)
}
