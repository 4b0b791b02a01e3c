use crate::error::DataError;
use configuration::InputSource;
use core_types::{TimeSeriesTable, YearMonth};
use polars::prelude::*;
use std::path::Path;

/// Reads one monthly input file into a table keyed by year-month.
///
/// The date column is consumed to build the key; each mapped source column is
/// kept under its canonical name and multiplied by the source's scale factor.
/// Empty cells load as missing. Any unreadable file, absent column, malformed
/// date or non-numeric cell fails the whole load.
pub fn load_source(source: &InputSource) -> Result<TimeSeriesTable, DataError> {
    let path = source.path.as_path();
    let frame = read_text_frame(path)?;

    let dates = text_column(&frame, path, &source.date_column)?;
    let cells = source
        .columns
        .iter()
        .map(|mapping| text_column(&frame, path, &mapping.source))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: Vec<(YearMonth, Vec<f64>)> = Vec::with_capacity(dates.len());
    for (i, date) in dates.iter().enumerate() {
        // 1-based file line, counting the header.
        let invalid = |message: String| DataError::InvalidRow {
            path: path.to_path_buf(),
            row: i + 2,
            message,
        };

        let month = YearMonth::parse_date(date).map_err(|e| invalid(e.to_string()))?;
        let values = cells
            .iter()
            .map(|column| {
                let raw = column[i].as_str();
                parse_value(raw)
                    .map(|v| v * source.scale)
                    .ok_or_else(|| invalid(format!("'{raw}' is not a number")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push((month, values));
    }

    rows.sort_by_key(|(month, _)| *month);
    if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(DataError::DuplicateMonth {
            path: path.to_path_buf(),
            month: pair[0].0.to_string(),
        });
    }

    let mut table = TimeSeriesTable::new(rows.iter().map(|(month, _)| *month).collect())?;
    for (j, mapping) in source.columns.iter().enumerate() {
        table.add_column(mapping.target.clone(), rows.iter().map(|(_, v)| v[j]).collect())?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        first = ?table.index().first().map(ToString::to_string),
        "Loaded input table."
    );
    Ok(table)
}

/// Reads a CSV file with a header row, every column as text.
pub(crate) fn read_text_frame(path: &Path) -> Result<DataFrame, DataError> {
    CsvReader::from_path(path)
        .and_then(|reader| reader.has_header(true).infer_schema(Some(0)).finish())
        .map_err(|e| DataError::Csv {
            path: path.to_path_buf(),
            source: e,
        })
}

/// The trimmed cells of the column whose header is `name`; nulls read as empty.
pub(crate) fn text_column(frame: &DataFrame, path: &Path, name: &str) -> Result<Vec<String>, DataError> {
    let series = frame
        .get_columns()
        .iter()
        .find(|series| series.name().trim() == name)
        .ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })?;

    let csv_error = |e: PolarsError| DataError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let text = series.cast(&DataType::String).map_err(csv_error)?;
    let cells = text.str().map_err(csv_error)?;
    Ok(cells
        .into_iter()
        .map(|cell| cell.unwrap_or_default().trim().to_string())
        .collect())
}

/// Parses a numeric cell. Empty cells and `NaN` are missing values.
pub(crate) fn parse_value(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(f64::NAN);
    }
    raw.parse::<f64>().ok()
}
