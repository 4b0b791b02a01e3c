use crate::error::CoreError;
use crate::month::YearMonth;
use polars::prelude::*;

/// Name of the year-month key column carried by every frame.
pub const INDEX_COLUMN: &str = "Datetime";

/// A monthly time series table.
///
/// The values live in a polars `DataFrame` whose first column is the
/// `Datetime` key (`YYYY-MM` strings, strictly increasing) followed by any
/// number of uniquely named `f64` columns. The parsed keys are kept alongside
/// for range lookups.
///
/// Missing observations read back as `NaN`, whether they were stored as `NaN`
/// or introduced as nulls by a join, so arithmetic over columns propagates
/// them without special casing.
#[derive(Debug, Clone)]
pub struct TimeSeriesTable {
    index: Vec<YearMonth>,
    frame: DataFrame,
}

impl TimeSeriesTable {
    /// Creates a table with no value columns over `index`, which must be strictly increasing.
    pub fn new(index: Vec<YearMonth>) -> Result<Self, CoreError> {
        if let Some(pair) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::UnorderedIndex {
                previous: pair[0].to_string(),
                next: pair[1].to_string(),
            });
        }
        let keys: Vec<String> = index.iter().map(ToString::to_string).collect();
        let frame = DataFrame::new(vec![Series::new(INDEX_COLUMN, keys)])?;
        Ok(Self { index, frame })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[YearMonth] {
        &self.index
    }

    /// The underlying frame, key column included.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Value column names in order, without the key column.
    pub fn column_names(&self) -> Vec<&str> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| *name != INDEX_COLUMN)
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        name != INDEX_COLUMN && self.frame.column(name).is_ok()
    }

    /// A copy of the named column's values, nulls read as `NaN`.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, CoreError> {
        if !self.has_column(name) {
            return Err(CoreError::ColumnNotFound(name.to_string()));
        }
        let values = self.frame.column(name)?.f64()?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Appends a column. The name must be new and the length must match the index.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), CoreError> {
        let name = name.into();
        if name == INDEX_COLUMN || self.has_column(&name) {
            return Err(CoreError::DuplicateColumn(name));
        }
        if values.len() != self.index.len() {
            return Err(CoreError::LengthMismatch {
                column: name,
                expected: self.index.len(),
                found: values.len(),
            });
        }
        self.frame.with_column(Series::new(&name, values))?;
        Ok(())
    }

    /// Builder-style variant of [`add_column`](Self::add_column).
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self, CoreError> {
        self.add_column(name, values)?;
        Ok(self)
    }

    /// Row position of `key`, if present.
    pub fn position(&self, key: YearMonth) -> Option<usize> {
        self.index.binary_search(&key).ok()
    }

    /// Left join on the `Datetime` key, anchored on this table.
    ///
    /// Every row of `self` is kept in order; rows of `other` whose key is
    /// absent here are dropped, and keys of `self` absent from `other` read
    /// as `NaN` in the joined columns.
    pub fn left_join(&self, other: &TimeSeriesTable) -> Result<Self, CoreError> {
        if let Some(name) = other.column_names().into_iter().find(|name| self.has_column(name)) {
            return Err(CoreError::DuplicateColumn(name.to_string()));
        }
        let frame = self
            .frame
            .left_join(&other.frame, [INDEX_COLUMN], [INDEX_COLUMN])?;
        Ok(Self {
            index: self.index.clone(),
            frame,
        })
    }

    /// Rows with `start <= key <= end`.
    pub fn slice(&self, start: YearMonth, end: YearMonth) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let from = self.index.partition_point(|k| *k < start);
        let to = self.index.partition_point(|k| *k <= end);
        Ok(self.rows(from, to))
    }

    /// Drops the first `n` rows unconditionally.
    pub fn drop_head(&self, n: usize) -> Self {
        self.rows(n.min(self.len()), self.len())
    }

    /// A new table holding only the named columns, in the order given.
    pub fn select(&self, names: &[&str]) -> Result<Self, CoreError> {
        if let Some(missing) = names.iter().find(|name| !self.has_column(name)) {
            return Err(CoreError::ColumnNotFound(missing.to_string()));
        }
        let selection: Vec<&str> = std::iter::once(INDEX_COLUMN).chain(names.iter().copied()).collect();
        Ok(Self {
            index: self.index.clone(),
            frame: self.frame.select(selection)?,
        })
    }

    fn rows(&self, from: usize, to: usize) -> Self {
        Self {
            index: self.index[from..to].to_vec(),
            frame: self.frame.slice(from as i64, to - from),
        }
    }
}
