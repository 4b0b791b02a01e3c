use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full-date layouts accepted in input files, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// A calendar date truncated to year and month.
///
/// This is the join and alignment key for every monthly series. It orders
/// chronologically and renders as `YYYY-MM` (e.g. `1927-01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a key, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidInput(
                "month".to_string(),
                format!("{month} is not between 1 and 12"),
            ));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses a raw date cell from an input file and truncates it to its month.
    ///
    /// Full dates (`1926-07-31`, `07/31/1926`, `1926/07/31`, `19260731`) and
    /// month-only values (`1926-07`, `192607`) are accepted.
    pub fn parse_date(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(Self::from_date(date));
            }
        }

        if raw.bytes().all(|b| b.is_ascii_digit()) {
            let invalid = || CoreError::InvalidDate(raw.to_string());
            return match raw.len() {
                // YYYYMMDD
                8 => {
                    let (year, rest) = raw.split_at(4);
                    let (month, day) = rest.split_at(2);
                    let date = NaiveDate::from_ymd_opt(
                        year.parse().map_err(|_| invalid())?,
                        month.parse().map_err(|_| invalid())?,
                        day.parse().map_err(|_| invalid())?,
                    )
                    .ok_or_else(invalid)?;
                    Ok(Self::from_date(date))
                }
                // YYYYMM
                6 => {
                    let (year, month) = raw.split_at(4);
                    Self::from_parts(year, month).map_err(|_| invalid())
                }
                _ => Err(invalid()),
            };
        }

        raw.parse::<Self>()
            .map_err(|_| CoreError::InvalidDate(raw.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn from_parts(year: &str, month: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidDate(format!("{year}-{month}"));
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    /// Parses the canonical `YYYY-MM` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| CoreError::InvalidDate(s.to_string()))?;
        if month.len() != 2 {
            return Err(CoreError::InvalidDate(s.to_string()));
        }
        Self::from_parts(year, month).map_err(|_| CoreError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_supported_date_layouts() {
        let expected = YearMonth::new(1926, 7).unwrap();
        for raw in ["1926-07-31", "07/31/1926", "1926/07/31", "19260731", "1926-07", "192607"] {
            assert_eq!(YearMonth::parse_date(raw).unwrap(), expected, "layout {raw}");
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in ["", "July 1926", "1926-13-01", "192613", "1926-7x"] {
            assert!(YearMonth::parse_date(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn displays_zero_padded_and_round_trips() {
        let key = YearMonth::new(1930, 1).unwrap();
        assert_eq!(key.to_string(), "1930-01");
        assert_eq!("1930-01".parse::<YearMonth>().unwrap(), key);
    }

    #[test]
    fn succ_rolls_over_the_year() {
        let december = YearMonth::new(1929, 12).unwrap();
        assert_eq!(december.succ(), YearMonth::new(1930, 1).unwrap());
        assert!(december < december.succ());
    }
}
