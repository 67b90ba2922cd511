use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};

use super::ChartKeyError;

/// A validated year-month identifying one chart snapshot.
///
/// Displays as `YYYY-MM`, which is also the cache key and the prefix of the
/// playlist name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartKey {
    first_day: NaiveDate,
}

impl ChartKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ChartKeyError> {
        if !(1000..=9999).contains(&year) {
            return Err(ChartKeyError::Year(year));
        }
        let first_day =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(ChartKeyError::Month(month))?;
        Ok(Self { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The chart provider publishes weekly charts; the one dated on the first
    /// day of the month stands for the whole month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }
}

impl FromStr for ChartKey {
    type Err = ChartKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let format_err = || ChartKeyError::Format(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(format_err)?;
        if year.len() != 4
            || month.len() != 2
            || !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(format_err());
        }

        let year = year.parse::<i32>().map_err(|_| format_err())?;
        let month = month.parse::<u32>().map_err(|_| format_err())?;
        Self::new(year, month)
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
