//! Inclusive date windows for transaction queries

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ActualError;

/// Inclusive `[start, end]` range of calendar dates, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Build a window from two dates
    ///
    /// # Errors
    ///
    /// `ActualError::InvalidRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ActualError> {
        if start > end {
            return Err(ActualError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Build a window from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, ActualError> {
        let start = parse_iso_date(start).map_err(ActualError::validation)?;
        let end = parse_iso_date(end).map_err(ActualError::validation)?;
        Self::new(start, end)
    }

    /// The last `days` days up to and including `today`
    pub fn last_days(days: u32, today: NaiveDate) -> Result<Self, ActualError> {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| ActualError::validation(format!("last: {} days is out of range", days)))?;
        Self::new(start, today)
    }

    /// Every date that can be represented
    #[cfg(test)]
    pub(crate) fn all_time() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check if `date` falls inside the window, endpoints included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    let shape_ok = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(format!("'{}': Must be valid ISO YYYY-MM-DD date", value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{}': Must be valid ISO YYYY-MM-DD date", value))
}
