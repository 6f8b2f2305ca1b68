//! Local calendar day keys.
//!
//! # Responsibility
//! - Represent the date a log entry belongs to.
//! - Parse and render the strict `YYYY-MM-DD` storage form.
//!
//! # Invariants
//! - "Today" is derived from local time, never UTC.
//! - Day arithmetic saturates at the ends of the chrono calendar instead of
//!   panicking, so keys built from any `NaiveDate` are safe to shift.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DAY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid day key regex"));

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a day key string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKeyError {
    /// Value does not have the `YYYY-MM-DD` shape.
    InvalidFormat(String),
    /// Value has the right shape but is not a calendar date.
    InvalidDate(String),
}

impl Display for DayKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(value) => {
                write!(f, "day key `{value}` must use the YYYY-MM-DD format")
            }
            Self::InvalidDate(value) => write!(f, "day key `{value}` is not a calendar date"),
        }
    }
}

impl Error for DayKeyError {}

/// Local calendar date used to key day logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wraps an already computed calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from year, month (1-12) and day (1-31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the current local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses a strict `YYYY-MM-DD` value.
    ///
    /// # Errors
    /// - `InvalidFormat` for anything other than zero-padded digits.
    /// - `InvalidDate` for shapes like `2024-02-30`.
    pub fn parse(value: &str) -> Result<Self, DayKeyError> {
        let trimmed = value.trim();
        if !DAY_KEY_RE.is_match(trimmed) {
            return Err(DayKeyError::InvalidFormat(value.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DayKeyError::InvalidDate(value.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the key `days` calendar days later, capped at `NaiveDate::MAX`.
    pub fn plus_days(self, days: u64) -> Self {
        Self(
            self.0
                .checked_add_days(Days::new(days))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// Returns the key `days` calendar days earlier, capped at `NaiveDate::MIN`.
    pub fn minus_days(self, days: u64) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{DayKey, DayKeyError};
    use crate::journal::week::{monday_of, week_of};
    use chrono::NaiveDate;

    #[test]
    fn parse_and_display_roundtrip() {
        let key = DayKey::parse("2024-03-09").unwrap();
        assert_eq!(key.to_string(), "2024-03-09");
    }

    #[test]
    fn parse_rejects_unpadded_values() {
        let err = DayKey::parse("2024-3-9").unwrap_err();
        assert_eq!(err, DayKeyError::InvalidFormat("2024-3-9".to_string()));
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        let err = DayKey::parse("2023-02-29").unwrap_err();
        assert_eq!(err, DayKeyError::InvalidDate("2023-02-29".to_string()));
    }

    #[test]
    fn day_arithmetic_crosses_month_and_year() {
        let key = DayKey::parse("2023-12-30").unwrap();
        assert_eq!(key.plus_days(3).to_string(), "2024-01-02");
        assert_eq!(key.plus_days(3).minus_days(3), key);
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = DayKey::from_ymd(2025, 1, 5).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-01-05\"");
        let decoded: DayKey = serde_json::from_str("\"2025-01-05\"").unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn shifting_saturates_at_calendar_limits() {
        let last = DayKey::from_date(NaiveDate::MAX);
        assert_eq!(last.plus_days(7), last);
        let first = DayKey::from_date(NaiveDate::MIN);
        assert_eq!(first.minus_days(u64::MAX), first);
        assert_eq!(week_of(monday_of(last)).len(), 7);
    }
}
