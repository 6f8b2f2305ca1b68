//! Month layout for picking a day to review.

use crate::model::day::DayKey;
use chrono::{Datelike, NaiveDate};

/// Monday-first layout of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 when the grid starts on Monday.
    pub leading_blanks: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    /// Layout of the month containing `date`.
    pub fn containing(date: DayKey) -> Self {
        let date = date.date();
        let first = date.with_day(1).unwrap_or(date);
        Self {
            year: first.year(),
            month: first.month(),
            leading_blanks: first.weekday().num_days_from_monday(),
            days_in_month: days_in_month(first),
        }
    }

    /// Key for `day` of this month, `None` when out of range.
    pub fn day_key(&self, day: u32) -> Option<DayKey> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        DayKey::from_ymd(self.year, self.month, day)
    }

    /// Day number of `today` when it falls inside this month.
    pub fn today_marker(&self, today: DayKey) -> Option<u32> {
        let date = today.date();
        (date.year() == self.year && date.month() == self.month).then(|| date.day())
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}
