//! Progress projections for the daily log and weekly goal screens.
//!
//! # Invariants
//! - Percentages are clamped to `0..=100`.
//! - `remaining` is not clamped and goes negative once the target is exceeded.

use crate::energy::DAYS_PER_WEEK;
use crate::journal::log_store::{daily_total, LogsByDate};
use crate::journal::week::week_containing;
use crate::model::day::DayKey;

/// Day bars are scaled so that 120% of the daily target fills the bar.
pub const DAY_BAR_HEADROOM: f64 = 1.2;

/// Consumption against target for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: DayKey,
    pub target: i64,
    pub consumed: i64,
    pub remaining: i64,
    pub progress_percent: f64,
    pub over_target: bool,
}

impl DaySummary {
    pub fn compute(logs: &LogsByDate, date: DayKey, daily_target: i64) -> Self {
        let consumed = daily_total(logs.day(date));
        Self {
            date,
            target: daily_target,
            consumed,
            remaining: daily_target.saturating_sub(consumed),
            progress_percent: capped_percent(consumed as f64, daily_target as f64),
            over_target: consumed > daily_target,
        }
    }
}

/// One column of the weekly chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBar {
    pub date: DayKey,
    pub total: i64,
    pub height_percent: f64,
    pub over_target: bool,
    pub is_today: bool,
}

/// Progress of the week containing a date.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekProgress {
    /// Monday through Sunday.
    pub days: Vec<DayBar>,
    pub consumed: i64,
    pub weekly_target: i64,
    pub progress_percent: f64,
}

impl WeekProgress {
    pub fn compute(logs: &LogsByDate, date: DayKey, today: DayKey, daily_target: i64) -> Self {
        let weekly_target = daily_target.saturating_mul(DAYS_PER_WEEK);
        let bar_scale = daily_target as f64 * DAY_BAR_HEADROOM;

        let days = week_containing(date)
            .into_iter()
            .map(|day| {
                let total = daily_total(logs.day(day));
                DayBar {
                    date: day,
                    total,
                    height_percent: capped_percent(total as f64, bar_scale),
                    over_target: total > daily_target,
                    is_today: day == today,
                }
            })
            .collect::<Vec<_>>();
        let consumed = days.iter().map(|bar| bar.total).sum::<i64>();

        Self {
            days,
            consumed,
            weekly_target,
            progress_percent: capped_percent(consumed as f64, weekly_target as f64),
        }
    }
}

fn capped_percent(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return if value > 0.0 { 100.0 } else { 0.0 };
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}
