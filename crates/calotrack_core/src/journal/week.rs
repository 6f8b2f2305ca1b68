//! Monday-based weeks and weekly goal classification.

use crate::journal::log_store::{weekly_total, LogsByDate};
use crate::model::day::DayKey;
use crate::model::profile::Goal;
use serde::{Deserialize, Serialize};

/// Number of past weeks reported by default.
pub const DEFAULT_HISTORY_WEEKS: usize = 4;
/// Allowed deviation from target for `maintain`, in percent.
pub const MAINTAIN_TOLERANCE_PERCENT: u64 = 10;

/// Outcome of one week against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    NoData,
    Success,
    Fail,
}

impl WeekStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }
}

/// Rollup of one past week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSummary {
    pub monday: DayKey,
    pub total: i64,
    pub target: i64,
    pub status: WeekStatus,
}

/// Monday of the week containing `date`.
pub fn monday_of(date: DayKey) -> DayKey {
    date.minus_days(u64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates Monday..Sunday starting at `monday`.
pub fn week_of(monday: DayKey) -> [DayKey; 7] {
    std::array::from_fn(|offset| monday.plus_days(offset as u64))
}

/// The seven dates of the week containing `date`.
pub fn week_containing(date: DayKey) -> [DayKey; 7] {
    week_of(monday_of(date))
}

/// Classifies a weekly total against the weekly target for a goal.
pub fn classify_week(total: i64, weekly_target: i64, goal: Goal) -> WeekStatus {
    if total == 0 {
        return WeekStatus::NoData;
    }

    let success = match goal {
        Goal::Lose => total <= weekly_target,
        Goal::Gain => total >= weekly_target,
        Goal::Maintain => {
            u128::from(total.abs_diff(weekly_target)) * 100
                <= u128::from(weekly_target.unsigned_abs()) * u128::from(MAINTAIN_TOLERANCE_PERCENT)
        }
    };
    if success {
        WeekStatus::Success
    } else {
        WeekStatus::Fail
    }
}

/// Rollups for the `weeks` weeks before the one containing `today`.
///
/// Most recent week first; the current week is not included.
pub fn weekly_history(
    logs: &LogsByDate,
    today: DayKey,
    weeks: usize,
    weekly_target: i64,
    goal: Goal,
) -> Vec<WeekSummary> {
    let current_monday = monday_of(today);
    (1..=weeks as u64)
        .map(|back| {
            let monday = current_monday.minus_days(back.saturating_mul(7));
            let total = weekly_total(logs, &week_of(monday));
            WeekSummary {
                monday,
                total,
                target: weekly_target,
                status: classify_week(total, weekly_target, goal),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{classify_week, monday_of, week_containing, weekly_history, WeekStatus};
    use crate::journal::log_store::{append, LogsByDate};
    use crate::model::day::DayKey;
    use crate::model::log_entry::LogEntry;
    use crate::model::profile::Goal;

    fn day(value: &str) -> DayKey {
        DayKey::parse(value).unwrap()
    }

    #[test]
    fn monday_of_handles_every_weekday() {
        // 2024-05-06 is a Monday.
        for offset in 0..7 {
            let date = day("2024-05-06").plus_days(offset);
            assert_eq!(monday_of(date), day("2024-05-06"), "offset {offset}");
        }
        assert_eq!(monday_of(day("2024-05-05")), day("2024-04-29"));
    }

    #[test]
    fn week_containing_spans_month_boundary() {
        let week = week_containing(day("2024-03-01"));
        assert_eq!(week[0], day("2024-02-26"));
        assert_eq!(week[6], day("2024-03-03"));
    }

    #[test]
    fn classify_lose_and_gain() {
        assert_eq!(classify_week(8200, 14_000, Goal::Lose), WeekStatus::Success);
        assert_eq!(classify_week(14_001, 14_000, Goal::Lose), WeekStatus::Fail);
        assert_eq!(classify_week(14_000, 14_000, Goal::Gain), WeekStatus::Success);
        assert_eq!(classify_week(8200, 14_000, Goal::Gain), WeekStatus::Fail);
    }

    #[test]
    fn classify_maintain_uses_ten_percent_band() {
        assert_eq!(classify_week(12_600, 14_000, Goal::Maintain), WeekStatus::Success);
        assert_eq!(classify_week(15_400, 14_000, Goal::Maintain), WeekStatus::Success);
        assert_eq!(classify_week(12_599, 14_000, Goal::Maintain), WeekStatus::Fail);
        assert_eq!(classify_week(15_401, 14_000, Goal::Maintain), WeekStatus::Fail);
    }

    #[test]
    fn classify_zero_total_is_no_data() {
        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            assert_eq!(classify_week(0, 14_000, goal), WeekStatus::NoData);
        }
    }

    #[test]
    fn history_reports_previous_weeks_most_recent_first() {
        let logs = append(
            &LogsByDate::new(),
            day("2024-04-30"),
            LogEntry::new("Locro Criollo", 1.0, "plato", 550),
        );

        let history = weekly_history(&logs, day("2024-05-08"), 4, 14_000, Goal::Lose);
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].monday, day("2024-04-29"));
        assert_eq!(history[0].total, 550);
        assert_eq!(history[0].status, WeekStatus::Success);
        assert_eq!(history[3].monday, day("2024-04-08"));
        assert_eq!(history[3].status, WeekStatus::NoData);
    }

    #[test]
    fn maintain_classification_handles_extreme_targets() {
        assert_eq!(classify_week(1, i64::MAX, Goal::Maintain), WeekStatus::Fail);
        assert_eq!(classify_week(i64::MAX, i64::MAX, Goal::Maintain), WeekStatus::Success);
    }
}
