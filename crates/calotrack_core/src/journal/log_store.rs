//! Pure operations over the per-date log map.

use crate::model::day::DayKey;
use crate::model::log_entry::LogEntry;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Entries logged for one day, most recent first.
pub type DayLog = Vec<LogEntry>;

/// Log-store operation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// Removal position does not exist in that day's log.
    InvalidIndex {
        date: DayKey,
        index: usize,
        len: usize,
    },
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndex { date, index, len } => write!(
                f,
                "no log entry at position {index} for {date} (day has {len} entries)"
            ),
        }
    }
}

impl Error for LogError {}

/// Mapping from local date to that day's entries.
///
/// Serialized as a plain JSON object keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<DayKey, DayLog>")]
pub struct LogsByDate {
    days: BTreeMap<DayKey, DayLog>,
}

impl LogsByDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for `date`; empty when nothing was logged.
    pub fn day(&self, date: DayKey) -> &[LogEntry] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that have at least one entry, ascending.
    pub fn dates(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.days.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of entries across all days.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

impl From<BTreeMap<DayKey, DayLog>> for LogsByDate {
    fn from(mut days: BTreeMap<DayKey, DayLog>) -> Self {
        days.retain(|_, entries| !entries.is_empty());
        Self { days }
    }
}

impl Serialize for LogsByDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

/// Returns a new map with `entry` prepended to `date`'s log.
pub fn append(logs: &LogsByDate, date: DayKey, entry: LogEntry) -> LogsByDate {
    let mut next = logs.clone();
    next.days.entry(date).or_default().insert(0, entry);
    next
}

/// Returns a new map without the entry at `index` of `date`'s log.
///
/// # Errors
/// `InvalidIndex` when the position does not exist; `logs` is untouched.
pub fn remove_at(logs: &LogsByDate, date: DayKey, index: usize) -> Result<LogsByDate, LogError> {
    let len = logs.day(date).len();
    if index >= len {
        return Err(LogError::InvalidIndex { date, index, len });
    }

    let mut next = logs.clone();
    if let Some(entries) = next.days.get_mut(&date) {
        entries.remove(index);
        if entries.is_empty() {
            next.days.remove(&date);
        }
    }
    Ok(next)
}

/// Sum of calories in one day log.
pub fn daily_total(day_log: &[LogEntry]) -> i64 {
    day_log.iter().map(|entry| i64::from(entry.calories)).sum()
}

/// Sum of daily totals over the given week dates.
pub fn weekly_total(logs: &LogsByDate, week_dates: &[DayKey; 7]) -> i64 {
    week_dates
        .iter()
        .map(|date| daily_total(logs.day(*date)))
        .sum()
}
