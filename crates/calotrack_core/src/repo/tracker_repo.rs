//! Typed access to tracker state stored as JSON values.
//!
//! # Responsibility
//! - Map profile, logs and custom foods to their storage keys.
//! - Migrate the legacy single-list log into the per-date map.
//!
//! # Invariants
//! - Only custom foods are appended under [`CUSTOM_FOODS_KEY`]; records that
//!   no longer decode are carried over untouched.
//! - Legacy data is only consulted while [`ALL_LOGS_KEY`] is absent.
//! - A [`TrackerWrite`] reaches the store as one atomic batch.

use crate::journal::log_store::{DayLog, LogsByDate};
use crate::model::day::DayKey;
use crate::model::food::FoodCatalogEntry;
use crate::model::log_entry::LogEntry;
use crate::model::profile::UserProfile;
use crate::repo::kv_store::{KvStore, StoreError, StoreResult};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const PROFILE_KEY: &str = "user_profile";
pub const ALL_LOGS_KEY: &str = "all_logs";
pub const CUSTOM_FOODS_KEY: &str = "custom_foods";
/// Flat list of entries written by the first release, before per-date logs.
pub const LEGACY_LOG_KEY: &str = "calotrack_log";

/// Repository for tracker state over any [`KvStore`].
pub struct TrackerRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> TrackerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_profile(&self) -> StoreResult<Option<UserProfile>> {
        self.read_json(PROFILE_KEY)
    }

    /// Overwrites the stored profile wholesale.
    pub fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.write_json(PROFILE_KEY, profile)
    }

    /// Loads the per-date log map.
    ///
    /// When no map is stored but a legacy list exists, the list is placed
    /// under `today` and written back as the new map.
    pub fn load_logs(&self, today: DayKey) -> StoreResult<LogsByDate> {
        if let Some(logs) = self.read_json::<LogsByDate>(ALL_LOGS_KEY)? {
            return Ok(logs);
        }

        let Some(legacy) = self.read_json::<Vec<LogEntry>>(LEGACY_LOG_KEY)? else {
            return Ok(LogsByDate::new());
        };
        if legacy.is_empty() {
            return Ok(LogsByDate::new());
        }

        let migrated_entries = legacy.len();
        let logs = LogsByDate::from(BTreeMap::<DayKey, DayLog>::from([(today, legacy)]));
        self.save_logs(&logs)?;
        info!(
            "event=legacy_log_migrate module=repo status=ok entries={} date={}",
            migrated_entries, today
        );
        Ok(logs)
    }

    pub fn save_logs(&self, logs: &LogsByDate) -> StoreResult<()> {
        self.write_json(ALL_LOGS_KEY, logs)
    }

    /// Stored custom-food records as raw JSON, in stored order.
    ///
    /// Fails with `Corrupt` only when the value is not a JSON array.
    pub fn load_custom_records(&self) -> StoreResult<Vec<Value>> {
        Ok(self
            .read_json::<Vec<Value>>(CUSTOM_FOODS_KEY)?
            .unwrap_or_default())
    }

    /// Loads persisted custom foods; absent key yields an empty list.
    ///
    /// Records that do not decode as a food are skipped, not removed.
    pub fn load_custom_foods(&self) -> StoreResult<Vec<FoodCatalogEntry>> {
        let records = self.load_custom_records()?;
        let total = records.len();
        let foods = records
            .into_iter()
            .filter_map(|record| serde_json::from_value::<FoodCatalogEntry>(record).ok())
            .collect::<Vec<_>>();
        if foods.len() < total {
            warn!(
                "event=custom_food_decode module=repo status=degraded skipped={}",
                total - foods.len()
            );
        }
        Ok(foods)
    }

    /// Applies every value staged in `write` in one store call.
    pub fn commit(&self, write: TrackerWrite) -> StoreResult<()> {
        if write.entries.is_empty() {
            return Ok(());
        }
        let pairs = write
            .entries
            .iter()
            .map(|(key, raw)| (*key, raw.as_str()))
            .collect::<Vec<_>>();
        self.store.set_many(&pairs)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StoreError::Corrupt {
                key: key.to_string(),
                message: err.to_string(),
            })
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        self.store.set(key, &encode(key, value)?)
    }
}

/// Encoded values staged for [`TrackerRepository::commit`].
///
/// Encoding happens while staging, so a commit never fails half-encoded.
#[derive(Debug, Default)]
pub struct TrackerWrite {
    entries: Vec<(&'static str, String)>,
}

impl TrackerWrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(self, logs: &LogsByDate) -> StoreResult<Self> {
        self.stage(ALL_LOGS_KEY, logs)
    }

    /// Stages `existing` records followed by `food`, flagged custom.
    pub fn custom_food_appended(
        self,
        mut existing: Vec<Value>,
        food: &FoodCatalogEntry,
    ) -> StoreResult<Self> {
        let food = FoodCatalogEntry {
            is_custom: true,
            ..food.clone()
        };
        let record = serde_json::to_value(&food).map_err(|err| StoreError::Encode {
            key: CUSTOM_FOODS_KEY.to_string(),
            message: err.to_string(),
        })?;
        existing.push(record);
        self.stage(CUSTOM_FOODS_KEY, &existing)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    fn stage<T: Serialize + ?Sized>(mut self, key: &'static str, value: &T) -> StoreResult<Self> {
        let raw = encode(key, value)?;
        self.entries.retain(|(staged, _)| *staged != key);
        self.entries.push((key, raw));
        Ok(self)
    }
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|err| StoreError::Encode {
        key: key.to_string(),
        message: err.to_string(),
    })
}
