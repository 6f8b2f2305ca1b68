//! Tracker use-case service.
//!
//! # Responsibility
//! - Load state, apply the pure core operations and write the result back.
//! - Degrade corrupt persisted values to their empty state.
//!
//! # Invariants
//! - Every mutation reads the full structure, computes a new one and writes
//!   it back in one commit; callers must not interleave calls on one store.
//! - Validation runs before any write, so failed calls leave storage as-is.
//! - A manual entry that passes validation is always logged, even when its
//!   catalog copy cannot be derived.
//! - Log events carry counts and dates only, never food names or body metrics.

use crate::catalog::food_catalog::FoodCatalog;
use crate::catalog::search::CatalogQuery;
use crate::catalog::seed::seed_foods;
use crate::energy::{compute_daily_target, compute_weekly_target};
use crate::journal::log_store::{append, remove_at, LogError, LogsByDate};
use crate::journal::summary::{DaySummary, WeekProgress};
use crate::journal::week::{weekly_history, WeekSummary};
use crate::model::day::DayKey;
use crate::model::food::{FoodCatalogEntry, FoodValidationError};
use crate::model::log_entry::{LogEntry, LogEntryValidationError};
use crate::model::profile::{Goal, ProfileForm, ProfileValidationError, UserProfile};
use crate::portion::{derive_custom_food, resolve, resolve_manual, MeasureMode, PortionError};
use crate::repo::kv_store::{KvStore, StoreError, StoreResult};
use crate::repo::tracker_repo::{
    TrackerRepository, TrackerWrite, ALL_LOGS_KEY, CUSTOM_FOODS_KEY, PROFILE_KEY,
};
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum TrackerError {
    Profile(ProfileValidationError),
    Food(FoodValidationError),
    Entry(LogEntryValidationError),
    Log(LogError),
    Portion(PortionError),
    /// Catalog position does not exist.
    UnknownFood(usize),
    Store(StoreError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile(err) => write!(f, "{err}"),
            Self::Food(err) => write!(f, "{err}"),
            Self::Entry(err) => write!(f, "{err}"),
            Self::Log(err) => write!(f, "{err}"),
            Self::Portion(err) => write!(f, "{err}"),
            Self::UnknownFood(index) => write!(f, "no catalog food at position {index}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Profile(err) => Some(err),
            Self::Food(err) => Some(err),
            Self::Entry(err) => Some(err),
            Self::Log(err) => Some(err),
            Self::Portion(err) => Some(err),
            Self::UnknownFood(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ProfileValidationError> for TrackerError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Profile(value)
    }
}

impl From<FoodValidationError> for TrackerError {
    fn from(value: FoodValidationError) -> Self {
        Self::Food(value)
    }
}

impl From<LogEntryValidationError> for TrackerError {
    fn from(value: LogEntryValidationError) -> Self {
        Self::Entry(value)
    }
}

impl From<LogError> for TrackerError {
    fn from(value: LogError) -> Self {
        Self::Log(value)
    }
}

impl From<PortionError> for TrackerError {
    fn from(value: PortionError) -> Self {
        Self::Portion(value)
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Manually entered food, as typed in the manual tab of the add-food flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub name: String,
    pub total_calories: i64,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

/// Outcome of the optional "save to catalog" part of a manual log.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSave {
    NotRequested,
    Saved,
    /// The entry was logged but is not usable as a catalog food.
    Skipped(PortionError),
}

impl CatalogSave {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Saved => "saved",
            Self::Skipped(_) => "skipped",
        }
    }
}

/// Logged manual entry and what happened to its catalog copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualLogged {
    pub entry: LogEntry,
    pub catalog: CatalogSave,
}

/// Catalog search hit with an owned entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodMatch {
    /// Position to pass back to [`TrackerService::log_catalog_food`].
    pub index: usize,
    pub entry: FoodCatalogEntry,
}

/// Use-case facade over a tracker store.
pub struct TrackerService<S: KvStore> {
    repo: TrackerRepository<S>,
    fixed_today: Option<DayKey>,
}

impl<S: KvStore> TrackerService<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: TrackerRepository::new(store),
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_fixed_today(mut self, today: DayKey) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> DayKey {
        self.fixed_today.unwrap_or_else(DayKey::today)
    }

    /// Stored profile; a corrupt value reads as no profile.
    pub fn profile(&self) -> TrackerResult<Option<UserProfile>> {
        Ok(degrade(PROFILE_KEY, self.repo.load_profile())?.flatten())
    }

    /// Validates the setup form and overwrites the stored profile.
    pub fn save_profile(&self, form: &ProfileForm) -> TrackerResult<UserProfile> {
        let profile = match form.parse() {
            Ok(profile) => profile,
            Err(err) => {
                warn!("event=profile_save module=service status=rejected reason=validation");
                return Err(err.into());
            }
        };
        self.repo.save_profile(&profile)?;
        info!(
            "event=profile_save module=service status=ok goal={}",
            profile.goal.as_str()
        );
        Ok(profile)
    }

    pub fn daily_target(&self) -> TrackerResult<i64> {
        Ok(compute_daily_target(self.profile()?.as_ref()))
    }

    pub fn weekly_target(&self) -> TrackerResult<i64> {
        Ok(compute_weekly_target(self.profile()?.as_ref()))
    }

    /// Seed foods followed by persisted custom foods.
    pub fn catalog(&self) -> TrackerResult<FoodCatalog> {
        let custom = degrade(CUSTOM_FOODS_KEY, self.repo.load_custom_foods())?.unwrap_or_default();
        Ok(FoodCatalog::load(seed_foods(), custom))
    }

    pub fn search_foods(&self, query: &CatalogQuery) -> TrackerResult<Vec<FoodMatch>> {
        let catalog = self.catalog()?;
        Ok(catalog
            .search(query)
            .into_iter()
            .map(|hit| FoodMatch {
                index: hit.index,
                entry: hit.entry.clone(),
            })
            .collect())
    }

    /// Appends a custom food to the catalog and to the stored records.
    ///
    /// Stored records that no longer load are kept as they are.
    pub fn add_custom_food(&self, entry: FoodCatalogEntry) -> TrackerResult<FoodCatalog> {
        let catalog = self.catalog()?.add_custom(entry.clone())?;
        let write = TrackerWrite::new().custom_food_appended(self.custom_records()?, &entry)?;
        self.repo.commit(write)?;
        info!(
            "event=custom_food_add module=service status=ok custom_count={}",
            catalog.custom_entries().len()
        );
        Ok(catalog)
    }

    /// Full log map; a corrupt value reads as empty.
    pub fn logs(&self) -> TrackerResult<LogsByDate> {
        Ok(degrade(ALL_LOGS_KEY, self.repo.load_logs(self.today()))?.unwrap_or_default())
    }

    pub fn day_log(&self, date: DayKey) -> TrackerResult<Vec<LogEntry>> {
        Ok(self.logs()?.day(date).to_vec())
    }

    /// Prepends `entry` to `date`'s log and persists the whole map.
    pub fn log_food(&self, date: DayKey, entry: LogEntry) -> TrackerResult<LogsByDate> {
        entry.validate()?;
        let logs = append(&self.logs()?, date, entry);
        self.repo.save_logs(&logs)?;
        info!(
            "event=food_log module=service status=ok date={} day_entries={}",
            date,
            logs.day(date).len()
        );
        Ok(logs)
    }

    /// Resolves a catalog food by position and logs it.
    pub fn log_catalog_food(
        &self,
        date: DayKey,
        catalog_index: usize,
        mode: MeasureMode,
        value: f64,
    ) -> TrackerResult<LogEntry> {
        let catalog = self.catalog()?;
        let food = catalog
            .get(catalog_index)
            .ok_or(TrackerError::UnknownFood(catalog_index))?;
        let entry = resolve(food, mode, value)?;
        self.log_food(date, entry.clone())?;
        Ok(entry)
    }

    /// Logs a manual entry and optionally saves it as a custom food.
    ///
    /// The log and the catalog copy are committed together. A catalog copy
    /// that cannot be derived is skipped and reported in the result.
    pub fn log_manual(
        &self,
        date: DayKey,
        manual: &ManualEntry,
        save_to_catalog: bool,
    ) -> TrackerResult<ManualLogged> {
        let entry = resolve_manual(
            &manual.name,
            manual.total_calories,
            manual.amount,
            manual.unit.as_deref(),
        )?;
        entry.validate()?;
        let logs = append(&self.logs()?, date, entry.clone());
        let mut write = TrackerWrite::new().logs(&logs)?;

        let derived = save_to_catalog.then(|| {
            derive_custom_food(
                &entry.name,
                manual.total_calories,
                entry.amount,
                Some(entry.unit.as_str()),
            )
        });
        let catalog = match derived {
            None => CatalogSave::NotRequested,
            Some(Ok(food)) => {
                write = write.custom_food_appended(self.custom_records()?, &food)?;
                CatalogSave::Saved
            }
            Some(Err(err)) => {
                warn!("event=custom_food_add module=service status=skipped reason=invalid_food");
                CatalogSave::Skipped(err)
            }
        };

        self.repo.commit(write)?;
        info!(
            "event=food_log module=service status=ok date={} day_entries={} catalog={}",
            date,
            logs.day(date).len(),
            catalog.as_str()
        );
        Ok(ManualLogged { entry, catalog })
    }

    /// Removes the entry at `index` of `date`'s log.
    pub fn remove_log(&self, date: DayKey, index: usize) -> TrackerResult<LogsByDate> {
        let logs = remove_at(&self.logs()?, date, index)?;
        self.repo.save_logs(&logs)?;
        info!(
            "event=food_remove module=service status=ok date={} day_entries={}",
            date,
            logs.day(date).len()
        );
        Ok(logs)
    }

    pub fn day_summary(&self, date: DayKey) -> TrackerResult<DaySummary> {
        let target = self.daily_target()?;
        Ok(DaySummary::compute(&self.logs()?, date, target))
    }

    /// Progress of the week containing `date`.
    pub fn week_progress(&self, date: DayKey) -> TrackerResult<WeekProgress> {
        let target = self.daily_target()?;
        Ok(WeekProgress::compute(
            &self.logs()?,
            date,
            self.today(),
            target,
        ))
    }

    /// Rollups of the `weeks` weeks before the current one.
    pub fn week_history(&self, weeks: usize) -> TrackerResult<Vec<WeekSummary>> {
        let profile = self.profile()?;
        let goal = profile.as_ref().map_or(Goal::Maintain, |p| p.goal);
        let weekly_target = compute_weekly_target(profile.as_ref());
        Ok(weekly_history(
            &self.logs()?,
            self.today(),
            weeks,
            weekly_target,
            goal,
        ))
    }
}

impl<S: KvStore> TrackerService<S> {
    /// Raw stored custom-food records; a corrupt list reads as empty.
    fn custom_records(&self) -> TrackerResult<Vec<Value>> {
        Ok(degrade(CUSTOM_FOODS_KEY, self.repo.load_custom_records())?.unwrap_or_default())
    }
}

/// Maps a corrupt value to `Ok(None)` after logging it.
fn degrade<T>(key: &str, result: StoreResult<T>) -> TrackerResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_corrupt() => {
            warn!(
                "event=store_read module=service status=degraded key={} error_code=persistence_corrupt",
                key
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
