//! Core domain logic for CaloTrack.
//! This crate is the single source of truth for energy targets, food logs and
//! the food catalog.

pub mod app;
pub mod catalog;
pub mod db;
pub mod energy;
pub mod journal;
pub mod logging;
pub mod model;
pub mod portion;
pub mod repo;
pub mod service;

pub use app::navigator::{Navigator, Screen};
pub use catalog::food_catalog::{search_catalog, CatalogHit, FoodCatalog};
pub use catalog::search::{normalize_name, CatalogQuery};
pub use catalog::seed::seed_foods;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use energy::{compute_daily_target, compute_weekly_target, DEFAULT_DAILY_TARGET};
pub use journal::calendar::MonthGrid;
pub use journal::log_store::{append, daily_total, remove_at, weekly_total, LogError, LogsByDate};
pub use journal::summary::{DayBar, DaySummary, WeekProgress};
pub use journal::week::{
    classify_week, monday_of, week_of, weekly_history, WeekStatus, WeekSummary,
};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::day::{DayKey, DayKeyError};
pub use model::food::{FoodCatalogEntry, FoodValidationError};
pub use model::log_entry::{LogEntry, LogEntryValidationError};
pub use model::profile::{
    ActivityLevel, Gender, Goal, ProfileForm, ProfileValidationError, UserProfile,
};
pub use portion::{
    derive_custom_food, preview_calories, resolve, resolve_manual, MeasureMode, PortionError,
};
pub use repo::kv_store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use repo::tracker_repo::{TrackerRepository, TrackerWrite};
pub use service::tracker_service::{
    CatalogSave, FoodMatch, ManualEntry, ManualLogged, TrackerError, TrackerResult,
    TrackerService,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
