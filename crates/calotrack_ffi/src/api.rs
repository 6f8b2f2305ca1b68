//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose tracker use-cases to Dart via FRB as flat envelopes.
//! - Resolve the database location once per process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in envelopes (`ok=false` + message), never thrown.
//! - Date arguments are `YYYY-MM-DD`; an empty string means local today.
//! - One process-wide navigator backs the `nav_*` calls.

use calotrack_core::db::open_db;
use calotrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    preview_calories, CatalogQuery, CatalogSave, DayKey, FoodMatch, LogEntry, ManualEntry,
    MeasureMode, Navigator, ProfileForm, Screen, SqliteKvStore, TrackerResult, TrackerService,
    WeekSummary,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

const SEARCH_DEFAULT_LIMIT: u32 = 20;
const SEARCH_LIMIT_MAX: u32 = 100;
const HISTORY_DEFAULT_WEEKS: u32 = 4;
const HISTORY_WEEKS_MAX: u32 = 52;
const DB_FILE_NAME: &str = "calotrack.sqlite3";
const DB_PATH_ENV: &str = "CALOTRACK_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static NAVIGATOR: OnceLock<Mutex<Navigator>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Calories of the logged entry, when the action logged food.
    pub calories: Option<u32>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, calories: Option<u32>) -> Self {
        Self {
            ok: true,
            calories,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            calories: None,
            message: message.into(),
        }
    }
}

/// Profile form values as text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub ok: bool,
    /// `false` until setup has been completed once.
    pub has_profile: bool,
    pub weight: String,
    pub height: String,
    pub age: String,
    pub gender: String,
    pub activity: String,
    pub goal: String,
    pub message: String,
}

/// Daily and weekly calorie targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetResponse {
    pub ok: bool,
    pub daily: i64,
    pub weekly: i64,
    pub message: String,
}

/// One catalog food in search results.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    /// Catalog position to pass to [`log_add_from_catalog`].
    pub index: u32,
    pub name: String,
    pub unit: String,
    pub cal_per_unit: f64,
    pub std_portion: Option<f64>,
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodSearchResponse {
    pub items: Vec<FoodItem>,
    pub message: String,
    pub applied_limit: u32,
}

/// One entry of a day log; `index` is its removal position.
#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    pub index: u32,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub calories: u32,
}

/// Day log with consumption against target.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLogResponse {
    pub ok: bool,
    pub date: String,
    pub items: Vec<LogItem>,
    pub consumed: i64,
    pub target: i64,
    pub remaining: i64,
    pub progress_percent: f64,
    pub over_target: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBarItem {
    pub date: String,
    pub total: i64,
    pub height_percent: f64,
    pub over_target: bool,
    pub is_today: bool,
}

/// Monday-to-Sunday chart of the week containing a date.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekProgressResponse {
    pub ok: bool,
    pub days: Vec<DayBarItem>,
    pub consumed: i64,
    pub weekly_target: i64,
    pub progress_percent: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekItem {
    pub monday: String,
    pub total: i64,
    pub target: i64,
    /// `no_data|success|fail`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekHistoryResponse {
    pub ok: bool,
    /// Most recent completed week first.
    pub items: Vec<WeekItem>,
    pub message: String,
}

/// Navigation snapshot after a `nav_*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub ok: bool,
    /// `loading|home|setup|daily_log|calendar|goals`.
    pub screen: String,
    /// Day shown by `daily_log`; empty for other screens.
    pub date: String,
    pub can_go_back: bool,
    pub message: String,
}

impl NavState {
    fn of(nav: &Navigator) -> Self {
        let screen = nav.current();
        let date = match screen {
            Screen::DailyLog(date) => date.to_string(),
            _ => String::new(),
        };
        Self {
            ok: true,
            screen: screen.name().to_string(),
            date,
            can_go_back: nav.can_go_back(),
            message: String::new(),
        }
    }

    fn failure(nav: &Navigator, message: String) -> Self {
        Self {
            ok: false,
            message,
            ..Self::of(nav)
        }
    }
}

/// Loads the stored profile as form fields, or setup defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_load() -> ProfileResponse {
    profile_load_at(&resolve_db_path())
}

/// Validates and saves the setup form.
///
/// # FFI contract
/// - Invalid input leaves the stored profile untouched and returns `ok=false`.
/// - A successful save moves the navigator back to `home`.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_save(
    weight: String,
    height: String,
    age: String,
    gender: String,
    activity: String,
    goal: String,
) -> ActionResponse {
    let form = ProfileForm {
        weight,
        height,
        age,
        gender,
        activity,
        goal,
    };
    let response = profile_save_at(&resolve_db_path(), &form);
    if response.ok {
        with_navigator(Navigator::profile_saved);
    }
    response
}

#[flutter_rust_bridge::frb(sync)]
pub fn targets() -> TargetResponse {
    targets_at(&resolve_db_path())
}

/// Accent-insensitive catalog search.
#[flutter_rust_bridge::frb(sync)]
pub fn food_search(text: String, custom_only: bool, limit: Option<u32>) -> FoodSearchResponse {
    food_search_at(&resolve_db_path(), &text, custom_only, limit)
}

/// Live calorie preview for the portion picker; `0` for unusable input.
///
/// `mode` is `exact|portions`.
#[flutter_rust_bridge::frb(sync)]
pub fn food_preview(index: u32, mode: String, value: f64) -> u32 {
    food_preview_at(&resolve_db_path(), index, &mode, value)
}

/// Logs a catalog food on `date`.
#[flutter_rust_bridge::frb(sync)]
pub fn log_add_from_catalog(date: String, index: u32, mode: String, value: f64) -> ActionResponse {
    log_add_from_catalog_at(&resolve_db_path(), &date, index, &mode, value)
}

/// Logs a manual entry on `date`, optionally saving it as a custom food.
#[flutter_rust_bridge::frb(sync)]
pub fn log_add_manual(
    date: String,
    name: String,
    total_calories: i64,
    amount: Option<f64>,
    unit: Option<String>,
    save_to_catalog: bool,
) -> ActionResponse {
    let manual = ManualEntry {
        name,
        total_calories,
        amount,
        unit,
    };
    log_add_manual_at(&resolve_db_path(), &date, &manual, save_to_catalog)
}

#[flutter_rust_bridge::frb(sync)]
pub fn log_remove(date: String, index: u32) -> ActionResponse {
    log_remove_at(&resolve_db_path(), &date, index)
}

#[flutter_rust_bridge::frb(sync)]
pub fn day_log(date: String) -> DayLogResponse {
    day_log_at(&resolve_db_path(), &date)
}

#[flutter_rust_bridge::frb(sync)]
pub fn week_progress(date: String) -> WeekProgressResponse {
    week_progress_at(&resolve_db_path(), &date)
}

#[flutter_rust_bridge::frb(sync)]
pub fn week_history(weeks: Option<u32>) -> WeekHistoryResponse {
    week_history_at(&resolve_db_path(), weeks)
}

/// Leaves the loading screen once stored state is readable.
#[flutter_rust_bridge::frb(sync)]
pub fn nav_start() -> NavState {
    let db_path = resolve_db_path();
    with_navigator(|nav| nav_start_with(nav, &db_path))
}

/// Opens `screen` (`home|setup|daily_log|calendar|goals`).
///
/// `date` only matters for `daily_log`; empty means local today.
#[flutter_rust_bridge::frb(sync)]
pub fn nav_open(screen: String, date: String) -> NavState {
    with_navigator(|nav| nav_open_with(nav, &screen, &date))
}

/// Goes back one screen; a locked setup screen stays put.
#[flutter_rust_bridge::frb(sync)]
pub fn nav_back() -> NavState {
    with_navigator(|nav| {
        nav.back();
        NavState::of(nav)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn nav_current() -> NavState {
    with_navigator(|nav| NavState::of(nav))
}

fn nav_start_with(nav: &mut Navigator, db_path: &Path) -> NavState {
    match with_service(db_path, |service| service.profile()) {
        Ok(profile) => {
            nav.finish_loading(profile.is_some());
            NavState::of(nav)
        }
        Err(err) => NavState::failure(nav, call_failed("nav_start", err)),
    }
}

fn nav_open_with(nav: &mut Navigator, screen: &str, date: &str) -> NavState {
    let target = match screen.trim() {
        "home" => Screen::Home,
        "setup" => Screen::Setup,
        "calendar" => Screen::Calendar,
        "goals" => Screen::Goals,
        "daily_log" => match parse_date(date) {
            Ok(date) => Screen::DailyLog(date),
            Err(message) => return NavState::failure(nav, call_failed("nav_open", message)),
        },
        other => {
            let message = format!("unknown screen `{other}`");
            return NavState::failure(nav, call_failed("nav_open", message));
        }
    };
    nav.navigate(target);
    NavState::of(nav)
}

fn profile_load_at(db_path: &Path) -> ProfileResponse {
    match with_service(db_path, |service| service.profile()) {
        Ok(profile) => {
            let form = profile
                .as_ref()
                .map(ProfileForm::from_profile)
                .unwrap_or_default();
            ProfileResponse {
                ok: true,
                has_profile: profile.is_some(),
                weight: form.weight,
                height: form.height,
                age: form.age,
                gender: form.gender,
                activity: form.activity,
                goal: form.goal,
                message: String::new(),
            }
        }
        Err(err) => {
            let form = ProfileForm::default();
            ProfileResponse {
                ok: false,
                has_profile: false,
                weight: form.weight,
                height: form.height,
                age: form.age,
                gender: form.gender,
                activity: form.activity,
                goal: form.goal,
                message: call_failed("profile_load", err),
            }
        }
    }
}

fn profile_save_at(db_path: &Path, form: &ProfileForm) -> ActionResponse {
    match with_service(db_path, |service| service.save_profile(form)) {
        Ok(_) => ActionResponse::success("Profile saved.", None),
        Err(err) => ActionResponse::failure(call_failed("profile_save", err)),
    }
}

fn targets_at(db_path: &Path) -> TargetResponse {
    let result = with_service(db_path, |service| {
        Ok((service.daily_target()?, service.weekly_target()?))
    });
    match result {
        Ok((daily, weekly)) => TargetResponse {
            ok: true,
            daily,
            weekly,
            message: String::new(),
        },
        Err(err) => TargetResponse {
            ok: false,
            daily: 0,
            weekly: 0,
            message: call_failed("targets", err),
        },
    }
}

fn food_search_at(
    db_path: &Path,
    text: &str,
    custom_only: bool,
    limit: Option<u32>,
) -> FoodSearchResponse {
    let applied_limit = normalize_search_limit(limit);
    let query = CatalogQuery {
        text: text.trim().to_string(),
        custom_only,
        limit: Some(applied_limit as usize),
    };

    match with_service(db_path, |service| service.search_foods(&query)) {
        Ok(hits) => {
            let items = hits.into_iter().map(to_food_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No results.".to_string()
            } else {
                format!("Found {} result(s).", items.len())
            };
            FoodSearchResponse {
                items,
                message,
                applied_limit,
            }
        }
        Err(err) => FoodSearchResponse {
            items: Vec::new(),
            message: call_failed("food_search", err),
            applied_limit,
        },
    }
}

fn food_preview_at(db_path: &Path, index: u32, mode: &str, value: f64) -> u32 {
    let Some(mode) = MeasureMode::parse(mode) else {
        return 0;
    };
    with_service(db_path, |service| service.catalog())
        .ok()
        .and_then(|catalog| {
            catalog
                .get(index as usize)
                .map(|food| preview_calories(food, mode, value))
        })
        .unwrap_or(0)
}

fn log_add_from_catalog_at(
    db_path: &Path,
    date: &str,
    index: u32,
    mode: &str,
    value: f64,
) -> ActionResponse {
    let Some(mode) = MeasureMode::parse(mode) else {
        return ActionResponse::failure(format!(
            "log_add_from_catalog failed: unknown measure mode `{mode}`"
        ));
    };
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_service(db_path, |service| {
        service.log_catalog_food(date, index as usize, mode, value)
    }) {
        Ok(entry) => ActionResponse::success("Food logged.", Some(entry.calories)),
        Err(err) => ActionResponse::failure(call_failed("log_add_from_catalog", err)),
    }
}

fn log_add_manual_at(
    db_path: &Path,
    date: &str,
    manual: &ManualEntry,
    save_to_catalog: bool,
) -> ActionResponse {
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_service(db_path, |service| {
        service.log_manual(date, manual, save_to_catalog)
    }) {
        Ok(logged) => {
            let message = match &logged.catalog {
                CatalogSave::NotRequested => "Food logged.".to_string(),
                CatalogSave::Saved => "Food logged and saved to catalog.".to_string(),
                CatalogSave::Skipped(reason) => {
                    format!("Food logged; not saved to catalog: {reason}")
                }
            };
            ActionResponse::success(message, Some(logged.entry.calories))
        }
        Err(err) => ActionResponse::failure(call_failed("log_add_manual", err)),
    }
}

fn log_remove_at(db_path: &Path, date: &str, index: u32) -> ActionResponse {
    let date = match parse_date(date) {
        Ok(date) => date,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_service(db_path, |service| service.remove_log(date, index as usize)) {
        Ok(_) => ActionResponse::success("Entry removed.", None),
        Err(err) => ActionResponse::failure(call_failed("log_remove", err)),
    }
}

fn day_log_at(db_path: &Path, date: &str) -> DayLogResponse {
    let result = parse_date(date).and_then(|date| {
        with_service(db_path, |service| {
            Ok((service.day_log(date)?, service.day_summary(date)?))
        })
        .map_err(|err| call_failed("day_log", err))
    });

    match result {
        Ok((entries, summary)) => DayLogResponse {
            ok: true,
            date: summary.date.to_string(),
            items: entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| to_log_item(index, entry))
                .collect(),
            consumed: summary.consumed,
            target: summary.target,
            remaining: summary.remaining,
            progress_percent: summary.progress_percent,
            over_target: summary.over_target,
            message: String::new(),
        },
        Err(message) => DayLogResponse {
            ok: false,
            date: date.to_string(),
            items: Vec::new(),
            consumed: 0,
            target: 0,
            remaining: 0,
            progress_percent: 0.0,
            over_target: false,
            message,
        },
    }
}

fn week_progress_at(db_path: &Path, date: &str) -> WeekProgressResponse {
    let result = parse_date(date).and_then(|date| {
        with_service(db_path, |service| service.week_progress(date))
            .map_err(|err| call_failed("week_progress", err))
    });

    match result {
        Ok(progress) => WeekProgressResponse {
            ok: true,
            days: progress
                .days
                .into_iter()
                .map(|bar| DayBarItem {
                    date: bar.date.to_string(),
                    total: bar.total,
                    height_percent: bar.height_percent,
                    over_target: bar.over_target,
                    is_today: bar.is_today,
                })
                .collect(),
            consumed: progress.consumed,
            weekly_target: progress.weekly_target,
            progress_percent: progress.progress_percent,
            message: String::new(),
        },
        Err(message) => WeekProgressResponse {
            ok: false,
            days: Vec::new(),
            consumed: 0,
            weekly_target: 0,
            progress_percent: 0.0,
            message,
        },
    }
}

fn week_history_at(db_path: &Path, weeks: Option<u32>) -> WeekHistoryResponse {
    let weeks = normalize_history_weeks(weeks);
    match with_service(db_path, |service| service.week_history(weeks as usize)) {
        Ok(history) => WeekHistoryResponse {
            ok: true,
            items: history.into_iter().map(to_week_item).collect(),
            message: String::new(),
        },
        Err(err) => WeekHistoryResponse {
            ok: false,
            items: Vec::new(),
            message: call_failed("week_history", err),
        },
    }
}

fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => SEARCH_DEFAULT_LIMIT,
        Some(value) => value.min(SEARCH_LIMIT_MAX),
    }
}

fn normalize_history_weeks(weeks: Option<u32>) -> u32 {
    match weeks {
        Some(0) | None => HISTORY_DEFAULT_WEEKS,
        Some(value) => value.min(HISTORY_WEEKS_MAX),
    }
}

fn parse_date(raw: &str) -> Result<DayKey, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DayKey::today());
    }
    DayKey::parse(trimmed).map_err(|err| format!("invalid date `{trimmed}`: {err}"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_service<T>(
    db_path: &Path,
    f: impl FnOnce(&TrackerService<SqliteKvStore<'_>>) -> TrackerResult<T>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("tracker DB open failed: {err}"))?;
    let service = TrackerService::new(SqliteKvStore::new(&conn));
    f(&service).map_err(|err| err.to_string())
}

fn with_navigator<T>(f: impl FnOnce(&mut Navigator) -> T) -> T {
    let mut nav = NAVIGATOR
        .get_or_init(|| Mutex::new(Navigator::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut nav)
}

fn call_failed(call: &str, err: String) -> String {
    warn!("event=ffi_call module=ffi status=error call={call}");
    format!("{call} failed: {err}")
}

fn to_food_item(hit: FoodMatch) -> FoodItem {
    FoodItem {
        index: hit.index as u32,
        name: hit.entry.name,
        unit: hit.entry.unit,
        cal_per_unit: hit.entry.cal_per_unit,
        std_portion: hit.entry.std_portion,
        is_custom: hit.entry.is_custom,
    }
}

fn to_log_item(index: usize, entry: LogEntry) -> LogItem {
    LogItem {
        index: index as u32,
        name: entry.name,
        amount: entry.amount,
        unit: entry.unit,
        calories: entry.calories,
    }
}

fn to_week_item(summary: WeekSummary) -> WeekItem {
    WeekItem {
        monday: summary.monday.to_string(),
        total: summary.total,
        target: summary.target,
        status: summary.status.as_str().to_string(),
    }
}
