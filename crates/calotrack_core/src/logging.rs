//! Rolling file logs for the tracker process.
//!
//! # Responsibility
//! - Turn a textual level and directory into a validated [`LogConfig`].
//! - Start one flexi_logger file writer per process and report what runs.
//!
//! # Invariants
//! - Starting again with the same config is a no-op; any other config fails
//!   with [`LoggingError::AlreadyActive`] and leaves the running logger as-is.
//! - Starting never panics.
//! - Panic reports are a single line with a bounded payload excerpt.
//! - Events never carry food names or body metrics.

use flexi_logger::{
    Age, Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Once;

const LOG_BASENAME: &str = "calotrack";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 7;
const PANIC_EXCERPT_CHARS: usize = 120;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Absolute directory holding `calotrack*.log` files.
    pub dir: PathBuf,
}

impl LogConfig {
    /// Parses a level name (`trace`..`error`, `warning` accepted) and an
    /// absolute directory.
    pub fn parse(level: &str, dir: &str) -> Result<Self, LoggingError> {
        let level = parse_level(level)?;
        let dir = dir.trim();
        if dir.is_empty() || !Path::new(dir).is_absolute() {
            return Err(LoggingError::InvalidDir(dir.to_string()));
        }
        Ok(Self {
            level,
            dir: PathBuf::from(dir),
        })
    }
}

impl Display for LogConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in `{}`",
            self.level.as_str().to_ascii_lowercase(),
            self.dir.display()
        )
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    /// Directory is empty or relative.
    InvalidDir(String),
    CreateDir { dir: PathBuf, source: io::Error },
    Backend(FlexiLoggerError),
    AlreadyActive {
        active: LogConfig,
        requested: LogConfig,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; use trace, debug, info, warn or error"
            ),
            Self::InvalidDir(dir) => {
                write!(f, "log directory must be an absolute path, got `{dir}`")
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "log backend failed to start: {err}"),
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logging already runs at {active}; cannot switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

struct ActiveLogger {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Starts file logging, or confirms it already runs with the same settings.
///
/// # Errors
/// Returns [`LoggingError`] for bad input, an unwritable directory, a
/// backend failure or a conflicting earlier start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let requested = LogConfig::parse(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(&requested))?;
    if active.config == requested {
        return Ok(());
    }
    Err(LoggingError::AlreadyActive {
        active: active.config.clone(),
        requested,
    })
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogConfig> {
    ACTIVE.get().map(|active| active.config.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(config: &LogConfig) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&config.dir).map_err(|source| LoggingError::CreateDir {
        dir: config.dir.clone(),
        source,
    })?;

    let log_spec = LogSpecification::builder().default(config.level).build();
    let handle = Logger::with(log_spec)
        .log_to_file(
            FileSpec::default()
                .directory(config.dir.clone())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::AgeOrSize(Age::Day, ROTATE_AT_BYTES),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    PANIC_HOOK.call_once(install_panic_hook);
    info!(
        "event=app_start module=core status=ok app=calotrack os={} version={} debug={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        cfg!(debug_assertions)
    );
    info!(
        "event=logging_init module=core status=ok level={}",
        config.level
    );

    Ok(ActiveLogger {
        config: config.clone(),
        _handle: handle,
    })
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    let name = raw.trim();
    let name = if name.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        name
    };
    match LevelFilter::from_str(name) {
        Ok(LevelFilter::Off) | Err(_) => Err(LoggingError::UnknownLevel(raw.trim().to_string())),
        Ok(level) => Ok(level),
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        // Payload text may include user input; keep only a short excerpt.
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            one_line(payload_text(info.payload()), PANIC_EXCERPT_CHARS)
        );
        previous(info);
    }));
}

fn payload_text(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string payload")
}

/// Control characters become spaces; text past `max_chars` becomes `...`.
fn one_line(text: &str, max_chars: usize) -> String {
    let mut line = text
        .chars()
        .take(max_chars)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>();
    if text.chars().nth(max_chars).is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, payload_text, LogConfig, LoggingError};
    use log::LevelFilter;

    #[test]
    fn config_accepts_level_aliases_and_absolute_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let config = LogConfig::parse(" WARNING ", dir_str).unwrap();
        assert_eq!(config.level, LevelFilter::Warn);
        assert_eq!(config.dir, dir.path());
        assert_eq!(
            LogConfig::parse("Trace", dir_str).unwrap().level,
            LevelFilter::Trace
        );
    }

    #[test]
    fn config_rejects_off_unknown_levels_and_relative_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        assert!(matches!(
            LogConfig::parse("off", dir_str),
            Err(LoggingError::UnknownLevel(level)) if level == "off"
        ));
        assert!(matches!(
            LogConfig::parse("verbose", dir_str),
            Err(LoggingError::UnknownLevel(_))
        ));
        assert!(matches!(
            LogConfig::parse("info", "logs/dev"),
            Err(LoggingError::InvalidDir(dir)) if dir == "logs/dev"
        ));
        assert!(matches!(
            LogConfig::parse("info", "  "),
            Err(LoggingError::InvalidDir(_))
        ));
    }

    #[test]
    fn panic_excerpt_is_one_bounded_line() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("abcdefgh", 3), "abc...");
        assert_eq!(one_line("abc", 3), "abc");

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
        assert_eq!(payload_text(owned.as_ref()), "boom");
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(payload_text(other.as_ref()), "non-string payload");
    }

    #[test]
    fn second_start_must_repeat_the_active_config() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let other = tempfile::tempdir().unwrap();

        init_logging("info", dir_str).unwrap();
        init_logging("INFO", dir_str).unwrap();

        let err = init_logging("debug", dir_str).unwrap_err();
        assert!(matches!(err, LoggingError::AlreadyActive { .. }));
        assert!(err.to_string().contains("cannot switch"));
        assert!(matches!(
            init_logging("info", other.path().to_str().unwrap()),
            Err(LoggingError::AlreadyActive { .. })
        ));

        let active = logging_status().unwrap();
        assert_eq!(active.level, LevelFilter::Info);
        assert_eq!(active.dir, dir.path());
    }
}
