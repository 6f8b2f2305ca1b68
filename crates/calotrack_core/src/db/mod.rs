//! Local SQLite file behind the tracker key-value store.
//!
//! # Responsibility
//! - Hand out connections that are migrated and ready for
//!   [`crate::repo::kv_store::SqliteKvStore`].
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied migration.
//! - A file stamped by a newer build is never written to.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The database file could not be opened or created.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Statement or pragma failure on an open connection.
    Sqlite(rusqlite::Error),
    /// Schema version `found` is ahead of the `supported` one.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    pub fn is_schema_too_new(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open tracker database `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "tracker database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "tracker database uses schema {found}, this build understands up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Sqlite(source) => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
