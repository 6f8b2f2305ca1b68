//! Date-keyed food log and its aggregations.
//!
//! # Responsibility
//! - Hold day logs keyed by local calendar date.
//! - Provide pure append/remove operations returning new values.
//! - Aggregate daily and weekly totals and classify weeks against targets.
//!
//! # Invariants
//! - Newest entries come first within a day.
//! - A day without entries is never stored as an empty key.
//! - Weeks run Monday through Sunday.

pub mod calendar;
pub mod log_store;
pub mod summary;
pub mod week;
