//! Domain model for profiles, foods and day logs.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Validate raw input before it becomes a domain value.
//!
//! # Invariants
//! - Dates are local calendar days rendered as `YYYY-MM-DD`.
//! - Log entries and catalog entries are never mutated after creation.
//! - Persisted JSON uses the camelCase field names of the storage format.

pub mod day;
pub mod food;
pub mod log_entry;
pub mod profile;
