//! Food catalog: built-in seed foods plus user-authored entries.
//!
//! # Responsibility
//! - Merge the seed list with persisted custom foods.
//! - Search entries by accent-insensitive name.
//! - Append custom foods and expose the subset that must be persisted.
//!
//! # Invariants
//! - Catalog order is seed order followed by custom-append order.
//! - Seed entries are never part of the persisted custom subset.

pub mod food_catalog;
pub mod search;
pub mod seed;
