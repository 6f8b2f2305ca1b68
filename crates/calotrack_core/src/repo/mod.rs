//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the string key-value store the tracker persists into.
//! - Encode/decode tracker state under stable keys.
//!
//! # Invariants
//! - Values are whole serialized structures; callers rewrite them wholesale.
//! - Undecodable values surface as `StoreError::Corrupt`, never as panics.

pub mod kv_store;
pub mod tracker_repo;
