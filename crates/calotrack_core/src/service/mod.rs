//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate read-modify-write cycles against the tracker store.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod tracker_service;
