//! Flutter bridge for the CaloTrack core.

pub mod api;
