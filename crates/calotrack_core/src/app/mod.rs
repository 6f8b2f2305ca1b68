//! App shell state independent of any UI toolkit.

pub mod navigator;
