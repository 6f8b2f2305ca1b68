//! Accent-insensitive name matching for the food picker.
//!
//! # Invariants
//! - Matching is a substring test on normalized text.
//! - Normalization decomposes (NFD), drops combining marks, then lowercases.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Search options for catalog lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// User query text; blank matches every entry.
    pub text: String,
    /// Restrict results to user-authored foods.
    pub custom_only: bool,
    /// Maximum number of hits; `None` returns all.
    pub limit: Option<usize>,
}

impl CatalogQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            custom_only: false,
            limit: None,
        }
    }
}

/// Folds case and strips accents so `"Pabellon"` matches `"Pabellón"`.
pub fn normalize_name(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Returns whether `name` contains the already-normalized `needle`.
pub(crate) fn matches_normalized(name: &str, needle: &str) -> bool {
    needle.is_empty() || normalize_name(name).contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{matches_normalized, normalize_name};

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize_name("Pabellón Criollo"), "pabellon criollo");
        assert_eq!(normalize_name("MANÍ / Cacahuates"), "mani / cacahuates");
        assert_eq!(normalize_name("Ñandú"), "nandu");
    }

    #[test]
    fn blank_needle_matches_everything() {
        assert!(matches_normalized("Fainá", ""));
        assert!(matches_normalized("Fainá", "faina"));
        assert!(!matches_normalized("Fainá", "pizza"));
    }
}
