//! In-memory food catalog value.

use crate::catalog::search::{matches_normalized, normalize_name, CatalogQuery};
use crate::catalog::seed::seed_foods;
use crate::model::food::{FoodCatalogEntry, FoodValidationError};
use log::warn;

/// Search hit with its stable position in the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogHit<'a> {
    pub index: usize,
    pub entry: &'a FoodCatalogEntry,
}

/// Ordered list of known foods.
///
/// Values are immutable; [`FoodCatalog::add_custom`] returns a new catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodCatalog {
    entries: Vec<FoodCatalogEntry>,
}

impl FoodCatalog {
    /// Concatenates the seed list with persisted custom foods.
    ///
    /// Persisted entries are flagged custom; entries that fail validation are
    /// skipped so one bad record does not hide the rest.
    pub fn load(seed: Vec<FoodCatalogEntry>, persisted_custom: Vec<FoodCatalogEntry>) -> Self {
        let mut entries = seed
            .into_iter()
            .map(|mut entry| {
                entry.is_custom = false;
                entry
            })
            .collect::<Vec<_>>();

        let mut skipped = 0_usize;
        for mut entry in persisted_custom {
            if entry.validate().is_err() {
                skipped += 1;
                continue;
            }
            entry.is_custom = true;
            entries.push(entry);
        }
        if skipped > 0 {
            warn!(
                "event=catalog_load module=catalog status=degraded skipped_custom={}",
                skipped
            );
        }

        Self { entries }
    }

    /// Catalog with only the built-in foods.
    pub fn with_seed() -> Self {
        Self::load(seed_foods(), Vec::new())
    }

    pub fn entries(&self) -> &[FoodCatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FoodCatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a new catalog with `entry` appended as a custom food.
    ///
    /// Names are not de-duplicated.
    ///
    /// # Errors
    /// Returns the entry's validation error; `self` is unchanged.
    pub fn add_custom(&self, entry: FoodCatalogEntry) -> Result<Self, FoodValidationError> {
        entry.validate()?;
        let mut next = self.clone();
        next.entries.push(FoodCatalogEntry {
            is_custom: true,
            ..entry
        });
        Ok(next)
    }

    /// The subset that must be persisted: every custom entry, in order.
    pub fn custom_entries(&self) -> Vec<FoodCatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.is_custom)
            .cloned()
            .collect()
    }

    /// Accent- and case-insensitive substring search on names.
    pub fn search(&self, query: &CatalogQuery) -> Vec<CatalogHit<'_>> {
        let needle = normalize_name(query.text.trim());
        let limit = query.limit.unwrap_or(usize::MAX);

        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !query.custom_only || entry.is_custom)
            .filter(|(_, entry)| matches_normalized(&entry.name, &needle))
            .take(limit)
            .map(|(index, entry)| CatalogHit { index, entry })
            .collect()
    }
}

/// Entries whose name contains `query`; blank query returns the catalog.
pub fn search_catalog<'a>(catalog: &'a FoodCatalog, query: &str) -> Vec<&'a FoodCatalogEntry> {
    catalog
        .search(&CatalogQuery::new(query))
        .into_iter()
        .map(|hit| hit.entry)
        .collect()
}
