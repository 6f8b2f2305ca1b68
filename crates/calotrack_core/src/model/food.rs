//! Food catalog entry model.
//!
//! # Responsibility
//! - Define the single food shape shared by seed and custom foods.
//! - Validate rates and standard portions before an entry joins a catalog.
//!
//! # Invariants
//! - `name` and `unit` are non-blank.
//! - `cal_per_unit` is finite and strictly positive.
//! - `std_portion`, when set, is finite and strictly positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for [`FoodCatalogEntry`].
#[derive(Debug, Clone, PartialEq)]
pub enum FoodValidationError {
    EmptyName,
    EmptyUnit,
    InvalidCalPerUnit(f64),
    InvalidStdPortion(f64),
}

impl Display for FoodValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "food name cannot be empty"),
            Self::EmptyUnit => write!(f, "food unit cannot be empty"),
            Self::InvalidCalPerUnit(value) => {
                write!(f, "calPerUnit must be a positive number, got {value}")
            }
            Self::InvalidStdPortion(value) => {
                write!(f, "stdPortion must be a positive number, got {value}")
            }
        }
    }
}

impl Error for FoodValidationError {}

/// Known food with its calorie rate per display unit.
///
/// Seed and user-authored foods share this shape; `std_portion` is optional
/// and falls back to a unit-based default at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCatalogEntry {
    pub name: String,
    /// Display unit, e.g. `g`, `ml`, `unidad`, `cucharada`.
    pub unit: String,
    pub cal_per_unit: f64,
    /// Quantity (in `unit`) representing one standard portion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_portion: Option<f64>,
    #[serde(default)]
    pub is_custom: bool,
}

impl FoodCatalogEntry {
    /// Creates a built-in entry.
    pub fn seed(name: &str, unit: &str, cal_per_unit: f64, std_portion: f64) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            cal_per_unit,
            std_portion: Some(std_portion),
            is_custom: false,
        }
    }

    /// Creates a user-authored entry and validates it.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn custom(
        name: impl Into<String>,
        unit: impl Into<String>,
        cal_per_unit: f64,
        std_portion: Option<f64>,
    ) -> Result<Self, FoodValidationError> {
        let entry = Self {
            name: name.into().trim().to_string(),
            unit: unit.into().trim().to_string(),
            cal_per_unit,
            std_portion,
            is_custom: true,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Validates entry invariants.
    pub fn validate(&self) -> Result<(), FoodValidationError> {
        if self.name.trim().is_empty() {
            return Err(FoodValidationError::EmptyName);
        }
        if self.unit.trim().is_empty() {
            return Err(FoodValidationError::EmptyUnit);
        }
        if !is_positive(self.cal_per_unit) {
            return Err(FoodValidationError::InvalidCalPerUnit(self.cal_per_unit));
        }
        if let Some(std_portion) = self.std_portion {
            if !is_positive(std_portion) {
                return Err(FoodValidationError::InvalidStdPortion(std_portion));
            }
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::{FoodCatalogEntry, FoodValidationError};

    #[test]
    fn custom_trims_and_flags_entry() {
        let entry = FoodCatalogEntry::custom("  Arepa casera ", " unidad", 300.0, Some(1.0)).unwrap();
        assert_eq!(entry.name, "Arepa casera");
        assert_eq!(entry.unit, "unidad");
        assert!(entry.is_custom);
    }

    #[test]
    fn custom_rejects_zero_rate() {
        let err = FoodCatalogEntry::custom("Agua", "ml", 0.0, None).unwrap_err();
        assert_eq!(err, FoodValidationError::InvalidCalPerUnit(0.0));
    }

    #[test]
    fn custom_rejects_non_positive_portion() {
        let err = FoodCatalogEntry::custom("Queso", "g", 3.5, Some(-30.0)).unwrap_err();
        assert_eq!(err, FoodValidationError::InvalidStdPortion(-30.0));
    }

    #[test]
    fn wire_shape_uses_camel_case_and_optional_portion() {
        let value = serde_json::json!({
            "name": "Sopa",
            "unit": "plato",
            "calPerUnit": 210.5
        });
        let entry: FoodCatalogEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.std_portion, None);
        assert!(!entry.is_custom);

        let json = serde_json::to_value(&FoodCatalogEntry::seed("Manzana", "unidad", 95.0, 1.0))
            .unwrap();
        assert_eq!(json["calPerUnit"], 95.0);
        assert_eq!(json["stdPortion"], 1.0);
        assert_eq!(json["isCustom"], false);
    }
}
