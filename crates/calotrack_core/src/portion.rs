//! Conversion from a food selection to a concrete log entry.
//!
//! # Responsibility
//! - Resolve exact quantities or standard-portion counts into calories.
//! - Build log entries from manually entered totals.
//! - Derive a per-unit rate when a manual entry is saved as a custom food.
//!
//! # Invariants
//! - Calories are `round(cal_per_unit * amount)` and never negative.
//! - A missing standard portion falls back to 100 for `g`/`ml`, else 1.
//! - Derived rates are stored rounded to two decimals.

use crate::model::food::{FoodCatalogEntry, FoodValidationError};
use crate::model::log_entry::LogEntry;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unit label used when a manual entry does not name one.
pub const DEFAULT_MANUAL_UNIT: &str = "porción";
/// Amount assumed when a manual entry does not specify one.
pub const DEFAULT_MANUAL_AMOUNT: f64 = 1.0;

const BULK_UNIT_STD_PORTION: f64 = 100.0;
const COUNT_UNIT_STD_PORTION: f64 = 1.0;

/// How the user expressed the quantity eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// Raw quantity in the food's unit.
    Exact,
    /// Whole number of standard portions.
    Portions,
}

impl MeasureMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "portions" | "portion" => Some(Self::Portions),
            _ => None,
        }
    }
}

/// Portion-resolution failures.
#[derive(Debug, Clone, PartialEq)]
pub enum PortionError {
    /// Amount, portion count or manual input is not usable.
    InvalidQuantity(String),
    /// A rate was requested for a zero amount.
    DivisionUndefined,
    /// The derived custom food is not a valid catalog entry.
    InvalidFood(FoodValidationError),
}

impl Display for PortionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuantity(details) => write!(f, "invalid quantity: {details}"),
            Self::DivisionUndefined => {
                write!(f, "cannot derive calories per unit from a zero amount")
            }
            Self::InvalidFood(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PortionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFood(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FoodValidationError> for PortionError {
    fn from(value: FoodValidationError) -> Self {
        Self::InvalidFood(value)
    }
}

/// Quantity represented by one standard portion of `entry`.
pub fn standard_portion(entry: &FoodCatalogEntry) -> f64 {
    entry.std_portion.unwrap_or_else(|| {
        if entry.unit == "g" || entry.unit == "ml" {
            BULK_UNIT_STD_PORTION
        } else {
            COUNT_UNIT_STD_PORTION
        }
    })
}

/// Resolves a catalog food and a measurement into a log entry.
///
/// # Errors
/// `InvalidQuantity` when `value` is not finite and positive, when a portion
/// count is fractional, or when the resulting amount is not positive.
pub fn resolve(
    entry: &FoodCatalogEntry,
    mode: MeasureMode,
    value: f64,
) -> Result<LogEntry, PortionError> {
    let amount = resolve_amount(entry, mode, value)?;
    Ok(LogEntry {
        name: entry.name.clone(),
        amount,
        unit: entry.unit.clone(),
        calories: calories_for(entry.cal_per_unit, amount)?,
    })
}

/// Calorie preview for an in-progress selection; `0` for unusable input.
pub fn preview_calories(entry: &FoodCatalogEntry, mode: MeasureMode, value: f64) -> u32 {
    resolve(entry, mode, value).map_or(0, |resolved| resolved.calories)
}

/// Builds a log entry from a manually entered calorie total.
///
/// `amount` defaults to 1 and `unit` to [`DEFAULT_MANUAL_UNIT`]; calories are
/// taken verbatim.
pub fn resolve_manual(
    name: &str,
    total_calories: i64,
    amount: Option<f64>,
    unit: Option<&str>,
) -> Result<LogEntry, PortionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PortionError::InvalidQuantity(
            "manual entry needs a name".to_string(),
        ));
    }
    let calories = u32::try_from(total_calories).map_err(|_| {
        PortionError::InvalidQuantity(format!(
            "total calories must be between 0 and {}, got {total_calories}",
            u32::MAX
        ))
    })?;
    let amount = amount.unwrap_or(DEFAULT_MANUAL_AMOUNT);
    ensure_positive("amount", amount)?;

    Ok(LogEntry {
        name: name.to_string(),
        amount,
        unit: manual_unit(unit),
        calories,
    })
}

/// Derives a custom catalog food from a manual entry.
///
/// The logged amount becomes the food's standard portion.
///
/// # Errors
/// - `DivisionUndefined` when `amount == 0`.
/// - `InvalidQuantity` for negative or non-finite amounts or negative totals.
/// - `InvalidFood` when the derived entry is not a valid catalog entry.
pub fn derive_custom_food(
    name: &str,
    total_calories: i64,
    amount: f64,
    unit: Option<&str>,
) -> Result<FoodCatalogEntry, PortionError> {
    if amount == 0.0 {
        return Err(PortionError::DivisionUndefined);
    }
    ensure_positive("amount", amount)?;
    if total_calories < 0 {
        return Err(PortionError::InvalidQuantity(format!(
            "total calories cannot be negative, got {total_calories}"
        )));
    }

    let cal_per_unit = round_to_cents(total_calories as f64 / amount);
    let entry = FoodCatalogEntry::custom(name, manual_unit(unit), cal_per_unit, Some(amount))?;
    Ok(entry)
}

fn resolve_amount(
    entry: &FoodCatalogEntry,
    mode: MeasureMode,
    value: f64,
) -> Result<f64, PortionError> {
    ensure_positive("value", value)?;
    let amount = match mode {
        MeasureMode::Exact => value,
        MeasureMode::Portions => {
            if value.fract() != 0.0 {
                return Err(PortionError::InvalidQuantity(format!(
                    "portion count must be a whole number, got {value}"
                )));
            }
            standard_portion(entry) * value
        }
    };
    ensure_positive("amount", amount)?;
    Ok(amount)
}

fn calories_for(cal_per_unit: f64, amount: f64) -> Result<u32, PortionError> {
    let calories = (cal_per_unit * amount).round();
    if !calories.is_finite() || calories < 0.0 || calories > f64::from(u32::MAX) {
        return Err(PortionError::InvalidQuantity(format!(
            "resulting calories out of range: {calories}"
        )));
    }
    Ok(calories as u32)
}

fn ensure_positive(field: &str, value: f64) -> Result<(), PortionError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PortionError::InvalidQuantity(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

fn manual_unit(unit: Option<&str>) -> String {
    match unit.map(str::trim) {
        Some(unit) if !unit.is_empty() => unit.to_string(),
        _ => DEFAULT_MANUAL_UNIT.to_string(),
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{
        derive_custom_food, preview_calories, resolve, resolve_manual, standard_portion,
        MeasureMode, PortionError, DEFAULT_MANUAL_UNIT,
    };
    use crate::model::food::{FoodCatalogEntry, FoodValidationError};

    fn manzana() -> FoodCatalogEntry {
        FoodCatalogEntry::seed("Manzana", "unidad", 95.0, 1.0)
    }

    fn arroz() -> FoodCatalogEntry {
        FoodCatalogEntry::seed("Arroz Blanco", "g", 1.30, 150.0)
    }

    fn no_portion(unit: &str) -> FoodCatalogEntry {
        FoodCatalogEntry {
            name: "Sin porción".to_string(),
            unit: unit.to_string(),
            cal_per_unit: 2.0,
            std_portion: None,
            is_custom: true,
        }
    }

    #[test]
    fn portions_multiply_standard_portion() {
        let entry = resolve(&manzana(), MeasureMode::Portions, 2.0).unwrap();
        assert_eq!(entry.amount, 2.0);
        assert_eq!(entry.calories, 190);
        assert_eq!(entry.unit, "unidad");

        let rice = resolve(&arroz(), MeasureMode::Portions, 3.0).unwrap();
        assert_eq!(rice.amount, 450.0);
        assert_eq!(rice.calories, 585);
    }

    #[test]
    fn portions_accept_counts_beyond_picker_range() {
        let entry = resolve(&manzana(), MeasureMode::Portions, 25.0).unwrap();
        assert_eq!(entry.calories, 2375);
    }

    #[test]
    fn exact_mode_rounds_to_nearest() {
        let entry = resolve(&arroz(), MeasureMode::Exact, 123.0).unwrap();
        assert_eq!(entry.amount, 123.0);
        assert_eq!(entry.calories, 160);
    }

    #[test]
    fn exact_calories_are_linear_within_rounding() {
        let food = FoodCatalogEntry::seed("Avena", "g", 3.89, 40.0);
        for (x, y) in [(13.0, 27.0), (0.5, 0.5), (99.9, 100.1), (7.0, 333.0)] {
            let cx = resolve(&food, MeasureMode::Exact, x).unwrap().calories as i64;
            let cy = resolve(&food, MeasureMode::Exact, y).unwrap().calories as i64;
            let cxy = resolve(&food, MeasureMode::Exact, x + y).unwrap().calories as i64;
            assert_eq!(cxy, (3.89 * (x + y)).round() as i64);
            assert!((cxy - (cx + cy)).abs() <= 1, "x={x} y={y}");
        }
    }

    #[test]
    fn missing_standard_portion_uses_unit_default() {
        assert_eq!(standard_portion(&no_portion("g")), 100.0);
        assert_eq!(standard_portion(&no_portion("ml")), 100.0);
        assert_eq!(standard_portion(&no_portion("taza")), 1.0);
        let entry = resolve(&no_portion("ml"), MeasureMode::Portions, 1.0).unwrap();
        assert_eq!(entry.amount, 100.0);
        assert_eq!(entry.calories, 200);
    }

    #[test]
    fn rejects_unusable_values() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            for mode in [MeasureMode::Exact, MeasureMode::Portions] {
                let err = resolve(&manzana(), mode, value).unwrap_err();
                assert!(matches!(err, PortionError::InvalidQuantity(_)), "{value} {mode:?}");
            }
        }
        let err = resolve(&manzana(), MeasureMode::Portions, 1.5).unwrap_err();
        assert!(matches!(err, PortionError::InvalidQuantity(_)));
    }

    #[test]
    fn preview_is_zero_for_invalid_input() {
        assert_eq!(preview_calories(&manzana(), MeasureMode::Exact, 0.0), 0);
        assert_eq!(preview_calories(&manzana(), MeasureMode::Portions, 3.0), 285);
    }

    #[test]
    fn manual_entry_uses_defaults_and_verbatim_calories() {
        let entry = resolve_manual("Sándwich casero", 450, None, None).unwrap();
        assert_eq!(entry.amount, 1.0);
        assert_eq!(entry.unit, DEFAULT_MANUAL_UNIT);
        assert_eq!(entry.calories, 450);

        let entry = resolve_manual("Sopa", 210, Some(300.0), Some(" ml ")).unwrap();
        assert_eq!(entry.amount, 300.0);
        assert_eq!(entry.unit, "ml");
    }

    #[test]
    fn manual_entry_rejects_bad_input() {
        assert!(matches!(
            resolve_manual("  ", 100, None, None),
            Err(PortionError::InvalidQuantity(_))
        ));
        assert!(matches!(
            resolve_manual("Pan", -5, None, None),
            Err(PortionError::InvalidQuantity(_))
        ));
        assert!(matches!(
            resolve_manual("Pan", 100, Some(0.0), None),
            Err(PortionError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn derive_rate_from_manual_total() {
        let food = derive_custom_food("Sándwich casero", 450, 1.0, None).unwrap();
        assert_eq!(food.cal_per_unit, 450.0);
        assert_eq!(food.std_portion, Some(1.0));
        assert_eq!(food.unit, DEFAULT_MANUAL_UNIT);
        assert!(food.is_custom);

        let food = derive_custom_food("Guiso", 500, 3.0, Some("g")).unwrap();
        assert_eq!(food.cal_per_unit, 166.67);
        assert_eq!(food.std_portion, Some(3.0));
    }

    #[test]
    fn derive_rate_from_zero_amount_is_undefined() {
        assert_eq!(
            derive_custom_food("Guiso", 500, 0.0, None).unwrap_err(),
            PortionError::DivisionUndefined
        );
    }

    #[test]
    fn derive_rate_rejects_zero_calorie_food() {
        assert_eq!(
            derive_custom_food("Agua", 0, 1.0, None).unwrap_err(),
            PortionError::InvalidFood(FoodValidationError::InvalidCalPerUnit(0.0))
        );
    }
}
