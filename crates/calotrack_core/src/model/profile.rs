//! User body/activity profile model.
//!
//! # Responsibility
//! - Define the typed profile consumed by the energy model.
//! - Parse raw setup-form text into a validated profile.
//!
//! # Invariants
//! - Weight, height and age are finite, strictly positive and within human
//!   limits, so derived targets stay far inside `i64`.
//! - Activity factor is one of the five supported multipliers.
//! - Invalid input is rejected, never defaulted or propagated as NaN.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FACTOR_TOLERANCE: f64 = 1e-9;
pub const MAX_WEIGHT_KG: f64 = 1000.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_AGE_YEARS: f64 = 150.0;

/// Validation failures for profile input (`InvalidProfileInput`).
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileValidationError {
    MissingField(&'static str),
    NotANumber { field: &'static str, value: String },
    NonPositive { field: &'static str, value: f64 },
    TooLarge { field: &'static str, value: f64, max: f64 },
    UnknownGender(String),
    UnsupportedActivityFactor(String),
    UnknownGoal(String),
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "profile field `{field}` is required"),
            Self::NotANumber { field, value } => {
                write!(f, "profile field `{field}` is not a number: `{value}`")
            }
            Self::NonPositive { field, value } => {
                write!(f, "profile field `{field}` must be positive, got {value}")
            }
            Self::TooLarge { field, value, max } => {
                write!(f, "profile field `{field}` must be at most {max}, got {value}")
            }
            Self::UnknownGender(value) => {
                write!(f, "unknown gender `{value}`; expected male|female")
            }
            Self::UnsupportedActivityFactor(value) => write!(
                f,
                "unsupported activity factor `{value}`; expected 1.2|1.375|1.55|1.725|1.9"
            ),
            Self::UnknownGoal(value) => {
                write!(f, "unknown goal `{value}`; expected lose|maintain|gain")
            }
        }
    }
}

impl Error for ProfileValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Result<Self, ProfileValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(ProfileValidationError::UnknownGender(value.to_string())),
        }
    }
}

/// Weight-change direction applied on top of TDEE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn parse(value: &str) -> Result<Self, ProfileValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lose" => Ok(Self::Lose),
            "maintain" => Ok(Self::Maintain),
            "gain" => Ok(Self::Gain),
            _ => Err(ProfileValidationError::UnknownGoal(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }
}

/// Activity multiplier applied to BMR.
///
/// Stored as its numeric factor (`1.2`, `1.375`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// 1-3 days per week.
    Light,
    /// 3-5 days per week.
    Moderate,
    /// 6-7 days per week.
    Active,
    /// Hard physical work.
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// Maps a numeric factor back to its level.
    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.factor() - factor).abs() < FACTOR_TOLERANCE)
    }

    pub fn parse(value: &str) -> Result<Self, ProfileValidationError> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::from_factor)
            .ok_or_else(|| ProfileValidationError::UnsupportedActivityFactor(value.to_string()))
    }
}

impl TryFrom<f64> for ActivityLevel {
    type Error = ProfileValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_factor(value)
            .ok_or_else(|| ProfileValidationError::UnsupportedActivityFactor(value.to_string()))
    }
}

impl From<ActivityLevel> for f64 {
    fn from(value: ActivityLevel) -> Self {
        value.factor()
    }
}

/// Validated body/activity profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserProfileRecord")]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub gender: Gender,
    pub activity_factor: ActivityLevel,
    pub goal: Goal,
}

impl UserProfile {
    /// Creates a profile and validates numeric fields.
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: f64,
        gender: Gender,
        activity_factor: ActivityLevel,
        goal: Goal,
    ) -> Result<Self, ProfileValidationError> {
        let profile = Self {
            weight_kg,
            height_cm,
            age_years,
            gender,
            activity_factor,
            goal,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        ensure_in_range("weight", self.weight_kg, MAX_WEIGHT_KG)?;
        ensure_in_range("height", self.height_cm, MAX_HEIGHT_CM)?;
        ensure_in_range("age", self.age_years, MAX_AGE_YEARS)?;
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileRecord {
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    gender: Gender,
    activity_factor: ActivityLevel,
    goal: Goal,
}

impl TryFrom<UserProfileRecord> for UserProfile {
    type Error = ProfileValidationError;

    fn try_from(value: UserProfileRecord) -> Result<Self, Self::Error> {
        UserProfile::new(
            value.weight_kg,
            value.height_cm,
            value.age_years,
            value.gender,
            value.activity_factor,
            value.goal,
        )
    }
}

/// Raw setup-form values as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub weight: String,
    pub height: String,
    pub age: String,
    pub gender: String,
    pub activity: String,
    pub goal: String,
}

impl Default for ProfileForm {
    /// Blank numeric fields with the setup screen's preselected options.
    fn default() -> Self {
        Self {
            weight: String::new(),
            height: String::new(),
            age: String::new(),
            gender: "male".to_string(),
            activity: "1.2".to_string(),
            goal: "maintain".to_string(),
        }
    }
}

impl ProfileForm {
    /// Pre-fills the form from an existing profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            weight: profile.weight_kg.to_string(),
            height: profile.height_cm.to_string(),
            age: profile.age_years.to_string(),
            gender: match profile.gender {
                Gender::Male => "male".to_string(),
                Gender::Female => "female".to_string(),
            },
            activity: profile.activity_factor.factor().to_string(),
            goal: profile.goal.as_str().to_string(),
        }
    }

    /// Parses and validates every field.
    ///
    /// # Errors
    /// Returns the first invalid field in form order.
    pub fn parse(&self) -> Result<UserProfile, ProfileValidationError> {
        let weight_kg = parse_number("weight", &self.weight)?;
        let height_cm = parse_number("height", &self.height)?;
        let age_years = parse_number("age", &self.age)?;
        let gender = Gender::parse(&self.gender)?;
        let activity_factor = ActivityLevel::parse(&self.activity)?;
        let goal = Goal::parse(&self.goal)?;
        UserProfile::new(
            weight_kg,
            height_cm,
            age_years,
            gender,
            activity_factor,
            goal,
        )
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ProfileValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProfileValidationError::MissingField(field));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ProfileValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ProfileValidationError::NotANumber {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn ensure_in_range(
    field: &'static str,
    value: f64,
    max: f64,
) -> Result<(), ProfileValidationError> {
    if !value.is_finite() {
        return Err(ProfileValidationError::NotANumber {
            field,
            value: value.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ProfileValidationError::NonPositive { field, value });
    }
    if value > max {
        return Err(ProfileValidationError::TooLarge { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ActivityLevel, Gender, Goal, ProfileForm, ProfileValidationError, UserProfile};

    fn form() -> ProfileForm {
        ProfileForm {
            weight: "70".to_string(),
            height: "175".to_string(),
            age: "25".to_string(),
            gender: "male".to_string(),
            activity: "1.55".to_string(),
            goal: "maintain".to_string(),
        }
    }

    #[test]
    fn form_parses_into_profile() {
        let profile = form().parse().unwrap();
        assert_eq!(profile.weight_kg, 70.0);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.activity_factor, ActivityLevel::Moderate);
        assert_eq!(profile.goal, Goal::Maintain);
    }

    #[test]
    fn form_rejects_values_beyond_human_limits() {
        let mut raw = form();
        raw.weight = "1e18".to_string();
        assert_eq!(
            raw.parse().unwrap_err(),
            ProfileValidationError::TooLarge {
                field: "weight",
                value: 1e18,
                max: 1000.0
            }
        );

        let mut raw = form();
        raw.age = "1e300".to_string();
        assert!(matches!(
            raw.parse(),
            Err(ProfileValidationError::TooLarge { field: "age", .. })
        ));

        let mut raw = form();
        raw.height = "300".to_string();
        raw.weight = "1000".to_string();
        raw.age = "150".to_string();
        assert!(raw.parse().is_ok());
    }

    #[test]
    fn stored_profile_beyond_limits_fails_to_decode() {
        let raw = r#"{"weightKg":70,"heightCm":175,"ageYears":1e300,"gender":"male","activityFactor":1.2,"goal":"maintain"}"#;
        assert!(serde_json::from_str::<UserProfile>(raw).is_err());
    }

    #[test]
    fn form_rejects_non_numeric_weight() {
        let mut raw = form();
        raw.weight = "setenta".to_string();
        assert_eq!(
            raw.parse().unwrap_err(),
            ProfileValidationError::NotANumber {
                field: "weight",
                value: "setenta".to_string()
            }
        );
    }

    #[test]
    fn form_rejects_missing_and_non_positive_fields() {
        let mut raw = form();
        raw.height = "  ".to_string();
        assert_eq!(
            raw.parse().unwrap_err(),
            ProfileValidationError::MissingField("height")
        );

        let mut raw = form();
        raw.age = "0".to_string();
        assert_eq!(
            raw.parse().unwrap_err(),
            ProfileValidationError::NonPositive {
                field: "age",
                value: 0.0
            }
        );
    }

    #[test]
    fn form_rejects_unknown_activity_factor() {
        let mut raw = form();
        raw.activity = "1.3".to_string();
        assert!(matches!(
            raw.parse().unwrap_err(),
            ProfileValidationError::UnsupportedActivityFactor(_)
        ));
    }

    #[test]
    fn form_prefill_roundtrips_profile() {
        let profile = form().parse().unwrap();
        assert_eq!(ProfileForm::from_profile(&profile).parse().unwrap(), profile);
    }

    #[test]
    fn activity_factor_serializes_as_number() {
        let profile = form().parse().unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["activityFactor"], 1.55);
        assert_eq!(json["weightKg"], 70.0);
        assert_eq!(json["goal"], "maintain");
    }

    #[test]
    fn deserialize_rejects_invalid_numbers() {
        let value = serde_json::json!({
            "weightKg": -3.0,
            "heightCm": 170.0,
            "ageYears": 30.0,
            "gender": "female",
            "activityFactor": 1.2,
            "goal": "lose"
        });
        let err = serde_json::from_value::<UserProfile>(value).unwrap_err();
        assert!(err.to_string().contains("weight"), "unexpected error: {err}");
    }
}
