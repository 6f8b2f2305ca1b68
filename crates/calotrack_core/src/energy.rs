//! Daily and weekly calorie targets.
//!
//! # Responsibility
//! - Estimate BMR with the Mifflin-St Jeor equation.
//! - Scale by activity factor and apply the goal adjustment.
//!
//! # Invariants
//! - Absent profile yields [`DEFAULT_DAILY_TARGET`].
//! - Weekly target is exactly seven daily targets, without re-rounding.

use crate::model::profile::{Gender, Goal, UserProfile};

/// Target used until a profile has been configured.
pub const DEFAULT_DAILY_TARGET: i64 = 2000;
/// Daily deficit/surplus applied for lose/gain goals.
pub const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;
pub const DAYS_PER_WEEK: i64 = 7;

/// Basal metabolic rate in kcal/day.
pub fn bmr(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age_years;
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total daily energy expenditure in kcal/day.
pub fn tdee(profile: &UserProfile) -> f64 {
    bmr(profile) * profile.activity_factor.factor()
}

/// Daily calorie target rounded to the nearest kcal.
pub fn compute_daily_target(profile: Option<&UserProfile>) -> i64 {
    let Some(profile) = profile else {
        return DEFAULT_DAILY_TARGET;
    };

    let tdee = tdee(profile);
    let target = match profile.goal {
        Goal::Lose => tdee - GOAL_ADJUSTMENT_KCAL,
        Goal::Maintain => tdee,
        Goal::Gain => tdee + GOAL_ADJUSTMENT_KCAL,
    };
    target.round() as i64
}

pub fn compute_weekly_target(profile: Option<&UserProfile>) -> i64 {
    compute_daily_target(profile).saturating_mul(DAYS_PER_WEEK)
}
