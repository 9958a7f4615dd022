//! Calorie-burn and BMR formulas.
//!
//! These are fixed product formulas, not physiological models:
//! - Workouts: a crude volume proxy (`weight × reps × sets × 0.1`)
//! - Steps: a per-step rate calibrated at 70 kg, scaled linearly by body weight
//! - BMR: Mifflin–St Jeor, male and female variants only

use crate::{Sex, UserProfile};

/// Calories per kilogram-rep of training volume
pub const WORKOUT_BURN_FACTOR: f64 = 0.1;

/// Body weight the step burn rate is calibrated against
pub const STEP_REFERENCE_WEIGHT_KG: f64 = 70.0;

/// Calories per step at the reference body weight
pub const STEP_BURN_PER_STEP: f64 = 0.045;

/// Estimated calories burned by a strength exercise, floored
pub fn workout_burn(weight_kg: f64, reps: u32, sets: u32) -> i64 {
    (weight_kg * f64::from(reps) * f64::from(sets) * WORKOUT_BURN_FACTOR).floor() as i64
}

/// Estimated calories burned walking `steps`, floored
pub fn step_burn(steps: u64, body_weight_kg: f64) -> i64 {
    (steps as f64 * (body_weight_kg / STEP_REFERENCE_WEIGHT_KG) * STEP_BURN_PER_STEP).floor()
        as i64
}

/// Unrounded Mifflin–St Jeor estimate in kcal/day
pub fn mifflin_st_jeor(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Basal metabolic rate in whole kcal/day (floored)
pub fn compute_bmr(profile: &UserProfile) -> i64 {
    mifflin_st_jeor(profile).floor() as i64
}

/// Fraction of BMR covered by intake, clamped to `[0, 1]`
pub fn bmr_progress(consumed: i64, bmr: i64) -> f64 {
    if bmr <= 0 {
        return 0.0;
    }
    (consumed as f64 / bmr as f64).clamp(0.0, 1.0)
}
