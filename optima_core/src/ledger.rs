//! The daily activity ledger.
//!
//! An append-only sequence of food, workout and step entries together with
//! the derived aggregates shown for the day. Every log operation either
//! appends exactly one entry or fails without touching the ledger.

use crate::metabolism::{bmr_progress, compute_bmr, step_burn, workout_burn};
use crate::{
    Catalog, DailySummary, DailyTotals, EntryKind, Error, LogEntry, Macros, Result, UserProfile,
    WorkoutPreset,
};
use chrono::Utc;

/// Largest food portion accepted by a single log call
pub const MAX_FOOD_GRAMS: f64 = 100_000.0;

/// Largest caloric effect, in either direction, of a single entry
pub const MAX_ENTRY_CALORIES: i64 = 1_000_000;

/// Ordered log entries plus the reference data used to build them
#[derive(Clone, Debug)]
pub struct ActivityLedger<'c> {
    catalog: &'c Catalog,
    profile: UserProfile,
    entries: Vec<LogEntry>,
}

impl<'c> ActivityLedger<'c> {
    /// Create an empty ledger
    pub fn new(catalog: &'c Catalog, profile: UserProfile) -> Self {
        Self::with_entries(catalog, profile, Vec::new())
    }

    /// Create a ledger hydrated from previously persisted entries
    pub fn with_entries(catalog: &'c Catalog, profile: UserProfile, entries: Vec<LogEntry>) -> Self {
        Self {
            catalog,
            profile,
            entries,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Log `grams` of a food from the food table
    pub fn log_food(&mut self, food: &str, grams: f64) -> Result<&LogEntry> {
        let profile = self
            .catalog
            .food(food)
            .ok_or_else(|| Error::UnknownFood(food.to_string()))?;

        if !grams.is_finite() || grams <= 0.0 || grams > MAX_FOOD_GRAMS {
            return Err(Error::InvalidQuantity(format!(
                "grams must be within (0, {}], got {}",
                MAX_FOOD_GRAMS, grams
            )));
        }

        let scale = grams / 100.0;
        let calories = check_calories((profile.calories * scale).round() as i64)?;
        let macros = Macros {
            protein: round_tenth(profile.protein * scale),
            carbs: round_tenth(profile.carbs * scale),
            fat: round_tenth(profile.fat * scale),
        };

        let entry = LogEntry::food(
            Utc::now(),
            format!("{}g {}", grams, profile.name),
            calories,
            macros,
        );
        Ok(self.append(entry))
    }

    /// Log a strength exercise.
    ///
    /// Requires `weight_kg >= 0` and `sets >= 1`; `reps` may be zero.
    pub fn log_workout(
        &mut self,
        exercise: &str,
        weight_kg: f64,
        reps: u32,
        sets: u32,
    ) -> Result<&LogEntry> {
        let name = self
            .catalog
            .exercises
            .find(exercise)
            .ok_or_else(|| Error::UnknownExercise(exercise.to_string()))?;

        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(Error::InvalidQuantity(format!(
                "weight must be non-negative, got {}",
                weight_kg
            )));
        }
        if sets == 0 {
            return Err(Error::InvalidQuantity("sets must be at least 1".into()));
        }

        let burned = check_calories(workout_burn(weight_kg, reps, sets))?;
        let entry = LogEntry::workout(
            Utc::now(),
            format!("{} @ {}kg x {} x {}", name, weight_kg, reps, sets),
            burned,
        );
        Ok(self.append(entry))
    }

    /// Log a workout from a `weight-reps` preset string such as `17.5-10`
    pub fn log_preset(&mut self, exercise: &str, preset: &str, sets: u32) -> Result<&LogEntry> {
        let preset: WorkoutPreset = preset.parse()?;
        self.log_workout(exercise, preset.weight_kg, preset.reps, sets)
    }

    /// Log a step count, scaled by the profile's body weight
    pub fn log_steps(&mut self, steps: u64) -> Result<&LogEntry> {
        let burned = check_calories(step_burn(steps, self.profile.weight_kg))?;
        let entry = LogEntry::steps(Utc::now(), format!("{} steps", steps), burned);
        Ok(self.append(entry))
    }

    fn append(&mut self, entry: LogEntry) -> &LogEntry {
        tracing::debug!(
            "Logged {} entry '{}' ({} kcal)",
            entry.kind(),
            entry.details(),
            entry.calories()
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Net calories and macro sums over every entry
    pub fn daily_totals(&self) -> DailyTotals {
        // Macros are stored at one-decimal precision; summing whole tenths
        // keeps the totals independent of entry order.
        let (calories, protein, carbs, fat) = self.entries.iter().fold(
            (0i64, 0i64, 0i64, 0i64),
            |(cal, p, c, f), entry| {
                let m = entry.macros();
                (
                    cal + entry.calories(),
                    p + to_tenths(m.protein),
                    c + to_tenths(m.carbs),
                    f + to_tenths(m.fat),
                )
            },
        );

        DailyTotals {
            calories,
            protein: protein as f64 / 10.0,
            carbs: carbs as f64 / 10.0,
            fat: fat as f64 / 10.0,
        }
    }

    /// Calories from food entries only
    pub fn calories_consumed(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.kind() == EntryKind::Food)
            .map(LogEntry::calories)
            .sum()
    }

    /// Total expenditure from workouts and steps, as a positive number
    pub fn calories_burned(&self) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.kind() != EntryKind::Food)
            .map(|e| -e.calories())
            .sum()
    }

    /// Derived metrics for display
    pub fn summary(&self) -> DailySummary {
        let consumed = self.calories_consumed();
        let bmr = compute_bmr(&self.profile);
        DailySummary {
            totals: self.daily_totals(),
            consumed,
            burned: self.calories_burned(),
            bmr,
            bmr_progress: bmr_progress(consumed, bmr),
            entries: self.entries.len(),
        }
    }

    /// Undo the most recent append when its snapshot could not be written
    pub(crate) fn pop_last(&mut self) -> Option<LogEntry> {
        self.entries.pop()
    }

    /// Put back entries removed by a `clear` whose snapshot failed
    pub(crate) fn restore_entries(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries;
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        tracing::info!("Cleared activity ledger ({} entries removed)", removed);
    }
}

/// Reject a per-entry calorie figure too large to aggregate safely
pub(crate) fn check_calories(calories: i64) -> Result<i64> {
    if !(-MAX_ENTRY_CALORIES..=MAX_ENTRY_CALORIES).contains(&calories) {
        return Err(Error::InvalidQuantity(format!(
            "{} kcal exceeds the per-entry limit of {}",
            calories, MAX_ENTRY_CALORIES
        )));
    }
    Ok(calories)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn to_tenths(value: f64) -> i64 {
    (value * 10.0).round() as i64
}
