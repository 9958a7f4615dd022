//! Core domain types for the Optima activity ledger.
//!
//! This module defines the fundamental types used throughout the system:
//! - Reference data (food profiles, exercise catalog, workout presets)
//! - Log entries and their kinds
//! - User profile and body weight records
//! - Derived aggregates (daily totals, summaries)

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Reference Data
// ============================================================================

/// Nutritional composition of a food, per 100 grams
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodProfile {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// A suggested `weight-reps` pair, written as e.g. `17.5-10`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPreset {
    pub weight_kg: f64,
    pub reps: u32,
}

impl FromStr for WorkoutPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (weight, reps) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::InvalidQuantity(format!("preset '{}' is not weight-reps", s)))?;

        let weight_kg: f64 = weight
            .trim()
            .parse()
            .map_err(|_| Error::InvalidQuantity(format!("preset '{}' has a bad weight", s)))?;
        let reps: u32 = reps
            .trim()
            .parse()
            .map_err(|_| Error::InvalidQuantity(format!("preset '{}' has bad reps", s)))?;

        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(Error::InvalidQuantity(format!(
                "preset '{}' has a negative weight",
                s
            )));
        }

        Ok(Self { weight_kg, reps })
    }
}

impl fmt::Display for WorkoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.weight_kg, self.reps)
    }
}

/// Muscle groups mapped to their exercises, plus optional presets per exercise
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    pub groups: BTreeMap<String, Vec<String>>,
    pub presets: HashMap<String, Vec<WorkoutPreset>>,
}

impl ExerciseCatalog {
    /// Exercises listed under a muscle group, in catalog order
    pub fn exercises_for(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Resolve an exercise name to its canonical catalog spelling
    pub fn find(&self, exercise: &str) -> Option<&str> {
        let wanted = exercise.trim();
        let mut all = self.groups.values().flatten();
        all.clone()
            .find(|name| name.as_str() == wanted)
            .or_else(|| all.find(|name| name.eq_ignore_ascii_case(wanted)))
            .map(String::as_str)
    }

    /// Presets suggested for an exercise (empty when none are defined)
    pub fn presets_for(&self, exercise: &str) -> &[WorkoutPreset] {
        self.presets
            .get(exercise)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The complete set of reference tables
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub foods: HashMap<String, FoodProfile>,
    pub exercises: ExerciseCatalog,
}

impl Catalog {
    /// Look up a food by exact name, falling back to a case-insensitive match
    pub fn food(&self, name: &str) -> Option<&FoodProfile> {
        let wanted = name.trim();
        self.foods.get(wanted).or_else(|| {
            self.foods
                .values()
                .find(|profile| profile.name.eq_ignore_ascii_case(wanted))
        })
    }
}

// ============================================================================
// Log Entries
// ============================================================================

/// Kind of logged activity
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Food,
    Workout,
    Steps,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Food => "Food",
            EntryKind::Workout => "Workout",
            EntryKind::Steps => "Steps",
        };
        f.write_str(label)
    }
}

/// Macronutrient grams, each rounded to one decimal
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub fn is_zero(&self) -> bool {
        self.protein == 0.0 && self.carbs == 0.0 && self.fat == 0.0
    }
}

/// One logged user action.
///
/// Entries are immutable. They can only be built through the kind-specific
/// constructors, so workout and step entries never carry macros and
/// expenditure is always recorded with a non-positive calorie effect.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    kind: EntryKind,
    details: String,
    calories: i64,
    macros: Macros,
}

impl LogEntry {
    pub fn food(
        timestamp: DateTime<Utc>,
        details: impl Into<String>,
        calories: i64,
        macros: Macros,
    ) -> Self {
        Self {
            timestamp,
            kind: EntryKind::Food,
            details: details.into(),
            calories,
            macros,
        }
    }

    pub fn workout(timestamp: DateTime<Utc>, details: impl Into<String>, burned: i64) -> Self {
        Self::expenditure(timestamp, EntryKind::Workout, details, burned)
    }

    pub fn steps(timestamp: DateTime<Utc>, details: impl Into<String>, burned: i64) -> Self {
        Self::expenditure(timestamp, EntryKind::Steps, details, burned)
    }

    fn expenditure(
        timestamp: DateTime<Utc>,
        kind: EntryKind,
        details: impl Into<String>,
        burned: i64,
    ) -> Self {
        Self {
            timestamp,
            kind,
            details: details.into(),
            calories: -burned.abs(),
            macros: Macros::default(),
        }
    }

    /// Wall-clock time the entry was logged (not when the activity happened)
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    /// Signed caloric effect: positive for intake, negative for expenditure
    pub fn calories(&self) -> i64 {
        self.calories
    }

    pub fn macros(&self) -> Macros {
        self.macros
    }
}

// ============================================================================
// User and Body Data
// ============================================================================

/// Sex used by the Mifflin–St Jeor formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(Error::Config(format!("unsupported sex '{}'", other))),
        }
    }
}

/// Formula inputs describing the user. Never mutated by the ledger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 25,
            sex: Sex::Male,
            height_cm: 170.0,
            weight_kg: 70.0,
            body_fat_pct: None,
        }
    }
}

impl UserProfile {
    /// Check that every measurement is finite and in range
    pub fn validate(&self) -> Result<()> {
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(Error::InvalidQuantity(format!(
                "height must be positive, got {}",
                self.height_cm
            )));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(Error::InvalidQuantity(format!(
                "body weight must be positive, got {}",
                self.weight_kg
            )));
        }
        validate_body_fat(self.body_fat_pct)
    }
}

/// A dated body weight measurement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
}

impl WeightRecord {
    pub fn new(date: NaiveDate, weight_kg: f64, body_fat_pct: Option<f64>) -> Result<Self> {
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(Error::InvalidQuantity(format!(
                "weight must be non-negative, got {}",
                weight_kg
            )));
        }
        validate_body_fat(body_fat_pct)?;
        Ok(Self {
            date,
            weight_kg,
            body_fat_pct,
        })
    }
}

fn validate_body_fat(body_fat_pct: Option<f64>) -> Result<()> {
    match body_fat_pct {
        Some(pct) if !pct.is_finite() || !(0.0..=100.0).contains(&pct) => Err(
            Error::InvalidQuantity(format!("body fat must be within 0-100%, got {}", pct)),
        ),
        _ => Ok(()),
    }
}

// ============================================================================
// Derived Aggregates
// ============================================================================

/// Signed calorie sum and macro sums over a ledger
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct DailyTotals {
    /// Net calories: intake positive, expenditure negative
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Everything the presentation layer shows for the current day
#[derive(Clone, Debug, Serialize)]
pub struct DailySummary {
    pub totals: DailyTotals,
    pub consumed: i64,
    pub burned: i64,
    pub bmr: i64,
    /// `consumed / bmr`, clamped to `[0, 1]`
    pub bmr_progress: f64,
    pub entries: usize,
}

impl DailySummary {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
