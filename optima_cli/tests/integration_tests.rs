//! Integration tests for the optima binary.
//!
//! These tests verify end-to-end behavior including:
//! - Logging food, workouts, steps and weight
//! - Validation failures leaving stored data untouched
//! - Derived totals in text and JSON output
//! - Snapshot persistence across invocations

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to build a CLI command isolated from the user's config and data
fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("optima"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn activity_csv(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("data").join("activity_log.csv")
}

fn write_config(temp_dir: &TempDir, contents: &str) {
    let dir = temp_dir.path().join("config").join("optima");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

fn summary_json(temp_dir: &TempDir) -> serde_json::Value {
    let output = cli(temp_dir)
        .arg("summary")
        .arg("--json")
        .output()
        .expect("Failed to run summary");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("Summary is not valid JSON")
}

fn csv_rows(path: &Path) -> usize {
    fs::read_to_string(path)
        .expect("Failed to read snapshot")
        .lines()
        .count()
        - 1
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily food, workout and step ledger"));
}

#[test]
fn test_food_logged_and_persisted() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["food", "Soya Chunks (Dry)", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100g Soya Chunks (Dry) (+345 kcal)"));

    let contents = fs::read_to_string(activity_csv(&temp_dir)).unwrap();
    assert!(contents.starts_with("Time,Type,Details,Calories,Protein,Carbs,Fat"));
    assert!(contents.contains("Soya Chunks (Dry)"));
}

#[test]
fn test_unknown_food_rejected() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["food", "Nonexistent Food", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown food"));

    // Nothing appended, nothing written
    assert!(!activity_csv(&temp_dir).exists());
}

#[test]
fn test_zero_grams_rejected() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["food", "Oats", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity"));
}

#[test]
fn test_workout_burn() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["workout", "Bench Press", "--weight", "60", "--reps", "10", "--sets", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press @ 60kg x 10 x 3 (-180 kcal)"));
}

#[test]
fn test_workout_preset() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["workout", "Bicep Curl", "--preset", "17.5-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(-52 kcal)"));
}

#[test]
fn test_workout_validation() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["workout", "Bench Press", "--weight", "60", "--reps", "10", "--sets", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity"));

    cli(&temp_dir)
        .args(["workout", "Moon Press", "--weight", "60", "--reps", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown exercise"));

    assert!(!activity_csv(&temp_dir).exists());
}

#[test]
fn test_steps_use_profile_weight() {
    let temp_dir = setup_test_dir();
    write_config(&temp_dir, "[profile]\nweight_kg = 75.0\n");

    cli(&temp_dir)
        .args(["steps", "8500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8500 steps (-409 kcal)"));
}

#[test]
fn test_summary_json() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["food", "Soya Chunks (Dry)", "100"])
        .assert()
        .success();
    cli(&temp_dir)
        .args(["workout", "Bench Press", "--weight", "60", "--reps", "10", "--sets", "3"])
        .assert()
        .success();

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["totals"]["calories"], 165);
    assert_eq!(summary["totals"]["protein"], 52.0);
    assert_eq!(summary["consumed"], 345);
    assert_eq!(summary["burned"], 180);
    assert_eq!(summary["bmr"], 1642);
    assert_eq!(summary["entries"], 2);
}

#[test]
fn test_empty_summary() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No logs for today yet"))
        .stdout(predicate::str::contains("Net Calorie Impact:  0 kcal"));

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["totals"]["calories"], 0);
    assert_eq!(summary["bmr_progress"], 0.0);
}

#[test]
fn test_clear_resets_ledger() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir).args(["food", "Paneer", "150"]).assert().success();
    cli(&temp_dir).args(["steps", "4000"]).assert().success();

    cli(&temp_dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 entries"));

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["entries"], 0);
    assert_eq!(summary["totals"]["calories"], 0);
    assert_eq!(csv_rows(&activity_csv(&temp_dir)), 0);
}

#[test]
fn test_help_describes_clear_as_daily_reset() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("since the last clear"))
        .stdout(predicate::str::contains("start a new day"))
        .stdout(predicate::str::contains("today's totals").not());
}

#[test]
fn test_history_lists_entries() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir).args(["food", "Banana", "120"]).assert().success();
    cli(&temp_dir)
        .args(["workout", "Squat", "--weight", "80", "--reps", "8", "--sets", "4"])
        .assert()
        .success();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("120g Banana"))
        .stdout(predicate::str::contains("Squat @ 80kg x 8 x 4"))
        .stdout(predicate::str::contains("Net Calorie Impact: -149 kcal"));
}

#[test]
fn test_sequential_invocations_accumulate() {
    let temp_dir = setup_test_dir();

    for _ in 0..5 {
        cli(&temp_dir).args(["steps", "1000"]).assert().success();
    }

    assert_eq!(csv_rows(&activity_csv(&temp_dir)), 5);
    let summary = summary_json(&temp_dir);
    assert_eq!(summary["burned"], 225);
}

#[test]
fn test_weight_recorded() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["weight", "80.0", "--date", "2024-05-01"])
        .assert()
        .success();
    cli(&temp_dir)
        .args(["weight", "78.5", "--body-fat", "21", "--date", "2024-05-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("78.5 kg, 21% body fat on 2024-05-15"));

    cli(&temp_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight: 78.5 kg (-1.5 kg since first record)"));

    let weights = fs::read_to_string(temp_dir.path().join("data").join("weight_log.csv")).unwrap();
    assert!(weights.starts_with("Date,Weight,BodyFat%"));
}

#[test]
fn test_negative_weight_rejected() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["weight", "--", "-3"])
        .assert()
        .failure();
}

#[test]
fn test_reference_listings() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("foods")
        .assert()
        .success()
        .stdout(predicate::str::contains("Soya Chunks (Dry)"));

    cli(&temp_dir)
        .args(["exercises", "--group", "chest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press [40-12, 50-10, 60-8]"))
        .stdout(predicate::str::contains("Squat").not());
}
