//! Corruption recovery tests for the optima binary.
//!
//! These tests verify the system can handle:
//! - Snapshots written before macro columns existed
//! - Malformed snapshot rows
//! - Partial writes
//! - Broken config files

use assert_cmd::Command;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("optima"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    temp_dir
}

fn summary_json(temp_dir: &TempDir) -> serde_json::Value {
    let output = cli(temp_dir)
        .args(["summary", "--json"])
        .output()
        .expect("Failed to run summary");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("Summary is not valid JSON")
}

#[test]
fn test_legacy_snapshot_without_macro_columns() {
    let temp_dir = setup_test_dir();

    let legacy = "Time,Type,Details,Calories\n\
                  07:30,Food,100g Paneer,265\n\
                  18:05,Workout,Bench Press @ 60kg,-50\n";
    fs::write(temp_dir.path().join("data/activity_log.csv"), legacy).unwrap();

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["entries"], 2);
    assert_eq!(summary["totals"]["calories"], 215);
    assert_eq!(summary["totals"]["protein"], 0.0);

    // Appending rewrites the table with the full column set
    cli(&temp_dir).args(["food", "Oats", "50"]).assert().success();
    let contents = fs::read_to_string(temp_dir.path().join("data/activity_log.csv")).unwrap();
    assert!(contents.starts_with("Time,Type,Details,Calories,Protein,Carbs,Fat"));
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn test_malformed_rows_ignored() {
    let temp_dir = setup_test_dir();

    let contents = "Time,Type,Details,Calories,Protein,Carbs,Fat\n\
                    2024-03-01T08:00:00+00:00,Food,100g Oats,389,16.9,66.3,6.9\n\
                    { not csv at all }\n\
                    2024-03-01T09:00:00+00:00,Sleep,8h,0,,,\n\
                    2024-03-01T10:00:00+00:00,Steps,2000 steps,lots,,,\n";
    fs::write(temp_dir.path().join("data/activity_log.csv"), contents).unwrap();

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["entries"], 1);
    assert_eq!(summary["consumed"], 389);
}

#[test]
fn test_partial_last_row() {
    let temp_dir = setup_test_dir();

    let path = temp_dir.path().join("data/activity_log.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "Time,Type,Details,Calories,Protein,Carbs,Fat").unwrap();
    writeln!(
        file,
        "2024-03-01T08:00:00+00:00,Food,100g Chicken Breast,165,31.0,0.0,3.6"
    )
    .unwrap();
    // Simulated crash mid-row (no newline)
    write!(file, "2024-03-01T09:00:00+00:00,Fo").unwrap();
    drop(file);

    cli(&temp_dir).args(["steps", "1000"]).assert().success();

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["entries"], 2);
    assert_eq!(summary["totals"]["calories"], 120);
}

#[test]
fn test_corrupted_weight_table() {
    let temp_dir = setup_test_dir();

    fs::write(
        temp_dir.path().join("data/weight_log.csv"),
        "Date,Weight,BodyFat%\nnot-a-date,80,\n2024-01-01,-2,\n",
    )
    .unwrap();

    cli(&temp_dir)
        .args(["weight", "79.4", "--date", "2024-01-02"])
        .assert()
        .success();

    let contents = fs::read_to_string(temp_dir.path().join("data/weight_log.csv")).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains("2024-01-02,79.4"));
}

#[test]
fn test_empty_snapshot_file() {
    let temp_dir = setup_test_dir();
    fs::File::create(temp_dir.path().join("data/activity_log.csv")).unwrap();

    let summary = summary_json(&temp_dir);
    assert_eq!(summary["entries"], 0);
}

#[test]
fn test_corrupted_config_fails_loudly() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config/optima");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[profile\nage = ").unwrap();

    cli(&temp_dir)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicates::str::contains("TOML error"));
}
