//! CSV snapshots of the activity ledger and weight log.
//!
//! Each save overwrites the whole table atomically (temp file, fsync,
//! rename) under an exclusive lock. Loading is tolerant: macro columns may be
//! absent or empty, legacy `HH:MM` times are accepted, and malformed rows are
//! skipped with a warning rather than failing the load.

use crate::ledger::{check_calories, MAX_FOOD_GRAMS};
use crate::{EntryKind, Error, LogEntry, Macros, Result, WeightRecord};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const ACTIVITY_FILE: &str = "activity_log.csv";
pub const WEIGHT_FILE: &str = "weight_log.csv";

const ACTIVITY_HEADERS: [&str; 7] = ["Time", "Type", "Details", "Calories", "Protein", "Carbs", "Fat"];
const WEIGHT_HEADERS: [&str; 3] = ["Date", "Weight", "BodyFat%"];

/// A row of the activity table
#[derive(Debug, Serialize, Deserialize)]
struct EntryRow {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Type")]
    kind: EntryKind,
    #[serde(rename = "Details")]
    details: String,
    #[serde(rename = "Calories")]
    calories: f64,
    #[serde(rename = "Protein", default)]
    protein: Option<f64>,
    #[serde(rename = "Carbs", default)]
    carbs: Option<f64>,
    #[serde(rename = "Fat", default)]
    fat: Option<f64>,
}

impl From<&LogEntry> for EntryRow {
    fn from(entry: &LogEntry) -> Self {
        let macros = entry.macros();
        EntryRow {
            time: entry.timestamp().to_rfc3339(),
            kind: entry.kind(),
            details: entry.details().to_string(),
            calories: entry.calories() as f64,
            protein: Some(macros.protein),
            carbs: Some(macros.carbs),
            fat: Some(macros.fat),
        }
    }
}

impl TryFrom<EntryRow> for LogEntry {
    type Error = Error;

    fn try_from(row: EntryRow) -> Result<Self> {
        let timestamp = parse_time(&row.time)?;
        if !row.calories.is_finite() {
            return Err(Error::InvalidQuantity(format!(
                "calories '{}' is not a number",
                row.calories
            )));
        }
        let calories = check_calories(row.calories.round() as i64)?;
        let macros = Macros {
            protein: row.protein.unwrap_or(0.0),
            carbs: row.carbs.unwrap_or(0.0),
            fat: row.fat.unwrap_or(0.0),
        };

        let entry = match row.kind {
            EntryKind::Food => {
                if calories < 0 {
                    return Err(Error::InvalidQuantity(format!(
                        "food row '{}' has negative calories {}",
                        row.details, calories
                    )));
                }
                for (label, grams) in [
                    ("protein", macros.protein),
                    ("carbs", macros.carbs),
                    ("fat", macros.fat),
                ] {
                    if !grams.is_finite() || grams < 0.0 || grams > MAX_FOOD_GRAMS {
                        return Err(Error::InvalidQuantity(format!(
                            "food row '{}' has {} {}",
                            row.details, label, grams
                        )));
                    }
                }
                LogEntry::food(timestamp, row.details, calories, macros)
            }
            EntryKind::Workout | EntryKind::Steps => {
                if !macros.is_zero() {
                    tracing::warn!(
                        "Dropping macros from {} row '{}'",
                        row.kind,
                        row.details
                    );
                }
                if row.kind == EntryKind::Workout {
                    LogEntry::workout(timestamp, row.details, calories)
                } else {
                    LogEntry::steps(timestamp, row.details, calories)
                }
            }
        };
        Ok(entry)
    }
}

/// A row of the weight table
#[derive(Debug, Serialize, Deserialize)]
struct WeightRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "BodyFat%", default)]
    body_fat: Option<f64>,
}

/// Parse an RFC 3339 timestamp, or a legacy `HH:MM` wall-clock time on today's date
fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|e| Error::InvalidQuantity(format!("Invalid time '{}': {}", raw, e)))?;
    Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
        .ok_or_else(|| Error::InvalidQuantity(format!("Time '{}' does not exist today", raw)))
}

/// Location of the two snapshot tables
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    activity_path: PathBuf,
    weight_path: PathBuf,
}

impl SnapshotStore {
    /// Store both tables under `data_dir` with their default file names
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self::with_paths(data_dir.join(ACTIVITY_FILE), data_dir.join(WEIGHT_FILE))
    }

    pub fn with_paths(activity_path: impl Into<PathBuf>, weight_path: impl Into<PathBuf>) -> Self {
        Self {
            activity_path: activity_path.into(),
            weight_path: weight_path.into(),
        }
    }

    pub fn activity_path(&self) -> &Path {
        &self.activity_path
    }

    pub fn weight_path(&self) -> &Path {
        &self.weight_path
    }

    /// Load every readable activity row; a missing file is an empty ledger
    pub fn load_entries(&self) -> Result<Vec<LogEntry>> {
        let rows: Vec<EntryRow> = read_rows(&self.activity_path)?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            match LogEntry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("Failed to parse activity row: {}", e),
            }
        }
        tracing::debug!("Loaded {} entries from {:?}", entries.len(), self.activity_path);
        Ok(entries)
    }

    /// Overwrite the activity table with `entries`
    pub fn save_entries(&self, entries: &[LogEntry]) -> Result<()> {
        write_table(&self.activity_path, &ACTIVITY_HEADERS, |writer| {
            for entry in entries {
                writer.serialize(EntryRow::from(entry))?;
            }
            Ok(())
        })?;
        tracing::debug!("Saved {} entries to {:?}", entries.len(), self.activity_path);
        Ok(())
    }

    pub fn load_weights(&self) -> Result<Vec<WeightRecord>> {
        let rows: Vec<WeightRow> = read_rows(&self.weight_path)?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match WeightRecord::new(row.date, row.weight, row.body_fat) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping weight row for {}: {}", row.date, e),
            }
        }
        tracing::debug!("Loaded {} weight records from {:?}", records.len(), self.weight_path);
        Ok(records)
    }

    pub fn save_weights(&self, records: &[WeightRecord]) -> Result<()> {
        write_table(&self.weight_path, &WEIGHT_HEADERS, |writer| {
            for record in records {
                writer.serialize(WeightRow {
                    date: record.date,
                    weight: record.weight_kg,
                    body_fat: record.body_fat_pct,
                })?;
            }
            Ok(())
        })?;
        tracing::debug!("Saved {} weight records to {:?}", records.len(), self.weight_path);
        Ok(())
    }
}

/// Read all deserializable rows of a CSV table under a shared lock
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::debug!("No snapshot found at {:?}", path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(&file);

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                // Header is line 1
                tracing::warn!("Skipping row at line {} of {:?}: {}", index + 2, path, e);
            }
        }
    }

    file.unlock()?;
    Ok(rows)
}

/// Atomically replace `path` with a table written by `write_rows`
fn write_table<F>(path: &Path, headers: &[&str], write_rows: F) -> Result<()>
where
    F: FnOnce(&mut csv::Writer<&File>) -> Result<()>,
{
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let temp = NamedTempFile::new_in(&parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file());
        writer.write_record(headers)?;
        write_rows(&mut writer)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
