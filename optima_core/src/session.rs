//! Session context owning the ledger and weight log.
//!
//! A session is created by the presentation layer; there is no process-wide
//! ledger. When a snapshot store is attached, the session hydrates from it on
//! open and rewrites the affected table after every successful mutation.
//! A crash between a mutation and its snapshot loses only that mutation.

use crate::{
    ActivityLedger, Catalog, DailySummary, LogEntry, Result, SnapshotStore, UserProfile,
    WeightLog, WeightRecord,
};
use chrono::NaiveDate;

pub struct Session<'c> {
    ledger: ActivityLedger<'c>,
    weights: WeightLog,
    store: Option<SnapshotStore>,
}

impl<'c> Session<'c> {
    /// A session that is never persisted
    pub fn in_memory(catalog: &'c Catalog, profile: UserProfile) -> Self {
        Self {
            ledger: ActivityLedger::new(catalog, profile),
            weights: WeightLog::new(),
            store: None,
        }
    }

    /// Open a session hydrated from `store`
    pub fn open(catalog: &'c Catalog, profile: UserProfile, store: SnapshotStore) -> Result<Self> {
        let entries = store.load_entries()?;
        let weights = store.load_weights()?;
        tracing::info!(
            "Opened session with {} entries and {} weight records",
            entries.len(),
            weights.len()
        );

        Ok(Self {
            ledger: ActivityLedger::with_entries(catalog, profile, entries),
            weights: WeightLog::with_records(weights),
            store: Some(store),
        })
    }

    pub fn ledger(&self) -> &ActivityLedger<'c> {
        &self.ledger
    }

    pub fn weights(&self) -> &WeightLog {
        &self.weights
    }

    pub fn summary(&self) -> DailySummary {
        self.ledger.summary()
    }

    pub fn log_food(&mut self, food: &str, grams: f64) -> Result<LogEntry> {
        let entry = self.ledger.log_food(food, grams)?.clone();
        self.commit(entry)
    }

    pub fn log_workout(
        &mut self,
        exercise: &str,
        weight_kg: f64,
        reps: u32,
        sets: u32,
    ) -> Result<LogEntry> {
        let entry = self
            .ledger
            .log_workout(exercise, weight_kg, reps, sets)?
            .clone();
        self.commit(entry)
    }

    pub fn log_preset(&mut self, exercise: &str, preset: &str, sets: u32) -> Result<LogEntry> {
        let entry = self.ledger.log_preset(exercise, preset, sets)?.clone();
        self.commit(entry)
    }

    pub fn log_steps(&mut self, steps: u64) -> Result<LogEntry> {
        let entry = self.ledger.log_steps(steps)?.clone();
        self.commit(entry)
    }

    pub fn record_weight(
        &mut self,
        date: NaiveDate,
        weight_kg: f64,
        body_fat_pct: Option<f64>,
    ) -> Result<WeightRecord> {
        let record = self.weights.record(date, weight_kg, body_fat_pct)?.clone();
        if let Some(store) = &self.store {
            if let Err(e) = store.save_weights(self.weights.records()) {
                self.weights.pop_last();
                tracing::warn!(
                    "Weight snapshot failed, dropped record for {}: {}",
                    record.date,
                    e
                );
                return Err(e);
            }
        }
        Ok(record)
    }

    /// Empty the ledger and its snapshot. Weight history is kept.
    ///
    /// If the snapshot cannot be written the ledger keeps its entries.
    pub fn clear(&mut self) -> Result<()> {
        let previous = self.ledger.entries().to_vec();
        self.ledger.clear();
        if let Err(e) = self.save_entries() {
            tracing::warn!("Snapshot failed, restoring {} entries: {}", previous.len(), e);
            self.ledger.restore_entries(previous);
            return Err(e);
        }
        Ok(())
    }

    /// Persist the ledger after `entry` was appended, or take it back out
    fn commit(&mut self, entry: LogEntry) -> Result<LogEntry> {
        if let Err(e) = self.save_entries() {
            self.ledger.pop_last();
            tracing::warn!("Snapshot failed, dropped '{}': {}", entry.details(), e);
            return Err(e);
        }
        Ok(entry)
    }

    fn save_entries(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save_entries(self.ledger.entries()),
            None => Ok(()),
        }
    }
}
