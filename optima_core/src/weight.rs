//! Body weight history used for trend display.

use crate::{Result, WeightRecord};
use chrono::NaiveDate;

/// Append-only list of weight measurements
#[derive(Clone, Debug, Default)]
pub struct WeightLog {
    records: Vec<WeightRecord>,
}

impl WeightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<WeightRecord>) -> Self {
        Self { records }
    }

    /// Append a measurement; rejects negative weight or out-of-range body fat
    pub fn record(
        &mut self,
        date: NaiveDate,
        weight_kg: f64,
        body_fat_pct: Option<f64>,
    ) -> Result<&WeightRecord> {
        let record = WeightRecord::new(date, weight_kg, body_fat_pct)?;
        tracing::debug!("Recorded weight {} kg on {}", record.weight_kg, record.date);
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[WeightRecord] {
        &self.records
    }

    pub(crate) fn pop_last(&mut self) -> Option<WeightRecord> {
        self.records.pop()
    }

    pub fn latest(&self) -> Option<&WeightRecord> {
        self.records.last()
    }

    /// Weight change from the first to the latest record
    ///
    /// Returns None with fewer than two records.
    pub fn trend(&self) -> Option<f64> {
        match self.records.as_slice() {
            [first, .., last] => Some(last.weight_kg - first.weight_kg),
            _ => None,
        }
    }
}
