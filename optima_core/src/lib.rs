#![forbid(unsafe_code)]

//! Core domain model for the Optima activity tracker.
//!
//! This crate provides:
//! - Domain types (food profiles, log entries, user profile, weight records)
//! - Reference tables (foods, exercises, presets)
//! - Calorie-burn and BMR formulas
//! - The append-only activity ledger and its derived totals
//! - Session context with CSV snapshot persistence

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod metabolism;
pub mod ledger;
pub mod weight;
pub mod snapshot;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use ledger::ActivityLedger;
pub use weight::WeightLog;
pub use snapshot::SnapshotStore;
pub use session::Session;
pub use metabolism::{bmr_progress, compute_bmr};
