//! Error types for the optima_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for optima_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Food name not present in the food table
    #[error("Unknown food: {0}")]
    UnknownFood(String),

    /// Exercise name not present in any muscle group of the catalog
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// A quantity (grams, weight, reps, sets, ...) outside its allowed range
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),
}

impl Error {
    /// True for the synchronous validation failures of a rejected log call.
    ///
    /// These are never fatal and never leave a partial entry behind.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::UnknownFood(_) | Error::UnknownExercise(_) | Error::InvalidQuantity(_)
        )
    }
}
