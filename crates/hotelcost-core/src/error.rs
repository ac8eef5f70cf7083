//! Error types for the hotel cost estimator

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimatorError {
    // Reference data errors
    #[error("Reference file not found at {path}")]
    DataFileNotFound { path: PathBuf },

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Failed to parse CSV {path}: {reason}")]
    Csv { path: PathBuf, reason: String },

    // Location store errors
    #[error("Location store unavailable: {reason}")]
    LocationStoreUnavailable { reason: String },

    #[error("Location query failed: {0}")]
    LocationQuery(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EstimatorError {
    /// Wrap a csv crate error with the file it came from
    pub fn csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        Self::Csv { path: path.into(), reason: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
