//! Hotel Cost Core - Domain models, configuration, and shared helpers
//!
//! This crate contains the reference-data models, the output breakdown types,
//! the name normalization rules and the great-circle math shared by the
//! estimator, the store adapters and the outer surfaces.

pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod normalize;

pub use error::{EstimatorError, Result};
