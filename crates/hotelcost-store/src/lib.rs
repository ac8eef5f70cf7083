//! Hotel Cost Store - Location reference store port and adapters
//!
//! This crate defines the port the estimator reads location cost factors
//! through, and provides in-memory, CSV file and PostgreSQL adapters.

pub mod file;
pub mod memory;
pub mod ports;
pub mod postgres;
