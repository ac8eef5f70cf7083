//! Hotel Cost Estimator - Reference indices and cost derivation
//!
//! This crate loads the three reference datasets (cost table, location
//! factors, assembly definitions) into read-only indices and derives
//! division- and line-item-level cost breakdowns from them.

pub mod assembly;
pub mod cost_table;
pub mod diagnostics;
pub mod engine;
pub mod location;
pub mod service;

pub use assembly::{classify_row, AssemblyIndex, AssemblyMatch, AssemblyRow, RowKind};
pub use cost_table::CostTableIndex;
pub use diagnostics::{DataCompleteness, Dataset, LoadError, MissLog, MissSummary};
pub use engine::{CostEngine, BUILDING_WIDTH_FT};
pub use location::{LocationFactorIndex, LocationMatch};
pub use service::{EstimatorConfig, EstimatorService};
