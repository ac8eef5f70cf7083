//! Data completeness reporting
//!
//! Missing reference data never fails a request; it produces empty or
//! zeroed results instead. This module makes those gaps visible: what was
//! loaded, what failed to load, and which requests found nothing.

use chrono::{DateTime, Utc};
use hotelcost_core::models::AssemblyLookup;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Which reference dataset a load error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    CostTable,
    Assemblies,
    Locations,
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::CostTable => write!(f, "cost table"),
            Dataset::Assemblies => write!(f, "assemblies"),
            Dataset::Locations => write!(f, "locations"),
        }
    }
}

/// A startup load failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadError {
    pub dataset: Dataset,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostTableStatus {
    pub source: Option<String>,
    pub rows: usize,
    pub skipped_rows: usize,
    pub brands: BTreeMap<String, usize>,

    /// How each cost table division resolves against the assembly index
    pub division_coverage: BTreeMap<String, AssemblyLookup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssemblyStatus {
    pub source: Option<String>,
    pub loaded: bool,
    pub items: usize,
    pub skipped_rows: usize,
    pub divisions: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationStatus {
    pub source: Option<String>,
    pub count: usize,
    pub with_coordinates: usize,
    pub skipped_records: usize,
}

/// Request-time lookups that found nothing, with hit counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissSummary {
    pub unknown_brands: BTreeMap<String, u64>,
    pub unmapped_divisions: BTreeMap<String, u64>,
    pub unresolved_locations: BTreeMap<String, u64>,
}

impl MissSummary {
    pub fn is_empty(&self) -> bool {
        self.unknown_brands.is_empty()
            && self.unmapped_divisions.is_empty()
            && self.unresolved_locations.is_empty()
    }
}

/// Running record of request-time misses.
///
/// This is the only state written while serving requests. Lock poisoning is
/// recovered from since the counters stay consistent after any panic.
#[derive(Debug, Default)]
pub struct MissLog {
    inner: Mutex<MissSummary>,
}

impl MissLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unknown_brand(&self, brand: &str) {
        self.bump(|misses| &mut misses.unknown_brands, brand);
    }

    pub fn record_unmapped_division(&self, division: &str) {
        self.bump(|misses| &mut misses.unmapped_divisions, division);
    }

    pub fn record_unresolved_location(&self, location: &str) {
        self.bump(|misses| &mut misses.unresolved_locations, location);
    }

    fn bump(
        &self,
        select: impl FnOnce(&mut MissSummary) -> &mut BTreeMap<String, u64>,
        key: &str,
    ) {
        let mut misses = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *select(&mut *misses).entry(key.to_string()).or_insert(0) += 1;
    }

    /// Copy of the current counters
    pub fn snapshot(&self) -> MissSummary {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = MissSummary::default();
    }
}

/// Structured report of what reference data the estimator is working with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataCompleteness {
    pub initialized: bool,
    pub loaded_at: Option<DateTime<Utc>>,
    pub cost_table: CostTableStatus,
    pub assemblies: AssemblyStatus,
    pub locations: LocationStatus,
    pub load_errors: Vec<LoadError>,
    pub misses: MissSummary,
}

impl DataCompleteness {
    /// All datasets loaded without errors and every cost table division
    /// resolves to assembly line items
    pub fn is_complete(&self) -> bool {
        self.initialized
            && self.load_errors.is_empty()
            && self.cost_table.rows > 0
            && self.assemblies.items > 0
            && self.locations.count > 0
            && self.cost_table.division_coverage.values().all(AssemblyLookup::is_match)
    }

    /// Cost table divisions with no assembly line items
    pub fn uncovered_divisions(&self) -> Vec<&str> {
        self.cost_table
            .division_coverage
            .iter()
            .filter(|(_, lookup)| !lookup.is_match())
            .map(|(division, _)| division.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_miss_log_counts() {
        let log = MissLog::new();
        log.record_unknown_brand("Motel 9");
        log.record_unknown_brand("Motel 9");
        log.record_unmapped_division("26 Electrical");
        log.record_unresolved_location("Atlantis, XX");

        let misses = log.snapshot();
        assert_eq!(misses.unknown_brands.get("Motel 9"), Some(&2));
        assert_eq!(misses.unmapped_divisions.get("26 Electrical"), Some(&1));
        assert_eq!(misses.unresolved_locations.len(), 1);

        log.clear();
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn test_miss_log_shared_across_threads() {
        let log = Arc::new(MissLog::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        log.record_unknown_brand("Motel 9");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.snapshot().unknown_brands.get("Motel 9"), Some(&800));
    }

    fn report() -> DataCompleteness {
        DataCompleteness {
            initialized: true,
            loaded_at: Some(Utc::now()),
            cost_table: CostTableStatus {
                rows: 3,
                division_coverage: BTreeMap::from([
                    ("03 Concrete".to_string(), AssemblyLookup::Direct),
                    ("26 Electrical".to_string(), AssemblyLookup::Unmapped),
                ]),
                ..Default::default()
            },
            assemblies: AssemblyStatus { loaded: true, items: 4, ..Default::default() },
            locations: LocationStatus { count: 2, ..Default::default() },
            load_errors: Vec::new(),
            misses: MissSummary::default(),
        }
    }

    #[test]
    fn test_uncovered_divisions_make_report_incomplete() {
        let mut report = report();
        assert_eq!(report.uncovered_divisions(), vec!["26 Electrical"]);
        assert!(!report.is_complete());

        report.cost_table.division_coverage.remove("26 Electrical");
        assert!(report.is_complete());

        report.load_errors.push(LoadError {
            dataset: Dataset::Locations,
            message: "unreachable".to_string(),
        });
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_serializes_lookup_kind() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["cost_table"]["division_coverage"]["26 Electrical"]["kind"], "unmapped");
        assert_eq!(json["initialized"], true);
    }
}
