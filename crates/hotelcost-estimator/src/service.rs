//! Estimator service: owns the reference indices and their lifecycle
//!
//! The service is constructed explicitly, loaded once with
//! [`EstimatorService::initialize`], and then answers requests read-only.
//! Load failures leave the affected index empty and are reported through
//! [`EstimatorService::completeness`].

use chrono::{DateTime, Utc};
use hotelcost_core::config::{LayeredConfig, LocationSource};
use hotelcost_core::error::{EstimatorError, Result};
use hotelcost_core::models::{
    AssemblyLookup, CostBreakdown, EstimateRequest, LocationFactor, LocationQuery, ProjectStats,
};
use hotelcost_store::file::CsvLocationStore;
use hotelcost_store::memory::MemoryLocationStore;
use hotelcost_store::ports::LocationStore;
use hotelcost_store::postgres::{PostgresConfig, PostgresLocationStore};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assembly::{AssemblyIndex, AssemblyMatch};
use crate::cost_table::CostTableIndex;
use crate::diagnostics::{
    AssemblyStatus, CostTableStatus, DataCompleteness, Dataset, LoadError, LocationStatus,
    MissLog,
};
use crate::engine::CostEngine;
use crate::location::LocationFactorIndex;

/// Where the estimator reads its reference data from
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub cost_table_path: PathBuf,
    pub assemblies_path: PathBuf,
    pub location_source: LocationSource,
}

impl EstimatorConfig {
    pub fn from_layered(config: &LayeredConfig) -> Self {
        Self {
            cost_table_path: config.cost_table_path.value.clone(),
            assemblies_path: config.assemblies_path.value.clone(),
            location_source: config.location_source(),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::from_layered(&LayeredConfig::with_defaults())
    }
}

/// Open the location store named by a location source.
///
/// `LocationSource::None` gives an empty in-memory store, so every estimate
/// falls back to the national average.
pub async fn open_location_store(source: &LocationSource) -> Result<Arc<dyn LocationStore>> {
    match source {
        LocationSource::Postgres(url) => {
            let config = PostgresConfig::from_database_url(url).map_err(|e| {
                EstimatorError::ConfigInvalid {
                    key: "database_url".to_string(),
                    reason: e.to_string(),
                }
            })?;
            let store = PostgresLocationStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        LocationSource::Csv(path) => Ok(Arc::new(CsvLocationStore::new(path.clone()))),
        LocationSource::None => {
            tracing::info!("No location source configured");
            Ok(Arc::new(MemoryLocationStore::new()))
        }
    }
}

/// Reference-data backed cost estimator
pub struct EstimatorService {
    config: EstimatorConfig,
    location_store: Option<Arc<dyn LocationStore>>,
    cost_table: CostTableIndex,
    locations: LocationFactorIndex,
    assemblies: AssemblyIndex,
    initialized: bool,
    loaded_at: Option<DateTime<Utc>>,
    load_errors: Vec<LoadError>,
    misses: MissLog,
}

impl EstimatorService {
    /// Create an uninitialized service. Indices stay empty until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            location_store: None,
            cost_table: CostTableIndex::default(),
            locations: LocationFactorIndex::default(),
            assemblies: AssemblyIndex::default(),
            initialized: false,
            loaded_at: None,
            load_errors: Vec::new(),
            misses: MissLog::new(),
        }
    }

    /// Use this store for locations instead of the configured source
    pub fn with_location_store(mut self, store: Arc<dyn LocationStore>) -> Self {
        self.location_store = Some(store);
        self
    }

    /// Load all reference data. Calling this again is a no-op.
    pub async fn initialize(&mut self) {
        if self.initialized {
            tracing::debug!("Estimator already initialized");
            return;
        }

        tracing::info!(
            cost_table = %self.config.cost_table_path.display(),
            assemblies = %self.config.assemblies_path.display(),
            "Loading reference data"
        );

        match CostTableIndex::load(&self.config.cost_table_path) {
            Ok(index) => {
                tracing::info!(
                    rows = index.len(),
                    brands = index.brands().len(),
                    skipped = index.skipped_rows(),
                    "Cost table loaded"
                );
                self.cost_table = index;
            }
            Err(e) => self.record_load_error(Dataset::CostTable, e),
        }

        match AssemblyIndex::load(&self.config.assemblies_path) {
            Ok(index) => {
                tracing::info!(
                    items = index.len(),
                    divisions = index.divisions().len(),
                    skipped = index.skipped_rows(),
                    "Assemblies loaded"
                );
                self.assemblies = index;
            }
            Err(e) => self.record_load_error(Dataset::Assemblies, e),
        }

        match self.load_locations().await {
            Ok(index) => {
                tracing::info!(
                    locations = index.len(),
                    with_coordinates = index.with_coordinates(),
                    source = index.source().unwrap_or_default(),
                    "Locations loaded"
                );
                self.locations = index;
            }
            Err(e) => self.record_load_error(Dataset::Locations, e),
        }

        self.initialized = true;
        self.loaded_at = Some(Utc::now());
    }

    async fn load_locations(&mut self) -> Result<LocationFactorIndex> {
        let store = match &self.location_store {
            Some(store) => Arc::clone(store),
            None => {
                let store = open_location_store(&self.config.location_source).await?;
                self.location_store = Some(Arc::clone(&store));
                store
            }
        };
        LocationFactorIndex::load(store.as_ref()).await
    }

    fn record_load_error(&mut self, dataset: Dataset, error: EstimatorError) {
        tracing::error!(dataset = %dataset, error = %error, "Failed to load reference data");
        self.load_errors.push(LoadError { dataset, message: error.to_string() });
    }

    pub fn is_ready(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Borrowing engine over the loaded indices
    pub fn engine(&self) -> CostEngine<'_> {
        CostEngine::new(&self.cost_table, &self.locations, &self.assemblies)
    }

    /// Estimate a project, recording any lookups that came up empty
    pub fn estimate(&self, request: &EstimateRequest) -> CostBreakdown {
        let breakdown = self.engine().estimate(request);

        if !breakdown.has_data() {
            self.misses.record_unknown_brand(&breakdown.brand);
        }
        if !request.location.is_empty() && !breakdown.location.matched {
            self.misses.record_unresolved_location(&describe_query(&request.location));
        }
        for division in &breakdown.divisions {
            if division.lookup == AssemblyLookup::Unmapped {
                self.misses.record_unmapped_division(&division.division);
            }
        }

        breakdown
    }

    /// Line items for one division at a given dollar total
    pub fn assemblies_for(
        &self,
        division: &str,
        division_total: f64,
        stats: &ProjectStats,
    ) -> AssemblyMatch {
        self.assemblies.get_assemblies(division, division_total, stats)
    }

    /// Loaded brands with their reference row counts
    pub fn brands(&self) -> BTreeMap<String, usize> {
        self.cost_table.brands()
    }

    pub fn locations(&self) -> &[LocationFactor] {
        self.locations.locations()
    }

    pub fn cost_table(&self) -> &CostTableIndex {
        &self.cost_table
    }

    pub fn assembly_index(&self) -> &AssemblyIndex {
        &self.assemblies
    }

    /// Snapshot of what was loaded and what has been missed so far
    pub fn completeness(&self) -> DataCompleteness {
        let division_coverage = self
            .cost_table
            .divisions()
            .into_iter()
            .map(|division| {
                let (lookup, _) = self.assemblies.definitions(&division);
                (division, lookup)
            })
            .collect();

        DataCompleteness {
            initialized: self.initialized,
            loaded_at: self.loaded_at,
            cost_table: CostTableStatus {
                source: self.cost_table.source().map(|p| p.display().to_string()),
                rows: self.cost_table.len(),
                skipped_rows: self.cost_table.skipped_rows(),
                brands: self.cost_table.brands(),
                division_coverage,
            },
            assemblies: AssemblyStatus {
                source: self.assemblies.source().map(|p| p.display().to_string()),
                loaded: self.assemblies.is_loaded(),
                items: self.assemblies.len(),
                skipped_rows: self.assemblies.skipped_rows(),
                divisions: self.assemblies.divisions(),
            },
            locations: LocationStatus {
                source: self.locations.source().map(str::to_string),
                count: self.locations.len(),
                with_coordinates: self.locations.with_coordinates(),
                skipped_records: self.locations.skipped_records(),
            },
            load_errors: self.load_errors.clone(),
            misses: self.misses.snapshot(),
        }
    }
}

/// Human-readable key for a location query in the miss log
fn describe_query(query: &LocationQuery) -> String {
    if let Some((name, region)) = query.named() {
        return format!("{}, {}", name, region);
    }
    match query.coordinate() {
        Some(c) => format!("{:.4}, {:.4}", c.lat, c.lng),
        None => "(unspecified)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_layered_defaults() {
        let config = EstimatorConfig::default();
        assert_eq!(config.cost_table_path, PathBuf::from("data/cost_table.csv"));
        assert_eq!(config.assemblies_path, PathBuf::from("data/assemblies.csv"));
        assert_eq!(
            config.location_source,
            LocationSource::Csv(PathBuf::from("data/locations.csv"))
        );
    }

    #[test]
    fn test_describe_query() {
        assert_eq!(describe_query(&LocationQuery::by_name("Austin", "TX")), "Austin, TX");
        assert_eq!(
            describe_query(&LocationQuery::by_coordinates(30.0, -97.75)),
            "30.0000, -97.7500"
        );
        assert_eq!(describe_query(&LocationQuery::default()), "(unspecified)");
    }

    #[test]
    fn test_uninitialized_service_estimates_zero() {
        let service = EstimatorService::new(EstimatorConfig::default());
        assert!(!service.is_ready());

        let breakdown = service.estimate(&EstimateRequest::new("Home2", 100, 4));
        assert_eq!(breakdown.total_local, 0.0);
        assert!(!service.completeness().initialized);
    }

    #[tokio::test]
    async fn test_none_location_source_is_empty_store() {
        let store = open_location_store(&LocationSource::None).await.unwrap();
        assert!(store.list_locations().await.unwrap().is_empty());
        assert_eq!(store.describe(), "memory");
    }

    #[tokio::test]
    async fn test_invalid_database_url_is_config_error() {
        let err = open_location_store(&LocationSource::Postgres("  ".to_string())).await;
        assert!(matches!(err, Err(EstimatorError::ConfigInvalid { .. })));
    }
}
