//! Integration tests for the estimator service lifecycle

use hotelcost_core::config::LocationSource;
use hotelcost_core::models::{AssemblyLookup, EstimateRequest, LocationQuery, ProjectStats};
use hotelcost_estimator::{Dataset, EstimatorConfig, EstimatorService};
use hotelcost_store::memory::MemoryLocationStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const COST_TABLE: &str = "\
Brand,Rooms,Floors,GSF,King,Queen Queen,Accessible King,03 Concrete,07 Thermal & Moisture,26 Electrical
Home2 Suites,80,4,38000,48,28,4,\"$350,000\",\"$120,000\",\"$510,000\"
Home2 Suites,100,4,45000,60,34,6,\"$400,000\",\"$150,000\",\"$600,000\"
Home2 Suites,150,5,70000,90,51,9,\"$650,000\",\"$220,000\",\"$880,000\"
Hampton Inn,110,5,60000,70,36,4,\"$520,000\",,\"$700,000\"
Hampton Inn,n/a,5,60000,70,36,4,\"$520,000\",,\"$700,000\"
";

const ASSEMBLIES: &str = "\
Assembly Library,,,,
Hotel prototypes,,,,
,,,,
,,,,
Name,Description,Input Basis,Input Value,% of Price
03_Concrete,03_Concrete,,,100%
Slab on Grade,5 in. SOG,% of GSF,25,40%
Elevated Slabs,PT deck,% of GSF,75,45%
Footings,Spread footings,Constrant,120,15%
07_Protection,07_Protection,,,100%
Roofing,TPO membrane,% of GSF,25,70%
Air Barrier,Fluid applied,% of GSF,90,30%
";

const LOCATIONS: &str = "\
id,name,state,cost_factor,latitude,longitude
aus,Austin,TX,1.10,30.2672,-97.7431
chi,Chicago,IL,1.18,41.8781,-87.6298
bad,Nowhere,NV,abc,36.0,-115.0
";

fn write_fixtures(dir: &Path) -> EstimatorConfig {
    let cost_table = dir.join("cost_table.csv");
    let assemblies = dir.join("assemblies.csv");
    let locations = dir.join("locations.csv");
    fs::write(&cost_table, COST_TABLE).unwrap();
    fs::write(&assemblies, ASSEMBLIES).unwrap();
    fs::write(&locations, LOCATIONS).unwrap();

    EstimatorConfig {
        cost_table_path: cost_table,
        assemblies_path: assemblies,
        location_source: LocationSource::Csv(locations),
    }
}

async fn ready_service(dir: &TempDir) -> EstimatorService {
    let mut service = EstimatorService::new(write_fixtures(dir.path()));
    service.initialize().await;
    service
}

#[tokio::test]
async fn test_initialize_loads_all_datasets() {
    let dir = TempDir::new().unwrap();
    let service = ready_service(&dir).await;

    assert!(service.is_ready());
    let report = service.completeness();
    assert!(report.load_errors.is_empty());
    assert!(report.loaded_at.is_some());
    assert_eq!(report.cost_table.rows, 4);
    assert_eq!(report.cost_table.skipped_rows, 1);
    assert_eq!(report.assemblies.items, 5);
    assert_eq!(report.locations.count, 2);

    let brands = service.brands();
    assert_eq!(brands.get("Home2"), Some(&3));
    assert_eq!(brands.get("Hampton"), Some(&1));
}

#[tokio::test]
async fn test_end_to_end_estimate() {
    let dir = TempDir::new().unwrap();
    let service = ready_service(&dir).await;

    let request = EstimateRequest::new("Home2 Suites", 100, 4)
        .with_location(LocationQuery::by_name("Austin", "TX"));
    let breakdown = service.estimate(&request);

    assert_eq!(breakdown.brand, "Home2");
    assert_eq!(breakdown.location.cost_factor, 1.10);

    let concrete = breakdown.divisions.iter().find(|d| d.division == "03 Concrete").unwrap();
    assert!((concrete.local_cost - 440_000.0).abs() < 1e-6);
    let shares: Vec<f64> = concrete.assemblies.iter().map(|a| a.total_cost / 440_000.0).collect();
    for (share, expected) in shares.iter().zip([0.40, 0.45, 0.15]) {
        assert!((share - expected).abs() < 1e-9);
    }

    let thermal = breakdown.divisions.iter().find(|d| d.division.contains("Thermal")).unwrap();
    assert_eq!(thermal.lookup, AssemblyLookup::Alias { key: "protection".to_string() });
    assert_eq!(thermal.assemblies.len(), 2);
}

#[tokio::test]
async fn test_geographic_fallback() {
    let dir = TempDir::new().unwrap();
    let service = ready_service(&dir).await;

    // Round Rock sits just north of Austin
    let request = EstimateRequest::new("Home2", 100, 4)
        .with_location(LocationQuery::by_coordinates(30.5083, -97.6789));
    let breakdown = service.estimate(&request);
    assert_eq!(breakdown.location.label, "Austin, TX");
    assert!(breakdown.location.distance_miles.unwrap() < 25.0);
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut service = ready_service(&dir).await;
    let first_loaded_at = service.completeness().loaded_at;

    // Removing the files after load must not matter
    fs::remove_file(dir.path().join("cost_table.csv")).unwrap();
    service.initialize().await;

    let report = service.completeness();
    assert_eq!(report.loaded_at, first_loaded_at);
    assert!(report.load_errors.is_empty());
    assert_eq!(report.cost_table.rows, 4);
}

#[tokio::test]
async fn test_missing_files_degrade_to_empty() {
    let dir = TempDir::new().unwrap();
    let config = EstimatorConfig {
        cost_table_path: dir.path().join("missing_costs.csv"),
        assemblies_path: dir.path().join("missing_assemblies.csv"),
        location_source: LocationSource::Csv(dir.path().join("missing_locations.csv")),
    };
    let mut service = EstimatorService::new(config);
    service.initialize().await;

    assert!(service.is_ready());
    let report = service.completeness();
    let failed: Vec<Dataset> = report.load_errors.iter().map(|e| e.dataset).collect();
    assert_eq!(failed, vec![Dataset::CostTable, Dataset::Assemblies, Dataset::Locations]);
    assert!(!report.is_complete());

    let breakdown = service.estimate(&EstimateRequest::new("Home2", 100, 4));
    assert_eq!(breakdown.total_local, 0.0);
    assert!(breakdown.divisions.is_empty());

    let stats = ProjectStats { gsf: 45_000.0, floors: 4, total_units: 100 };
    let items = service.assemblies_for("03 Concrete", 100.0, &stats);
    assert_eq!(items.lookup, AssemblyLookup::NotLoaded);
}

#[tokio::test]
async fn test_misses_are_recorded() {
    let dir = TempDir::new().unwrap();
    let service = ready_service(&dir).await;

    service.estimate(&EstimateRequest::new("Motel 9", 100, 4));
    service.estimate(
        &EstimateRequest::new("Home2", 100, 4)
            .with_location(LocationQuery::by_name("Atlantis", "XX")),
    );

    let misses = service.completeness().misses;
    assert_eq!(misses.unknown_brands.get("Motel 9"), Some(&1));
    assert_eq!(misses.unresolved_locations.get("Atlantis, XX"), Some(&1));
    // Electrical has no assembly division in the fixture
    assert_eq!(misses.unmapped_divisions.get("26 Electrical"), Some(&1));
}

#[tokio::test]
async fn test_division_coverage_report() {
    let dir = TempDir::new().unwrap();
    let service = ready_service(&dir).await;

    let report = service.completeness();
    let coverage = &report.cost_table.division_coverage;
    assert_eq!(coverage.get("03 Concrete"), Some(&AssemblyLookup::Direct));
    assert_eq!(report.uncovered_divisions(), vec!["26 Electrical"]);
}

#[tokio::test]
async fn test_injected_location_store() {
    let dir = TempDir::new().unwrap();
    let store = MemoryLocationStore::new();
    store.insert("Denver", "CO", 1.05, Some((39.7392, -104.9903)));

    let mut service = EstimatorService::new(write_fixtures(dir.path()))
        .with_location_store(Arc::new(store));
    service.initialize().await;

    assert_eq!(service.locations().len(), 1);
    assert_eq!(service.completeness().locations.source.as_deref(), Some("memory"));

    let request = EstimateRequest::new("Hampton Inn", 110, 5)
        .with_location(LocationQuery::by_name("denver", "co"));
    let breakdown = service.estimate(&request);
    assert_eq!(breakdown.brand, "Hampton");
    // Blank thermal cell is left out of the row
    assert_eq!(breakdown.divisions.len(), 2);
    assert!((breakdown.total_local - 1_220_000.0 * 1.05).abs() < 1e-6);
}
