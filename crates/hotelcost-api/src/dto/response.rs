use chrono::{DateTime, Utc};
use hotelcost_core::models::{AssemblyLookup, AssemblyResult, LocationFactor, ProjectStats};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl HealthResponse {
    pub fn new(ready: bool, loaded_at: Option<DateTime<Utc>>) -> Self {
        Self { status: "ok", service: "hotelcost-api", ready, loaded_at }
    }
}

/// A brand with reference data
#[derive(Debug, Serialize)]
pub struct BrandInfo {
    pub brand: String,
    pub reference_projects: usize,
}

#[derive(Debug, Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<BrandInfo>,
}

/// A location cost factor
#[derive(Debug, Serialize)]
pub struct LocationInfo {
    pub id: String,
    pub name: String,
    pub region: String,
    pub label: String,
    pub cost_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl From<&LocationFactor> for LocationInfo {
    fn from(location: &LocationFactor) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            region: location.region.clone(),
            label: location.label(),
            cost_factor: location.cost_factor,
            lat: location.coordinate.map(|c| c.lat),
            lng: location.coordinate.map(|c| c.lng),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub count: usize,
    pub locations: Vec<LocationInfo>,
}

/// Line items for one division
#[derive(Debug, Serialize)]
pub struct AssemblyResponse {
    pub division: String,
    pub total: f64,
    pub stats: ProjectStats,
    pub lookup: AssemblyLookup,
    pub items: Vec<AssemblyResult>,
}
