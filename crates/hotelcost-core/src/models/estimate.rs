use serde::{Deserialize, Serialize};

use super::assembly::{AssemblyLookup, AssemblyResult};
use super::location::LocationQuery;
use super::reference::RoomTypeCount;

/// Label used when no location factor could be resolved
pub const NATIONAL_AVERAGE: &str = "National Average";

/// A request to estimate one hotel project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Free-text brand name; normalized before matching
    pub brand: String,
    pub rooms: u32,
    pub floors: u32,
    #[serde(default)]
    pub location: LocationQuery,
}

impl EstimateRequest {
    pub fn new(brand: impl Into<String>, rooms: u32, floors: u32) -> Self {
        Self { brand: brand.into(), rooms, floors, location: LocationQuery::default() }
    }

    pub fn with_location(mut self, location: LocationQuery) -> Self {
        self.location = location;
        self
    }
}

/// The location factor applied to an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub label: String,
    pub cost_factor: f64,

    /// Distance from the query point, for geographic matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,

    /// False when the national average was used
    pub matched: bool,
}

impl ResolvedLocation {
    pub fn national_average() -> Self {
        Self {
            label: NATIONAL_AVERAGE.to_string(),
            cost_factor: 1.0,
            distance_miles: None,
            matched: false,
        }
    }
}

/// Summary of the reference project an estimate snapped to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMatch {
    pub rooms: u32,
    pub floors: u32,
    pub gsf: f64,
}

/// Simplified building geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width_ft: f64,
    pub length_ft: f64,
    pub area_sf: f64,
}

/// Cost of one division, with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionBreakdown {
    pub division: String,

    /// Reference cost before the location factor
    pub base_cost: f64,

    /// Reference cost after the location factor
    pub local_cost: f64,

    /// Share of `total_local`, 0-100
    pub percent_of_total: f64,

    pub lookup: AssemblyLookup,
    pub assemblies: Vec<AssemblyResult>,
}

/// Result of one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub brand: String,
    pub requested_rooms: u32,
    pub requested_floors: u32,
    pub location: ResolvedLocation,

    /// None when the brand has no reference data
    pub reference: Option<ReferenceMatch>,

    pub total_local: f64,
    pub cost_per_sf: f64,
    pub cost_per_room: f64,
    pub gross_area: f64,
    pub footprint: Footprint,
    pub room_mix: Vec<RoomTypeCount>,
    pub divisions: Vec<DivisionBreakdown>,
}

impl CostBreakdown {
    /// Structurally valid, zeroed breakdown
    pub fn empty(
        brand: impl Into<String>,
        rooms: u32,
        floors: u32,
        location: ResolvedLocation,
    ) -> Self {
        Self {
            brand: brand.into(),
            requested_rooms: rooms,
            requested_floors: floors,
            location,
            reference: None,
            total_local: 0.0,
            cost_per_sf: 0.0,
            cost_per_room: 0.0,
            gross_area: 0.0,
            footprint: Footprint::default(),
            room_mix: Vec::new(),
            divisions: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.reference.is_some()
    }
}
