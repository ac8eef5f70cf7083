use hotelcost_core::config::ConfigSource;
use hotelcost_core::models::{AssemblyResult, DivisionBreakdown, LocationFactor};
use serde::Serialize;
use tabled::Tabled;

use crate::output::money;

/// One division of an estimate
#[derive(Debug, Tabled)]
pub struct DivisionRow {
    #[tabled(rename = "Division")]
    pub division: String,
    #[tabled(rename = "Base")]
    pub base: String,
    #[tabled(rename = "Local")]
    pub local: String,
    #[tabled(rename = "%")]
    pub share: String,
    #[tabled(rename = "Line items")]
    pub items: String,
}

impl From<&DivisionBreakdown> for DivisionRow {
    fn from(division: &DivisionBreakdown) -> Self {
        let items = if division.lookup.is_match() {
            division.assemblies.len().to_string()
        } else {
            "-".to_string()
        };
        Self {
            division: division.division.clone(),
            base: money(division.base_cost),
            local: money(division.local_cost),
            share: format!("{:.1}", division.percent_of_total),
            items,
        }
    }
}

/// One priced line item
#[derive(Debug, Tabled)]
pub struct LineItemRow {
    #[tabled(rename = "Item")]
    pub name: String,
    #[tabled(rename = "Qty")]
    pub quantity: u64,
    #[tabled(rename = "Unit")]
    pub unit: String,
    #[tabled(rename = "Unit cost")]
    pub unit_cost: String,
    #[tabled(rename = "Total")]
    pub total: String,
}

impl From<&AssemblyResult> for LineItemRow {
    fn from(item: &AssemblyResult) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_cost: format!("${:.2}", item.unit_cost),
            total: money(item.total_cost),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct BrandRow {
    #[tabled(rename = "Brand")]
    pub brand: String,
    #[tabled(rename = "Reference projects")]
    pub reference_projects: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct LocationRow {
    #[tabled(rename = "Location")]
    pub label: String,
    #[tabled(rename = "Factor")]
    pub cost_factor: f64,
    #[tabled(rename = "Coordinates")]
    pub coordinates: String,
}

impl From<&LocationFactor> for LocationRow {
    fn from(location: &LocationFactor) -> Self {
        let coordinates = match location.coordinate {
            Some(c) => format!("{:.4}, {:.4}", c.lat, c.lng),
            None => "-".to_string(),
        };
        Self { label: location.label(), cost_factor: location.cost_factor, coordinates }
    }
}

/// Effective configuration value and its origin
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    #[serde(serialize_with = "serialize_source")]
    #[tabled(display_with = "display_source")]
    pub source: ConfigSource,
}

fn display_source(source: &ConfigSource) -> String {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "file",
        ConfigSource::Environment => "environment",
        ConfigSource::Cli => "cli",
    }
    .to_string()
}

fn serialize_source<S: serde::Serializer>(
    source: &ConfigSource,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&display_source(source))
}
