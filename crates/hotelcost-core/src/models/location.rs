use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Raw location record as delivered by a location store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,

    /// State or region code
    pub region: String,

    pub cost_factor: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A validated construction cost multiplier tied to a named place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFactor {
    pub id: String,
    pub name: String,
    pub region: String,

    /// Multiplier applied to national-average costs; always positive
    pub cost_factor: f64,

    /// Present only when the record carried valid coordinates
    pub coordinate: Option<Coordinate>,
}

impl LocationFactor {
    /// Validate a raw record.
    ///
    /// Returns `None` when the cost factor is not a positive finite number.
    /// Out-of-range coordinates are dropped while the record is kept.
    pub fn from_record(record: LocationRecord) -> Option<Self> {
        if !(record.cost_factor.is_finite() && record.cost_factor > 0.0) {
            return None;
        }

        let coordinate = match (record.latitude, record.longitude) {
            (Some(lat), Some(lng)) => Coordinate::checked(lat, lng),
            _ => None,
        };

        Some(Self {
            id: record.id,
            name: record.name,
            region: record.region,
            cost_factor: record.cost_factor,
            coordinate,
        })
    }

    /// Display label, e.g. "Austin, TX"
    pub fn label(&self) -> String {
        if self.region.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.region)
        }
    }
}

/// How the caller identifies the project location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub name: Option<String>,
    pub region: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationQuery {
    pub fn by_name(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self { name: Some(name.into()), region: Some(region.into()), ..Self::default() }
    }

    pub fn by_coordinates(lat: f64, lng: f64) -> Self {
        Self { lat: Some(lat), lng: Some(lng), ..Self::default() }
    }

    /// Name and region, when both are present and non-blank
    pub fn named(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let region = self.region.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((name, region))
    }

    /// Query coordinate, when both values are present and valid
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::checked(self.lat?, self.lng?)
    }

    pub fn is_empty(&self) -> bool {
        self.named().is_none() && self.coordinate().is_none()
    }
}
