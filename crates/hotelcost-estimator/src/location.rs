//! Location cost-factor index: exact name lookup and nearest-location search

use hotelcost_core::error::Result;
use hotelcost_core::geo::distance_miles;
use hotelcost_core::models::{LocationFactor, LocationQuery, LocationRecord, ResolvedLocation};
use hotelcost_store::ports::LocationStore;

/// A resolved location and how it was found
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch<'a> {
    pub location: &'a LocationFactor,

    /// Set for geographic matches
    pub distance_miles: Option<f64>,
}

impl LocationMatch<'_> {
    pub fn resolved(&self) -> ResolvedLocation {
        ResolvedLocation {
            label: self.location.label(),
            cost_factor: self.location.cost_factor,
            distance_miles: self.distance_miles,
            matched: true,
        }
    }
}

/// In-memory index over validated location factors
#[derive(Debug, Clone, Default)]
pub struct LocationFactorIndex {
    locations: Vec<LocationFactor>,
    skipped_records: usize,
    source: Option<String>,
}

impl LocationFactorIndex {
    /// Validate raw records; invalid cost factors are dropped and counted
    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        let total = records.len();
        let locations: Vec<LocationFactor> =
            records.into_iter().filter_map(LocationFactor::from_record).collect();
        let skipped_records = total - locations.len();
        if skipped_records > 0 {
            tracing::debug!(skipped_records, "Dropped location records with invalid cost factors");
        }
        Self { locations, skipped_records, source: None }
    }

    /// Load every record from a location store
    pub async fn load(store: &dyn LocationStore) -> Result<Self> {
        let records = store.list_locations().await?;
        let mut index = Self::from_records(records);
        index.source = Some(store.describe());
        Ok(index)
    }

    /// Resolve a query to a location.
    ///
    /// An exact, case-insensitive (name, region) match takes priority. When
    /// that is absent or finds nothing, the closest location with
    /// coordinates wins, however far away it is.
    pub fn find_best_match(&self, query: &LocationQuery) -> Option<LocationMatch<'_>> {
        if let Some((name, region)) = query.named() {
            let (wanted_name, wanted_region) = (name.to_lowercase(), region.to_lowercase());
            let exact = self.locations.iter().find(|loc| {
                loc.name.trim().to_lowercase() == wanted_name
                    && loc.region.trim().to_lowercase() == wanted_region
            });
            if let Some(location) = exact {
                return Some(LocationMatch { location, distance_miles: None });
            }
            tracing::debug!(name, region, "No exact location match");
        }

        let origin = query.coordinate()?;
        self.locations
            .iter()
            .filter_map(|loc| loc.coordinate.map(|c| (loc, distance_miles(origin, c))))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(location, distance)| LocationMatch { location, distance_miles: Some(distance) })
    }

    pub fn locations(&self) -> &[LocationFactor] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of locations usable for geographic matching
    pub fn with_coordinates(&self) -> usize {
        self.locations.iter().filter(|loc| loc.coordinate.is_some()).count()
    }

    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelcost_core::geo::Coordinate;
    use hotelcost_store::memory::MemoryLocationStore;

    fn record(
        id: &str,
        name: &str,
        region: &str,
        factor: f64,
        coord: Option<(f64, f64)>,
    ) -> LocationRecord {
        LocationRecord {
            id: id.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            cost_factor: factor,
            latitude: coord.map(|c| c.0),
            longitude: coord.map(|c| c.1),
        }
    }

    fn index() -> LocationFactorIndex {
        LocationFactorIndex::from_records(vec![
            record("chi", "Chicago", "IL", 1.18, Some((41.8781, -87.6298))),
            record("dal", "Dallas", "TX", 0.89, Some((32.7767, -96.7970))),
            record("por", "Portland", "OR", 1.06, Some((45.5152, -122.6784))),
            record("pme", "Portland", "ME", 0.98, Some((43.6591, -70.2568))),
            record("nocoord", "Fairbanks", "AK", 1.40, None),
            record("bad", "Nowhere", "NV", 0.0, Some((36.0, -115.0))),
        ])
    }

    #[test]
    fn test_invalid_factor_skipped() {
        let index = index();
        assert_eq!(index.len(), 5);
        assert_eq!(index.skipped_records(), 1);
        assert_eq!(index.with_coordinates(), 4);
    }

    #[test]
    fn test_exact_name_match_is_case_insensitive() {
        let index = index();
        let found = index.find_best_match(&LocationQuery::by_name("portland", "me")).unwrap();
        assert_eq!(found.location.id, "pme");
        assert_eq!(found.distance_miles, None);
    }

    #[test]
    fn test_exact_name_match_folds_non_ascii_case() {
        let index = LocationFactorIndex::from_records(vec![
            record("cc", "Cañon City", "CO", 0.94, Some((38.4411, -105.2422))),
            record("den", "Denver", "CO", 1.05, Some((39.7392, -104.9903))),
        ]);
        let found = index.find_best_match(&LocationQuery::by_name("CAÑON CITY", "co")).unwrap();
        assert_eq!(found.location.id, "cc");
        assert_eq!(found.distance_miles, None);
    }

    #[test]
    fn test_name_match_beats_geography() {
        let index = index();
        // Coordinates sit in Dallas but the name says Chicago
        let mut query = LocationQuery::by_name("Chicago", "IL");
        query.lat = Some(32.78);
        query.lng = Some(-96.80);
        assert_eq!(index.find_best_match(&query).unwrap().location.id, "chi");
    }

    #[test]
    fn test_unmatched_name_falls_back_to_coordinates() {
        let index = index();
        let mut query = LocationQuery::by_name("Plano", "TX");
        query.lat = Some(33.0198);
        query.lng = Some(-96.6989);
        let found = index.find_best_match(&query).unwrap();
        assert_eq!(found.location.id, "dal");
        assert!(found.distance_miles.unwrap() < 30.0);
    }

    #[test]
    fn test_nearest_location_by_haversine() {
        let index = index();
        let query_point = Coordinate::new(44.0, -75.0);

        let to_chicago = distance_miles(query_point, Coordinate::new(41.8781, -87.6298));
        let to_portland_me = distance_miles(query_point, Coordinate::new(43.6591, -70.2568));
        assert!(to_portland_me < to_chicago);

        let found = index.find_best_match(&LocationQuery::by_coordinates(44.0, -75.0)).unwrap();
        assert_eq!(found.location.id, "pme");
        assert!((found.distance_miles.unwrap() - to_portland_me).abs() < 1e-9);
    }

    #[test]
    fn test_no_distance_cap() {
        let index = index();
        // Middle of the Pacific still resolves to the nearest indexed city
        let found = index.find_best_match(&LocationQuery::by_coordinates(20.0, -160.0)).unwrap();
        assert_eq!(found.location.id, "por");
    }

    #[test]
    fn test_no_match() {
        let index = index();
        assert!(index.find_best_match(&LocationQuery::default()).is_none());
        assert!(index.find_best_match(&LocationQuery::by_name("Atlantis", "XX")).is_none());
        assert!(LocationFactorIndex::default()
            .find_best_match(&LocationQuery::by_coordinates(40.0, -100.0))
            .is_none());
    }

    #[test]
    fn test_resolved_location() {
        let index = index();
        let resolved =
            index.find_best_match(&LocationQuery::by_name("Dallas", "TX")).unwrap().resolved();
        assert_eq!(resolved.label, "Dallas, TX");
        assert_eq!(resolved.cost_factor, 0.89);
        assert!(resolved.matched);
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = MemoryLocationStore::new();
        store.insert("Nashville", "TN", 0.93, Some((36.1627, -86.7816)));
        store.insert("Broken", "TN", -1.0, None);

        let index = LocationFactorIndex::load(&store).await.unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.skipped_records(), 1);
        assert_eq!(index.source(), Some("memory"));
    }
}
