//! Great-circle math for location matching

use geo::{Distance, HaversineMeasure, Point};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for every location distance, in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A WGS84 latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a coordinate only when both values are valid geographic degrees
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let coordinate = Self::new(lat, lng);
        coordinate.is_valid().then_some(coordinate)
    }

    /// Latitude within [-90, 90], longitude within [-180, 180], both finite
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// Haversine distance between two points in miles
pub fn haversine_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    HaversineMeasure::new(EARTH_RADIUS_MILES).distance(a, b)
}

/// Distance between two coordinates in miles
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    haversine_miles(a.to_point(), b.to_point())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine};

    const METERS_PER_MILE: f64 = 1609.344;

    #[test]
    fn test_same_point_is_zero() {
        let dallas = Coordinate::new(32.7767, -96.7970);
        assert!(distance_miles(dallas, dallas) < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // New York to Los Angeles is roughly 2,445 miles
        let nyc = Coordinate::new(40.7128, -74.0060);
        let la = Coordinate::new(34.0522, -118.2437);
        let d = distance_miles(nyc, la);
        assert!(d > 2430.0 && d < 2460.0, "NYC-LA distance {} should be ~2445mi", d);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // Arc length of one degree on a 3958.8 mi sphere
        let expected = EARTH_RADIUS_MILES * std::f64::consts::PI / 180.0;
        let d = distance_miles(Coordinate::new(30.0, -97.0), Coordinate::new(31.0, -97.0));
        assert!((d - expected).abs() < 1e-6, "{} vs {}", d, expected);
    }

    #[test]
    fn test_agrees_with_geo_haversine() {
        let a = Coordinate::new(29.7604, -95.3698);
        let b = Coordinate::new(39.7392, -104.9903);

        let ours = distance_miles(a, b);
        let theirs = Haversine.distance(a.to_point(), b.to_point()) / METERS_PER_MILE;

        // Radii differ by a few hundredths of a mile
        assert!((ours - theirs).abs() / theirs < 1e-4, "{} vs {}", ours, theirs);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(47.6062, -122.3321);
        let b = Coordinate::new(25.7617, -80.1918);
        assert!((distance_miles(a, b) - distance_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::checked(45.0, -120.0).is_some());
        assert!(Coordinate::checked(91.0, 0.0).is_none());
        assert!(Coordinate::checked(0.0, -180.5).is_none());
        assert!(Coordinate::checked(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_point_round_trip_axes() {
        let c = Coordinate::new(10.0, 20.0);
        let p = c.to_point();
        assert_eq!(p.x(), 20.0);
        assert_eq!(p.y(), 10.0);
        assert_eq!(Coordinate::from(p), c);
    }
}
