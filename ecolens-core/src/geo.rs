//! Geographic primitives
//!
//! Positions are WGS-84 latitude/longitude in degrees. Distances between
//! monitored points use the haversine great-circle formula; short
//! source-to-cell offsets in the dispersion and noise grids use a local
//! flat-earth projection.
//!
//! ```text
//! a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
//! d = 2R · atan2(√a, √(1−a))
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::geo::{EARTH_RADIUS_KM, METERS_PER_DEGREE};

/// A WGS-84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude (°, north positive)
    pub lat: f64,
    /// Longitude (°, east positive)
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometres
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }

    /// Great-circle distance in metres
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other) * 1000.0
    }

    /// Flat-earth offset `(east, north)` in metres from `self` to `other`
    pub fn offset_m(&self, other: &GeoPoint) -> (f64, f64) {
        let dy = (other.lat - self.lat) * METERS_PER_DEGREE;
        let dx = (other.lng - self.lng) * METERS_PER_DEGREE * self.lat.to_radians().cos();
        (dx, dy)
    }

    /// Point halfway between two points (linear in degrees)
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Haversine great-circle distance (km)
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Total length of a polyline (km)
pub fn path_length_km(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}

/// Rectangular area covered by a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Northern edge (°)
    pub north: f64,
    /// Southern edge (°)
    pub south: f64,
    /// Eastern edge (°)
    pub east: f64,
    /// Western edge (°)
    pub west: f64,
}

impl Default for GridBounds {
    /// Lower Manhattan, Brooklyn and western Queens
    fn default() -> Self {
        Self {
            north: 40.82,
            south: 40.70,
            east: -73.78,
            west: -74.02,
        }
    }
}

impl GridBounds {
    /// Create bounds, swapping edges given in the wrong order
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        let (north, south) = if north < south { (south, north) } else { (north, south) };
        let (east, west) = if east < west { (west, east) } else { (east, west) };
        Self { north, south, east, west }
    }

    /// Centre of cell `(row, col)` in an `resolution`×`resolution` grid.
    ///
    /// Row 0 is the northern edge, column 0 the western edge.
    pub fn cell_center(&self, row: usize, col: usize, resolution: usize) -> GeoPoint {
        let n = resolution.max(1) as f64;
        let lat_step = (self.north - self.south) / n;
        let lng_step = (self.east - self.west) / n;
        GeoPoint::new(
            self.north - (row as f64 + 0.5) * lat_step,
            self.west + (col as f64 + 0.5) * lng_step,
        )
    }

    /// Whether a point lies inside the bounds (edges inclusive)
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(40.758, -73.9855);
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn known_city_distance() {
        // Times Square to Wall Street, about 5.9 km
        let times_square = GeoPoint::new(40.7580, -73.9855);
        let wall_street = GeoPoint::new(40.7074, -74.0113);
        let d = times_square.distance_km(&wall_street);
        assert!((d - 6.0).abs() < 0.3, "distance {d}");
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        assert!((haversine_km(&a, &b) - 111.19).abs() < 0.05);
    }

    #[test]
    fn offset_directions() {
        let origin = GeoPoint::new(40.7, -74.0);
        let (dx, dy) = origin.offset_m(&GeoPoint::new(40.701, -74.0));
        assert!(dx.abs() < 1e-9);
        assert!((dy - 111.32).abs() < 1e-6);

        let (dx, _) = origin.offset_m(&GeoPoint::new(40.7, -73.999));
        assert!(dx > 80.0 && dx < 90.0, "east offset {dx}");
    }

    #[test]
    fn cell_centres_span_bounds() {
        let bounds = GridBounds::new(1.0, 0.0, 1.0, 0.0);
        let first = bounds.cell_center(0, 0, 10);
        let last = bounds.cell_center(9, 9, 10);

        assert!((first.lat - 0.95).abs() < 1e-12);
        assert!((first.lng - 0.05).abs() < 1e-12);
        assert!((last.lat - 0.05).abs() < 1e-12);
        assert!((last.lng - 0.95).abs() < 1e-12);
    }

    #[test]
    fn swapped_bounds_normalized() {
        let bounds = GridBounds::new(40.70, 40.82, -74.02, -73.78);
        assert_eq!(bounds, GridBounds::default());
        assert!(bounds.contains(&GeoPoint::new(40.75, -73.9)));
    }

    #[test]
    fn path_length_sums_segments() {
        let path = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(2.0, 0.0),
        ];
        assert!((path_length_km(&path) - 2.0 * 111.19).abs() < 0.1);
        assert_eq!(path_length_km(&path[..1]), 0.0);
    }
}
