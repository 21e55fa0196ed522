//! Plain data records exchanged between the engines and their callers
//!
//! Every record is a value: an engine builds it, hands it out, and never
//! touches it again. All records serialize with serde so the transport layer
//! can forward them without conversion.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::aqi::AqiCategory;
use crate::geo::{GeoPoint, GridBounds};

/// Vehicle classes with distinct emission and noise signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    /// Heavy goods vehicles
    Truck,
    /// Passenger cars
    Car,
    /// Buses and coaches
    Bus,
    /// Motorcycles and scooters
    Motorcycle,
}

impl VehicleClass {
    /// All classes in reporting order
    pub const ALL: [VehicleClass; 4] = [Self::Truck, Self::Car, Self::Bus, Self::Motorcycle];
}

/// Per-class vehicle counts for one observation
///
/// `total` is always derived from the four classes; it is serialized for
/// consumers but ignored on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct VehicleCounts {
    /// Trucks
    #[serde(default)]
    pub trucks: u32,
    /// Cars
    #[serde(default)]
    pub cars: u32,
    /// Buses
    #[serde(default)]
    pub buses: u32,
    /// Motorcycles
    #[serde(default)]
    pub motorcycles: u32,
}

impl VehicleCounts {
    /// Create counts
    pub const fn new(trucks: u32, cars: u32, buses: u32, motorcycles: u32) -> Self {
        Self { trucks, cars, buses, motorcycles }
    }

    /// Sum over all classes, widened so no combination of counts overflows
    pub fn total(&self) -> u64 {
        VehicleClass::ALL.iter().map(|&class| u64::from(self.get(class))).sum()
    }

    /// Count for one class
    pub fn get(&self, class: VehicleClass) -> u32 {
        match class {
            VehicleClass::Truck => self.trucks,
            VehicleClass::Car => self.cars,
            VehicleClass::Bus => self.buses,
            VehicleClass::Motorcycle => self.motorcycles,
        }
    }

    /// Copy with one class replaced
    pub fn with(mut self, class: VehicleClass, count: u32) -> Self {
        match class {
            VehicleClass::Truck => self.trucks = count,
            VehicleClass::Car => self.cars = count,
            VehicleClass::Bus => self.buses = count,
            VehicleClass::Motorcycle => self.motorcycles = count,
        }
        self
    }
}

impl Serialize for VehicleCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("VehicleCounts", 5)?;
        s.serialize_field("trucks", &self.trucks)?;
        s.serialize_field("cars", &self.cars)?;
        s.serialize_field("buses", &self.buses)?;
        s.serialize_field("motorcycles", &self.motorcycles)?;
        s.serialize_field("total", &self.total())?;
        s.end()
    }
}

/// Current meteorological conditions shared by every location in a cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Direction the wind blows from (°, 0 = north, clockwise)
    pub wind_direction: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            wind_speed: 3.0,
            wind_direction: 220.0,
            temperature: 20.0,
            humidity: 50.0,
        }
    }
}

impl WeatherState {
    /// Create a state; values are normalized with [`WeatherState::sanitized`]
    pub fn new(wind_speed: f64, wind_direction: f64, temperature: f64, humidity: f64) -> Self {
        Self { wind_speed, wind_direction, temperature, humidity }.sanitized()
    }

    /// Normalize into the documented ranges.
    ///
    /// Non-finite fields fall back to the defaults, speed is clamped at zero,
    /// direction wrapped into [0, 360) and humidity clamped into [0, 100].
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, d: f64| if v.is_finite() { v } else { d };

        Self {
            wind_speed: pick(self.wind_speed, defaults.wind_speed).max(0.0),
            wind_direction: pick(self.wind_direction, defaults.wind_direction).rem_euclid(360.0),
            temperature: pick(self.temperature, defaults.temperature),
            humidity: pick(self.humidity, defaults.humidity).clamp(0.0, 100.0),
        }
    }
}

/// Pollutant concentrations and the derived AQI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutionReading {
    /// Fine particulates (µg/m³)
    pub pm25: f64,
    /// Coarse particulates (µg/m³)
    pub pm10: f64,
    /// Nitrogen dioxide (µg/m³)
    pub no2: f64,
    /// Carbon monoxide (µg/m³)
    pub co: f64,
    /// EPA AQI from PM2.5
    pub aqi: u16,
    /// AQI band
    pub category: AqiCategory,
}

/// Noise band by A-weighted level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoiseCategory {
    /// Below 45 dB
    Quiet,
    /// 45–55 dB
    Moderate,
    /// 55–65 dB
    Loud,
    /// 65–75 dB
    #[serde(rename = "Very Loud")]
    VeryLoud,
    /// 75 dB and above
    Extreme,
}

impl NoiseCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quiet => "Quiet",
            Self::Moderate => "Moderate",
            Self::Loud => "Loud",
            Self::VeryLoud => "Very Loud",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for NoiseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Equivalent sound level at a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseReading {
    /// Level (dB(A))
    pub db_level: f64,
    /// Band
    pub category: NoiseCategory,
}

/// Health risk band, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score ≥ 80
    Low,
    /// Score 60–79
    Moderate,
    /// Score 40–59
    High,
    /// Score 20–39
    #[serde(rename = "Very High")]
    VeryHigh,
    /// Score below 20
    Severe,
}

impl RiskLevel {
    /// All levels from least to most severe
    pub const ALL: [RiskLevel; 5] = [Self::Low, Self::Moderate, Self::High, Self::VeryHigh, Self::Severe];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Composite health impact of one pollution + noise observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// 0 (worst) to 100 (no impact)
    pub score: u8,
    /// Band of `score`
    pub risk_level: RiskLevel,
    /// Cigarettes per day with equivalent PM2.5 dose
    pub cigarette_equivalent: f64,
    /// Guidance text
    pub advisory: String,
}

/// One step of a PM2.5 forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Target time
    pub timestamp: DateTime<Utc>,
    /// Minutes ahead of the forecast origin
    pub horizon_minutes: u32,
    /// Point estimate (µg/m³)
    pub predicted_pm25: f64,
    /// Lower 95 % bound (µg/m³)
    pub lower_bound: f64,
    /// Upper 95 % bound (µg/m³)
    pub upper_bound: f64,
}

impl ForecastPoint {
    /// Distance from the estimate to the upper bound
    pub fn half_width(&self) -> f64 {
        self.upper_bound - self.predicted_pm25
    }
}

/// Which estimator produced a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Ordinary kriging (with per-cell IDW on singular systems)
    Kriging,
    /// Inverse distance weighting
    Idw,
}

/// Square grid of estimates over a bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationGrid {
    /// Area covered
    pub bounds: GridBounds,
    /// Cells per side
    pub resolution: usize,
    /// Row-major values, row 0 at the northern edge
    pub values: Vec<Vec<f64>>,
    /// Estimator used
    pub method: InterpolationMethod,
}

impl InterpolationGrid {
    /// Value at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Largest cell value
    pub fn max_value(&self) -> f64 {
        self.values.iter().flatten().copied().fold(0.0, f64::max)
    }
}

/// A known PM2.5 value at a position, the input of spatial estimators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutionSample {
    /// Where the value was observed
    pub position: GeoPoint,
    /// PM2.5 (µg/m³)
    pub pm25: f64,
}

impl PollutionSample {
    /// Create a sample
    pub const fn new(lat: f64, lng: f64, pm25: f64) -> Self {
        Self { position: GeoPoint::new(lat, lng), pm25 }
    }
}

/// Green route versus shortest route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteComparison {
    /// Cumulative exposure along the shortest route (µg/m³·km)
    pub shortest_path_exposure: f64,
    /// Cumulative exposure along the green route (µg/m³·km)
    pub green_path_exposure: f64,
    /// Exposure saved by the green route (%), never negative
    pub reduction_percent: f64,
    /// Shortest route length (km)
    pub shortest_path_distance_km: f64,
    /// Green route length (km)
    pub green_path_distance_km: f64,
}

/// A pollution-minimizing walking/cycling route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Ordered waypoints from start to goal
    pub path: Vec<GeoPoint>,
    /// Length (km)
    pub total_distance_km: f64,
    /// Exposure divided by length (µg/m³)
    pub avg_pollution: f64,
    /// Cumulative exposure (µg/m³·km)
    pub estimated_exposure: f64,
    /// Comparison against the shortest route
    pub comparison: RouteComparison,
}

/// Visualization particle drifting away from a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Longitude (°)
    pub x: f64,
    /// Latitude (°)
    pub y: f64,
    /// Eastward velocity (°/s)
    pub vx: f64,
    /// Northward velocity (°/s)
    pub vy: f64,
    /// Opacity in [0, 1]
    pub concentration: f64,
    /// Seconds since emission
    pub age: f64,
    /// Emitting location
    pub source_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_derived() {
        let counts = VehicleCounts::new(2, 10, 1, 3);
        assert_eq!(counts.total(), 16);
        assert_eq!(counts.with(VehicleClass::Car, 0).total(), 6);
    }

    #[test]
    fn total_widens_past_u32() {
        let counts = VehicleCounts::new(u32::MAX, 1, 0, 0);
        assert_eq!(counts.total(), u64::from(u32::MAX) + 1);

        let json = serde_json::to_value(VehicleCounts::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX)).unwrap();
        assert_eq!(json["total"], 4 * u64::from(u32::MAX));
    }

    #[test]
    fn counts_serialize_total() {
        let json = serde_json::to_value(VehicleCounts::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json["total"], 10);

        // total on input is ignored
        let parsed: VehicleCounts =
            serde_json::from_str(r#"{"trucks":1,"cars":2,"buses":0,"motorcycles":0,"total":99}"#).unwrap();
        assert_eq!(parsed.total(), 3);
    }

    #[test]
    fn weather_sanitized() {
        let weather = WeatherState::new(-2.0, -30.0, f64::NAN, 130.0);
        assert_eq!(weather.wind_speed, 0.0);
        assert_eq!(weather.wind_direction, 330.0);
        assert_eq!(weather.temperature, 20.0);
        assert_eq!(weather.humidity, 100.0);

        let wrapped = WeatherState::new(3.0, 360.0, 25.0, 50.0);
        assert_eq!(wrapped.wind_direction, 0.0);
    }

    #[test]
    fn risk_levels_ordered_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::VeryHigh < RiskLevel::Severe);
        assert_eq!(RiskLevel::ALL.iter().max(), Some(&RiskLevel::Severe));
    }

    #[test]
    fn labels_serialize_with_spaces() {
        assert_eq!(serde_json::to_string(&RiskLevel::VeryHigh).unwrap(), "\"Very High\"");
        assert_eq!(serde_json::to_string(&NoiseCategory::VeryLoud).unwrap(), "\"Very Loud\"");
    }
}
