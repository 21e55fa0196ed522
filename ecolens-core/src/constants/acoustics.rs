//! Road-traffic noise constants
//!
//! Reference emission levels follow the FHWA Traffic Noise Model vehicle
//! classes, measured at 15 m from the lane centre.

/// Trucks: reference level (dB(A)) at reference speed (km/h).
pub const TRUCK_REFERENCE: (f64, f64) = (84.0, 50.0);

/// Cars: reference level (dB(A)) at reference speed (km/h).
pub const CAR_REFERENCE: (f64, f64) = (67.0, 50.0);

/// Buses: reference level (dB(A)) at reference speed (km/h).
pub const BUS_REFERENCE: (f64, f64) = (81.0, 40.0);

/// Motorcycles: reference level (dB(A)) at reference speed (km/h).
pub const MOTORCYCLE_REFERENCE: (f64, f64) = (78.0, 50.0);

/// Distance at which reference levels were measured (m).
///
/// Source: FHWA TNM 2.5 technical manual
pub const REFERENCE_DISTANCE_M: f64 = 15.0;

/// Atmospheric absorption (dB/km).
///
/// Source: ISO 9613-1, A-weighted traffic spectrum at 20 °C / 70 % RH
pub const ATMOSPHERIC_ABSORPTION_DB_PER_KM: f64 = 5.0;

/// Soft-ground absorption factor applied to 3·log10(d/d_ref).
pub const GROUND_FACTOR: f64 = 0.5;

/// Default average traffic speed (km/h).
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Default receptor distance from the roadway (m).
pub const DEFAULT_DISTANCE_M: f64 = 15.0;

/// Speed floor to keep log10 finite (km/h).
pub const MIN_SPEED_KMH: f64 = 5.0;

/// Distance floor to keep log10 finite (m).
pub const MIN_DISTANCE_M: f64 = 1.0;

/// Traffic level reported when no vehicles are present (dB).
pub const EMPTY_ROAD_DB: f64 = 35.0;

/// Urban ambient level energy-added to every reading (dB).
pub const AMBIENT_NOISE_DB: f64 = 45.0;

/// Lowest reported level (dB).
pub const NOISE_FLOOR_DB: f64 = 30.0;

/// Standard deviation of reading perturbation (dB).
pub const NOISE_JITTER_DB: f64 = 1.0;

/// Category upper bounds: Quiet, Moderate, Loud, Very Loud (dB).
///
/// Source: WHO Environmental Noise Guidelines for the European Region (2018)
pub const CATEGORY_THRESHOLDS_DB: [f64; 4] = [45.0, 55.0, 65.0, 75.0];

/// Ambient level for every noise-grid cell (dB).
pub const GRID_AMBIENT_DB: f64 = 35.0;

/// Default point-source level for the noise grid (dB).
pub const DEFAULT_SOURCE_DB: f64 = 65.0;

/// Geometric spreading slope for the noise grid (dB per decade).
pub const GRID_SPREADING_DB_PER_DECADE: f64 = 15.0;
