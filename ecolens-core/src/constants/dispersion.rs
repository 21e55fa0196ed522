//! Gaussian plume dispersion constants
//!
//! Emission factors are per-vehicle exhaust plus non-exhaust rates for urban
//! stop-and-go traffic, in grams per vehicle per second.

// ===== EMISSION FACTORS (g/vehicle/s) =====

/// Heavy-duty diesel truck: PM2.5, PM10, NO2, CO.
///
/// Source: EPA MOVES3 urban restricted-access averages
pub const TRUCK_EMISSIONS: [f64; 4] = [0.070, 0.120, 2.50, 1.80];

/// Passenger car: PM2.5, PM10, NO2, CO.
///
/// Source: EPA MOVES3 urban restricted-access averages
pub const CAR_EMISSIONS: [f64; 4] = [0.005, 0.010, 0.15, 1.20];

/// Transit bus: PM2.5, PM10, NO2, CO.
///
/// Source: EPA MOVES3 urban restricted-access averages
pub const BUS_EMISSIONS: [f64; 4] = [0.055, 0.095, 2.10, 1.50];

/// Motorcycle: PM2.5, PM10, NO2, CO.
///
/// Source: EPA MOVES3 urban restricted-access averages
pub const MOTORCYCLE_EMISSIONS: [f64; 4] = [0.008, 0.015, 0.10, 2.50];

// ===== PLUME GEOMETRY =====

/// Receptor (breathing) height above ground (m).
pub const RECEPTOR_HEIGHT_M: f64 = 1.5;

/// Effective emission height of vehicle exhaust (m).
pub const SOURCE_HEIGHT_M: f64 = 0.5;

/// Downwind distance of the representative receptor (m).
///
/// Roughly the kerb-to-pavement distance at a busy junction.
pub const RECEPTOR_DOWNWIND_M: f64 = 50.0;

/// Lower bound for sigma-y and sigma-z (m).
pub const MIN_SIGMA_M: f64 = 1.0;

/// Wind speed floor used in plume denominators (m/s).
pub const MIN_WIND_SPEED_M_PER_S: f64 = 0.5;

/// Below this wind speed the plume model is replaced by the box model (m/s).
pub const CALM_WIND_THRESHOLD_M_PER_S: f64 = 0.3;

/// Box-model mixing volume under calm air (m³): 200 m × 200 m × 100 m.
pub const CALM_BOX_VOLUME_M3: f64 = 200.0 * 200.0 * 100.0;

/// Fraction of the box retained under calm conditions.
pub const CALM_BOX_RETENTION: f64 = 0.5;

/// Grams to micrograms.
pub const G_TO_UG: f64 = 1.0e6;

// ===== STABILITY CLASSIFICATION =====

/// First daytime hour (inclusive) for the insolation proxy.
pub const DAYTIME_START_HOUR: u32 = 7;

/// Last daytime hour (inclusive) for the insolation proxy.
pub const DAYTIME_END_HOUR: u32 = 18;

// ===== BACKGROUND AND CORRECTIONS =====

/// Urban background concentrations: PM2.5, PM10, NO2 (µg/m³), CO (µg/m³).
///
/// Source: NYC Community Air Survey annual means, rounded
pub const BACKGROUND_LEVELS: [f64; 4] = [5.0, 12.0, 15.0, 200.0];

/// Standard deviation of background jitter per pollutant.
pub const BACKGROUND_JITTER: [f64; 4] = [0.5, 1.0, 1.5, 20.0];

/// Physically plausible floor per pollutant after corrections.
pub const POLLUTANT_FLOORS: [f64; 4] = [1.0, 2.0, 2.0, 50.0];

/// NO2 formation increase per °C above the reference temperature.
pub const NO2_TEMP_COEFFICIENT: f64 = 0.01;

/// Reference temperature for the NO2 correction (°C).
pub const NO2_TEMP_REFERENCE_C: f64 = 20.0;

/// Hygroscopic PM growth per % relative humidity above the reference.
pub const PM_HUMIDITY_COEFFICIENT: f64 = 0.005;

/// Reference humidity for particulate growth (%).
pub const PM_HUMIDITY_REFERENCE_PCT: f64 = 60.0;

// ===== CONCENTRATION GRID AND PARTICLES =====

/// Default PM2.5 emission rate for a grid source (g/s).
pub const DEFAULT_SOURCE_EMISSION_G_PER_S: f64 = 0.01;

/// Background added to every concentration-grid cell (µg/m³).
pub const GRID_BACKGROUND_UG_M3: f64 = 5.0;

/// Minimum downwind distance for a grid contribution (m).
pub const GRID_MIN_DOWNWIND_M: f64 = 1.0;

/// Degrees per second of drift per m/s of wind for particle animation.
pub const PARTICLE_DRIFT_SCALE: f64 = 1.0e-5;

/// Turbulent velocity noise for particles (°/s).
pub const PARTICLE_TURBULENCE: f64 = 5.0e-6;

/// PM2.5 that maps to full particle opacity (µg/m³).
pub const PARTICLE_FULL_OPACITY_PM25: f64 = 50.0;

/// Particle spawn radius range around the source (°).
pub const PARTICLE_RADIUS_DEG: (f64, f64) = (0.0001, 0.003);

/// Maximum initial particle age (s).
pub const PARTICLE_MAX_AGE_S: f64 = 10.0;
