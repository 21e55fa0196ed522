//! Constants for EcoLens Core
//!
//! Centralized, documented constants used by the engines. Every value that
//! shapes a model output lives here with its units and provenance.
//!
//! ## Organization
//!
//! - **Geo**: Earth geometry and coordinate conversion
//! - **Dispersion**: emission factors, plume geometry, backgrounds
//! - **Acoustics**: reference sound levels and attenuation terms
//! - **Health**: WHO guidelines, penalty caps, dose-response
//! - **Forecast**: smoothing parameters and buffer sizes
//! - **Spatial**: interpolation and routing parameters
//! - **Traffic**: simulation and smoothing parameters

/// Earth geometry and coordinate conversion.
pub mod geo;

/// Emission factors, plume geometry and background concentrations.
pub mod dispersion;

/// Traffic-noise reference levels and attenuation.
pub mod acoustics;

/// Health guideline thresholds and dose-response parameters.
pub mod health;

/// Exponential smoothing parameters and history sizes.
pub mod forecast;

/// Kriging, IDW and routing lattice parameters.
pub mod spatial;

/// Traffic simulation parameters.
pub mod traffic;

pub use geo::{EARTH_RADIUS_KM, METERS_PER_DEGREE};
pub use dispersion::{RECEPTOR_DOWNWIND_M, MIN_WIND_SPEED_M_PER_S, CALM_WIND_THRESHOLD_M_PER_S};
pub use acoustics::{AMBIENT_NOISE_DB, NOISE_FLOOR_DB};
pub use health::{WHO_PM25_GUIDELINE, WHO_PM10_GUIDELINE, WHO_NO2_GUIDELINE};
pub use forecast::{SEASON_LENGTH, MAX_RECENT_SAMPLES, MAX_HOURLY_HISTORY};
pub use spatial::{MIN_POINTS_FOR_KRIGING, ROUTE_GRID_STEP_DEG, ROUTE_MAX_ITERATIONS};
