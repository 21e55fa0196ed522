//! Core engines for EcoLens
//!
//! Turns per-location traffic counts into air quality, noise, and health
//! estimates, forecasts PM2.5, interpolates a city-wide surface, and plans
//! low-exposure walking routes.
//!
//! Key constraints:
//! - No I/O in the engines; weather, frames, and storage come in through traits
//! - Deterministic under a fixed seed and clock
//! - Degenerate input falls back to defined values instead of failing
//!
//! ```no_run
//! use std::collections::HashMap;
//! use ecolens_core::{EcoConfig, Monitor, WeatherService};
//!
//! let config = EcoConfig::default();
//! let mut weather = WeatherService::new(config.weather.clone());
//! let mut monitor = Monitor::new(config);
//!
//! let snapshot = monitor.run_cycle(&weather.fetch(), &HashMap::new());
//! println!("avg AQI {:.0}", snapshot.stats.avg_aqi);
//!
//! let route = monitor.route_between("cam-001", "cam-003").unwrap();
//! println!("{:.1}% less exposure", route.comparison.reduction_percent);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod macros;

pub mod acoustics;
pub mod aqi;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod dispersion;
pub mod errors;
pub mod forecast;
pub mod geo;
pub mod health;
pub mod interpolation;
pub mod models;
pub mod monitor;
pub mod rng;
pub mod routing;
pub mod time;
pub mod traffic;
pub mod traits;
pub mod weather;

// Public API
pub use acoustics::{NoiseConfig, NoiseModel, NoiseSource};
pub use config::{CycleConfig, EcoConfig};
pub use dispersion::{DispersionConfig, DispersionEngine, EmissionSource, StabilityClass};
pub use errors::{EngineError, EngineResult};
pub use forecast::{ForecastConfig, Forecaster};
pub use geo::{GeoPoint, GridBounds};
pub use health::{HealthConfig, HealthScorer, VulnerabilityGroup};
pub use interpolation::{InterpolationConfig, Interpolator};
pub use models::{
    ForecastPoint, HealthAssessment, InterpolationGrid, InterpolationMethod, NoiseCategory, NoiseReading, Particle,
    PollutionReading, PollutionSample, RiskLevel, RouteComparison, RouteResult, VehicleClass, VehicleCounts,
    WeatherState,
};
pub use monitor::{GlobalStats, LocationSnapshot, Monitor, MonitoredLocation, Snapshot};
pub use routing::{RoutePlanner, RoutingConfig};
pub use time::{Clock, FixedClock, SystemClock};
pub use traffic::{LocationProfile, TrafficConfig, TrafficGenerator};
pub use traits::{ReadingSink, VehicleDetector, WeatherProvider};
pub use weather::{WeatherConfig, WeatherService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
