//! Aggregate configuration
//!
//! Every engine owns its own `*Config`; [`EcoConfig`] groups them with the
//! cycle cadence so a deployment can be described by one JSON document.
//! Missing sections and fields take their defaults.
//!
//! ```rust
//! use ecolens_core::EcoConfig;
//!
//! let config = EcoConfig::from_json_str(r#"{
//!     "interpolation": { "resolution": 20 },
//!     "cycle": { "grid_every": 6 }
//! }"#).unwrap();
//!
//! assert_eq!(config.interpolation.resolution, 20);
//! assert_eq!(config.cycle.grid_every, 6);
//! assert_eq!(config.cycle.persist_every, 12);
//! ```

use serde::{Deserialize, Serialize};

use crate::acoustics::NoiseConfig;
use crate::constants::forecast::{DEFAULT_HORIZON_HOURS, DEFAULT_STEP_MINUTES};
use crate::dispersion::DispersionConfig;
use crate::errors::{EngineError, EngineResult};
use crate::forecast::ForecastConfig;
use crate::health::HealthConfig;
use crate::interpolation::{clamp_resolution, InterpolationConfig};
use crate::routing::RoutingConfig;
use crate::traffic::TrafficConfig;
use crate::weather::WeatherConfig;

/// Cadence of the monitoring cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Seconds between cycles, used to accumulate exposure dose
    pub interval_secs: f64,
    /// Rebuild the interpolation grid every N cycles
    pub grid_every: u64,
    /// Hand readings to the sink every N cycles
    pub persist_every: u64,
    /// Visualization particles per location
    pub particles_per_location: usize,
    /// Horizon of the per-cycle forecast (h)
    pub forecast_horizon_hours: f64,
    /// Step of the per-cycle forecast (min)
    pub forecast_step_minutes: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5.0,
            grid_every: 3,
            persist_every: 12,
            particles_per_location: 12,
            forecast_horizon_hours: DEFAULT_HORIZON_HOURS,
            forecast_step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

/// Configuration for every engine plus the cycle cadence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoConfig {
    /// Traffic generator
    pub traffic: TrafficConfig,
    /// Weather service
    pub weather: WeatherConfig,
    /// Dispersion engine
    pub dispersion: DispersionConfig,
    /// Noise model
    pub noise: NoiseConfig,
    /// Health scorer
    pub health: HealthConfig,
    /// Forecaster
    pub forecast: ForecastConfig,
    /// Spatial interpolator
    pub interpolation: InterpolationConfig,
    /// Route planner
    pub routing: RoutingConfig,
    /// Cycle cadence
    pub cycle: CycleConfig,
}

impl EcoConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Serialize as pretty JSON
    pub fn to_json_pretty(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check cross-field constraints and normalize ranges
    pub fn validated(mut self) -> EngineResult<Self> {
        if self.cycle.grid_every == 0 || self.cycle.persist_every == 0 {
            return Err(EngineError::InvalidConfig("cycle intervals must be at least 1".into()));
        }
        if !(self.cycle.interval_secs > 0.0) {
            return Err(EngineError::InvalidConfig("interval_secs must be positive".into()));
        }
        if self.cycle.forecast_step_minutes == 0 {
            return Err(EngineError::InvalidConfig("forecast_step_minutes must be at least 1".into()));
        }
        if !(self.routing.grid_step_deg > 0.0) {
            return Err(EngineError::InvalidConfig("routing.grid_step_deg must be positive".into()));
        }
        self.interpolation.resolution = clamp_resolution(self.interpolation.resolution);
        Ok(self)
    }

    /// Set every engine's perturbation scale; 0 makes runs noise-free
    pub fn with_jitter_scale(mut self, scale: f64) -> Self {
        let scale = scale.max(0.0);
        self.traffic.jitter_scale = scale;
        self.weather.jitter_scale = scale;
        self.dispersion.jitter_scale = scale;
        self.noise.jitter_scale = scale;
        self.forecast.jitter_scale = scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EcoConfig::from_json_str("{}").unwrap(), EcoConfig::default());
    }

    #[test]
    fn resolution_normalized() {
        let config = EcoConfig::from_json_str(r#"{"interpolation":{"resolution":1000}}"#).unwrap();
        assert_eq!(config.interpolation.resolution, 100);
    }

    #[test]
    fn zero_interval_rejected() {
        let err = EcoConfig::from_json_str(r#"{"cycle":{"grid_every":0}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            EcoConfig::from_json_str("{ not json"),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn pretty_output_parses_back() {
        let config = EcoConfig::default().with_jitter_scale(0.0);
        let json = config.to_json_pretty().unwrap();
        let parsed = EcoConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.cycle, config.cycle);
        assert_eq!(parsed.forecast.jitter_scale, 0.0);
        assert_eq!(parsed.routing.max_iterations, 15_000);
    }
}
