//! Atmospheric Dispersion Engine
//!
//! Converts vehicle counts and weather into pollutant concentrations and an
//! EPA AQI for one location.
//!
//! ## Pipeline
//!
//! ```text
//! counts ──► Q per pollutant ──► stability class ──► plume (or box) at receptor
//!                                                        │
//!        AQI ◄── floors ◄── T/RH corrections ◄── + background (jittered)
//! ```
//!
//! 1. `Q_p = Σ_class count · EF[class][p]` (g/s)
//! 2. Pasquill-Gifford class from wind speed and hour of day
//! 3. Gaussian plume at 50 m downwind, on the plume axis, 1.5 m high, with a
//!    0.5 m source; box model under calm air
//! 4. Background 5/12/15/200 µg/m³ with Gaussian jitter
//! 5. NO2 × (1 + 0.01·max(0, T − 20)); PM × (1 + 0.005·max(0, RH − 60))
//! 6. Floors 1/2/2/50 µg/m³
//! 7. PM2.5 → AQI via the breakpoint table
//!
//! Companion operations build a multi-source concentration grid
//! ([`DispersionEngine::concentration_grid`]) and visualization particles
//! ([`DispersionEngine::generate_particles`]).

mod grid;
mod particles;
pub mod plume;
mod stability;

pub use grid::EmissionSource;
pub use particles::DEFAULT_PARTICLE_COUNT;
pub use stability::{SpreadCoefficients, StabilityClass};

use std::sync::Arc;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::aqi::{pm25_to_aqi, AqiCategory};
use crate::constants::dispersion::{
    BACKGROUND_JITTER, BACKGROUND_LEVELS, BUS_EMISSIONS, CAR_EMISSIONS, MOTORCYCLE_EMISSIONS, NO2_TEMP_COEFFICIENT,
    NO2_TEMP_REFERENCE_C, PM_HUMIDITY_COEFFICIENT, PM_HUMIDITY_REFERENCE_PCT, POLLUTANT_FLOORS,
    RECEPTOR_DOWNWIND_M, RECEPTOR_HEIGHT_M, SOURCE_HEIGHT_M, TRUCK_EMISSIONS,
};
use crate::models::{PollutionReading, VehicleClass, VehicleCounts, WeatherState};
use crate::rng::SimRng;
use crate::time::{Clock, SystemClock};

use plume::Receptor;

const PM25: usize = 0;
const PM10: usize = 1;
const NO2: usize = 2;
const CO: usize = 3;

/// Per-pollutant emission factors for a vehicle class (g/vehicle/s)
pub fn emission_factors(class: VehicleClass) -> [f64; 4] {
    match class {
        VehicleClass::Truck => TRUCK_EMISSIONS,
        VehicleClass::Car => CAR_EMISSIONS,
        VehicleClass::Bus => BUS_EMISSIONS,
        VehicleClass::Motorcycle => MOTORCYCLE_EMISSIONS,
    }
}

/// Total emission rate per pollutant (g/s)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionRates {
    /// PM2.5 (g/s)
    pub pm25: f64,
    /// PM10 (g/s)
    pub pm10: f64,
    /// NO2 (g/s)
    pub no2: f64,
    /// CO (g/s)
    pub co: f64,
}

impl EmissionRates {
    /// Sum the class emission factors weighted by counts
    pub fn from_counts(counts: &VehicleCounts) -> Self {
        let mut q = [0.0; 4];
        for class in VehicleClass::ALL {
            let n = counts.get(class) as f64;
            for (total, factor) in q.iter_mut().zip(emission_factors(class)) {
                *total += n * factor;
            }
        }
        Self { pm25: q[PM25], pm10: q[PM10], no2: q[NO2], co: q[CO] }
    }

    fn as_array(&self) -> [f64; 4] {
        [self.pm25, self.pm10, self.no2, self.co]
    }
}

/// Dispersion engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersionConfig {
    /// Receptor distance downwind of the road (m)
    pub receptor_downwind_m: f64,
    /// Receptor height (m)
    pub receptor_height_m: f64,
    /// Effective source height (m)
    pub source_height_m: f64,
    /// Background PM2.5, PM10, NO2, CO (µg/m³)
    pub background: [f64; 4],
    /// Background jitter standard deviations
    pub background_jitter: [f64; 4],
    /// Scales all random perturbation; 0 disables it
    pub jitter_scale: f64,
}

impl Default for DispersionConfig {
    fn default() -> Self {
        Self {
            receptor_downwind_m: RECEPTOR_DOWNWIND_M,
            receptor_height_m: RECEPTOR_HEIGHT_M,
            source_height_m: SOURCE_HEIGHT_M,
            background: BACKGROUND_LEVELS,
            background_jitter: BACKGROUND_JITTER,
            jitter_scale: 1.0,
        }
    }
}

impl DispersionConfig {
    /// Set receptor distance (m), at least 1 m
    pub fn with_receptor_distance(mut self, downwind_m: f64) -> Self {
        self.receptor_downwind_m = downwind_m.max(1.0);
        self
    }

    /// Set perturbation scale
    pub fn with_jitter_scale(mut self, scale: f64) -> Self {
        self.jitter_scale = scale.max(0.0);
        self
    }
}

/// Gaussian plume dispersion engine
pub struct DispersionEngine {
    config: DispersionConfig,
    clock: Arc<dyn Clock>,
    rng: SimRng,
    last_stability: Option<StabilityClass>,
}

impl Default for DispersionEngine {
    fn default() -> Self {
        Self::new(DispersionConfig::default())
    }
}

impl DispersionEngine {
    /// Engine with system clock and entropy seed
    pub fn new(config: DispersionConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
            rng: SimRng::from_entropy(),
            last_stability: None,
        }
    }

    /// Use a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SimRng::from_seed_u64(seed);
        self
    }

    /// Use a custom clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &DispersionConfig {
        &self.config
    }

    /// Stability class used by the most recent evaluation
    pub fn last_stability(&self) -> Option<StabilityClass> {
        self.last_stability
    }

    /// Pollution at the current clock hour
    pub fn calculate_pollution(&mut self, vehicles: &VehicleCounts, weather: &WeatherState) -> PollutionReading {
        let hour = self.clock.now().hour();
        self.calculate_pollution_at_hour(vehicles, weather, hour)
    }

    /// Pollution for an explicit hour of day (0–23)
    pub fn calculate_pollution_at_hour(
        &mut self,
        vehicles: &VehicleCounts,
        weather: &WeatherState,
        hour: u32,
    ) -> PollutionReading {
        let weather = weather.sanitized();
        let stability = StabilityClass::classify(weather.wind_speed, hour);
        self.last_stability = Some(stability);

        let receptor = Receptor {
            downwind_m: self.config.receptor_downwind_m,
            crosswind_m: 0.0,
            height_m: self.config.receptor_height_m,
        };

        let emissions = EmissionRates::from_counts(vehicles).as_array();
        let mut levels = [0.0; 4];
        for p in 0..4 {
            let plume = plume::concentration(
                emissions[p],
                weather.wind_speed,
                stability,
                &receptor,
                self.config.source_height_m,
            );
            let sigma = self.config.background_jitter[p] * self.config.jitter_scale;
            levels[p] = plume + self.rng.gaussian(self.config.background[p], sigma);
        }

        levels[NO2] *= 1.0 + (weather.temperature - NO2_TEMP_REFERENCE_C).max(0.0) * NO2_TEMP_COEFFICIENT;
        let pm_growth = 1.0 + (weather.humidity - PM_HUMIDITY_REFERENCE_PCT).max(0.0) * PM_HUMIDITY_COEFFICIENT;
        levels[PM25] *= pm_growth;
        levels[PM10] *= pm_growth;

        for (level, floor) in levels.iter_mut().zip(POLLUTANT_FLOORS) {
            *level = level.max(floor);
        }

        let aqi = pm25_to_aqi(levels[PM25]);
        PollutionReading {
            pm25: levels[PM25],
            pm10: levels[PM10],
            no2: levels[NO2],
            co: levels[CO],
            aqi,
            category: AqiCategory::from_aqi(aqi),
        }
    }
}
