//! Shared fixtures for integration tests
//!
//! Seeded engines on a fixed clock and a fixed set of conditions, so every
//! run of a test sees the same numbers.

#![allow(dead_code)]

use std::sync::Arc;

use ecolens_core::{
    EcoConfig, EngineResult, FixedClock, Monitor, PollutionSample, VehicleCounts, VehicleDetector, WeatherState,
};

/// Seed shared by every engine under test
pub const SEED: u64 = 42;

/// Steady south-westerly breeze on a warm, humid day
pub fn reference_weather() -> WeatherState {
    WeatherState::new(3.0, 220.0, 30.0, 55.0)
}

/// Weekday morning rush
pub fn rush_hour_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(2024, 6, 3, 8, 30))
}

/// Noise-free monitor over the default locations
pub fn quiet_monitor() -> Monitor {
    Monitor::new(EcoConfig::default().with_jitter_scale(0.0))
        .with_seed(SEED)
        .with_clock(rush_hour_clock())
}

/// Readings at the six default camera sites
pub fn city_samples() -> Vec<PollutionSample> {
    vec![
        PollutionSample::new(40.7580, -73.9855, 35.0),
        PollutionSample::new(40.7061, -73.9969, 22.0),
        PollutionSample::new(40.7648, -73.9724, 12.0),
        PollutionSample::new(40.7074, -74.0113, 28.0),
        PollutionSample::new(40.8116, -73.9465, 18.0),
        PollutionSample::new(40.7282, -73.7949, 25.0),
    ]
}

/// Detector that reports the same counts for every frame
pub struct FixedDetector(pub VehicleCounts);

impl FixedDetector {
    /// 6 trucks, 40 cars, 5 buses, 10 motorcycles
    pub fn busy_street() -> Self {
        Self(VehicleCounts::new(6, 40, 5, 10))
    }
}

impl VehicleDetector for FixedDetector {
    fn detect(&mut self, _location_id: &str, _frame: &[u8]) -> EngineResult<VehicleCounts> {
        Ok(self.0)
    }
}
