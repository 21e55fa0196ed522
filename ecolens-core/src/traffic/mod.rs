//! Traffic Count Generator
//!
//! Produces per-location vehicle counts for each update cycle, either from an
//! optional [`VehicleDetector`] or from a statistical simulation, and smooths
//! successive outputs so counts do not jump frame to frame.
//!
//! ## Simulation model
//!
//! ```text
//! activity(h) = 0.15 + 0.8·g(8.5, 1.5) + 1.0·g(17.5, 1.8) + 0.5·g(13, 3)
//! g(μ, σ)     = exp(−½((h − μ)/σ)²)
//!
//! expected    = base · activity · weekend? · rush?
//! raw         = max(0, round(expected + N(0, max(1, 0.15·expected))))
//! ```
//!
//! ## Smoothing
//!
//! ```text
//! out = round(α·raw + (1 − α)·previous)     α = 0.6
//! ```
//!
//! The first observation of a location passes through unchanged. Each
//! location's previous output is private to the generator.

mod profiles;

pub use profiles::{builtin_profiles, LocationProfile};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::traffic::{
    ACTIVITY_PEAKS, BASE_ACTIVITY, COUNT_NOISE_FRACTION, EVENING_RUSH, MIN_COUNT_NOISE, MORNING_RUSH,
    SMOOTHING_ALPHA,
};
use crate::macros::log_warn;
use crate::models::VehicleCounts;
use crate::rng::SimRng;
use crate::time::{fractional_hour, Clock, SystemClock};
use crate::traits::VehicleDetector;

/// Traffic generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Weight of the new observation when smoothing
    pub smoothing_alpha: f64,
    /// Count noise as a fraction of the expected count
    pub noise_fraction: f64,
    /// Minimum count noise (vehicles)
    pub min_noise: f64,
    /// Scales all random perturbation; 0 disables it
    pub jitter_scale: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: SMOOTHING_ALPHA,
            noise_fraction: COUNT_NOISE_FRACTION,
            min_noise: MIN_COUNT_NOISE,
            jitter_scale: 1.0,
        }
    }
}

impl TrafficConfig {
    /// Set smoothing weight, clamped to (0, 1]
    pub fn with_smoothing(mut self, alpha: f64) -> Self {
        self.smoothing_alpha = alpha.clamp(f64::EPSILON, 1.0);
        self
    }

    /// Set perturbation scale
    pub fn with_jitter_scale(mut self, scale: f64) -> Self {
        self.jitter_scale = scale.max(0.0);
        self
    }
}

/// Fractional-hour activity multiplier
pub fn time_of_day_factor(hour: f64) -> f64 {
    BASE_ACTIVITY
        + ACTIVITY_PEAKS
            .iter()
            .map(|&(centre, width, amplitude)| amplitude * (-0.5 * ((hour - centre) / width).powi(2)).exp())
            .sum::<f64>()
}

/// Whether a fractional hour falls inside a rush window
pub fn is_rush_hour(hour: f64) -> bool {
    (MORNING_RUSH.0..=MORNING_RUSH.1).contains(&hour) || (EVENING_RUSH.0..=EVENING_RUSH.1).contains(&hour)
}

/// Expected per-class counts `[trucks, cars, buses, motorcycles]` at `at`
pub fn expected_counts(profile: &LocationProfile, at: &DateTime<Utc>) -> [f64; 4] {
    let hour = fractional_hour(at);
    let mut factor = time_of_day_factor(hour);
    if at.weekday().num_days_from_monday() >= 5 {
        factor *= profile.weekend_factor;
    }
    if is_rush_hour(hour) {
        factor *= profile.rush_multiplier;
    }
    profile.bases().map(|base| base * factor)
}

/// Per-location vehicle count source
pub struct TrafficGenerator {
    config: TrafficConfig,
    profiles: HashMap<String, LocationProfile>,
    previous: HashMap<String, VehicleCounts>,
    detector: Option<Box<dyn VehicleDetector>>,
    clock: Arc<dyn Clock>,
    rng: SimRng,
}

impl Default for TrafficGenerator {
    fn default() -> Self {
        Self::new(TrafficConfig::default())
    }
}

impl TrafficGenerator {
    /// Generator with the built-in profiles, system clock, and entropy seed
    pub fn new(config: TrafficConfig) -> Self {
        Self {
            config,
            profiles: builtin_profiles()
                .into_iter()
                .map(|(id, p)| (id.to_string(), p))
                .collect(),
            previous: HashMap::new(),
            detector: None,
            clock: Arc::new(SystemClock),
            rng: SimRng::from_entropy(),
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

    /// Attach a frame detector
    pub fn with_detector(mut self, detector: Box<dyn VehicleDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Register or replace a location profile
    pub fn register_profile(&mut self, location_id: impl Into<String>, profile: LocationProfile) {
        self.profiles.insert(location_id.into(), profile);
    }

    /// Profile used for a location (default profile for unknown ids)
    pub fn profile(&self, location_id: &str) -> LocationProfile {
        self.profiles.get(location_id).copied().unwrap_or_default()
    }

    /// Last smoothed output for a location
    pub fn previous(&self, location_id: &str) -> Option<VehicleCounts> {
        self.previous.get(location_id).copied()
    }

    /// Counts for this cycle.
    ///
    /// Uses the detector when both a detector and a frame are present; a
    /// detector error is logged and the simulation takes over. The result is
    /// smoothed against the location's previous output.
    pub fn detect_vehicles(&mut self, location_id: &str, frame: Option<&[u8]>) -> VehicleCounts {
        let detected = match (self.detector.as_mut(), frame) {
            (Some(detector), Some(frame)) => match detector.detect(location_id, frame) {
                Ok(counts) => Some(counts),
                Err(err) => {
                    log_warn!("detection failed for {location_id}, simulating: {err}");
                    None
                }
            },
            _ => None,
        };

        let raw = match detected {
            Some(counts) => counts,
            None => {
                let now = self.clock.now();
                self.simulate_counts(location_id, &now)
            }
        };

        self.smooth(location_id, raw)
    }

    /// One noisy, unsmoothed draw from the location's profile at `at`
    pub fn simulate_counts(&mut self, location_id: &str, at: &DateTime<Utc>) -> VehicleCounts {
        let expected = expected_counts(&self.profile(location_id), at);
        let [trucks, cars, buses, motorcycles] = expected.map(|mean| self.noisy_count(mean));
        VehicleCounts::new(trucks, cars, buses, motorcycles)
    }

    fn noisy_count(&mut self, mean: f64) -> u32 {
        let sigma = (self.config.noise_fraction * mean).max(self.config.min_noise) * self.config.jitter_scale;
        self.rng.gaussian(mean, sigma).max(0.0).round() as u32
    }

    /// Blend `raw` with the previous output and remember the result
    pub fn smooth(&mut self, location_id: &str, raw: VehicleCounts) -> VehicleCounts {
        let alpha = self.config.smoothing_alpha;
        let smoothed = match self.previous.get(location_id) {
            Some(prev) => {
                let blend = |new: u32, old: u32| (alpha * new as f64 + (1.0 - alpha) * old as f64).round() as u32;
                VehicleCounts::new(
                    blend(raw.trucks, prev.trucks),
                    blend(raw.cars, prev.cars),
                    blend(raw.buses, prev.buses),
                    blend(raw.motorcycles, prev.motorcycles),
                )
            }
            None => raw,
        };
        self.previous.insert(location_id.to_string(), smoothed);
        smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use crate::time::FixedClock;

    struct StaticDetector(VehicleCounts);

    impl VehicleDetector for StaticDetector {
        fn detect(&mut self, _: &str, _: &[u8]) -> crate::EngineResult<VehicleCounts> {
            Ok(self.0)
        }
    }

    struct BrokenDetector;

    impl VehicleDetector for BrokenDetector {
        fn detect(&mut self, _: &str, _: &[u8]) -> crate::EngineResult<VehicleCounts> {
            Err(EngineError::UpstreamUnavailable("camera offline".into()))
        }
    }

    fn generator_at(hour: u32) -> TrafficGenerator {
        // 2024-03-06 is a Wednesday
        TrafficGenerator::default()
            .with_seed(9)
            .with_clock(Arc::new(FixedClock::at(2024, 3, 6, hour, 0)))
    }

    #[test]
    fn rush_hour_busier_than_night() {
        let profile = LocationProfile::arterial();
        let rush = expected_counts(&profile, &FixedClock::at(2024, 3, 6, 8, 30).now());
        let night = expected_counts(&profile, &FixedClock::at(2024, 3, 6, 3, 0).now());
        assert!(rush[1] > night[1] * 5.0);
    }

    #[test]
    fn weekend_factor_applies() {
        let profile = LocationProfile::financial_district();
        let weekday = expected_counts(&profile, &FixedClock::at(2024, 3, 6, 12, 0).now());
        let saturday = expected_counts(&profile, &FixedClock::at(2024, 3, 9, 12, 0).now());
        assert!((saturday[1] - weekday[1] * 0.5).abs() < 1e-9);
    }

    #[test]
    fn rush_windows() {
        assert!(is_rush_hour(7.0));
        assert!(is_rush_hour(9.5));
        assert!(is_rush_hour(18.0));
        assert!(!is_rush_hour(12.0));
        assert!(!is_rush_hour(19.5));
    }

    #[test]
    fn first_observation_passes_through() {
        let mut gen = generator_at(12);
        let raw = VehicleCounts::new(4, 40, 6, 10);
        assert_eq!(gen.smooth("cam-001", raw), raw);
    }

    #[test]
    fn smoothing_blends_with_previous() {
        let mut gen = generator_at(12);
        gen.smooth("cam-001", VehicleCounts::new(10, 10, 10, 10));
        let out = gen.smooth("cam-001", VehicleCounts::new(0, 20, 10, 15));
        // 0.6·new + 0.4·old
        assert_eq!(out, VehicleCounts::new(4, 16, 10, 13));
        assert_eq!(gen.previous("cam-001"), Some(out));
    }

    #[test]
    fn locations_smoothed_independently() {
        let mut gen = generator_at(12);
        gen.smooth("a", VehicleCounts::new(10, 10, 10, 10));
        let b = gen.smooth("b", VehicleCounts::new(0, 0, 0, 0));
        assert_eq!(b.total(), 0);
    }

    #[test]
    fn detector_counts_used() {
        let counts = VehicleCounts::new(1, 2, 3, 4);
        let mut gen = generator_at(12).with_detector(Box::new(StaticDetector(counts)));
        assert_eq!(gen.detect_vehicles("cam-001", Some(b"frame")), counts);
    }

    #[test]
    fn detector_without_frame_simulates() {
        let counts = VehicleCounts::new(1, 2, 3, 4);
        let mut gen = generator_at(17).with_detector(Box::new(StaticDetector(counts)));
        let out = gen.detect_vehicles("cam-003", None);
        assert!(out.cars > 20, "simulated evening rush, got {out:?}");
    }

    #[test]
    fn broken_detector_falls_back() {
        let mut gen = generator_at(17).with_detector(Box::new(BrokenDetector));
        let out = gen.detect_vehicles("cam-003", Some(b"frame"));
        assert!(out.total() > 0);
    }

    #[test]
    fn unknown_location_uses_default_profile() {
        let gen = generator_at(12);
        assert_eq!(gen.profile("cam-999"), LocationProfile::default());
    }

    #[test]
    fn jitter_free_simulation_matches_expectation() {
        let mut gen = TrafficGenerator::new(TrafficConfig::default().with_jitter_scale(0.0)).with_seed(1);
        let at = FixedClock::at(2024, 3, 6, 12, 0).now();
        let expected = expected_counts(&gen.profile("cam-002"), &at);
        let counts = gen.simulate_counts("cam-002", &at);
        assert_eq!(counts.cars, expected[1].round() as u32);
        assert_eq!(counts.trucks, expected[0].round() as u32);
    }
}
