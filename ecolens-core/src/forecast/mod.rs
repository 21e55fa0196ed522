//! PM2.5 Time-Series Forecaster
//!
//! ## Per-location State
//!
//! ```text
//! observation ──► recent buffer (720 raw samples)
//!             ──► Holt level/trend   (O(1) update)
//!             ──► hour accumulator ──(hour rolls over)──► hourly buffer (72 means)
//! ```
//!
//! ## Regimes
//!
//! The regime is chosen once per call from the hourly history length:
//!
//! - **Seasonal** (≥ 48 hourly means): additive Holt-Winters over the hourly
//!   history, see [`holt_winters`]. Step offsets between whole hours are
//!   linearly interpolated; σ is the one-step residual RMSE.
//! - **Fallback**: the incremental level/trend projected linearly (12
//!   observations per minute of horizon) and multiplied by a diurnal curve;
//!   σ is the standard deviation of the newest 60 raw samples.
//!
//! A seasonal fit that still fails is logged and answered by the fallback.
//!
//! ## Confidence Interval
//!
//! ```text
//! margin = 1.96 · σ · sqrt(max(1, minutes / 30))
//! lower  = max(0, predicted − margin)
//! upper  = predicted + margin
//! ```

pub mod holt_winters;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::buffer::CircularBuffer;
use crate::constants::forecast::{
    DEFAULT_LEVEL, DEFAULT_RESIDUAL_STD, EVENING_PEAK, JITTER_FRACTION, MAX_HORIZON_HOURS, MAX_HOURLY_HISTORY,
    MAX_RECENT_SAMPLES, MIN_PREDICTION, MIN_RESIDUAL_SAMPLES, MIN_RESIDUAL_STD, MORNING_PEAK, OBSERVATIONS_PER_MINUTE,
    OVERNIGHT_REDUCTION, REFERENCE_INTERVAL_MIN, RESIDUAL_WINDOW, SEASON_LENGTH, Z_95,
};
use crate::macros::{log_debug, log_warn};
use crate::models::ForecastPoint;
use crate::rng::SimRng;
use crate::time::{fractional_hour, Clock, SystemClock};

use holt_winters::{SeasonalFit, SmoothingParams};

/// Multiplier for expected traffic-driven pollution at a fractional hour
///
/// ```text
/// 1 + 0.15·exp(−½((h − 8.5)/1.5)²) + 0.20·exp(−½((h − 17.5)/1.8)²) − 0.10·[h < 6 ∨ h > 22]
/// ```
pub fn diurnal_factor(hour: f64) -> f64 {
    let bump = |(centre, width, amplitude): (f64, f64, f64)| {
        amplitude * (-0.5 * ((hour - centre) / width).powi(2)).exp()
    };
    let overnight = if !(6.0..=22.0).contains(&hour) { OVERNIGHT_REDUCTION } else { 0.0 };
    1.0 + bump(MORNING_PEAK) + bump(EVENING_PEAK) - overnight
}

/// 95 % margin for a step `minutes` ahead with scale `sigma`
pub fn confidence_margin(sigma: f64, minutes: f64) -> f64 {
    Z_95 * sigma * (minutes / REFERENCE_INTERVAL_MIN).max(1.0).sqrt()
}

/// Forecaster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Holt/Holt-Winters smoothing factors
    pub smoothing: SmoothingParams,
    /// Level assumed for locations with no observations (µg/m³)
    pub default_level: f64,
    /// Raw observations per minute of horizon for the linear projection
    pub observations_per_minute: f64,
    /// Scales point-estimate jitter; 0 disables it
    pub jitter_scale: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingParams::default(),
            default_level: DEFAULT_LEVEL,
            observations_per_minute: OBSERVATIONS_PER_MINUTE,
            jitter_scale: 1.0,
        }
    }
}

impl ForecastConfig {
    /// Set smoothing factors
    pub fn with_smoothing(mut self, alpha: f64, beta: f64, gamma: f64) -> Self {
        self.smoothing = SmoothingParams { alpha, beta, gamma }.clamped();
        self
    }

    /// Set perturbation scale
    pub fn with_jitter_scale(mut self, scale: f64) -> Self {
        self.jitter_scale = scale.max(0.0);
        self
    }
}

/// History sizes for one location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLen {
    /// Raw samples held
    pub recent: usize,
    /// Hourly means held
    pub hourly: usize,
}

#[derive(Debug, Clone)]
struct LocationState {
    recent: CircularBuffer<f64, MAX_RECENT_SAMPLES>,
    hourly: CircularBuffer<f64, MAX_HOURLY_HISTORY>,
    level: f64,
    trend: f64,
    /// Hours since epoch of the bucket being accumulated
    bucket_hour: Option<i64>,
    bucket_sum: f64,
    bucket_count: usize,
}

impl LocationState {
    fn starting_at(level: f64) -> Self {
        Self {
            recent: CircularBuffer::new(),
            hourly: CircularBuffer::new(),
            level,
            trend: 0.0,
            bucket_hour: None,
            bucket_sum: 0.0,
            bucket_count: 0,
        }
    }

    fn smooth(&mut self, value: f64, params: &SmoothingParams) {
        let previous = self.level;
        self.level = params.alpha * value + (1.0 - params.alpha) * (self.level + self.trend);
        self.trend = params.beta * (self.level - previous) + (1.0 - params.beta) * self.trend;
    }

    fn accumulate(&mut self, value: f64, hour_key: i64) {
        match self.bucket_hour {
            Some(current) if current != hour_key => {
                if self.bucket_count > 0 {
                    self.hourly.push(self.bucket_sum / self.bucket_count as f64);
                }
                self.bucket_sum = 0.0;
                self.bucket_count = 0;
            }
            _ => {}
        }
        self.bucket_hour = Some(hour_key);
        self.bucket_sum += value;
        self.bucket_count += 1;
    }

    /// Population std of the newest samples
    fn residual_std(&self) -> f64 {
        if self.recent.len() < MIN_RESIDUAL_SAMPLES {
            return DEFAULT_RESIDUAL_STD;
        }
        let window: Vec<f64> = self.recent.tail(RESIDUAL_WINDOW).copied().collect();
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt().max(MIN_RESIDUAL_STD)
    }
}

/// Per-location PM2.5 forecaster
pub struct Forecaster {
    config: ForecastConfig,
    clock: Arc<dyn Clock>,
    rng: SimRng,
    locations: HashMap<String, LocationState>,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl Forecaster {
    /// Forecaster with system clock and entropy seed
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
            rng: SimRng::from_entropy(),
            locations: HashMap::new(),
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
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Ingest one high-frequency reading. Non-finite values are dropped.
    pub fn record_observation(&mut self, location_id: &str, pm25: f64) {
        if !pm25.is_finite() {
            log_warn!("Dropping non-finite observation for {}", location_id);
            return;
        }
        let hour_key = self.clock.now().timestamp().div_euclid(3600);
        let params = self.config.smoothing;

        let state = self
            .locations
            .entry(location_id.to_string())
            .or_insert_with(|| LocationState::starting_at(pm25));
        state.recent.push(pm25);
        state.smooth(pm25, &params);
        state.accumulate(pm25, hour_key);
    }

    /// Append one completed hourly mean, e.g. when replaying stored history
    pub fn add_hourly_reading(&mut self, location_id: &str, pm25: f64) {
        if !pm25.is_finite() {
            log_warn!("Dropping non-finite hourly reading for {}", location_id);
            return;
        }
        self.locations
            .entry(location_id.to_string())
            .or_insert_with(|| LocationState::starting_at(pm25))
            .hourly
            .push(pm25);
    }

    /// Buffer sizes for a location (zeros if unseen)
    pub fn history_len(&self, location_id: &str) -> HistoryLen {
        self.locations
            .get(location_id)
            .map(|s| HistoryLen { recent: s.recent.len(), hourly: s.hourly.len() })
            .unwrap_or_default()
    }

    /// Buffer sizes for every tracked location
    pub fn history_lens(&self) -> HashMap<String, HistoryLen> {
        self.locations
            .keys()
            .map(|id| (id.clone(), self.history_len(id)))
            .collect()
    }

    /// Whether the seasonal regime would be used
    pub fn has_seasonal_history(&self, location_id: &str) -> bool {
        self.history_len(location_id).hourly >= 2 * SEASON_LENGTH
    }

    /// Forecast `horizon_hours` ahead in steps of `step_minutes`.
    ///
    /// Unknown locations are projected from the default level. A non-positive
    /// horizon or a zero step yields no points; horizons past 72 h are
    /// truncated.
    pub fn generate_forecast(&mut self, location_id: &str, horizon_hours: f64, step_minutes: u32) -> Vec<ForecastPoint> {
        if step_minutes == 0 || !horizon_hours.is_finite() || horizon_hours <= 0.0 {
            return Vec::new();
        }
        let now = self.clock.now();
        let horizon_minutes = horizon_hours.min(MAX_HORIZON_HOURS) * 60.0;
        let steps = (horizon_minutes / step_minutes as f64).floor() as u32;

        let seasonal = self.seasonal_fit(location_id);
        let (level, trend, residual_std) = match self.locations.get(location_id) {
            Some(s) => (s.level, s.trend, s.residual_std()),
            None => (self.config.default_level, 0.0, DEFAULT_RESIDUAL_STD),
        };

        (1..=steps)
            .map(|i| {
                let minutes = i.saturating_mul(step_minutes);
                let (base, sigma) = match &seasonal {
                    Some(fit) => (fit.at(minutes as f64 / 60.0), fit.residual_rmse.max(MIN_RESIDUAL_STD)),
                    None => {
                        let projected = level + trend * minutes as f64 * self.config.observations_per_minute;
                        let target_hour = (fractional_hour(&now) + minutes as f64 / 60.0).rem_euclid(24.0);
                        (projected * diurnal_factor(target_hour), residual_std)
                    }
                };
                self.point(now, minutes, base, sigma)
            })
            .collect()
    }

    fn seasonal_fit(&self, location_id: &str) -> Option<SeasonalFit> {
        let state = self.locations.get(location_id)?;
        if state.hourly.len() < 2 * SEASON_LENGTH {
            return None;
        }
        match holt_winters::fit(&state.hourly.to_vec(), SEASON_LENGTH, self.config.smoothing) {
            Ok(fit) => Some(fit),
            Err(err) => {
                log_warn!("Seasonal forecast failed for {}: {}; using trend projection", location_id, err);
                None
            }
        }
    }

    fn point(&mut self, now: DateTime<Utc>, minutes: u32, base: f64, sigma: f64) -> ForecastPoint {
        let jitter = self.rng.gaussian(0.0, sigma * JITTER_FRACTION * self.config.jitter_scale);
        let mut predicted = (base + jitter).max(MIN_PREDICTION);
        if !predicted.is_finite() {
            log_debug!("Non-finite forecast at +{} min, clamping", minutes);
            predicted = MIN_PREDICTION;
        }
        let margin = confidence_margin(sigma, minutes as f64);

        ForecastPoint {
            timestamp: now + Duration::minutes(minutes as i64),
            horizon_minutes: minutes,
            predicted_pm25: predicted,
            lower_bound: (predicted - margin).max(0.0),
            upper_bound: predicted + margin,
        }
    }
}
