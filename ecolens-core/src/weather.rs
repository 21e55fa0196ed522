//! Weather acquisition with caching and simulated fallback
//!
//! [`WeatherService`] resolves the single [`WeatherState`] shared by every
//! location in a cycle:
//!
//! 1. A cached value younger than the TTL is returned as is.
//! 2. Otherwise the primary [`WeatherProvider`] is asked, if one is attached.
//! 3. If it is absent or fails, [`SimulatedWeather`] supplies the value.
//!
//! The result is always sanitized and cached; [`WeatherService::fetch`]
//! never fails.
//!
//! ## Simulation
//!
//! ```text
//! T    = T_lo + (T_hi − T_lo) · clamp((sin(π(h − 5)/12) + 1)/2, 0, 1) + N(0, 1)
//! RH   = clamp(60 − 0.8·(T − 15) + N(0, 5), 25, 95)
//! u_t  = clamp(u_{t−1} + N(0, 0.3), 0.5, 15);  u = max(0.5, u_t + 0.5·sin(π(h − 6)/12))
//! θ_t  = (θ_{t−1} + N(0, 5)) mod 360
//! ```

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EngineResult;
use crate::macros::{log_debug, log_warn};
use crate::models::WeatherState;
use crate::rng::SimRng;
use crate::time::{fractional_hour, Clock, SystemClock};
use crate::traits::WeatherProvider;

/// Monthly (min, max) air temperature normals in °C, January first.
///
/// Source: India Meteorological Department climate normals, New Delhi
pub const MONTHLY_TEMPERATURE_RANGES: [(f64, f64); 12] = [
    (4.0, 20.0),
    (7.0, 23.0),
    (12.0, 30.0),
    (18.0, 37.0),
    (23.0, 41.0),
    (26.0, 40.0),
    (26.0, 36.0),
    (25.0, 34.0),
    (23.0, 35.0),
    (16.0, 33.0),
    (10.0, 28.0),
    (5.0, 22.0),
];

/// Weather service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Cache lifetime (s)
    pub cache_ttl_secs: i64,
    /// Starting wind speed of the random walk (m/s)
    pub initial_wind_speed: f64,
    /// Starting wind direction of the random walk (°)
    pub initial_wind_direction: f64,
    /// Scales all random perturbation; 0 disables it
    pub jitter_scale: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            initial_wind_speed: 3.5,
            initial_wind_direction: 220.0,
            jitter_scale: 1.0,
        }
    }
}

/// Smooth random-walk weather generator
pub struct SimulatedWeather {
    clock: Arc<dyn Clock>,
    rng: SimRng,
    wind_speed: f64,
    wind_direction: f64,
    jitter_scale: f64,
}

impl SimulatedWeather {
    /// Simulator starting from the configured wind state
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            rng: SimRng::from_entropy(),
            wind_speed: config.initial_wind_speed,
            wind_direction: config.initial_wind_direction,
            jitter_scale: config.jitter_scale,
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

    /// Advance the random walk and produce conditions for `at`
    pub fn sample(&mut self, at: &DateTime<Utc>) -> WeatherState {
        let hour = fractional_hour(at);
        let (lo, hi) = MONTHLY_TEMPERATURE_RANGES[at.month0() as usize];
        let k = self.jitter_scale;

        let phase = ((std::f64::consts::PI * (hour - 5.0) / 12.0).sin() + 1.0) / 2.0;
        let temperature = lo + (hi - lo) * phase.clamp(0.0, 1.0) + self.rng.gaussian(0.0, 1.0 * k);

        let humidity = (60.0 - (temperature - 15.0) * 0.8 + self.rng.gaussian(0.0, 5.0 * k)).clamp(25.0, 95.0);

        self.wind_speed = (self.wind_speed + self.rng.gaussian(0.0, 0.3 * k)).clamp(0.5, 15.0);
        let diurnal = 0.5 * (std::f64::consts::PI * (hour - 6.0) / 12.0).sin();
        let wind_speed = (self.wind_speed + diurnal).max(0.5);

        self.wind_direction = (self.wind_direction + self.rng.gaussian(0.0, 5.0 * k)).rem_euclid(360.0);

        WeatherState::new(wind_speed, self.wind_direction, temperature, humidity)
    }
}

impl WeatherProvider for SimulatedWeather {
    fn current(&mut self) -> EngineResult<WeatherState> {
        let now = self.clock.now();
        Ok(self.sample(&now))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Cached weather with primary-provider and simulation fallback
pub struct WeatherService {
    primary: Option<Box<dyn WeatherProvider>>,
    simulated: SimulatedWeather,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    cache: Option<(WeatherState, DateTime<Utc>)>,
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new(WeatherConfig::default())
    }
}

impl WeatherService {
    /// Service with simulation only
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            primary: None,
            simulated: SimulatedWeather::new(&config),
            clock: Arc::new(SystemClock),
            ttl: Duration::seconds(config.cache_ttl_secs.max(0)),
            cache: None,
        }
    }

    /// Attach a live provider
    pub fn with_primary(mut self, provider: Box<dyn WeatherProvider>) -> Self {
        self.primary = Some(provider);
        self
    }

    /// Use a custom clock for both cache expiry and simulation
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.simulated = self.simulated.with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    /// Seed the simulation
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulated = self.simulated.with_seed(seed);
        self
    }

    /// Whether the cached value is still fresh
    pub fn is_cache_valid(&self) -> bool {
        match &self.cache {
            Some((_, stored_at)) => self.clock.now() - *stored_at < self.ttl,
            None => false,
        }
    }

    /// Force the next fetch to bypass the cache
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
    }

    /// Current weather; never fails
    pub fn fetch(&mut self) -> WeatherState {
        if self.is_cache_valid() {
            if let Some((weather, _)) = self.cache {
                log_debug!("weather cache hit");
                return weather;
            }
        }

        let from_primary = match self.primary.as_mut() {
            Some(provider) => match provider.current() {
                Ok(weather) => Some(weather.sanitized()),
                Err(err) => {
                    log_warn!("{} weather provider failed, using simulation: {err}", provider.name());
                    None
                }
            },
            None => None,
        };

        let weather = match from_primary {
            Some(weather) => weather,
            None => {
                let now = self.clock.now();
                self.simulated.sample(&now)
            }
        };

        self.cache = Some((weather, self.clock.now()));
        weather
    }
}
