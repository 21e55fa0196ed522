//! Forecasting constants

/// Level smoothing factor.
pub const ALPHA: f64 = 0.3;

/// Trend smoothing factor.
pub const BETA: f64 = 0.1;

/// Seasonal smoothing factor.
pub const GAMMA: f64 = 0.2;

/// Seasonal cycle length (hours).
pub const SEASON_LENGTH: usize = 24;

/// Recent high-frequency samples kept per location (one hour at 5 s).
pub const MAX_RECENT_SAMPLES: usize = 720;

/// Hourly means kept per location (three days).
pub const MAX_HOURLY_HISTORY: usize = 72;

/// Recent samples used for the residual standard deviation.
pub const RESIDUAL_WINDOW: usize = 60;

/// Minimum recent samples before the residual std is estimated.
pub const MIN_RESIDUAL_SAMPLES: usize = 10;

/// Residual std used with too little history (µg/m³).
pub const DEFAULT_RESIDUAL_STD: f64 = 3.0;

/// Floor on the estimated residual std (µg/m³).
pub const MIN_RESIDUAL_STD: f64 = 1.0;

/// Observations per minute of horizon assumed by the linear projection.
pub const OBSERVATIONS_PER_MINUTE: f64 = 12.0;

/// Starting level for a location with no observations (µg/m³).
pub const DEFAULT_LEVEL: f64 = 15.0;

/// Two-sided 95 % z-score.
pub const Z_95: f64 = 1.96;

/// Horizon unit for confidence widening (min).
pub const REFERENCE_INTERVAL_MIN: f64 = 30.0;

/// Point-estimate jitter as a fraction of the residual scale.
pub const JITTER_FRACTION: f64 = 0.05;

/// Lowest predicted value (µg/m³).
pub const MIN_PREDICTION: f64 = 1.0;

/// Default forecast horizon (h).
pub const DEFAULT_HORIZON_HOURS: f64 = 6.0;

/// Longest forecast horizon served (h); longer requests are truncated.
///
/// Matches the span of the hourly history.
pub const MAX_HORIZON_HOURS: f64 = MAX_HOURLY_HISTORY as f64;

/// Default forecast step (min).
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Diurnal bumps: (centre hour, width h, amplitude).
pub const MORNING_PEAK: (f64, f64, f64) = (8.5, 1.5, 0.15);

/// Evening rush bump: (centre hour, width h, amplitude).
pub const EVENING_PEAK: (f64, f64, f64) = (17.5, 1.8, 0.20);

/// Overnight reduction applied before 06:00 and after 22:00.
pub const OVERNIGHT_REDUCTION: f64 = 0.10;
