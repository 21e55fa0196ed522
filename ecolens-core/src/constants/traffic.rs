//! Traffic simulation constants

/// Weight of the new observation in count smoothing.
pub const SMOOTHING_ALPHA: f64 = 0.6;

/// Relative count noise (fraction of the raw count).
pub const COUNT_NOISE_FRACTION: f64 = 0.15;

/// Minimum count noise standard deviation (vehicles).
pub const MIN_COUNT_NOISE: f64 = 1.0;

/// Base activity independent of time of day.
pub const BASE_ACTIVITY: f64 = 0.15;

/// Time-of-day activity bumps: (centre hour, width h, amplitude).
pub const ACTIVITY_PEAKS: [(f64, f64, f64); 3] = [
    (8.5, 1.5, 0.8),   // morning rush
    (17.5, 1.8, 1.0),  // evening rush
    (13.0, 3.0, 0.5),  // midday
];

/// Morning rush window (fractional hours, inclusive).
pub const MORNING_RUSH: (f64, f64) = (7.0, 9.5);

/// Evening rush window (fractional hours, inclusive).
pub const EVENING_RUSH: (f64, f64) = (16.5, 19.0);
