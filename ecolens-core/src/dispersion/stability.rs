//! Pasquill-Gifford stability classes
//!
//! Stability is inferred from wind speed and an insolation proxy (daytime
//! hours). Lateral and vertical plume spread follow power laws in downwind
//! distance:
//!
//! ```text
//! σ = c · x_km^e · 1000      [m]
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::dispersion::{DAYTIME_END_HOUR, DAYTIME_START_HOUR, MIN_SIGMA_M};

/// Atmospheric stability, A (very unstable) through F (stable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StabilityClass {
    /// Very unstable: strong sun, light wind
    A,
    /// Unstable
    B,
    /// Slightly unstable
    C,
    /// Neutral
    D,
    /// Slightly stable
    E,
    /// Stable: clear night, light wind
    F,
}

/// Power-law spread coefficients `(c_y, e_y, c_z, e_z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadCoefficients {
    /// Lateral coefficient
    pub sy_c: f64,
    /// Lateral exponent
    pub sy_e: f64,
    /// Vertical coefficient
    pub sz_c: f64,
    /// Vertical exponent
    pub sz_e: f64,
}

impl StabilityClass {
    /// Classify from wind speed (m/s) and hour of day (0–23)
    ///
    /// | wind (m/s) | day | night |
    /// |-----------|-----|-------|
    /// | < 2       | A   | F     |
    /// | 2–3       | B   | F     |
    /// | 3–5       | C   | E     |
    /// | ≥ 5       | D   | D     |
    pub fn classify(wind_speed: f64, hour: u32) -> Self {
        let daytime = (DAYTIME_START_HOUR..=DAYTIME_END_HOUR).contains(&hour);
        if daytime {
            if wind_speed < 2.0 {
                Self::A
            } else if wind_speed < 3.0 {
                Self::B
            } else if wind_speed < 5.0 {
                Self::C
            } else {
                Self::D
            }
        } else if wind_speed < 3.0 {
            Self::F
        } else if wind_speed < 5.0 {
            Self::E
        } else {
            Self::D
        }
    }

    /// Briggs-style rural spread coefficients
    pub fn coefficients(&self) -> SpreadCoefficients {
        let (sy_c, sy_e, sz_c, sz_e) = match self {
            Self::A => (0.22, 0.94, 0.20, 0.94),
            Self::B => (0.16, 0.92, 0.12, 0.92),
            Self::C => (0.11, 0.91, 0.08, 0.85),
            Self::D => (0.08, 0.89, 0.06, 0.82),
            Self::E => (0.06, 0.86, 0.03, 0.78),
            Self::F => (0.04, 0.83, 0.016, 0.72),
        };
        SpreadCoefficients { sy_c, sy_e, sz_c, sz_e }
    }

    /// `(σ_y, σ_z)` in metres at a downwind distance in metres, each ≥ 1 m
    pub fn sigmas(&self, downwind_m: f64) -> (f64, f64) {
        let k = self.coefficients();
        let x_km = downwind_m.max(0.0) / 1000.0;
        let sigma_y = (k.sy_c * x_km.powf(k.sy_e) * 1000.0).max(MIN_SIGMA_M);
        let sigma_z = (k.sz_c * x_km.powf(k.sz_e) * 1000.0).max(MIN_SIGMA_M);
        (sigma_y, sigma_z)
    }
}

impl std::fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}
