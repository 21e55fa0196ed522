//! Gaussian plume with ground reflection and calm-air box model
//!
//! ```text
//!            Q                 y²                (z−H)²          (z+H)²
//! C = ────────────── · exp(− ─────) · [ exp(− ───────) + exp(− ───────) ]
//!      2π · u · σy · σz       2σy²                2σz²            2σz²
//! ```
//!
//! `Q` in g/s, `u` in m/s, σ in m; the result is converted to µg/m³.
//! Below the calm threshold, or at a non-positive downwind distance, the
//! formula is singular and a well-mixed box estimate is used instead:
//!
//! ```text
//! C_box = Q · 10⁶ / (200 · 200 · 100) · 0.5
//! ```

use std::f64::consts::PI;

use super::stability::StabilityClass;
use crate::constants::dispersion::{
    CALM_BOX_RETENTION, CALM_BOX_VOLUME_M3, CALM_WIND_THRESHOLD_M_PER_S, G_TO_UG, MIN_WIND_SPEED_M_PER_S,
};

/// Receptor placement relative to a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receptor {
    /// Distance along the wind (m)
    pub downwind_m: f64,
    /// Distance across the wind (m)
    pub crosswind_m: f64,
    /// Height above ground (m)
    pub height_m: f64,
}

/// Whether conditions call for the box model
pub fn is_calm(wind_speed: f64, downwind_m: f64) -> bool {
    downwind_m <= 0.0 || wind_speed < CALM_WIND_THRESHOLD_M_PER_S
}

/// Well-mixed box concentration (µg/m³)
pub fn box_model(emission_g_s: f64) -> f64 {
    emission_g_s * G_TO_UG / CALM_BOX_VOLUME_M3 * CALM_BOX_RETENTION
}

/// Plume concentration (µg/m³) at `receptor` for a source at `source_height_m`
pub fn concentration(
    emission_g_s: f64,
    wind_speed: f64,
    stability: StabilityClass,
    receptor: &Receptor,
    source_height_m: f64,
) -> f64 {
    if is_calm(wind_speed, receptor.downwind_m) {
        return box_model(emission_g_s);
    }

    let u = wind_speed.max(MIN_WIND_SPEED_M_PER_S);
    let (sigma_y, sigma_z) = stability.sigmas(receptor.downwind_m);

    let lateral = (-0.5 * (receptor.crosswind_m / sigma_y).powi(2)).exp();
    let direct = (-0.5 * ((receptor.height_m - source_height_m) / sigma_z).powi(2)).exp();
    let reflected = (-0.5 * ((receptor.height_m + source_height_m) / sigma_z).powi(2)).exp();

    emission_g_s / (2.0 * PI * u * sigma_y * sigma_z) * lateral * (direct + reflected) * G_TO_UG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kerbside() -> Receptor {
        Receptor { downwind_m: 50.0, crosswind_m: 0.0, height_m: 1.5 }
    }

    #[test]
    fn calm_uses_box_model() {
        let c = concentration(1.0, 0.1, StabilityClass::F, &kerbside(), 0.5);
        assert!((c - 0.125).abs() < 1e-12);
    }

    #[test]
    fn non_positive_downwind_uses_box_model() {
        let receptor = Receptor { downwind_m: 0.0, ..kerbside() };
        assert_eq!(concentration(2.0, 5.0, StabilityClass::D, &receptor, 0.5), box_model(2.0));
        let receptor = Receptor { downwind_m: -10.0, ..kerbside() };
        assert!(concentration(2.0, 5.0, StabilityClass::D, &receptor, 0.5).is_finite());
    }

    #[test]
    fn stronger_wind_dilutes() {
        let slow = concentration(1.0, 2.0, StabilityClass::D, &kerbside(), 0.5);
        let fast = concentration(1.0, 8.0, StabilityClass::D, &kerbside(), 0.5);
        assert!(slow > fast);
        assert!((slow / fast - 4.0).abs() < 1e-9);
    }

    #[test]
    fn crosswind_offset_reduces_concentration() {
        let centre = concentration(1.0, 3.0, StabilityClass::C, &kerbside(), 0.5);
        let off = Receptor { crosswind_m: 20.0, ..kerbside() };
        assert!(concentration(1.0, 3.0, StabilityClass::C, &off, 0.5) < centre);
    }

    #[test]
    fn linear_in_emission() {
        let one = concentration(1.0, 3.0, StabilityClass::B, &kerbside(), 0.5);
        let three = concentration(3.0, 3.0, StabilityClass::B, &kerbside(), 0.5);
        assert!((three - 3.0 * one).abs() < 1e-9 * three);
    }

    #[test]
    fn wind_floor_applies_between_thresholds() {
        // 0.4 m/s is above calm but below the 0.5 m/s floor
        let at_floor = concentration(1.0, 0.5, StabilityClass::D, &kerbside(), 0.5);
        let below = concentration(1.0, 0.4, StabilityClass::D, &kerbside(), 0.5);
        assert_eq!(at_floor, below);
    }
}
