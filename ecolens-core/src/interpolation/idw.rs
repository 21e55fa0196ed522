//! Inverse distance weighting
//!
//! ```text
//! wᵢ = 1 / max(dᵢ, d_min)^p        ẑ = Σ wᵢ·zᵢ / Σ wᵢ
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::spatial::{
    IDW_EMPTY_VALUE, IDW_MIN_DISTANCE_KM, IDW_POWER, ROUTE_DEFAULT_PM25, ROUTE_IDW_MIN_DISTANCE_KM, ROUTE_IDW_POWER,
};
use crate::geo::GeoPoint;
use crate::models::PollutionSample;

/// IDW parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdwParams {
    /// Power exponent p
    pub power: f64,
    /// Distance floor (km)
    pub min_distance_km: f64,
    /// Estimate when there are no samples (µg/m³)
    pub empty_value: f64,
}

impl Default for IdwParams {
    /// Grid interpolation parameters
    fn default() -> Self {
        Self {
            power: IDW_POWER,
            min_distance_km: IDW_MIN_DISTANCE_KM,
            empty_value: IDW_EMPTY_VALUE,
        }
    }
}

impl IdwParams {
    /// Parameters used for point queries along routes
    pub fn routing() -> Self {
        Self {
            power: ROUTE_IDW_POWER,
            min_distance_km: ROUTE_IDW_MIN_DISTANCE_KM,
            empty_value: ROUTE_DEFAULT_PM25,
        }
    }

    /// Weighted estimate at `target`
    pub fn estimate(&self, samples: &[PollutionSample], target: &GeoPoint) -> f64 {
        let (num, den) = samples.iter().fold((0.0, 0.0), |(num, den), s| {
            let d = s.position.distance_km(target).max(self.min_distance_km);
            let w = d.powf(-self.power);
            (num + w * s.pm25, den + w)
        });

        if den > 0.0 && den.is_finite() {
            num / den
        } else {
            self.empty_value
        }
    }
}
