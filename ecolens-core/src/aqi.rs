//! EPA PM2.5 Air Quality Index
//!
//! Piecewise-linear interpolation over the 2012 PM2.5 breakpoint table:
//!
//! ```text
//! AQI = (I_hi − I_lo) / (C_hi − C_lo) · (C − C_lo) + I_lo
//! ```
//!
//! The first segment whose upper concentration bound is ≥ C is used, so
//! concentrations in the 0.1 µg/m³ gaps between published segments fall into
//! the next segment up. Concentrations beyond the table saturate at 500.

use serde::{Deserialize, Serialize};

/// One row of the breakpoint table: concentration range → index range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Lower concentration bound (µg/m³)
    pub c_lo: f64,
    /// Upper concentration bound (µg/m³)
    pub c_hi: f64,
    /// Lower index bound
    pub i_lo: f64,
    /// Upper index bound
    pub i_hi: f64,
}

/// EPA PM2.5 breakpoints (24-hour, 2012 revision)
pub const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint { c_lo: 0.0, c_hi: 12.0, i_lo: 0.0, i_hi: 50.0 },
    Breakpoint { c_lo: 12.1, c_hi: 35.4, i_lo: 51.0, i_hi: 100.0 },
    Breakpoint { c_lo: 35.5, c_hi: 55.4, i_lo: 101.0, i_hi: 150.0 },
    Breakpoint { c_lo: 55.5, c_hi: 150.4, i_lo: 151.0, i_hi: 200.0 },
    Breakpoint { c_lo: 150.5, c_hi: 250.4, i_lo: 201.0, i_hi: 300.0 },
    Breakpoint { c_lo: 250.5, c_hi: 500.4, i_lo: 301.0, i_hi: 500.0 },
];

/// Highest reportable index
pub const AQI_MAX: u16 = 500;

/// Continuous index for a PM2.5 concentration, before rounding.
pub fn pm25_to_aqi_f64(pm25: f64) -> f64 {
    let c = pm25.max(0.0);
    for bp in &PM25_BREAKPOINTS {
        if c <= bp.c_hi {
            let aqi = (bp.i_hi - bp.i_lo) / (bp.c_hi - bp.c_lo) * (c - bp.c_lo) + bp.i_lo;
            return aqi.clamp(0.0, AQI_MAX as f64);
        }
    }
    AQI_MAX as f64
}

/// Integer AQI for a PM2.5 concentration, in `[0, 500]`.
pub fn pm25_to_aqi(pm25: f64) -> u16 {
    if pm25.is_nan() {
        return 0;
    }
    pm25_to_aqi_f64(pm25).round() as u16
}

/// EPA health-communication band for an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    /// 0–50
    #[serde(rename = "Good")]
    Good,
    /// 51–100
    #[serde(rename = "Moderate")]
    Moderate,
    /// 101–150
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    /// 151–200
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    /// 201–300
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    /// 301–500
    #[serde(rename = "Hazardous")]
    Hazardous,
}

impl AqiCategory {
    /// Band containing `aqi`
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_boundaries() {
        assert_eq!(pm25_to_aqi(0.0), 0);
        assert_eq!(pm25_to_aqi(12.0), 50);
        assert_eq!(pm25_to_aqi(35.4), 100);
        assert_eq!(pm25_to_aqi(55.4), 150);
        assert_eq!(pm25_to_aqi(150.4), 200);
        assert_eq!(pm25_to_aqi(250.4), 300);
        assert_eq!(pm25_to_aqi(500.4), 500);
    }

    #[test]
    fn segment_starts() {
        assert_eq!(pm25_to_aqi(12.1), 51);
        assert_eq!(pm25_to_aqi(35.5), 101);
        assert_eq!(pm25_to_aqi(250.5), 301);
    }

    #[test]
    fn saturates_above_table() {
        assert_eq!(pm25_to_aqi(800.0), 500);
        assert_eq!(pm25_to_aqi(f64::INFINITY), 500);
    }

    #[test]
    fn negative_and_nan_map_to_zero() {
        assert_eq!(pm25_to_aqi(-3.0), 0);
        assert_eq!(pm25_to_aqi(f64::NAN), 0);
    }

    #[test]
    fn gap_values_use_next_segment() {
        // 12.05 sits between the first two published segments
        let aqi = pm25_to_aqi(12.05);
        assert!(aqi == 50 || aqi == 51);
    }

    #[test]
    fn categories_follow_bands() {
        assert_eq!(AqiCategory::from_aqi(50), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(150), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(AqiCategory::from_aqi(200), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_aqi(300), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_aqi(301), AqiCategory::Hazardous);
        assert!(AqiCategory::Good < AqiCategory::Hazardous);
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&AqiCategory::UnhealthyForSensitiveGroups).unwrap();
        assert_eq!(json, "\"Unhealthy for Sensitive Groups\"");
    }
}
