//! Statistical traffic profiles per monitored location
//!
//! A profile gives the mean per-class count seen in one frame at peak-free
//! daytime, plus how strongly the location reacts to rush hours and weekends.

use serde::{Deserialize, Serialize};

/// Baseline traffic character of a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationProfile {
    /// Mean cars per frame
    pub car_base: f64,
    /// Mean trucks per frame
    pub truck_base: f64,
    /// Mean buses per frame
    pub bus_base: f64,
    /// Mean motorcycles per frame
    pub motorcycle_base: f64,
    /// Multiplier inside rush-hour windows
    pub rush_multiplier: f64,
    /// Multiplier on Saturdays and Sundays
    pub weekend_factor: f64,
}

impl Default for LocationProfile {
    fn default() -> Self {
        Self::new(30.0, 5.0, 4.0, 3.0, 1.5, 0.7)
    }
}

impl LocationProfile {
    /// Create a profile
    pub const fn new(
        car_base: f64,
        truck_base: f64,
        bus_base: f64,
        motorcycle_base: f64,
        rush_multiplier: f64,
        weekend_factor: f64,
    ) -> Self {
        Self { car_base, truck_base, bus_base, motorcycle_base, rush_multiplier, weekend_factor }
    }

    /// Busy commercial junction with heavy weekend leisure traffic
    pub const fn entertainment_district() -> Self {
        Self::new(40.0, 5.0, 8.0, 15.0, 1.5, 1.3)
    }

    /// Bridge approach dominated by commuters
    pub const fn bridge_approach() -> Self {
        Self::new(45.0, 6.0, 7.0, 12.0, 1.8, 0.9)
    }

    /// Arterial road with strong commuter peaks
    pub const fn arterial() -> Self {
        Self::new(50.0, 10.0, 10.0, 18.0, 2.2, 0.6)
    }

    /// Financial district: deliveries on weekdays, empty at weekends
    pub const fn financial_district() -> Self {
        Self::new(35.0, 15.0, 12.0, 10.0, 1.9, 0.5)
    }

    /// Residential neighbourhood street
    pub const fn residential() -> Self {
        Self::new(30.0, 4.0, 5.0, 8.0, 1.6, 0.7)
    }

    /// Boulevard with many two-wheelers
    pub const fn boulevard() -> Self {
        Self::new(20.0, 8.0, 6.0, 25.0, 1.4, 1.1)
    }

    /// Base means in class order (trucks, cars, buses, motorcycles)
    pub fn bases(&self) -> [f64; 4] {
        [self.truck_base, self.car_base, self.bus_base, self.motorcycle_base]
    }
}

/// Profiles for the six reference camera locations
pub fn builtin_profiles() -> Vec<(&'static str, LocationProfile)> {
    vec![
        ("cam-001", LocationProfile::entertainment_district()),
        ("cam-002", LocationProfile::bridge_approach()),
        ("cam-003", LocationProfile::arterial()),
        ("cam-004", LocationProfile::financial_district()),
        ("cam-005", LocationProfile::residential()),
        ("cam-006", LocationProfile::boulevard()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_distinct() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 6);
        for (i, (_, a)) in profiles.iter().enumerate() {
            for (_, b) in profiles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn bases_in_class_order() {
        let p = LocationProfile::financial_district();
        assert_eq!(p.bases(), [15.0, 35.0, 12.0, 10.0]);
    }
}
