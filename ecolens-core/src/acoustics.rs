//! Noise Propagation Model
//!
//! Equivalent traffic sound level from vehicle counts, after the FHWA Traffic
//! Noise Model.
//!
//! ## Single vehicle
//!
//! ```text
//! L = L_ref + 10·log10(v / v_ref)          speed
//!           − 10·log10(d / d_ref)          line-source spreading
//!           − 5 · d/1000                   atmospheric absorption
//!           − 0.5 · max(0, 3·log10(d / d_ref))   soft ground
//! ```
//!
//! ## Combining sources
//!
//! Decibels are logarithmic; only energy adds:
//!
//! ```text
//! L_fleet = L_single + 10·log10(N)
//! L_total = 10·log10(Σ 10^(L_i / 10))
//! ```
//!
//! The reading energy-adds the traffic level to a 45 dB ambient floor, then
//! applies a small Gaussian perturbation and a 30 dB floor.

use serde::{Deserialize, Serialize};

use crate::constants::acoustics::{
    AMBIENT_NOISE_DB, ATMOSPHERIC_ABSORPTION_DB_PER_KM, BUS_REFERENCE, CAR_REFERENCE, CATEGORY_THRESHOLDS_DB,
    DEFAULT_DISTANCE_M, DEFAULT_SOURCE_DB, DEFAULT_SPEED_KMH, EMPTY_ROAD_DB, GRID_AMBIENT_DB,
    GRID_SPREADING_DB_PER_DECADE, GROUND_FACTOR, MIN_DISTANCE_M, MIN_SPEED_KMH, MOTORCYCLE_REFERENCE,
    NOISE_FLOOR_DB, NOISE_JITTER_DB, REFERENCE_DISTANCE_M, TRUCK_REFERENCE,
};
use crate::geo::{GeoPoint, GridBounds};
use crate::models::{NoiseCategory, NoiseReading, VehicleClass, VehicleCounts};
use crate::rng::SimRng;

impl NoiseCategory {
    /// Band for a level in dB
    pub fn from_db(db: f64) -> Self {
        let [quiet, moderate, loud, very_loud] = CATEGORY_THRESHOLDS_DB;
        if db < quiet {
            Self::Quiet
        } else if db < moderate {
            Self::Moderate
        } else if db < loud {
            Self::Loud
        } else if db < very_loud {
            Self::VeryLoud
        } else {
            Self::Extreme
        }
    }
}

/// Reference level (dB) and reference speed (km/h) for a class
pub fn reference_level(class: VehicleClass) -> (f64, f64) {
    match class {
        VehicleClass::Truck => TRUCK_REFERENCE,
        VehicleClass::Car => CAR_REFERENCE,
        VehicleClass::Bus => BUS_REFERENCE,
        VehicleClass::Motorcycle => MOTORCYCLE_REFERENCE,
    }
}

/// Incoherent energy sum of levels in dB.
///
/// Non-positive levels carry no energy and are skipped; an empty sum is 0 dB.
pub fn energy_sum(levels: &[f64]) -> f64 {
    let energy: f64 = levels
        .iter()
        .filter(|&&l| l > 0.0)
        .map(|&l| 10f64.powf(l / 10.0))
        .sum();
    if energy <= 0.0 {
        0.0
    } else {
        10.0 * energy.log10()
    }
}

/// Level of `count` identical vehicles each at `single_db`
pub fn fleet_level(single_db: f64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    single_db + 10.0 * (count as f64).log10()
}

/// Single pass-by level of one vehicle at `speed_kmh` and `distance_m`
pub fn single_vehicle_level(class: VehicleClass, speed_kmh: f64, distance_m: f64) -> f64 {
    let (l_ref, v_ref) = reference_level(class);
    let v = speed_kmh.max(MIN_SPEED_KMH);
    let d = distance_m.max(MIN_DISTANCE_M);
    let spread = (d / REFERENCE_DISTANCE_M).log10();

    l_ref + 10.0 * (v / v_ref).log10()
        - 10.0 * spread
        - ATMOSPHERIC_ABSORPTION_DB_PER_KM * d / 1000.0
        - GROUND_FACTOR * (3.0 * spread).max(0.0)
}

/// Noise model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Average traffic speed (km/h)
    pub avg_speed_kmh: f64,
    /// Receptor distance from the road (m)
    pub distance_m: f64,
    /// Ambient floor energy-added to traffic (dB)
    pub ambient_db: f64,
    /// Reading perturbation standard deviation (dB)
    pub jitter_db: f64,
    /// Lowest reported level (dB)
    pub floor_db: f64,
    /// Scales all random perturbation; 0 disables it
    pub jitter_scale: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            avg_speed_kmh: DEFAULT_SPEED_KMH,
            distance_m: DEFAULT_DISTANCE_M,
            ambient_db: AMBIENT_NOISE_DB,
            jitter_db: NOISE_JITTER_DB,
            floor_db: NOISE_FLOOR_DB,
            jitter_scale: 1.0,
        }
    }
}

impl NoiseConfig {
    /// Set traffic speed and receptor distance
    pub fn with_geometry(mut self, avg_speed_kmh: f64, distance_m: f64) -> Self {
        self.avg_speed_kmh = avg_speed_kmh.max(MIN_SPEED_KMH);
        self.distance_m = distance_m.max(MIN_DISTANCE_M);
        self
    }

    /// Set perturbation scale
    pub fn with_jitter_scale(mut self, scale: f64) -> Self {
        self.jitter_scale = scale.max(0.0);
        self
    }
}

/// A point noise emitter for the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSource {
    /// Location
    pub position: GeoPoint,
    /// Level at the reference distance (dB)
    #[serde(default = "default_source_db")]
    pub db_level: f64,
}

fn default_source_db() -> f64 {
    DEFAULT_SOURCE_DB
}

impl NoiseSource {
    /// Source with an explicit level
    pub const fn new(position: GeoPoint, db_level: f64) -> Self {
        Self { position, db_level }
    }
}

/// Traffic noise model
pub struct NoiseModel {
    config: NoiseConfig,
    rng: SimRng,
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::new(NoiseConfig::default())
    }
}

impl NoiseModel {
    /// Model with an entropy seed
    pub fn new(config: NoiseConfig) -> Self {
        Self { config, rng: SimRng::from_entropy() }
    }

    /// Use a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SimRng::from_seed_u64(seed);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Per-class fleet levels in class order; 0 for absent classes
    pub fn fleet_levels(&self, vehicles: &VehicleCounts) -> [f64; 4] {
        VehicleClass::ALL.map(|class| {
            let single = single_vehicle_level(class, self.config.avg_speed_kmh, self.config.distance_m);
            fleet_level(single, vehicles.get(class))
        })
    }

    /// Traffic-only level, without ambient or perturbation
    pub fn traffic_level(&self, vehicles: &VehicleCounts) -> f64 {
        if vehicles.total() == 0 {
            return EMPTY_ROAD_DB;
        }
        energy_sum(&self.fleet_levels(vehicles))
    }

    /// Reading for one observation
    pub fn calculate_noise(&mut self, vehicles: &VehicleCounts) -> NoiseReading {
        let combined = energy_sum(&[self.traffic_level(vehicles), self.config.ambient_db]);
        let sigma = self.config.jitter_db * self.config.jitter_scale;
        let db_level = self.rng.gaussian(combined, sigma).max(self.config.floor_db);
        NoiseReading {
            db_level,
            category: NoiseCategory::from_db(db_level),
        }
    }

    /// Sound level grid (dB), row 0 at the northern edge.
    ///
    /// Each source attenuates with `15·log10(d/15)` beyond 15 m plus
    /// atmospheric absorption; per cell, sources and a 35 dB ambient term are
    /// energy-summed.
    pub fn noise_grid(&self, sources: &[NoiseSource], bounds: &GridBounds, resolution: usize) -> Vec<Vec<f64>> {
        let resolution = resolution.max(1);
        (0..resolution)
            .map(|row| {
                (0..resolution)
                    .map(|col| {
                        let cell = bounds.cell_center(row, col, resolution);
                        let mut levels: Vec<f64> = sources
                            .iter()
                            .map(|source| attenuated_level(source, &cell))
                            .collect();
                        levels.push(GRID_AMBIENT_DB);
                        energy_sum(&levels)
                    })
                    .collect()
            })
            .collect()
    }
}

fn attenuated_level(source: &NoiseSource, receiver: &GeoPoint) -> f64 {
    let d = source.position.distance_m(receiver).max(MIN_DISTANCE_M);
    let spreading = if d > REFERENCE_DISTANCE_M {
        GRID_SPREADING_DB_PER_DECADE * (d / REFERENCE_DISTANCE_M).log10()
    } else {
        0.0
    };
    source.db_level - spreading - ATMOSPHERIC_ABSORPTION_DB_PER_KM * d / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_model() -> NoiseModel {
        NoiseModel::new(NoiseConfig::default().with_jitter_scale(0.0))
    }

    #[test]
    fn energy_sum_of_equal_levels() {
        let combined = energy_sum(&[60.0, 60.0]);
        assert!((combined - 63.0103).abs() < 1e-3);
    }

    #[test]
    fn energy_sum_skips_silence() {
        assert_eq!(energy_sum(&[]), 0.0);
        assert!((energy_sum(&[0.0, 50.0]) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn fleets_combine_by_energy() {
        let single = single_vehicle_level(VehicleClass::Car, 50.0, 15.0);
        for n in [1u32, 2, 7, 40] {
            let combined = energy_sum(&[fleet_level(single, 1), fleet_level(single, n)]);
            let expected = single + 10.0 * ((n + 1) as f64).log10();
            assert!((combined - expected).abs() < 1e-9, "n={n}");
        }
    }

    #[test]
    fn reference_conditions_give_reference_level() {
        assert!((single_vehicle_level(VehicleClass::Truck, 50.0, 15.0) - (84.0 - 0.075)).abs() < 1e-9);
    }

    #[test]
    fn distance_and_speed_floors() {
        let at_zero = single_vehicle_level(VehicleClass::Car, 0.0, 0.0);
        assert!(at_zero.is_finite());
        assert_eq!(at_zero, single_vehicle_level(VehicleClass::Car, 5.0, 1.0));
    }

    #[test]
    fn empty_road_is_ambient() {
        let reading = quiet_model().calculate_noise(&VehicleCounts::default());
        assert!((reading.db_level - energy_sum(&[35.0, 45.0])).abs() < 1e-12);
        assert_eq!(reading.category, NoiseCategory::Moderate);
    }

    #[test]
    fn heavy_traffic_is_loud() {
        let reading = quiet_model().calculate_noise(&VehicleCounts::new(15, 50, 12, 25));
        assert!(reading.db_level > 75.0);
        assert_eq!(reading.category, NoiseCategory::Extreme);
    }

    #[test]
    fn extreme_counts_stay_finite() {
        let reading = quiet_model().calculate_noise(&VehicleCounts::new(u32::MAX, 1, 0, 0));
        assert!(reading.db_level.is_finite());
        assert_eq!(reading.category, NoiseCategory::Extreme);
    }

    #[test]
    fn more_vehicles_never_quieter() {
        let model = quiet_model();
        let mut last = 0.0;
        for cars in 0..30 {
            let level = model.traffic_level(&VehicleCounts::new(0, cars, 0, 0));
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn categories() {
        assert_eq!(NoiseCategory::from_db(30.0), NoiseCategory::Quiet);
        assert_eq!(NoiseCategory::from_db(45.0), NoiseCategory::Moderate);
        assert_eq!(NoiseCategory::from_db(64.9), NoiseCategory::Loud);
        assert_eq!(NoiseCategory::from_db(70.0), NoiseCategory::VeryLoud);
        assert_eq!(NoiseCategory::from_db(75.0), NoiseCategory::Extreme);
    }

    #[test]
    fn floor_applies() {
        let config = NoiseConfig { jitter_db: 100.0, ..NoiseConfig::default() };
        let mut model = NoiseModel::new(config).with_seed(3);
        for _ in 0..100 {
            assert!(model.calculate_noise(&VehicleCounts::default()).db_level >= 30.0);
        }
    }

    #[test]
    fn grid_decays_away_from_source() {
        let model = NoiseModel::default();
        let bounds = GridBounds::new(40.76, 40.74, -73.97, -73.99);
        let source = NoiseSource::new(bounds.cell_center(0, 0, 10), 80.0);
        let grid = model.noise_grid(&[source], &bounds, 10);

        assert_eq!(grid.len(), 10);
        assert!(grid[0][0] > grid[0][5]);
        assert!(grid[0][5] > grid[9][9]);
        assert!(grid.iter().flatten().all(|&db| db >= GRID_AMBIENT_DB));
    }
}
