//! Spatial Interpolator
//!
//! Builds a continuous PM2.5 surface from scattered location readings.
//!
//! ## Method selection
//!
//! ```text
//! samples ≥ 4 ──► fit spherical variogram ──► ordinary kriging per cell
//!                                                 │ singular system
//!                                                 ▼
//! samples < 4 ─────────────────────────────► IDW (p = 2.5, d ≥ 50 m)
//! ```
//!
//! Rows are evaluated in parallel; every cell is independent once the
//! variogram and the known-point block are fixed. Estimates are floored at
//! zero.

pub mod idw;
pub mod kriging;
pub mod linalg;
pub mod variogram;

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aqi::pm25_to_aqi;
use crate::constants::spatial::{DEFAULT_RESOLUTION, MIN_POINTS_FOR_KRIGING, RESOLUTION_RANGE};
use crate::geo::GridBounds;
use crate::macros::{log_debug, log_warn};
use crate::models::{InterpolationGrid, InterpolationMethod, PollutionSample};

pub use idw::IdwParams;
pub use kriging::OrdinaryKriging;
pub use variogram::VariogramModel;

/// Clamp a requested resolution into the supported range
pub fn clamp_resolution(resolution: usize) -> usize {
    resolution.clamp(RESOLUTION_RANGE.0, RESOLUTION_RANGE.1)
}

/// Interpolator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Area covered by default grids
    pub bounds: GridBounds,
    /// Default cells per side
    pub resolution: usize,
    /// Minimum samples for kriging
    pub min_kriging_points: usize,
    /// IDW parameters for the fallback path
    pub idw: IdwParams,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            bounds: GridBounds::default(),
            resolution: DEFAULT_RESOLUTION,
            min_kriging_points: MIN_POINTS_FOR_KRIGING,
            idw: IdwParams::default(),
        }
    }
}

impl InterpolationConfig {
    /// Set default bounds
    pub fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set default resolution (clamped to 5..=100)
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = clamp_resolution(resolution);
        self
    }
}

/// Kriging/IDW grid builder
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    config: InterpolationConfig,
    last_variogram: Option<VariogramModel>,
    last_singular_cells: usize,
}

impl Interpolator {
    /// Create an interpolator
    pub fn new(config: InterpolationConfig) -> Self {
        Self {
            config,
            last_variogram: None,
            last_singular_cells: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &InterpolationConfig {
        &self.config
    }

    /// Variogram fitted by the most recent kriging grid
    pub fn last_variogram(&self) -> Option<VariogramModel> {
        self.last_variogram
    }

    /// Cells answered by IDW in the most recent kriging grid
    pub fn last_singular_cells(&self) -> usize {
        self.last_singular_cells
    }

    /// Grid over the configured bounds and resolution
    pub fn generate_grid(&mut self, samples: &[PollutionSample]) -> InterpolationGrid {
        let bounds = self.config.bounds;
        let resolution = self.config.resolution;
        self.generate_grid_with(samples, &bounds, resolution)
    }

    /// Grid over explicit bounds; resolution is clamped to 5..=100
    pub fn generate_grid_with(
        &mut self,
        samples: &[PollutionSample],
        bounds: &GridBounds,
        resolution: usize,
    ) -> InterpolationGrid {
        let resolution = clamp_resolution(resolution);
        let known: Vec<PollutionSample> = samples
            .iter()
            .filter(|s| s.position.is_finite() && s.pm25.is_finite())
            .copied()
            .collect();
        if known.len() < samples.len() {
            log_warn!("Ignoring {} non-finite samples", samples.len() - known.len());
        }

        if known.len() < self.config.min_kriging_points {
            self.last_singular_cells = 0;
            return InterpolationGrid {
                bounds: *bounds,
                resolution,
                values: self.idw_values(&known, bounds, resolution),
                method: InterpolationMethod::Idw,
            };
        }

        let model = VariogramModel::fit(&known);
        log_debug!(
            "Kriging variogram: nugget={:.2}, sill={:.2}, range={:.0}m",
            model.nugget,
            model.sill,
            model.range_m
        );
        self.last_variogram = Some(model);

        let kriging = OrdinaryKriging::new(&known, model);
        let idw = self.config.idw;
        let singular = AtomicUsize::new(0);

        let values: Vec<Vec<f64>> = (0..resolution)
            .into_par_iter()
            .map(|row| {
                (0..resolution)
                    .map(|col| {
                        let cell = bounds.cell_center(row, col, resolution);
                        match kriging.estimate(&cell) {
                            Ok(z) => z,
                            Err(_) => {
                                singular.fetch_add(1, Ordering::Relaxed);
                                idw.estimate(&known, &cell).max(0.0)
                            }
                        }
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        self.last_singular_cells = singular.into_inner();
        if self.last_singular_cells > 0 {
            log_debug!("{} cells fell back to IDW", self.last_singular_cells);
        }

        InterpolationGrid {
            bounds: *bounds,
            resolution,
            values,
            method: InterpolationMethod::Kriging,
        }
    }

    /// IDW-only grid, regardless of sample count
    pub fn idw_grid(&self, samples: &[PollutionSample], bounds: &GridBounds, resolution: usize) -> InterpolationGrid {
        let resolution = clamp_resolution(resolution);
        InterpolationGrid {
            bounds: *bounds,
            resolution,
            values: self.idw_values(samples, bounds, resolution),
            method: InterpolationMethod::Idw,
        }
    }

    fn idw_values(&self, samples: &[PollutionSample], bounds: &GridBounds, resolution: usize) -> Vec<Vec<f64>> {
        let idw = self.config.idw;
        (0..resolution)
            .into_par_iter()
            .map(|row| {
                (0..resolution)
                    .map(|col| idw.estimate(samples, &bounds.cell_center(row, col, resolution)).max(0.0))
                    .collect::<Vec<f64>>()
            })
            .collect()
    }
}

/// Map a PM2.5 grid through the AQI table
pub fn aqi_grid(grid: &InterpolationGrid) -> InterpolationGrid {
    InterpolationGrid {
        values: grid
            .values
            .iter()
            .map(|row| row.iter().map(|&pm| pm25_to_aqi(pm) as f64).collect())
            .collect(),
        ..grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    fn nyc_samples() -> Vec<PollutionSample> {
        vec![
            PollutionSample::new(40.7580, -73.9855, 35.0),
            PollutionSample::new(40.7061, -73.9969, 22.0),
            PollutionSample::new(40.7648, -73.9724, 12.0),
            PollutionSample::new(40.7074, -74.0113, 28.0),
            PollutionSample::new(40.8116, -73.9465, 18.0),
            PollutionSample::new(40.7282, -73.7949, 25.0),
        ]
    }

    #[test]
    fn resolution_clamped() {
        assert_eq!(clamp_resolution(1), 5);
        assert_eq!(clamp_resolution(30), 30);
        assert_eq!(clamp_resolution(500), 100);
    }

    #[test]
    fn kriging_grid_shape() {
        let mut interp = Interpolator::default();
        let grid = interp.generate_grid_with(&nyc_samples(), &GridBounds::default(), 12);

        assert_eq!(grid.method, InterpolationMethod::Kriging);
        assert_eq!(grid.values.len(), 12);
        assert!(grid.values.iter().all(|row| row.len() == 12));
        assert!(grid.values.iter().flatten().all(|v| v.is_finite() && *v >= 0.0));
        assert!(interp.last_variogram().is_some());
    }

    #[test]
    fn few_points_match_direct_idw() {
        let samples = &nyc_samples()[..3];
        let bounds = GridBounds::default();
        let mut interp = Interpolator::default();
        let grid = interp.generate_grid_with(samples, &bounds, 8);

        assert_eq!(grid.method, InterpolationMethod::Idw);
        let idw = IdwParams::default();
        for row in 0..8 {
            for col in 0..8 {
                let expected = idw.estimate(samples, &bounds.cell_center(row, col, 8));
                assert_eq!(grid.get(row, col), Some(expected));
            }
        }
    }

    #[test]
    fn empty_input_is_background() {
        let mut interp = Interpolator::default();
        let grid = interp.generate_grid_with(&[], &GridBounds::default(), 5);
        assert!(grid.values.iter().flatten().all(|&v| v == 10.0));
    }

    #[test]
    fn singular_cells_fall_back() {
        let samples: Vec<_> = [10.0, 20.0, 30.0, 40.0]
            .into_iter()
            .map(|v| PollutionSample::new(40.75, -73.99, v))
            .collect();
        let mut interp = Interpolator::default();
        let grid = interp.generate_grid_with(&samples, &GridBounds::default(), 5);

        assert_eq!(interp.last_singular_cells(), 25);
        assert!(grid.values.iter().flatten().all(|v| (v - 25.0).abs() < 1e-9));
    }

    #[test]
    fn non_finite_samples_dropped() {
        let mut samples = nyc_samples();
        samples.push(PollutionSample { position: GeoPoint::new(f64::NAN, 0.0), pm25: 10.0 });
        samples.push(PollutionSample::new(40.75, -73.9, f64::INFINITY));
        let mut interp = Interpolator::default();
        let grid = interp.generate_grid_with(&samples, &GridBounds::default(), 6);
        assert!(grid.values.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn aqi_grid_maps_cells() {
        let grid = InterpolationGrid {
            bounds: GridBounds::default(),
            resolution: 2,
            values: vec![vec![0.0, 12.0], vec![35.4, 600.0]],
            method: InterpolationMethod::Idw,
        };
        let aqi = aqi_grid(&grid);
        assert_eq!(aqi.values, vec![vec![0.0, 50.0], vec![100.0, 500.0]]);
        assert_eq!(aqi.bounds, grid.bounds);
    }
}
