//! Ordinary kriging
//!
//! For known points x₁…x_N and target x₀:
//!
//! ```text
//! ┌ γ(x₁,x₁) … γ(x₁,x_N) 1 ┐ ┌ w₁ ┐   ┌ γ(x₁,x₀) ┐
//! │    ⋮          ⋮      ⋮ │ │ ⋮  │ = │    ⋮     │
//! │ γ(x_N,x₁) … γ(x_N,x_N) 1 │ │ w_N│   │ γ(x_N,x₀)│
//! └    1     …    1      0 ┘ └ μ  ┘   └    1     ┘
//!
//! ẑ(x₀) = Σ wᵢ·zᵢ
//! ```
//!
//! The point-to-point block depends only on the known points, so it is built
//! once per grid and copied into each cell's augmented system.

use super::linalg::solve_gauss_jordan;
use super::variogram::VariogramModel;
use crate::errors::EngineResult;
use crate::geo::GeoPoint;
use crate::models::PollutionSample;

/// Kriging system for a fixed set of known points
#[derive(Debug, Clone)]
pub struct OrdinaryKriging<'a> {
    samples: &'a [PollutionSample],
    model: VariogramModel,
    /// γ between known points, N × N
    gamma: Vec<Vec<f64>>,
}

impl<'a> OrdinaryKriging<'a> {
    /// Precompute the known-point block
    pub fn new(samples: &'a [PollutionSample], model: VariogramModel) -> Self {
        let gamma = samples
            .iter()
            .map(|a| {
                samples
                    .iter()
                    .map(|b| model.evaluate(a.position.distance_m(&b.position)))
                    .collect()
            })
            .collect();
        Self { samples, model, gamma }
    }

    /// Variogram in use
    pub fn model(&self) -> &VariogramModel {
        &self.model
    }

    /// Kriging weights for `target` (first N entries of the solution)
    pub fn weights(&self, target: &GeoPoint) -> EngineResult<Vec<f64>> {
        let n = self.samples.len();
        let mut system: Vec<Vec<f64>> = Vec::with_capacity(n + 1);

        for (row, sample) in self.gamma.iter().zip(self.samples) {
            let mut r = Vec::with_capacity(n + 2);
            r.extend_from_slice(row);
            r.push(1.0);
            r.push(self.model.evaluate(sample.position.distance_m(target)));
            system.push(r);
        }
        let mut lagrange = vec![1.0; n + 2];
        lagrange[n] = 0.0;
        system.push(lagrange);

        let mut solution = solve_gauss_jordan(system)?;
        solution.truncate(n);
        Ok(solution)
    }

    /// Estimate at `target`, floored at zero
    pub fn estimate(&self, target: &GeoPoint) -> EngineResult<f64> {
        let weights = self.weights(target)?;
        let z: f64 = weights.iter().zip(self.samples).map(|(w, s)| w * s.pm25).sum();
        Ok(z.max(0.0))
    }
}
