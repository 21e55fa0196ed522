//! Empirical semivariogram and spherical model
//!
//! ## Matheron estimator
//!
//! ```text
//! γ̂(h) = 1 / (2·|N(h)|) · Σ_{(i,j) ∈ N(h)} (zᵢ − zⱼ)²
//! ```
//!
//! Pairs are binned into 10 lags of width `max(max_dist / 10, 10 m)`.
//!
//! ## Spherical model
//!
//! ```text
//! γ(0) = 0
//! γ(h) = c₀ + (c − c₀)·(1.5·h/a − 0.5·(h/a)³)     0 < h ≤ a
//! γ(h) = c                                         h > a
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::spatial::{
    DEFAULT_VARIOGRAM_RANGE_M, MIN_LAG_WIDTH_M, MIN_VARIOGRAM_RANGE_M, RANGE_SILL_FRACTION, VARIOGRAM_LAGS,
};
use crate::models::PollutionSample;

/// Fitted spherical variogram (distances in metres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariogramModel {
    /// Nugget c₀
    pub nugget: f64,
    /// Sill c
    pub sill: f64,
    /// Range a (m)
    pub range_m: f64,
}

impl Default for VariogramModel {
    fn default() -> Self {
        Self { nugget: 0.0, sill: 1.0, range_m: DEFAULT_VARIOGRAM_RANGE_M }
    }
}

/// One populated lag bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagBin {
    /// Bin centre (m)
    pub center_m: f64,
    /// Semivariance
    pub gamma: f64,
    /// Pairs in the bin
    pub pairs: usize,
}

/// Empirical semivariogram over `lags` equal-width bins; returns the
/// populated bins and the largest pair separation.
pub fn empirical(samples: &[PollutionSample], lags: usize) -> (Vec<LagBin>, f64) {
    let n = samples.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = samples[i].position.distance_m(&samples[j].position);
            pairs.push((d, (samples[i].pm25 - samples[j].pm25).powi(2)));
        }
    }

    let max_dist = pairs.iter().map(|&(d, _)| d).fold(0.0, f64::max);
    if pairs.is_empty() || lags == 0 {
        return (Vec::new(), max_dist);
    }

    let lag_width = if max_dist > 0.0 { max_dist / lags as f64 } else { MIN_VARIOGRAM_RANGE_M };
    let lag_width = lag_width.max(MIN_LAG_WIDTH_M);

    let mut sums = vec![0.0; lags];
    let mut counts = vec![0usize; lags];
    for (d, sq) in pairs {
        // The farthest pair lands in the last bin
        let idx = ((d / lag_width) as usize).min(lags - 1);
        sums[idx] += sq;
        counts[idx] += 1;
    }

    let bins = (0..lags)
        .filter(|&k| counts[k] > 0)
        .map(|k| LagBin {
            center_m: (k as f64 + 0.5) * lag_width,
            gamma: sums[k] / (2.0 * counts[k] as f64),
            pairs: counts[k],
        })
        .collect();
    (bins, max_dist)
}

fn population_variance(samples: &[PollutionSample]) -> f64 {
    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.pm25).sum::<f64>() / n;
    samples.iter().map(|s| (s.pm25 - mean).powi(2)).sum::<f64>() / n
}

impl VariogramModel {
    /// Method-of-moments fit of a spherical model.
    ///
    /// - sill: max(largest bin, data variance, 1)
    /// - nugget: half the first populated bin
    /// - range: centre of the first bin reaching 95 % of the sill, else half
    ///   the largest separation; at least 100 m
    pub fn fit(samples: &[PollutionSample]) -> Self {
        if samples.len() < 2 {
            return Self::default();
        }

        let (bins, max_dist) = empirical(samples, VARIOGRAM_LAGS);
        let variance = population_variance(samples);
        let half_span = if max_dist > 0.0 { max_dist * 0.5 } else { DEFAULT_VARIOGRAM_RANGE_M };

        let Some(first) = bins.first() else {
            return Self {
                nugget: 0.0,
                sill: variance.max(1.0),
                range_m: half_span.max(MIN_VARIOGRAM_RANGE_M),
            };
        };

        let sill = bins.iter().map(|b| b.gamma).fold(variance, f64::max).max(1.0);
        let nugget = (first.gamma * 0.5).max(0.0);
        let range_m = bins
            .iter()
            .find(|b| b.gamma >= RANGE_SILL_FRACTION * sill)
            .map_or(half_span, |b| b.center_m)
            .max(MIN_VARIOGRAM_RANGE_M);

        Self { nugget, sill, range_m }
    }

    /// Semivariance at separation `h_m` (m)
    pub fn evaluate(&self, h_m: f64) -> f64 {
        if h_m <= 0.0 {
            return 0.0;
        }
        let a = self.range_m.max(1.0);
        if h_m > a {
            return self.sill;
        }
        let r = h_m / a;
        self.nugget + (self.sill - self.nugget) * (1.5 * r - 0.5 * r.powi(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<PollutionSample> {
        vec![
            PollutionSample::new(40.758, -73.9855, 35.0),
            PollutionSample::new(40.7061, -73.9969, 22.0),
            PollutionSample::new(40.7648, -73.9724, 12.0),
            PollutionSample::new(40.7074, -74.0113, 28.0),
            PollutionSample::new(40.8116, -73.9465, 18.0),
        ]
    }

    #[test]
    fn model_shape() {
        let m = VariogramModel { nugget: 2.0, sill: 10.0, range_m: 1000.0 };
        assert_eq!(m.evaluate(0.0), 0.0);
        assert!((m.evaluate(1000.0) - 10.0).abs() < 1e-12);
        assert_eq!(m.evaluate(5000.0), 10.0);
        // Monotone up to the range
        assert!(m.evaluate(200.0) < m.evaluate(600.0));
        assert!(m.evaluate(1e-6) >= 2.0);
    }

    #[test]
    fn too_few_points_use_defaults() {
        assert_eq!(VariogramModel::fit(&samples()[..1]), VariogramModel::default());
    }

    #[test]
    fn fit_respects_floors() {
        let m = VariogramModel::fit(&samples());
        assert!(m.sill >= 1.0);
        assert!(m.range_m >= 100.0);
        assert!(m.nugget >= 0.0 && m.nugget <= m.sill);
    }

    #[test]
    fn identical_values_give_flat_model() {
        let flat: Vec<_> = samples().into_iter().map(|s| PollutionSample { pm25: 20.0, ..s }).collect();
        let m = VariogramModel::fit(&flat);
        assert_eq!(m.nugget, 0.0);
        assert_eq!(m.sill, 1.0);
    }

    #[test]
    fn bins_hold_every_pair() {
        let (bins, max_dist) = empirical(&samples(), 10);
        assert_eq!(bins.iter().map(|b| b.pairs).sum::<usize>(), 10);
        assert!(max_dist > 10_000.0);
    }
}
