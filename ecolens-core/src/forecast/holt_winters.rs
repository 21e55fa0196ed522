//! Additive Holt-Winters (triple exponential smoothing)
//!
//! ## Initialization
//!
//! ```text
//! l₀ = mean(y₀ … y_{m−1})
//! b₀ = mean_i((y_{m+i} − y_i) / m)
//! sᵢ = yᵢ − l₀                       i < m
//! ```
//!
//! ## Update (t ≥ m)
//!
//! ```text
//! ŷₜ = lₜ₋₁ + bₜ₋₁ + sₜ₋ₘ              one-step prediction, residual yₜ − ŷₜ
//! lₜ = α·(yₜ − sₜ₋ₘ) + (1 − α)·(lₜ₋₁ + bₜ₋₁)
//! bₜ = β·(lₜ − lₜ₋₁) + (1 − β)·bₜ₋₁
//! sₜ = γ·(yₜ − lₜ)   + (1 − γ)·sₜ₋ₘ
//! ```
//!
//! ## Forecast
//!
//! ```text
//! ŷ(T + h) = l_T + h·b_T + s_{T − m + ((h − 1) mod m)}      h = 1 … m
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::forecast::{ALPHA, BETA, DEFAULT_RESIDUAL_STD, GAMMA, SEASON_LENGTH};
use crate::errors::{EngineError, EngineResult};

/// Smoothing factors, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Level
    pub alpha: f64,
    /// Trend
    pub beta: f64,
    /// Seasonal
    pub gamma: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self { alpha: ALPHA, beta: BETA, gamma: GAMMA }
    }
}

impl SmoothingParams {
    /// Clamp every factor into [0, 1]
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self { alpha: c(self.alpha), beta: c(self.beta), gamma: c(self.gamma) }
    }
}

/// Result of one seasonal fit
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalFit {
    /// Forecasts for h = 1 … season length
    pub forecasts: Vec<f64>,
    /// Root mean squared one-step residual
    pub residual_rmse: f64,
    /// Final level
    pub level: f64,
    /// Final trend (per step)
    pub trend: f64,
}

impl SeasonalFit {
    /// Forecast at a fractional step ahead (1.0 = next hour), linearly
    /// interpolated between whole steps and held flat past the end.
    pub fn at(&self, steps_ahead: f64) -> f64 {
        let Some(&last) = self.forecasts.last() else {
            return self.level;
        };
        let idx = (steps_ahead - 1.0).max(0.0);
        let lower = idx.floor() as usize;
        if lower >= self.forecasts.len() - 1 {
            return last;
        }
        let frac = (idx - lower as f64).clamp(0.0, 1.0);
        self.forecasts[lower] * (1.0 - frac) + self.forecasts[lower + 1] * frac
    }
}

/// Fit an additive model with cycle length `season` and forecast one cycle.
///
/// Needs at least two full cycles.
pub fn fit(data: &[f64], season: usize, params: SmoothingParams) -> EngineResult<SeasonalFit> {
    let m = season;
    if m == 0 || data.len() < 2 * m {
        return Err(EngineError::InsufficientHistory {
            required: 2 * m.max(1),
            available: data.len(),
        });
    }
    if let Some(&bad) = data.iter().find(|v| !v.is_finite()) {
        return Err(EngineError::InvalidValue { field: "hourly_history", value: bad });
    }

    let SmoothingParams { alpha, beta, gamma } = params.clamped();
    let mf = m as f64;

    let first = &data[..m];
    let second = &data[m..2 * m];
    let mut level = first.iter().sum::<f64>() / mf;
    let mut trend = first.iter().zip(second).map(|(a, b)| (b - a) / mf).sum::<f64>() / mf;

    let mut seasonals: Vec<f64> = first.iter().map(|y| y - level).collect();
    seasonals.reserve(data.len() - m);

    let mut sq_residuals = 0.0;
    for (t, &y) in data.iter().enumerate().skip(m) {
        let s_prev = seasonals[t - m];
        let predicted = level + trend + s_prev;
        sq_residuals += (y - predicted).powi(2);

        let new_level = alpha * (y - s_prev) + (1.0 - alpha) * (level + trend);
        trend = beta * (new_level - level) + (1.0 - beta) * trend;
        level = new_level;
        seasonals.push(gamma * (y - level) + (1.0 - gamma) * s_prev);
    }

    let n_residuals = data.len() - m;
    let residual_rmse = if n_residuals > 0 {
        (sq_residuals / n_residuals as f64).sqrt()
    } else {
        DEFAULT_RESIDUAL_STD
    };

    let base = seasonals.len() - m;
    let forecasts = (1..=m)
        .map(|h| level + h as f64 * trend + seasonals[base + (h - 1) % m])
        .collect();

    Ok(SeasonalFit { forecasts, residual_rmse, level, trend })
}

/// Fit with the default daily cycle and smoothing factors
pub fn fit_daily(data: &[f64]) -> EngineResult<SeasonalFit> {
    fit(data, SEASON_LENGTH, SmoothingParams::default())
}
