//! Visualization particles
//!
//! Cosmetic output for map animation: particles spawn in a ring around the
//! source, drift downwind with independent turbulent velocity noise, and
//! carry an opacity proportional to normalized PM2.5.

use super::DispersionEngine;
use crate::constants::dispersion::{
    PARTICLE_DRIFT_SCALE, PARTICLE_FULL_OPACITY_PM25, PARTICLE_MAX_AGE_S, PARTICLE_RADIUS_DEG, PARTICLE_TURBULENCE,
};
use crate::geo::GeoPoint;
use crate::models::{Particle, WeatherState};

/// Default particles per source
pub const DEFAULT_PARTICLE_COUNT: usize = 15;

impl DispersionEngine {
    /// Particles around `source` for one frame of animation
    pub fn generate_particles(
        &mut self,
        source_id: &str,
        source: &GeoPoint,
        pm25: f64,
        weather: &WeatherState,
        count: usize,
    ) -> Vec<Particle> {
        let weather = weather.sanitized();
        let theta = weather.wind_direction.to_radians();
        // Drift toward where the wind is going
        let drift_x = -weather.wind_speed * theta.sin() * PARTICLE_DRIFT_SCALE;
        let drift_y = -weather.wind_speed * theta.cos() * PARTICLE_DRIFT_SCALE;
        let opacity = (pm25.max(0.0) / PARTICLE_FULL_OPACITY_PM25).min(1.0);
        let turbulence = PARTICLE_TURBULENCE * self.config.jitter_scale;

        (0..count)
            .map(|_| {
                let angle = self.rng.uniform(0.0, std::f64::consts::TAU);
                let radius = self.rng.uniform(PARTICLE_RADIUS_DEG.0, PARTICLE_RADIUS_DEG.1);
                Particle {
                    x: source.lng + radius * angle.cos(),
                    y: source.lat + radius * angle.sin(),
                    vx: drift_x + self.rng.gaussian(0.0, turbulence),
                    vy: drift_y + self.rng.gaussian(0.0, turbulence),
                    concentration: opacity * self.rng.uniform(0.3, 1.0),
                    age: self.rng.uniform(0.0, PARTICLE_MAX_AGE_S),
                    source_id: source_id.to_string(),
                }
            })
            .collect()
    }
}
