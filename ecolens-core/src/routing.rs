//! Pollution-aware route planner
//!
//! ## Graph
//!
//! A regular lattice of 0.002° spacing with 8-connectivity. Nodes are integer
//! lattice indices `(i, j)` at `(i·step, j·step)`; start and goal are snapped
//! to the nearest node.
//!
//! ## Edge cost
//!
//! ```text
//! cost(u → v) = haversine(u, v) · (1 + w · PM2.5(v) / 50)
//! ```
//!
//! with PM2.5 at `v` from inverse-distance weighting (p = 2) over the cached
//! readings. The green route uses `w = 2`, the shortest route `w = 0`. The
//! great-circle distance to the goal, less the goal tolerance radius, is an
//! admissible heuristic because the cost factor is never below 1.
//!
//! Costs are integer micro-kilometres so the search works on a totally
//! ordered cost type.
//!
//! ## Exposure
//!
//! ```text
//! exposure = Σ_segments length · PM2.5(midpoint)      (µg/m³·km)
//! ```

use std::cell::Cell;
use std::sync::Arc;

use pathfinding::prelude::astar;
use serde::{Deserialize, Serialize};

use crate::constants::geo::KM_PER_DEGREE_APPROX;
use crate::constants::spatial::{
    COST_UNITS_PER_KM, GOAL_TOLERANCE_STEPS, GREEN_ROUTE_WEIGHT, ROUTE_GRID_STEP_DEG, ROUTE_MAX_ITERATIONS,
    ROUTE_REFERENCE_PM25,
};
use crate::errors::{ensure_finite, EngineError, EngineResult};
use crate::geo::GeoPoint;
use crate::interpolation::IdwParams;
use crate::macros::{log_debug, log_warn};
use crate::models::{PollutionSample, RouteComparison, RouteResult};

type Node = (i64, i64);

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

/// Route planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Lattice spacing (°)
    pub grid_step_deg: f64,
    /// Node expansions allowed per search
    pub max_iterations: usize,
    /// Pollution weight of the green route
    pub green_weight: f64,
    /// PM2.5 normalizer in the edge cost (µg/m³)
    pub reference_pm25: f64,
    /// Goal acceptance radius in lattice steps
    pub goal_tolerance_steps: f64,
    /// Point pollution estimate parameters
    pub idw: IdwParams,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            grid_step_deg: ROUTE_GRID_STEP_DEG,
            max_iterations: ROUTE_MAX_ITERATIONS,
            green_weight: GREEN_ROUTE_WEIGHT,
            reference_pm25: ROUTE_REFERENCE_PM25,
            goal_tolerance_steps: GOAL_TOLERANCE_STEPS,
            idw: IdwParams::routing(),
        }
    }
}

impl RoutingConfig {
    /// Set the expansion budget
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    /// Set the green route pollution weight
    pub fn with_green_weight(mut self, weight: f64) -> Self {
        self.green_weight = weight.max(0.0);
        self
    }

    fn goal_tolerance_km(&self) -> f64 {
        self.grid_step_deg * KM_PER_DEGREE_APPROX * self.goal_tolerance_steps
    }
}

/// A* planner over a lattice weighted by interpolated PM2.5
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    config: RoutingConfig,
    samples: Arc<[PollutionSample]>,
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(RoutingConfig::default())
    }
}

impl RoutePlanner {
    /// Planner with no cached readings
    pub fn new(config: RoutingConfig) -> Self {
        let config = RoutingConfig {
            grid_step_deg: if config.grid_step_deg > 0.0 { config.grid_step_deg } else { ROUTE_GRID_STEP_DEG },
            reference_pm25: if config.reference_pm25 > 0.0 { config.reference_pm25 } else { ROUTE_REFERENCE_PM25 },
            ..config
        };
        Self { config, samples: Arc::from(Vec::new()) }
    }

    /// Active configuration
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Replace the cached readings wholesale
    pub fn update_readings(&mut self, samples: impl Into<Arc<[PollutionSample]>>) {
        self.samples = samples.into();
    }

    /// Cached readings
    pub fn readings(&self) -> &[PollutionSample] {
        &self.samples
    }

    /// Interpolated PM2.5 at a point (15 µg/m³ with no readings)
    pub fn pollution_at(&self, point: &GeoPoint) -> f64 {
        self.config.idw.estimate(&self.samples, point)
    }

    /// Green route from `from` to `to` with a shortest-route comparison
    pub fn find_route(&self, from: &GeoPoint, to: &GeoPoint) -> EngineResult<RouteResult> {
        for (field, value) in [("from.lat", from.lat), ("from.lng", from.lng), ("to.lat", to.lat), ("to.lng", to.lng)] {
            ensure_finite(field, value)?;
        }

        let start = self.snap(from);
        let goal = self.snap(to);

        let green_path = self.path_or_direct(start, goal, self.config.green_weight);
        let shortest_path = self.path_or_direct(start, goal, 0.0);

        let (short_dist, short_exposure) = self.path_exposure(&shortest_path);
        let (mut green_dist, mut green_exposure) = self.path_exposure(&green_path);

        let path = if green_exposure > short_exposure {
            log_debug!("Green route exposure above shortest route; reporting shortest");
            green_dist = short_dist;
            green_exposure = short_exposure;
            shortest_path
        } else {
            green_path
        };

        let reduction_percent = if short_exposure > 0.0 {
            ((1.0 - green_exposure / short_exposure) * 100.0).max(0.0)
        } else {
            0.0
        };

        Ok(RouteResult {
            path,
            total_distance_km: green_dist,
            avg_pollution: if green_dist > 0.0 { green_exposure / green_dist } else { 0.0 },
            estimated_exposure: green_exposure,
            comparison: RouteComparison {
                shortest_path_exposure: short_exposure,
                green_path_exposure: green_exposure,
                reduction_percent,
                shortest_path_distance_km: short_dist,
                green_path_distance_km: green_dist,
            },
        })
    }

    /// Total length (km) and midpoint-weighted exposure (µg/m³·km)
    pub fn path_exposure(&self, path: &[GeoPoint]) -> (f64, f64) {
        path.windows(2).fold((0.0, 0.0), |(dist, exposure), seg| {
            let len = seg[0].distance_km(&seg[1]);
            let pm = self.pollution_at(&seg[0].midpoint(&seg[1]));
            (dist + len, exposure + len * pm)
        })
    }

    fn snap(&self, point: &GeoPoint) -> Node {
        let step = self.config.grid_step_deg;
        ((point.lat / step).round() as i64, (point.lng / step).round() as i64)
    }

    fn to_point(&self, node: &Node) -> GeoPoint {
        let step = self.config.grid_step_deg;
        GeoPoint::new(node.0 as f64 * step, node.1 as f64 * step)
    }

    /// Lower bound on the remaining cost from `node`.
    ///
    /// Any node within the goal tolerance ends the search, so the distance
    /// to the goal is reduced by that radius.
    fn heuristic_units(&self, node: &Node, goal: &GeoPoint) -> u64 {
        let remaining_km = self.to_point(node).distance_km(goal) - self.config.goal_tolerance_km();
        (remaining_km.max(0.0) * COST_UNITS_PER_KM).floor() as u64
    }

    fn path_or_direct(&self, start: Node, goal: Node, weight: f64) -> Vec<GeoPoint> {
        match self.search(start, goal, weight) {
            Ok(path) => path,
            Err(err) => {
                log_warn!("{}; returning straight-line path", err);
                vec![self.to_point(&start), self.to_point(&goal)]
            }
        }
    }

    /// A* between lattice nodes; the goal point is appended when the search
    /// stops at a node within tolerance of it.
    fn search(&self, start: Node, goal: Node, weight: f64) -> EngineResult<Vec<GeoPoint>> {
        let goal_point = self.to_point(&goal);
        let tolerance_km = self.config.goal_tolerance_km();
        let budget = self.config.max_iterations;
        let expanded = Cell::new(0usize);

        let to_units = |km: f64| (km * COST_UNITS_PER_KM).round() as u64;

        let result = astar(
            &start,
            |node| {
                expanded.set(expanded.get() + 1);
                if expanded.get() > budget {
                    return Vec::new();
                }
                let here = self.to_point(node);
                NEIGHBOR_OFFSETS
                    .iter()
                    .map(|(di, dj)| {
                        let next = (node.0 + di, node.1 + dj);
                        let there = self.to_point(&next);
                        let pm = self.pollution_at(&there).max(0.0);
                        let factor = 1.0 + weight * pm / self.config.reference_pm25;
                        (next, to_units(here.distance_km(&there) * factor))
                    })
                    .collect::<Vec<_>>()
            },
            |node| self.heuristic_units(node, &goal_point),
            |node| self.to_point(node).distance_km(&goal_point) < tolerance_km,
        );

        let Some((nodes, _cost)) = result else {
            return Err(EngineError::SearchExhausted {
                iterations: expanded.get().min(budget),
            });
        };

        let mut path: Vec<GeoPoint> = nodes.iter().map(|n| self.to_point(n)).collect();
        if nodes.last() != Some(&goal) {
            path.push(goal_point);
        }
        Ok(path)
    }
}
