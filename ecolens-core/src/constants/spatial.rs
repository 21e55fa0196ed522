//! Spatial interpolation and routing constants

// ===== INTERPOLATION =====

/// Minimum known points for ordinary kriging.
pub const MIN_POINTS_FOR_KRIGING: usize = 4;

/// Number of lag bins for the empirical semivariogram.
pub const VARIOGRAM_LAGS: usize = 10;

/// Narrowest allowed lag bin (m).
pub const MIN_LAG_WIDTH_M: f64 = 10.0;

/// Shortest fitted variogram range (m).
pub const MIN_VARIOGRAM_RANGE_M: f64 = 100.0;

/// Range used when no separation information exists (m).
pub const DEFAULT_VARIOGRAM_RANGE_M: f64 = 1000.0;

/// Fraction of the sill that defines the practical range.
pub const RANGE_SILL_FRACTION: f64 = 0.95;

/// Pivot magnitude below which the kriging system is treated as singular.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Grid IDW power exponent.
pub const IDW_POWER: f64 = 2.5;

/// IDW distance floor for the grid (km).
pub const IDW_MIN_DISTANCE_KM: f64 = 0.05;

/// Estimate reported when no known points exist (µg/m³).
pub const IDW_EMPTY_VALUE: f64 = 10.0;

/// Default grid resolution (cells per side).
pub const DEFAULT_RESOLUTION: usize = 30;

/// Allowed grid resolution range.
pub const RESOLUTION_RANGE: (usize, usize) = (5, 100);

// ===== ROUTING =====

/// Lattice spacing (°).
pub const ROUTE_GRID_STEP_DEG: f64 = 0.002;

/// Node expansion ceiling per search.
pub const ROUTE_MAX_ITERATIONS: usize = 15_000;

/// Pollution weight for the green route.
pub const GREEN_ROUTE_WEIGHT: f64 = 2.0;

/// PM2.5 that doubles edge cost at weight 1 (µg/m³).
pub const ROUTE_REFERENCE_PM25: f64 = 50.0;

/// Route IDW power exponent.
pub const ROUTE_IDW_POWER: f64 = 2.0;

/// Route IDW distance floor (km).
pub const ROUTE_IDW_MIN_DISTANCE_KM: f64 = 0.01;

/// Background PM2.5 used when no readings are cached (µg/m³).
pub const ROUTE_DEFAULT_PM25: f64 = 15.0;

/// Goal tolerance in lattice steps.
pub const GOAL_TOLERANCE_STEPS: f64 = 1.5;

/// Cost units per kilometre for integer A* costs.
pub const COST_UNITS_PER_KM: f64 = 1.0e6;
