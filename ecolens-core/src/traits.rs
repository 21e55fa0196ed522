//! Interfaces for external collaborators
//!
//! The engines never perform I/O themselves. Weather retrieval, frame
//! analysis, and persistence are supplied by the embedding application
//! through these traits; every call site has a defined fallback when the
//! collaborator fails.

use crate::errors::EngineResult;
use crate::models::{VehicleCounts, WeatherState};
use crate::monitor::LocationSnapshot;

/// Supplies current meteorological conditions
///
/// Implementations must return within bounded time. An `Err` makes the
/// caller fall back to cached or simulated weather.
pub trait WeatherProvider: Send {
    /// Current conditions
    fn current(&mut self) -> EngineResult<WeatherState>;

    /// Short name for logs
    fn name(&self) -> &str {
        "weather"
    }
}

/// Counts vehicles in a camera frame
///
/// An `Err` makes the traffic generator fall back to its statistical
/// simulation for that location.
pub trait VehicleDetector: Send {
    /// Per-class counts visible in `frame`
    fn detect(&mut self, location_id: &str, frame: &[u8]) -> EngineResult<VehicleCounts>;
}

/// Receives finalized per-location readings for storage
///
/// Failures are logged by the monitor and never stop the cycle.
pub trait ReadingSink: Send {
    /// Store one batch of readings
    fn store(&mut self, readings: &[LocationSnapshot]) -> EngineResult<()>;
}
