//! Error Types for the Environmental Engines
//!
//! ## Design Philosophy
//!
//! Every engine in this crate must complete its cycle with a value. Degenerate
//! numerical situations (a singular kriging system, a search that never reaches
//! its goal, a forecaster with too little history) therefore never escape the
//! engine that hit them: they are raised internally as an [`EngineError`],
//! logged, and converted into the documented fallback on the spot.
//!
//! Only caller mistakes cross the public boundary:
//!
//! - `UnknownLocation`: a request names a location the monitor does not track
//! - `UnknownGroup`: a request names an unsupported vulnerability group
//! - `InvalidValue`: a caller supplied a non-finite coordinate or parameter
//! - `InvalidConfig`: a configuration document could not be parsed
//!
//! ## Error Categories
//!
//! ### Recovered locally
//! - `SingularSystem`: Gauss-Jordan elimination found no usable pivot; the
//!   interpolator answers that cell by inverse-distance weighting
//! - `SearchExhausted`: A* ran out of its expansion budget; the route planner
//!   substitutes a direct two-point path
//! - `InsufficientHistory`: not enough hourly data for the seasonal model; the
//!   forecaster projects its incremental level/trend instead
//! - `UpstreamUnavailable`: weather or detection provider failed; simulated
//!   values are used
//!
//! ### Surfaced to callers
//! - `UnknownLocation`, `UnknownGroup`, `InvalidValue`, `InvalidConfig`
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use ecolens_core::{EngineError, Monitor};
//!
//! fn forecast_for(monitor: &mut Monitor, id: &str) {
//!     match monitor.forecast(id, 6.0, 30) {
//!         Ok(points) => {
//!             // hand points to the broadcast layer
//!             let _ = points;
//!         }
//!         Err(EngineError::UnknownLocation(id)) => {
//!             // respond with "not found"
//!             let _ = id;
//!         }
//!         Err(_) => {
//!             // other caller errors
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the engines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Linear system has no usable pivot
    #[error("Singular linear system at pivot column {pivot}")]
    SingularSystem {
        /// Column at which elimination broke down
        pivot: usize,
    },

    /// Graph search exceeded its expansion ceiling without reaching the goal
    #[error("Search did not reach the goal within {iterations} expansions")]
    SearchExhausted {
        /// Number of nodes expanded before giving up
        iterations: usize,
    },

    /// Not enough history for the requested model
    #[error("Insufficient history: need {required}, have {available}")]
    InsufficientHistory {
        /// Minimum number of samples the model needs
        required: usize,
        /// Samples actually available
        available: usize,
    },

    /// An external provider (weather, detection, persistence) failed
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Request references a location that is not being monitored
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Request names a population group the dose-response model does not know
    #[error("Unknown vulnerability group: {0}")]
    UnknownGroup(String),

    /// Value makes no physical sense (NaN, infinity, etc)
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Name of the offending input
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Configuration document could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Reject non-finite inputs at the public boundary.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> EngineResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::InvalidValue { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_problem() {
        let err = EngineError::UnknownLocation("cam-404".into());
        assert_eq!(err.to_string(), "Unknown location: cam-404");

        let err = EngineError::InsufficientHistory { required: 48, available: 12 };
        assert_eq!(err.to_string(), "Insufficient history: need 48, have 12");
    }

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("lat", 40.7), Ok(40.7));
    }

    #[test]
    fn non_finite_values_rejected() {
        let err = ensure_finite("lng", f64::NAN).unwrap_err();
        assert!(matches!(err, EngineError::InvalidValue { field: "lng", .. }));
        assert!(ensure_finite("lng", f64::INFINITY).is_err());
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: EngineError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }
}
