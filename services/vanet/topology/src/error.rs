//! Topology error types.

use thiserror::Error;

/// Errors raised when the connectivity model rejects its input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// Communication range is negative or not finite
    #[error("invalid communication range: {0}")]
    InvalidRange(f64),

    /// Simulation area has a non-positive or non-finite dimension
    #[error("invalid area {width}x{height}")]
    InvalidArea {
        /// Area width
        width: f64,
        /// Area height
        height: f64,
    },

    /// Time step is negative or not finite
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// Position or velocity component is not finite
    #[error("non-finite {0}")]
    NonFinite(&'static str),
}
