//! Error types for ODE integration

use tensode_core::TensorError;
use thiserror::Error;

/// Error type for the solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OdeError {
    /// Solver configuration rejected before any integration work
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Tensor operation failed, usually a derivative returning the wrong shape
    #[error("tensor operation failed: {0}")]
    Tensor(#[from] TensorError),

    /// Trajectory keys must strictly increase
    #[error("non-monotonic time: {time} does not follow {previous}")]
    NonMonotonicTime { previous: f64, time: f64 },
}

/// Result type for the solver
pub type OdeResult<T> = Result<T, OdeError>;

impl OdeError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        OdeError::InvalidConfig(reason.into())
    }
}
