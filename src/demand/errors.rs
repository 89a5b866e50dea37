//! demand::errors — error surface for demand-model fitting and curves.
//!
//! Purpose
//! -------
//! Collect every failure mode of the demand layer behind a single enum
//! and result alias. Fitting failures distinguish "not enough data" from
//! "numerics broke", because each has a different fallback policy.
//!
//! Conventions
//! -----------
//! - `DataInsufficient` and `ModelFit` are recoverable: callers fall back
//!   to a flat-elasticity curve and surface the cause alongside it.
//! - Configuration mistakes (`InvalidConfidenceLevel`, `InvalidGrid`,
//!   `InvalidBootstrap`) are caller bugs and carry the offending value.
//! - Optimizer failures are absorbed via `From<OptError>` so fitting
//!   code can use `?` across layer boundaries.
use crate::optimization::errors::OptError;
use std::error::Error as StdError;
use std::fmt;

/// Convenient alias for demand-layer results.
pub type DemandResult<T> = Result<T, DemandError>;

/// Failure modes of demand-model fitting and elasticity-curve
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum DemandError {
    /// Too few observations for a statistically meaningful fit.
    DataInsufficient { rows: usize, required: usize },
    /// Numerical non-convergence or a singular design matrix.
    ModelFit { reason: String },
    /// Confidence level outside the open interval (0, 1).
    InvalidConfidenceLevel { level: f64 },
    /// Price grid that cannot be constructed (non-finite bounds, zero
    /// points, or inverted range).
    InvalidGrid { reason: String },
    /// Bootstrap configuration with zero samples.
    InvalidBootstrap { samples: usize },
}

impl fmt::Display for DemandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandError::DataInsufficient { rows, required } => write!(
                f,
                "insufficient data for demand fit: {rows} rows available, {required} required"
            ),
            DemandError::ModelFit { reason } => {
                write!(f, "demand model fit failed: {reason}")
            }
            DemandError::InvalidConfidenceLevel { level } => {
                write!(f, "confidence level must lie in (0, 1), got {level}")
            }
            DemandError::InvalidGrid { reason } => {
                write!(f, "invalid price grid: {reason}")
            }
            DemandError::InvalidBootstrap { samples } => {
                write!(f, "bootstrap sample count must be positive, got {samples}")
            }
        }
    }
}

impl StdError for DemandError {}

impl From<OptError> for DemandError {
    fn from(err: OptError) -> Self {
        DemandError::ModelFit { reason: err.to_string() }
    }
}
