//! evaluation::errors — error surface for forecast scoring.
use std::error::Error as StdError;
use std::fmt;

/// Convenient alias for evaluation-layer results.
pub type EvalResult<T> = Result<T, EvalError>;

/// Failure modes of forecast evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Forecast and actual series of different lengths.
    LengthMismatch { forecast: usize, actual: usize },
    /// Nothing to score.
    Empty,
    /// Band confidence level outside the open interval (0, 1).
    InvalidConfidenceLevel { value: f64 },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::LengthMismatch { forecast, actual } => write!(
                f,
                "forecast and actual lengths differ: {forecast} forecast points, {actual} actuals"
            ),
            EvalError::Empty => write!(f, "no observations to score"),
            EvalError::InvalidConfidenceLevel { value } => {
                write!(f, "confidence level must lie in (0, 1), got {value}")
            }
        }
    }
}

impl StdError for EvalError {}
