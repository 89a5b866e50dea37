//! correlation::errors — error types for the correlation/weighting engine.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by correlation-matrix
//! construction, feature ranking, and weight generation. Note that "zero
//! eligible features" is deliberately NOT an error: it yields an explicit
//! empty ranking that downstream components treat as "base price only".
//!
//! Conventions
//! -----------
//! - Messages are phrased as domain constraints; each variant carries the
//!   offending value.

pub type CorrResult<T> = Result<T, CorrError>;

/// CorrError — invalid configuration for correlation or weighting calls.
///
/// Variants
/// --------
/// - `InvalidMinPairedObs { value }`
///   The minimum paired-observation policy constant must be at least 2
///   for a correlation to be defined.
/// - `InvalidTopN`
///   A ranking of zero features was requested.
/// - `InvalidBaseFloor { value }`
///   The reserved base-category share must lie in [0, 1).
#[derive(Debug, Clone, PartialEq)]
pub enum CorrError {
    InvalidMinPairedObs { value: usize },
    InvalidTopN,
    InvalidBaseFloor { value: f64 },
}

impl std::error::Error for CorrError {}

impl std::fmt::Display for CorrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrError::InvalidMinPairedObs { value } => {
                write!(f, "min_paired_obs must be >= 2, got {value}")
            }
            CorrError::InvalidTopN => {
                write!(f, "top_n must be greater than zero")
            }
            CorrError::InvalidBaseFloor { value } => {
                write!(f, "base_floor must lie in [0, 1), got {value}")
            }
        }
    }
}
