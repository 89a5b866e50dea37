//! decision::errors — error surface for price decisions.
//!
//! `ConstraintInfeasible` is fatal to the single decision call and must
//! propagate to the caller unmodified; there is no fallback price.
use std::error::Error as StdError;
use std::fmt;

/// Convenient alias for decision-layer results.
pub type DecisionResult<T> = Result<T, DecisionError>;

/// Failure modes of price optimization.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionError {
    /// No grid price satisfies the hard constraints.
    ConstraintInfeasible { reason: String },
    /// Constraint configuration that cannot be evaluated (non-finite
    /// bounds or non-positive granularity).
    InvalidConstraints { reason: String },
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionError::ConstraintInfeasible { reason } => {
                write!(f, "no price satisfies the hard constraints: {reason}")
            }
            DecisionError::InvalidConstraints { reason } => {
                write!(f, "invalid constraints: {reason}")
            }
        }
    }
}

impl StdError for DecisionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display must embed the reason for the caller's diagnostics.
    //
    // Given / Expect: see assert.
    fn display_embeds_reason() {
        let err = DecisionError::ConstraintInfeasible {
            reason: "minimum 100 exceeds maximum 90".to_string(),
        };
        assert!(err.to_string().contains("minimum 100 exceeds maximum 90"));
    }
}
