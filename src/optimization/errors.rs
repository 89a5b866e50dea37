//! optimization::errors — error surface of the log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Collect every failure the MLE stack can produce — invalid
//! configuration, gradient/Hessian validation failures, non-finite
//! objective values, and solver-level errors bubbled up from `argmin` —
//! behind a single enum and result alias.
//!
//! Conventions
//! -----------
//! - Variants carry the offending values and a static `reason` where a
//!   constraint needs spelling out.
//! - `argmin::core::Error` values are round-tripped: an `OptError` pushed
//!   into the solver comes back out as itself via downcasting; anything
//!   else is preserved as a `Solver { msg }`.
use argmin::core::Error;

pub type OptResult<T> = Result<T, OptError>;

/// OptError — optimizer-level failures.
#[derive(Debug)]
pub enum OptError {
    //------ Configuration ------
    NoTolerancesProvided,
    InvalidTolGrad { tol: f64, reason: &'static str },
    InvalidTolCost { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    InvalidLineSearch { name: String, reason: &'static str },
    InvalidLbfgsMem { mem: usize, reason: &'static str },

    //------ Evaluation ------
    GradientNotImplemented,
    NonFiniteCost { value: f64 },
    GradientDimMismatch { expected: usize, found: usize },
    InvalidGradient { index: usize, value: f64 },
    HessianDimMismatch { expected: usize, found: (usize, usize) },
    InvalidHessian { row: usize, col: usize, value: f64 },

    //------ Outcome ------
    MissingThetaHat,
    InvalidTheta { index: usize, value: f64 },
    NonFiniteValue { value: f64 },

    //------ Solver ------
    Solver { msg: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::NoTolerancesProvided => {
                write!(f, "at least one of tol_grad, tol_cost, or max_iter must be set")
            }
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "invalid tol_grad {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "invalid tol_cost {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "invalid max_iter {max_iter}: {reason}")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "invalid line search '{name}': {reason}")
            }
            OptError::InvalidLbfgsMem { mem, reason } => {
                write!(f, "invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::GradientNotImplemented => {
                write!(f, "no analytic gradient provided; finite differences are used instead")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "objective evaluated to a non-finite value: {value}")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "gradient has length {found}, expected {expected}")
            }
            OptError::InvalidGradient { index, value } => {
                write!(f, "gradient element {index} is not finite: {value}")
            }
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "hessian has shape {found:?}, expected ({expected}, {expected})"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "hessian element ({row}, {col}) is not finite: {value}")
            }
            OptError::MissingThetaHat => {
                write!(f, "solver terminated without a best parameter vector")
            }
            OptError::InvalidTheta { index, value } => {
                write!(f, "theta element {index} is not finite: {value}")
            }
            OptError::NonFiniteValue { value } => {
                write!(f, "best objective value is not finite: {value}")
            }
            OptError::Solver { msg } => {
                write!(f, "solver failure: {msg}")
            }
        }
    }
}

impl From<Error> for OptError {
    /// Recover an `OptError` smuggled through `argmin`'s `anyhow`-based
    /// error type, or wrap anything else as a `Solver` message.
    fn from(err: Error) -> Self {
        match err.downcast::<OptError>() {
            Ok(opt) => opt,
            Err(other) => OptError::Solver { msg: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Display payload embedding and the argmin round-trip conversion.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An OptError pushed into an argmin Error must come back out as the
    // same variant, not as a stringly Solver wrapper.
    //
    // Given
    // -----
    // - OptError::NonFiniteCost converted into argmin::core::Error.
    //
    // Expect
    // ------
    // - From<Error> recovers NonFiniteCost.
    fn argmin_error_round_trip_preserves_variant() {
        // Arrange
        let argmin_err: Error = OptError::NonFiniteCost { value: f64::NAN }.into();

        // Act
        let back: OptError = argmin_err.into();

        // Assert
        assert!(matches!(back, OptError::NonFiniteCost { .. }), "got {back:?}");
    }

    #[test]
    // Purpose
    // -------
    // Display messages should carry the payload values.
    //
    // Given
    // -----
    // - A GradientDimMismatch error.
    //
    // Expect
    // ------
    // - Both dimensions appear in the message.
    fn display_embeds_dimensions() {
        let msg = OptError::GradientDimMismatch { expected: 4, found: 3 }.to_string();
        assert!(msg.contains('4') && msg.contains('3'), "unexpected message: {msg}");
    }
}
