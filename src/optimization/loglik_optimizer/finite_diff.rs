//! loglik_optimizer::finite_diff — numeric curvature of a fitted cost.
//!
//! Purpose
//! -------
//! Approximate the Hessian of the average negative log-likelihood at a
//! fitted parameter vector, so the inference layer can turn curvature
//! into a covariance matrix without touching the `finitediff` API
//! itself.
//!
//! Key behaviors
//! -------------
//! - [`numeric_hessian`] differentiates a gradient function with a
//!   central scheme first and retries with a forward scheme when the
//!   central result fails validation.
//! - Off-diagonal pairs are averaged before the matrix is handed out,
//!   so eigendecompositions downstream see an exactly symmetric input.
//!
//! Invariants & assumptions
//! ------------------------
//! - The gradient function is well-defined in a neighborhood of the
//!   evaluation point; models that clamp their linear predictor must do
//!   so consistently in value and gradient.
//! - A returned matrix is `p×p`, finite, and symmetric.
//!
//! Testing notes
//! -------------
//! - Covered on a quadratic likelihood (linear gradient, exact
//!   curvature) and on a gradient that poisons both schemes with NaN.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::validate_hessian,
    },
};
use finitediff::FiniteDiff;

/// Finite-difference Hessian of `grad` at `theta`.
///
/// Purpose
/// -------
/// Build the observed-information input for covariance estimation:
/// differentiate the supplied gradient numerically, validate the result,
/// and symmetrize it.
///
/// Parameters
/// ----------
/// - `grad`: gradient of the average cost; called `O(p)` times per
///   scheme.
/// - `theta`: evaluation point, typically the fitted optimum.
///
/// Returns
/// -------
/// `OptResult<Hessian>` — a finite, symmetric `p×p` matrix.
///
/// Errors
/// ------
/// - [`OptError::InvalidHessian`](crate::optimization::errors::OptError)
///   when the forward scheme also produces a non-finite entry; the
///   central-scheme failure that triggered the retry is not surfaced.
pub fn numeric_hessian<F: Fn(&Theta) -> Grad>(grad: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    match finished(theta.central_hessian(grad), dim) {
        Ok(hess) => Ok(hess),
        Err(_) => finished(theta.forward_hessian(grad), dim),
    }
}

// ---- Helper methods ----

/// Validate a raw scheme output and average its off-diagonal pairs.
fn finished(mut hess: Hessian, dim: usize) -> OptResult<Hessian> {
    validate_hessian(&hess, dim)?;
    for i in 0..dim {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
    Ok(hess)
}
