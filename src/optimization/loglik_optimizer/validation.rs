//! Validation helpers for optimizer configuration and outputs.
//!
//! All checks report through [`OptError`] rather than panicking; public
//! entry points call them so downstream code can assume finite,
//! well-shaped vectors.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::types::{Grad, Hessian, Theta},
};

/// Reject non-finite or non-positive gradient tolerances.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(t) = tol {
        if !t.is_finite() || t <= 0.0 {
            return Err(OptError::InvalidTolGrad {
                tol: t,
                reason: "gradient tolerance must be finite and strictly positive",
            });
        }
    }
    Ok(())
}

/// Reject non-finite or non-positive cost tolerances.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(t) = tol {
        if !t.is_finite() || t <= 0.0 {
            return Err(OptError::InvalidTolCost {
                tol: t,
                reason: "cost tolerance must be finite and strictly positive",
            });
        }
    }
    Ok(())
}

/// Check gradient dimension and finiteness.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient { index, value });
        }
    }
    Ok(())
}

/// Check Hessian shape and finiteness.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

/// Require a present, all-finite best parameter vector.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidTheta { index, value });
        }
    }
    Ok(theta)
}

/// Require a finite best objective value.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteValue { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Every rejection branch plus one success path per helper.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerance guards must reject zero, negative, and NaN values while
    // accepting None and positive finites.
    //
    // Given / Expect: see asserts.
    fn tolerance_guards_reject_bad_values() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(verify_tol_grad(Some(0.0)).is_err());
        assert!(verify_tol_cost(Some(-1.0)).is_err());
        assert!(verify_tol_cost(Some(f64::NAN)).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Gradient validation must flag mismatched length and non-finite
    // entries with their index.
    //
    // Given
    // -----
    // - A length-2 gradient checked against dim 3, and one with a NaN.
    //
    // Expect
    // ------
    // - GradientDimMismatch and InvalidGradient { index: 1 }.
    fn gradient_validation_flags_shape_and_nan() {
        let short = array![1.0, 2.0];
        assert!(matches!(
            validate_grad(&short, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        ));

        let bad = array![1.0, f64::NAN];
        assert!(matches!(
            validate_grad(&bad, 2),
            Err(OptError::InvalidGradient { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Hessian validation must flag shape and finiteness; theta/value
    // validation must require presence and finiteness.
    //
    // Given / Expect: see asserts.
    fn hessian_theta_and_value_validation() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            validate_hessian(&rect, 2),
            Err(OptError::HessianDimMismatch { .. })
        ));

        let mut square = Array2::<f64>::zeros((2, 2));
        square[(0, 1)] = f64::INFINITY;
        assert!(matches!(
            validate_hessian(&square, 2),
            Err(OptError::InvalidHessian { row: 0, col: 1, .. })
        ));

        assert!(matches!(validate_theta_hat(None), Err(OptError::MissingThetaHat)));
        assert!(validate_theta_hat(Some(array![0.0, 1.0])).is_ok());
        assert!(matches!(
            validate_value(f64::NEG_INFINITY),
            Err(OptError::NonFiniteValue { .. })
        ));
    }
}
