//! inference::hessian — Hessian-based covariance and standard error utilities.
//!
//! Purpose
//! -------
//! Provide a thin wrapper around finite-difference Hessians that converts
//! them into numerically stable covariance and standard error estimates.
//! This module handles conversion between `ndarray` and `nalgebra` types
//! and builds the full parameter covariance from the observed information
//! via an eigen-based pseudoinverse.
//!
//! Key behaviors
//! -------------
//! - Call [`numeric_hessian`] on an average negative log-likelihood
//!   gradient to obtain the observed information matrix `J(θ̂)` on the
//!   average scale.
//! - Copy the resulting `ndarray` Hessian into a `nalgebra::DMatrix`
//!   (`fill_dmatrix`) for eigen-based linear algebra.
//! - Compute the parameter covariance `Σ = J⁺ / n` from the
//!   Moore–Penrose pseudoinverse of `J(θ̂)` and the sample size `n`.
//! - Derive per-parameter standard errors as the square roots of the
//!   covariance diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`numeric_hessian`] returns a finite, square `p×p` matrix with
//!   `p = θ̂.len()`. Symmetry is already enforced upstream via
//!   the finite-difference layer; this module does **not** re-symmetrize.
//! - The gradient map passed in is for the **average negative
//!   log-likelihood** (the optimizer cost), so its Hessian at `θ̂` is
//!   positive semi-definite up to numerical noise.
//! - Eigenvalues at most [`EIGEN_EPS`] are treated as numerically zero
//!   and excluded when constructing pseudoinverse directions.
//!
//! Conventions
//! -----------
//! - Hessians are on the **average** scale (per observation), so the
//!   covariance of `θ̂` divides the pseudoinverse by the observation
//!   count `n`.
//! - No explicit matrix inverse is formed; all computations use
//!   symmetric eigendecomposition with eigenvalue truncation.
//! - Errors are reported via [`OptResult<T>`].
//!
//! Downstream usage
//! ----------------
//! - The demand layer calls [`calc_covariance`] after fitting to obtain
//!   the covariance used for delta-method confidence bounds on the
//!   elasticity curve, and [`standard_errors`] for per-coefficient SEs.
//! - [`fill_dmatrix`] is an internal utility; library users should not
//!   need to invoke it directly.
//!
//! Testing notes
//! -------------
//! - Unit tests cover correct copying of Hessians from `ndarray` into
//!   `DMatrix`, agreement between the computed covariance and the
//!   analytic `J⁻¹ / n` for diagonal quadratics, and eigenvalue
//!   truncation for singular information matrices.
use crate::optimization::{errors::OptResult, loglik_optimizer::finite_diff::numeric_hessian};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Eigenvalues at or below this threshold are treated as zero when
/// forming pseudoinverse directions.
pub const EIGEN_EPS: f64 = 1e-12;

/// calc_covariance — parameter covariance from observed information.
///
/// Purpose
/// -------
/// Compute the covariance matrix of a maximum-likelihood estimate `θ̂`
/// from the observed information `J(θ̂)`, using an eigen-based
/// pseudoinverse. The observed information is built via finite-difference
/// Hessians of the average negative log-likelihood gradient, then
/// decomposed and inverted on the well-identified subspace.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Gradient map of the **average negative** log-likelihood,
///   `f: θ ↦ ∇c(θ)`. Must be C¹ in a neighborhood of `theta_hat` so
///   [`numeric_hessian`] can succeed.
/// - `theta_hat`: `&Array1<f64>`
///   Parameter vector `θ̂` at which the observed information is
///   evaluated. Its length `p` determines the covariance dimension.
/// - `n_obs`: `usize`
///   Number of observations the average log-likelihood was taken over.
///   Must be positive; the pseudoinverse is scaled by `1 / n_obs`.
///
/// Returns
/// -------
/// `OptResult<Array2<f64>>`
///   On success, a `p×p` covariance matrix `Σ = J⁺ / n_obs`. On failure,
///   propagates the error from [`numeric_hessian`].
///
/// Errors
/// ------
/// - `OptError`
///   Any error that [`numeric_hessian`] may return, such as Hessian
///   dimension mismatches or non-finite entries detected by validation.
///
/// Notes
/// -----
/// - Eigenvalues at most [`EIGEN_EPS`] are treated as zero when forming
///   pseudoinverse directions; variance along those directions is
///   reported as zero rather than inflated to infinity.
/// - The implemented formula is
///   `Σ[i, j] = (1/n) Σ_{k: λ_k > EIGEN_EPS} Q[i,k] Q[j,k] / λ_k`,
///   where `J = Q Λ Qᵀ` is the symmetric eigendecomposition.
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> OptResult<Array2<f64>> {
    let p = theta_hat.len();
    let obs_info = numeric_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(solve_for_covariance(obs_info_nalg, p, n_obs))
}

/// standard_errors — square roots of the covariance diagonal.
///
/// Negative diagonal entries arising from numerical noise are clamped to
/// zero before the square root.
pub fn standard_errors(covariance: &Array2<f64>) -> Array1<f64> {
    Array1::from_iter((0..covariance.nrows()).map(|i| covariance[[i, i]].max(0.0).sqrt()))
}

// ---- Helper methods ----

/// fill_dmatrix — copy an `ndarray` Hessian into a `nalgebra::DMatrix`.
///
/// Bridge between `ndarray` and `nalgebra` by copying a square observed
/// information matrix into a `DMatrix<f64>` using column-major writes.
/// Does not modify symmetry; the input is assumed symmetrized upstream.
/// Both matrices must be `p×p` with matching `p`; a mismatch is a
/// programmer error and may panic on out-of-bounds indexing.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let p = obs_info.ncols();
    for j in 0..p {
        for i in j..p {
            if j == i {
                obs_info_nalg[(i, i)] = obs_info[[i, i]];
            } else {
                obs_info_nalg[(i, j)] = obs_info[[i, j]];
                obs_info_nalg[(j, i)] = obs_info[[j, i]];
            }
        }
    }
}

/// solve_for_covariance — eigen pseudoinverse scaled by sample size.
///
/// Computes `Σ = J⁺ / n_obs` from the symmetric eigendecomposition
/// `J = Q Λ Qᵀ`, discarding eigenvalues at most [`EIGEN_EPS`].
fn solve_for_covariance(obs_info_nalg: DMatrix<f64>, p: usize, n_obs: usize) -> Array2<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let scale = 1.0 / (n_obs.max(1) as f64);
    let mut cov = Array2::<f64>::zeros((p, p));
    for i in 0..p {
        for j in i..p {
            let entry: f64 = eigenvals
                .iter()
                .enumerate()
                .filter(|(_, lambda)| **lambda > EIGEN_EPS)
                .map(|(k, &lambda)| q[(i, k)] * q[(j, k)] / lambda)
                .sum();
            cov[[i, j]] = entry * scale;
            cov[[j, i]] = entry * scale;
        }
    }
    cov
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Correct copying of Hessians from `ndarray` into `DMatrix`.
    // - Agreement between the computed covariance and the analytic
    //   `J⁻¹ / n` for a diagonal quadratic.
    // - Eigenvalue truncation when the information matrix is singular.
    //
    // They intentionally DO NOT cover:
    // - Demand-model specific inference (tested in the demand layer).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `fill_dmatrix` copies an asymmetric-free matrix
    // faithfully without altering values.
    //
    // Given
    // -----
    // - A symmetric 2x2 `ndarray` matrix.
    //
    // Expect
    // ------
    // - The `DMatrix` has identical entries at all positions.
    fn fill_dmatrix_copies_ndarray_into_dmatrix_without_modification() {
        // Arrange
        let obs_info = array![[4.0, 0.5], [0.5, 1.0]];
        let mut obs_info_nalg = DMatrix::<f64>::zeros(2, 2);

        // Act
        fill_dmatrix(&obs_info, &mut obs_info_nalg);

        // Assert
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(obs_info_nalg[(i, j)], obs_info[[i, j]]);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `calc_covariance` matches the analytic inverse for a
    // diagonal quadratic cost.
    //
    // Given
    // -----
    // - Cost gradient g(θ) = A θ with A = diag(4, 1).
    // - n_obs = 10.
    //
    // Expect
    // ------
    // - Σ ≈ diag(1/40, 1/10) and the corresponding SEs.
    fn calc_covariance_diagonal_quadratic_matches_analytic_inverse() {
        // Arrange
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        let f = |theta: &Array1<f64>| a.dot(theta);
        let theta_hat = array![1.0, -1.0];

        // Act
        let cov = calc_covariance(&f, &theta_hat, 10)
            .expect("covariance for diagonal quadratic should succeed");
        let se = standard_errors(&cov);

        // Assert
        assert!((cov[[0, 0]] - 0.025).abs() < 1e-6, "got {}", cov[[0, 0]]);
        assert!((cov[[1, 1]] - 0.1).abs() < 1e-6, "got {}", cov[[1, 1]]);
        assert!(cov[[0, 1]].abs() < 1e-6);
        assert!((se[0] - 0.025_f64.sqrt()).abs() < 1e-6);
        assert!((se[1] - 0.1_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a singular information matrix yields zero variance
    // along the flat direction instead of NaN or infinity.
    //
    // Given
    // -----
    // - Cost gradient g(θ) = A θ with A = diag(1, 0).
    //
    // Expect
    // ------
    // - Σ[1, 1] == 0 after eigenvalue truncation; Σ[0, 0] finite.
    fn calc_covariance_truncates_zero_eigenvalues() {
        // Arrange
        let a = array![[1.0, 0.0], [0.0, 0.0]];
        let f = |theta: &Array1<f64>| a.dot(theta);
        let theta_hat = array![0.5, 0.5];

        // Act
        let cov = calc_covariance(&f, &theta_hat, 1)
            .expect("covariance for singular quadratic should succeed");

        // Assert
        assert!((cov[[0, 0]] - 1.0).abs() < 1e-6, "got {}", cov[[0, 0]]);
        assert_eq!(cov[[1, 1]], 0.0);
        assert!(cov.iter().all(|v| v.is_finite()));
    }
}
