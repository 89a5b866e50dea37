//! inference — covariance and standard errors at the fitted optimum.
//!
//! Purpose
//! -------
//! Turn fitted demand-model parameters into uncertainty estimates. The
//! single submodule [`hessian`] builds the observed information matrix
//! from finite-difference Hessians and converts it into a parameter
//! covariance via an eigen-based pseudoinverse.
//!
//! Key behaviors
//! -------------
//! - Compute `Σ = J(θ̂)⁺ / n` from the average-scale observed
//!   information.
//! - Expose per-parameter standard errors as the square roots of the
//!   covariance diagonal.
//!
//! Conventions
//! -----------
//! - Gradient maps handed to this layer are for the average negative
//!   log-likelihood (the optimizer cost scale).
//! - Errors are reported via `OptResult<T>`; no panics under the
//!   documented invariants.
//!
//! Downstream usage
//! ----------------
//! - The demand layer feeds the resulting covariance into delta-method
//!   confidence bounds for the elasticity curve.

pub mod hessian;

pub use self::hessian::{EIGEN_EPS, calc_covariance, standard_errors};
