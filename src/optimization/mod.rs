//! optimization — MLE stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed log-likelihood optimizer with a single error/result
//! surface. Callers implement a log-likelihood, choose tolerances, and
//! obtain fitted parameters and diagnostics without touching backend
//! solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), including configuration of solvers and
//!   stopping criteria.
//! - Normalize configuration issues, numerical failures, and backend
//!   solver errors into a single enum (`errors::OptError`) with a common
//!   result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ` and
//!   assume that inputs are finite once validation has passed; invalid
//!   states are reported as `OptError`, not panics.
//! - Log-likelihood implementations are expected to treat domain
//!   violations (e.g., negative demand counts, non-finite regressors) as
//!   recoverable errors surfaced through the optimization layer.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by
//!   minimizing an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and
//!   outcomes are expressed in terms of `ℓ`.
//! - Parameters, gradients, and Hessians are represented using
//!   `ndarray`-based aliases (`Theta`, `Grad`, `Hessian`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors or model-specific error enums.
//! - This module and its submodules avoid I/O and logging; higher layers
//!   are responsible for reporting progress and diagnostics.
//!
//! Downstream usage
//! ----------------
//! - Demand models implement `LogLikelihood` for their types and call
//!   `maximize` with a parameter guess, data payload, and `MLEOptions` to
//!   obtain an `OptimOutcome` (via `loglik_optimizer`).
//! - The inference layer uses the finite-difference Hessian helper to
//!   turn fitted parameters into a covariance estimate.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`, which forwards the submodule prelude and
//!   the core error types.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: solver wiring,
//!   tolerance handling, finite-difference validation, and conversions
//!   into `OptError`.
//! - Higher-level integration tests exercise end-to-end MLE workflows
//!   through the demand-model fitting path.

pub mod errors;
pub mod loglik_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_pricing::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
}
