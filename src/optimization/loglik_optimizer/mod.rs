//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run L-BFGS with a
//! configurable line search, tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`].
//! - Expose a single entrypoint [`maximize`] that validates the initial
//!   guess with [`LogLikelihood::check`], selects an L-BFGS solver based
//!   on [`traits::LineSearcher`], drives the executor, and
//!   normalizes results into an [`OptimOutcome`].
//! - Provide robust finite-difference helpers in [`finite_diff`] for
//!   Hessians when analytic second derivatives are missing, with
//!   post-hoc validation.
//! - Centralize optimizer configuration ([`Tolerances`], [`MLEOptions`])
//!   and validation logic ([`validation`]) so downstream code can assume
//!   sane, finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by
//!   minimizing a cost `c(θ) = -ℓ(θ)`; model code implements `ℓ(θ)` and
//!   `∇ℓ(θ)` (when available), never the cost directly.
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] must treat
//!   invalid inputs as recoverable [`OptError`] values, not panics.
//! - Vectors and matrices use the canonical aliases [`Theta`], [`Grad`],
//!   [`types::Hessian`]; all are assumed finite whenever optimization
//!   proceeds.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping from constrained → unconstrained space
//!   happens in the model layer.
//! - All user-facing diagnostics (including [`OptimOutcome::value`]) are
//!   expressed in terms of the log-likelihood `ℓ`.
//! - Errors bubble up as [`OptResult<T>`] / [`OptError`]; this module and
//!   its children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Demand models implement [`LogLikelihood`] for their types, then call
//!   [`maximize`] with a model instance, an initial [`Theta`], a data
//!   payload, and an [`MLEOptions`] configuration.
//! - The inference layer uses [`finite_diff::numeric_hessian`] on the
//!   fitted gradient to build observed-information covariance.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions in [`adapter`],
//!   solver construction and tolerance wiring in [`run`],
//!   finite-difference + validation behavior in [`finite_diff`] and
//!   [`validation`], and configuration/outcome invariants in [`traits`].
//! - Integration tests exercise [`maximize`] implicitly by fitting demand
//!   models end to end.

pub mod adapter;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::run::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_pricing::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::run::maximize;
    pub use super::traits::{LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
