//! decision — price selection and explainability.
//!
//! Purpose
//! -------
//! Turn an elasticity curve into a concrete, constrained price decision
//! ([`optimizer`]) and decompose the result into a reconciled,
//! fixed-order waterfall of labeled contributions ([`waterfall`]).
//!
//! Key behaviors
//! -------------
//! - Expected-revenue argmax over the curve grid, with rounding before
//!   constraint checks and a deterministic lower-price tie-break.
//! - Advisory competitor median, optionally hardened into a band with
//!   clamping plus a `constraint_violation` flag; every decision also
//!   records its grid index and whether any constraint was binding.
//! - Exact waterfall reconciliation, with an explicit
//!   "rounding adjustment" step and warning when rounding left a
//!   residual.
//!
//! Invariants & assumptions
//! ------------------------
//! - Decisions are pure functions of their inputs; identical calls yield
//!   identical decisions.
//! - `ConstraintInfeasible` propagates unmodified; there is no silent
//!   clamping outside the competitor band path.

pub mod errors;
pub mod optimizer;
pub mod waterfall;

pub use self::errors::{DecisionError, DecisionResult};
pub use self::optimizer::{
    optimize_price, CompetitorBand, Constraints, PriceDecision, REVENUE_EPS,
};
pub use self::waterfall::{
    build_waterfall, AdjustmentCategory, Adjustments, ReconciliationWarning, Waterfall,
    WaterfallStep, RECONCILIATION_TOLERANCE, ROUNDING_ADJUSTMENT_LABEL,
};
