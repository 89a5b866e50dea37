//! demand — demand/elasticity modeling for the pricing core.
//!
//! Purpose
//! -------
//! Turn an enriched observation series into a price-response function
//! with uncertainty: fit a demand model ([`models`]), evaluate it across
//! a price grid ([`curve`]), and expose every failure mode and fallback
//! explicitly ([`errors`]).
//!
//! Key behaviors
//! -------------
//! - Regress observed demand on price and the complete feature columns,
//!   with a log link for counts and a logit-OLS fallback.
//! - Gate fitting on a minimum sample size; below it, callers receive
//!   `DataInsufficient` plus the flat-elasticity fallback through the
//!   tagged [`FitOutcome`].
//! - Sweep the fitted model across a [`PriceGrid`] with all non-price
//!   features held at their most recent observed value, attaching
//!   analytic or seeded-bootstrap confidence bounds.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every curve point satisfies `0 <= low <= mean <= high <= 1`.
//! - All configuration travels as explicit structs ([`DemandOptions`]);
//!   no process-wide state.
//! - Deterministic methods are bit-for-bit reproducible; the bootstrap
//!   is reproducible under a fixed seed.
//!
//! Downstream usage
//! ----------------
//! - `decision` maximizes expected revenue over the curve; `evaluation`
//!   scores realized demand against the curve's predictive distribution.

pub mod core;
pub mod curve;
pub mod errors;
pub mod models;

pub use self::core::{
    BoundMethod, DemandData, DemandOptions, PriceGrid, DEFAULT_CONFIDENCE_LEVEL,
    DEFAULT_GRID_MARGIN, DEFAULT_GRID_POINTS, DEFAULT_MIN_OBSERVATIONS, DEFAULT_RIDGE,
};
pub use self::curve::{build_elasticity_curve, CurveSource, ElasticityCurve, ElasticityPoint};
pub use self::errors::{DemandError, DemandResult};
pub use self::models::{
    fit_demand_model, fit_with_fallback, DemandModel, FitMethod, FitOutcome,
};
