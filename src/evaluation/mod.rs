//! evaluation — forecast scoring and KPI rollups.
//!
//! Purpose
//! -------
//! Close the loop on pricing decisions: score realized demand against
//! forecasts ([`forecast`]) and aggregate decision batches into key
//! performance indicators ([`kpi`]).
//!
//! Key behaviors
//! -------------
//! - Threshold-guarded MAPE that reports exclusions instead of dividing
//!   by near-zero actuals.
//! - Gaussian CRPS recovered from forecast bands; point forecasts never
//!   receive a silently approximated CRPS.
//! - A pure KPI rollup over already-computed decisions and scores.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every unavailable metric is `None`, never NaN.
//! - Nothing in this subtree refits models or re-searches price grids.

pub mod errors;
pub mod forecast;
pub mod kpi;

pub use self::errors::{EvalError, EvalResult};
pub use self::forecast::{
    evaluate_forecast, evaluate_forecast_with_bounds, EvalOptions, ForecastPoint,
    ForecastScore, DEFAULT_MAPE_THRESHOLD,
};
pub use self::kpi::{summarize_kpis, KpiInputs, KpiSummary};
