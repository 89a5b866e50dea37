//! demand::models — estimators behind the demand contract.
//!
//! Purpose
//! -------
//! Concrete demand estimators: the Poisson GLM primary path and the
//! logit-OLS fallback, together with the fitted-model type and the
//! tagged fallback outcome. The shared design-matrix plumbing lives in
//! `demand::core`.

pub mod glm;

pub use self::glm::{
    fit_demand_model, fit_on_data, fit_with_fallback, DemandModel, FitMethod, FitOutcome,
    PoissonLogLik,
};
