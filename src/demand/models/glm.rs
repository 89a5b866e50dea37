//! demand::models::glm — demand regression with explicit fallbacks.
//!
//! Purpose
//! -------
//! Fit the demand model that powers the elasticity curve. Count targets
//! use a ridge-penalized Poisson regression with a log link, maximized
//! through the shared L-BFGS stack; occupancy targets, and count fits
//! that fail to converge, use a closed-form ordinary least squares fit
//! on the logit-transformed sell-through probability.
//!
//! Key behaviors
//! -------------
//! - Enforce a minimum sample size before any fit is attempted;
//!   shortfalls surface as [`DemandError::DataInsufficient`], never as a
//!   degenerate fit.
//! - Run the Poisson maximum-likelihood fit with an analytic gradient;
//!   non-convergence or numerical failure triggers the logit-OLS
//!   fallback before any error reaches the caller.
//! - Produce a full parameter covariance for every successful fit:
//!   observed-information pseudoinverse for the GLM, classical
//!   `σ̂²(XᵀX + P)⁻¹` for the OLS path.
//! - Centralize the flat-elasticity fallback policy in
//!   [`fit_with_fallback`], which returns a tagged outcome instead of
//!   leaving each call site to improvise.
//!
//! Invariants & assumptions
//! ------------------------
//! - The linear predictor is clamped before exponentiation in both the
//!   likelihood value and its gradient, keeping the two consistent.
//! - Predictions are probabilities in [0, 1]: count-model means are
//!   normalized by in-sample capacity, logit-model means pass through
//!   the logistic function.
//! - Bound mapping is monotone (exp or logistic), so transforming the
//!   linear-predictor interval preserves `low <= mean <= high`.
//!
//! Conventions
//! -----------
//! - The likelihood is on the average scale, matching the optimizer and
//!   inference layers.
//! - Errors are reported via [`DemandResult`]; optimizer errors convert
//!   through `From<OptError>`.
//!
//! Downstream usage
//! ----------------
//! - `demand::curve` evaluates fitted models on a price grid and applies
//!   the confidence-bound machinery.
//!
//! Testing notes
//! -------------
//! - Unit tests fit intercept-only and price-bearing designs with known
//!   rates, exercise the minimum-sample gate, the occupancy path, and
//!   the tagged fallback outcome.
use crate::correlation::PricingWeights;
use crate::demand::core::{DemandData, DemandOptions};
use crate::demand::errors::{DemandError, DemandResult};
use crate::inference::calc_covariance;
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::loglik_optimizer::{
    maximize, Cost, Grad, LogLikelihood, MLEOptions, Theta,
};
use crate::series::{EnrichedSeries, TargetKind};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Linear predictors are clamped to this magnitude before
/// exponentiation.
const ETA_CLAMP: f64 = 30.0;

/// Probabilities are clipped away from {0, 1} before the logit
/// transform.
const LOGIT_EPS: f64 = 1e-6;

/// Which estimator produced a [`DemandModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMethod {
    /// Ridge-penalized Poisson regression with a log link.
    PoissonGlm,
    /// Ordinary least squares on logit-transformed probabilities.
    LogitOls,
}

/// Average Poisson log-likelihood with per-column ridge penalties.
///
/// `ℓ(θ) = (1/n) Σ [yᵢ ηᵢ − exp(ηᵢ)] − (1/2n) Σ penⱼ θⱼ²` with
/// `η = Xθ`. The `log(yᵢ!)` term is constant in θ and omitted.
#[derive(Debug, Clone, Copy)]
pub struct PoissonLogLik;

impl LogLikelihood for PoissonLogLik {
    type Data = DemandData;

    fn value(&self, theta: &Theta, data: &DemandData) -> OptResult<Cost> {
        let n = data.n_rows() as f64;
        let eta = data.design().dot(theta);
        let mut ll = 0.0;
        for (i, &y) in data.counts().iter().enumerate() {
            let e = eta[i].clamp(-ETA_CLAMP, ETA_CLAMP);
            ll += y * e - e.exp();
        }
        let penalty: f64 =
            data.penalties().iter().zip(theta.iter()).map(|(p, t)| p * t * t).sum();
        let value = ll / n - penalty / (2.0 * n);
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value });
        }
        Ok(value)
    }

    fn check(&self, theta: &Theta, data: &DemandData) -> OptResult<()> {
        if theta.len() != data.n_params() {
            return Err(OptError::GradientDimMismatch {
                expected: data.n_params(),
                found: theta.len(),
            });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidTheta { index, value });
            }
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &DemandData) -> OptResult<Grad> {
        let n = data.n_rows() as f64;
        let eta = data.design().dot(theta);
        let residual = Array1::from_iter(
            data.counts()
                .iter()
                .zip(eta.iter())
                .map(|(&y, &e)| y - e.clamp(-ETA_CLAMP, ETA_CLAMP).exp()),
        );
        let mut grad = data.design().t().dot(&residual) / n;
        for j in 0..grad.len() {
            grad[j] -= data.penalties()[j] * theta[j] / n;
        }
        Ok(grad)
    }
}

/// Fitted demand model: coefficients, covariance, and everything needed
/// to predict a sell-through probability at a candidate price.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandModel {
    pub method: FitMethod,
    pub coefficients: Array1<f64>,
    pub covariance: Array2<f64>,
    pub converged: bool,
    /// Average log-likelihood at the optimum; absent for the OLS path.
    pub log_likelihood: Option<f64>,
    data: DemandData,
}

impl DemandModel {
    /// Training payload the model was fitted on.
    pub fn data(&self) -> &DemandData {
        &self.data
    }

    /// Mean predicted sell-through probability at `price`, with all
    /// non-price features held at their most recent observed value.
    pub fn predict_mean(&self, price: f64) -> f64 {
        let row = self.data.row_for_price(price);
        self.map_eta(row.dot(&self.coefficients))
    }

    /// Mean prediction together with two-sided confidence bounds at the
    /// given standard-normal quantile `z`.
    ///
    /// The interval is built on the linear-predictor scale via the delta
    /// method (`var(η) = xᵀ Σ x`) and mapped through the monotone link,
    /// then clamped so `0 <= low <= mean <= high <= 1`.
    pub fn predict_with_bounds(&self, price: f64, z: f64) -> (f64, f64, f64) {
        let row = self.data.row_for_price(price);
        let eta = row.dot(&self.coefficients);
        let var = row.dot(&self.covariance.dot(&row)).max(0.0);
        let half_width = z * var.sqrt();
        let mean = self.map_eta(eta);
        let low = self.map_eta(eta - half_width).min(mean);
        let high = self.map_eta(eta + half_width).max(mean);
        (low, mean, high)
    }

    fn map_eta(&self, eta: f64) -> f64 {
        let eta = eta.clamp(-ETA_CLAMP, ETA_CLAMP);
        match self.method {
            FitMethod::PoissonGlm => (eta.exp() / self.data.capacity()).clamp(0.0, 1.0),
            FitMethod::LogitOls => logistic(eta),
        }
    }
}

/// Tagged result of [`fit_with_fallback`]: either a fitted model or the
/// flat-elasticity fallback with its cause attached.
#[derive(Debug, Clone)]
pub enum FitOutcome {
    Fitted(DemandModel),
    FlatFallback { rate: f64, cause: DemandError },
}

/// Fit a demand model for the series, or fail with a typed error.
///
/// Count targets are fitted with the Poisson GLM first; a failed or
/// non-converged fit falls through to logit-OLS. Occupancy targets use
/// logit-OLS directly.
///
/// # Errors
/// - [`DemandError::DataInsufficient`] below `options.min_observations`.
/// - [`DemandError::ModelFit`] when the design has fewer rows than
///   parameters or every estimator fails numerically.
pub fn fit_demand_model(
    series: &EnrichedSeries, weights: &PricingWeights, options: &DemandOptions,
) -> DemandResult<DemandModel> {
    if series.len() < options.min_observations {
        return Err(DemandError::DataInsufficient {
            rows: series.len(),
            required: options.min_observations,
        });
    }
    let data = DemandData::from_series(series, weights, options.ridge);
    if data.n_rows() < data.n_params() {
        return Err(DemandError::ModelFit {
            reason: format!(
                "design has {} rows for {} parameters",
                data.n_rows(),
                data.n_params()
            ),
        });
    }
    fit_on_data(data)
}

/// Fit directly on a prepared design. Used by the bootstrap, which
/// resamples rows of an already-built [`DemandData`].
pub fn fit_on_data(data: DemandData) -> DemandResult<DemandModel> {
    match data.target_kind() {
        TargetKind::Count => match fit_poisson(&data) {
            Ok(model) => Ok(model),
            Err(_) => fit_logit_ols(data),
        },
        TargetKind::Occupancy => fit_logit_ols(data),
    }
}

/// Fit with the flat-elasticity fallback policy applied.
///
/// Recoverable failures (`DataInsufficient`, `ModelFit`) become a
/// [`FitOutcome::FlatFallback`] carrying the historical booking rate and
/// the cause, so callers receive the non-fatal signal alongside the
/// fallback instead of an exception.
pub fn fit_with_fallback(
    series: &EnrichedSeries, weights: &PricingWeights, options: &DemandOptions,
) -> FitOutcome {
    match fit_demand_model(series, weights, options) {
        Ok(model) => FitOutcome::Fitted(model),
        Err(cause) => FitOutcome::FlatFallback { rate: series.booking_rate(), cause },
    }
}

// ---- Helper methods ----

fn fit_poisson(data: &DemandData) -> DemandResult<DemandModel> {
    let p = data.n_params();
    let n = data.n_rows();
    let mean_count =
        (data.counts().sum() / n as f64).max(LOGIT_EPS);

    // Columns are standardized, so starting at the log of the mean count
    // for the intercept and zero elsewhere is a reasonable guess.
    let mut theta0 = Array1::<f64>::zeros(p);
    theta0[0] = mean_count.ln();

    let model = PoissonLogLik;
    let outcome = maximize(&model, theta0, data, &MLEOptions::default())?;
    if !outcome.converged {
        return Err(DemandError::ModelFit {
            reason: format!("Poisson fit did not converge: {}", outcome.status),
        });
    }

    // Covariance from the observed information of the average cost.
    let cost_grad = |theta: &Array1<f64>| -> Array1<f64> {
        match model.grad(theta, data) {
            Ok(grad) => -grad,
            Err(_) => Array1::from_elem(theta.len(), f64::NAN),
        }
    };
    let covariance = calc_covariance(&cost_grad, &outcome.theta_hat, n)?;

    Ok(DemandModel {
        method: FitMethod::PoissonGlm,
        coefficients: outcome.theta_hat,
        covariance,
        converged: true,
        log_likelihood: Some(outcome.value),
        data: data.clone(),
    })
}

fn fit_logit_ols(data: DemandData) -> DemandResult<DemandModel> {
    let n = data.n_rows();
    let p = data.n_params();
    let capacity = data.capacity();

    let x = DMatrix::<f64>::from_fn(n, p, |i, j| data.design()[[i, j]]);
    let z = DVector::<f64>::from_fn(n, |i, _| {
        let prob = (data.counts()[i] / capacity).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
        (prob / (1.0 - prob)).ln()
    });

    let mut normal = x.transpose() * &x;
    for j in 0..p {
        normal[(j, j)] += data.penalties()[j];
    }
    let rhs = x.transpose() * &z;

    let chol = normal.clone().cholesky().ok_or_else(|| DemandError::ModelFit {
        reason: "singular design matrix in logit-OLS fit".to_string(),
    })?;
    let beta = chol.solve(&rhs);

    let residuals = &z - &x * &beta;
    let dof = (n.saturating_sub(p)).max(1) as f64;
    let sigma2 = residuals.iter().map(|r| r * r).sum::<f64>() / dof;

    let normal_inv = chol.inverse();
    let covariance =
        Array2::from_shape_fn((p, p), |(i, j)| sigma2 * normal_inv[(i, j)]);
    let coefficients = Array1::from_iter(beta.iter().copied());

    Ok(DemandModel {
        method: FitMethod::LogitOls,
        coefficients,
        covariance,
        converged: true,
        log_likelihood: None,
        data,
    })
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
