//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait demand models implement.
//! - [`MLEOptions`] and [`Tolerances`]: optimizer configuration.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by `maximize`.
//!
//! Convention: we *maximize* a model log-likelihood `ℓ(θ)` by minimizing
//! the cost `c(θ) = -ℓ(θ)`. An analytic gradient, when provided, is the
//! gradient of the log-likelihood; the adapter flips the sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Model-implemented log-likelihood interface.
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)` on the
///   average scale (per observation), so tolerances are sample-size
///   independent.
/// - `check(&Theta, &Data) -> OptResult<()>`: one-shot validation hook,
///   called before optimization starts.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic `∇ℓ(θ)`. When not
///   implemented, robust finite differences of the cost are used.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside L-BFGS.
///
/// Parses case-insensitively from `"MoreThuente"` / `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "valid options are 'MoreThuente' or 'HagerZhang' (case-insensitive)",
            }),
        }
    }
}

/// Numerical tolerances and iteration limits.
///
/// Any field may be `None`, but at least one of the three must be set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] when `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "maximum iterations must be greater than zero",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Optimizer-level configuration.
///
/// Default: `tol_grad = 1e-6`, `max_iter = 300`, More–Thuente line
/// search, default L-BFGS memory, not verbose.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Build options; numeric validation lives in [`Tolerances::new`].
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(mem) = lbfgs_mem {
            if mem == 0 {
                return Err(OptError::InvalidLbfgsMem {
                    mem,
                    reason: "L-BFGS memory must be greater than zero",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ̂)` (not the cost).
/// - `converged`: `true` when the solver reported any terminating status
///   other than `NotTerminated`.
/// - `status`: human-readable termination status.
/// - `iterations` / `fn_evals`: solver diagnostics.
/// - `grad_norm`: L2 norm of the last gradient, when available.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// Propagates validation failures for `theta_hat` (absent or
    /// non-finite) and `value` (non-finite).
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "not terminated".to_string()),
            other => (true, format!("{other:?}")),
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashMap;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Configuration validation, line-search parsing, and outcome
    // construction. Solver behavior is covered in run.rs and by the
    // demand-model tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerances must require at least one criterion and reject
    // non-positive values; MLEOptions must reject zero L-BFGS memory.
    //
    // Given / Expect: see asserts.
    fn configuration_is_validated() {
        assert!(matches!(
            Tolerances::new(None, None, None),
            Err(OptError::NoTolerancesProvided)
        ));
        assert!(Tolerances::new(Some(1e-8), None, Some(100)).is_ok());
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));

        let tols = Tolerances::new(Some(1e-6), None, Some(50)).unwrap();
        assert!(matches!(
            MLEOptions::new(tols, LineSearcher::HagerZhang, false, Some(0)),
            Err(OptError::InvalidLbfgsMem { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Line-search names parse case-insensitively; unknown names are
    // rejected with the offending string.
    //
    // Given / Expect: see asserts.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("morethuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert!(matches!(
            "newton".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // OptimOutcome::new must map NotTerminated to converged = false and
    // reject a missing theta_hat.
    //
    // Given
    // -----
    // - Raw state with and without a parameter vector.
    //
    // Expect
    // ------
    // - converged=false/"not terminated" in the first case; an error in
    //   the second.
    fn outcome_maps_termination_and_validates_theta() {
        // Arrange / Act
        let out = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            -3.5,
            TerminationStatus::NotTerminated,
            12,
            HashMap::new(),
            Some(array![1e-7, 0.0]),
        )
        .expect("outcome should validate");

        // Assert
        assert!(!out.converged);
        assert_eq!(out.status, "not terminated");
        assert_eq!(out.iterations, 12);
        assert!(out.grad_norm.unwrap() > 0.0);

        assert!(matches!(
            OptimOutcome::new(
                None,
                0.0,
                TerminationStatus::NotTerminated,
                0,
                HashMap::new(),
                None
            ),
            Err(OptError::MissingThetaHat)
        ));
    }
}
