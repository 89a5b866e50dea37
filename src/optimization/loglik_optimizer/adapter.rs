//! Adapter exposing a [`LogLikelihood`] as an `argmin` problem.
//!
//! Converts the maximization of `ℓ(θ)` into a minimization of
//! `c(θ) = -ℓ(θ)`. Analytic gradients, when provided, are negated
//! accordingly; otherwise the **cost** closure is finite-differenced
//! (central first, forward as the fallback), so no sign flip is needed in
//! that branch.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a model `LogLikelihood` to `argmin`'s `CostFunction` and
/// `Gradient` traits.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θ) = -ℓ(θ)`, rejecting non-finite objective values.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.f.value(theta, self.data)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value }.into());
        }
        Ok(-value)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Gradient of the cost at `θ`.
    ///
    /// - Analytic path: validate the model gradient and return its
    ///   negation.
    /// - Finite-difference path (on `GradientNotImplemented`): central
    ///   differences of the cost first; if an evaluation error was
    ///   captured or validation fails, retry once with forward
    ///   differences.
    ///
    /// The FD closure cannot return `Result`, so the first evaluation
    /// error is captured in `closure_err` and the closure yields `NaN`;
    /// the captured error is re-raised afterwards.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(grad) => {
                validate_grad(&grad, dim)?;
                Ok(-grad)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_fn = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(value) => value,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };

                let central = theta.central_diff(&cost_fn);
                if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
                    return Ok(central);
                }
                forward_diff_grad(theta, &cost_fn, &closure_err).map_err(Error::from)
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// Forward-difference gradient with error capture and validation.
fn forward_diff_grad<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&grad, theta.len())?;
    Ok(grad)
}
