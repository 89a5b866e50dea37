//! loglik_optimizer::run — the `maximize` entry point.
//!
//! Purpose
//! -------
//! Assemble a configured L-BFGS solver for a wrapped log-likelihood
//! problem, drive it through `argmin`'s executor, and translate the raw
//! solver state into an [`OptimOutcome`] on the log-likelihood scale.
//!
//! Key behaviors
//! -------------
//! - [`maximize`] validates the initial guess with
//!   [`LogLikelihood::check`] before any solver work happens.
//! - The line-search strategy is chosen from
//!   [`MLEOptions::line_searcher`]; tolerances that are `None` leave the
//!   `argmin` defaults untouched.
//! - With the `obs_slog` feature and `opts.verbose`, the run attaches a
//!   terminal slog observer and prints the starting objective.
//!
//! Invariants & assumptions
//! ------------------------
//! - The executor minimizes `-ℓ(θ)`; every value reported outward is
//!   flipped back to the `ℓ` scale.
//! - L-BFGS memory comes from `opts.lbfgs_mem`, defaulting to
//!   [`DEFAULT_LBFGS_MEM`].
//!
//! Conventions
//! -----------
//! - `argmin::core::Error` never crosses this module's boundary; it is
//!   converted into [`OptError`](crate::optimization::errors::OptError).
//!
//! Testing notes
//! -------------
//! - Covered by tolerance-wiring tests and a quadratic maximization
//!   round-trip; demand-model likelihoods exercise it end to end.
use argmin::{
    core::{Executor, State},
    solver::quasinewton::LBFGS,
};

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Maximize a log-likelihood `ℓ(θ)` with L-BFGS.
///
/// # Parameters
/// - `f`: model implementing [`LogLikelihood`].
/// - `theta0`: initial parameter vector, consumed by the executor.
/// - `data`: model data forwarded to `value`/`grad`.
/// - `opts`: optimizer configuration.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates `argmin` construction and runtime errors (rejected
///   tolerances, line-search failures, non-finite objective values) and
///   validation errors from [`OptimOutcome::new`].
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            execute(problem, more_thuente_solver(opts)?, theta0, opts)
        }
        LineSearcher::HagerZhang => {
            execute(problem, hager_zhang_solver(opts)?, theta0, opts)
        }
    }
}

// ---- Helper methods ----

/// L-BFGS with More–Thuente line search and tolerances applied.
fn more_thuente_solver(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    with_tolerances(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// L-BFGS with Hager–Zhang line search and tolerances applied.
fn hager_zhang_solver(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    with_tolerances(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// Wire optional gradient / cost-change tolerances into a solver.
///
/// Absent tolerances are simply not set, so `argmin`'s defaults stay in
/// effect.
fn with_tolerances<L>(
    solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let solver = match opts.tols.tol_grad {
        Some(g) => solver.with_tolerance_grad(g)?,
        None => solver,
    };
    let solver = match opts.tols.tol_cost {
        Some(c) => solver.with_tolerance_cost(c)?,
        None => solver,
    };
    Ok(solver)
}

/// Drive a configured solver and normalize the terminal state.
fn execute<'a, F, S>(
    problem: ArgMinAdapter<'a, F>, solver: S, theta0: Theta, opts: &MLEOptions,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let ll0 = -problem.cost(&theta0)?;
        match problem.gradient(&theta0) {
            Ok(g0) => eprintln!("start: ell = {:.6}, ||grad|| = {:.6}", ll0, g0.l2_norm()),
            Err(_) => eprintln!("start: ell = {ll0:.6}"),
        }
    }

    let max_iter = opts.tols.max_iter;
    let runner = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iter {
            Some(cap) => state.max_iters(cap as u64),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    let runner = if opts.verbose {
        runner.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        )
    } else {
        runner
    };

    let mut terminal = runner.run()?.state().clone();
    let status = terminal.get_termination_status().clone();
    let iterations = terminal.get_iter();
    let evals = terminal.get_func_counts().clone();
    let grad = terminal.take_gradient();
    let best_ll = -terminal.get_best_cost();
    OptimOutcome::new(terminal.take_best_param(), best_ll, status, iterations, evals, grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptResult, loglik_optimizer::traits::Tolerances};
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Solver construction for both line searches, with and without
    //   explicit memory and tolerances.
    // - A full maximize round-trip on a concave quadratic.
    //
    // They intentionally DO NOT cover:
    // - Specific demand-model log-likelihoods (tested in the demand layer).
    // -------------------------------------------------------------------------

    struct ConcaveQuadratic;

    impl LogLikelihood for ConcaveQuadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            let shifted = theta - &array![1.0, -2.0];
            Ok(-shifted.dot(&shifted))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok((theta - &array![1.0, -2.0]).mapv(|x| -2.0 * x))
        }
    }

    #[test]
    // Purpose
    // -------
    // Solver assembly must succeed for both line searches, with default
    // memory, explicit memory, and absent tolerances.
    //
    // Given
    // -----
    // - Options combining `lbfgs_mem` of `None` / `Some(11)` with full
    //   and empty tolerance sets.
    //
    // Expect
    // ------
    // - Every assembly returns `Ok(_)`.
    fn solver_assembly_accepts_all_configurations() {
        // Arrange
        let full = Tolerances::new(Some(1e-6), Some(1e-8), Some(50))
            .expect("Tolerances should be valid");
        let sparse = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let default_mem = MLEOptions::new(full, LineSearcher::HagerZhang, false, None)
            .expect("MLEOptions should be valid");
        let explicit_mem = MLEOptions::new(full, LineSearcher::MoreThuente, false, Some(11))
            .expect("MLEOptions should be valid");
        let no_tols = MLEOptions::new(sparse, LineSearcher::MoreThuente, false, None)
            .expect("MLEOptions should be valid");

        // Act / Assert
        assert!(hager_zhang_solver(&default_mem).is_ok());
        assert!(hager_zhang_solver(&explicit_mem).is_ok());
        assert!(more_thuente_solver(&explicit_mem).is_ok());
        assert!(more_thuente_solver(&no_tols).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A full `maximize` run on a concave quadratic must recover the known
    // maximizer and report the value on the log-likelihood scale.
    //
    // Given
    // -----
    // - ℓ(θ) = -||θ - (1, -2)||² with analytic gradient.
    // - Default options (More–Thuente, tol_grad 1e-6).
    //
    // Expect
    // ------
    // - θ̂ within 1e-4 of (1, -2); ℓ(θ̂) within 1e-6 of 0.
    fn maximize_recovers_quadratic_maximizer() {
        // Arrange
        let model = ConcaveQuadratic;
        let theta0: Theta = Array1::from(vec![0.0_f64, 0.0]);
        let opts = MLEOptions::default();

        // Act
        let out = maximize(&model, theta0, &(), &opts).expect("maximize should succeed");

        // Assert
        assert!((out.theta_hat[0] - 1.0).abs() < 1e-4, "got {}", out.theta_hat[0]);
        assert!((out.theta_hat[1] + 2.0).abs() < 1e-4, "got {}", out.theta_hat[1]);
        assert!(out.value.abs() < 1e-6, "got {}", out.value);
    }
}
