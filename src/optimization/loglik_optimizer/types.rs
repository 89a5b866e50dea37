//! Shared type aliases for the log-likelihood optimizer.
//!
//! Conventions
//! -----------
//! - [`Theta`]/[`Grad`] are the standard parameter/gradient carriers
//!   throughout the crate; [`Hessian`] is the dense observed-information
//!   matrix consumed by `inference`.
//! - Solver aliases pin the concrete L-BFGS instantiations so builder
//!   code stays readable.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector in unconstrained optimizer space.
pub type Theta = Array1<f64>;

/// Gradient of the (average) log-likelihood with respect to [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian matrix over [`Theta`].
pub type Hessian = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Function-evaluation counters reported by `argmin`.
pub type FnEvalMap = HashMap<String, u64>;

/// Default L-BFGS memory when the caller does not override it.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search over crate parameter types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search over crate parameter types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS with Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS with More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
