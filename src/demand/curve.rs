//! demand::curve — elasticity curves with confidence bounds.
//!
//! Purpose
//! -------
//! Sweep a fitted demand model across a price grid, holding all
//! non-price features at their most recent observed value, and attach
//! two-sided confidence bounds at an explicit confidence level. Bounds
//! come either analytically from the parameter covariance (delta method)
//! or from bootstrap resampling of the training design with a fixed
//! seed.
//!
//! Key behaviors
//! -------------
//! - One entry point, [`build_elasticity_curve`], dispatching on the
//!   configured [`BoundMethod`].
//! - Every point satisfies `0 <= low <= mean <= high <= 1`; crossing
//!   bounds at grid extremes are clamped, never returned.
//! - A bootstrap where fewer than half the replicates refit successfully
//!   degrades to analytic bounds rather than reporting quantiles of a
//!   thin sample.
//! - [`ElasticityCurve::flat`] is the heuristic fallback curve: constant
//!   probability equal to the observed historical booking rate, with
//!   degenerate bounds.
//!
//! Conventions
//! -----------
//! - The confidence level is two-sided; the standard-normal quantile is
//!   taken at `0.5 + level / 2` via `statrs`.
//! - Bootstrap resampling uses a seeded `StdRng`, so identical inputs
//!   and seeds reproduce the curve bit for bit.
//!
//! Downstream usage
//! ----------------
//! - The decision layer maximizes `price × mean` over the curve points;
//!   the evaluation layer recovers a predictive distribution from the
//!   bounds.
use crate::demand::core::{BoundMethod, DemandOptions, PriceGrid};
use crate::demand::errors::{DemandError, DemandResult};
use crate::demand::models::{fit_on_data, DemandModel};
use rand::{rngs::StdRng, Rng, SeedableRng};
use statrs::distribution::{ContinuousCDF, Normal};

/// One grid evaluation of the price-response function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticityPoint {
    pub price: f64,
    pub mean: f64,
    pub low: f64,
    pub high: f64,
}

/// Where a curve came from: a fitted model or the flat fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveSource {
    Model,
    FlatFallback,
}

/// Price-to-probability response with uncertainty bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticityCurve {
    points: Vec<ElasticityPoint>,
    confidence_level: f64,
    source: CurveSource,
}

impl ElasticityCurve {
    /// Heuristic flat curve at the observed booking rate, used when the
    /// model fit fell back. Bounds collapse onto the mean.
    pub fn flat(grid: &PriceGrid, rate: f64, confidence_level: f64) -> Self {
        let rate = rate.clamp(0.0, 1.0);
        let points = grid
            .prices()
            .iter()
            .map(|&price| ElasticityPoint { price, mean: rate, low: rate, high: rate })
            .collect();
        Self { points, confidence_level, source: CurveSource::FlatFallback }
    }

    /// Build a curve from precomputed points, re-clamping each one so
    /// the `low <= mean <= high` invariant holds regardless of caller.
    pub fn from_points(points: Vec<ElasticityPoint>, confidence_level: f64) -> Self {
        let points = points
            .into_iter()
            .map(|p| clamp_point(p.price, p.low, p.mean, p.high))
            .collect();
        Self { points, confidence_level, source: CurveSource::Model }
    }

    /// Grid points in ascending price order.
    pub fn points(&self) -> &[ElasticityPoint] {
        &self.points
    }

    /// Two-sided confidence level of the bounds.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Provenance of the curve.
    pub fn source(&self) -> CurveSource {
        self.source
    }
}

/// Build the elasticity curve for a fitted model over a price grid.
///
/// Dispatches on `options.bound_method`; the confidence level is taken
/// from `options.confidence_level`.
///
/// # Errors
/// - [`DemandError::InvalidConfidenceLevel`] for a level outside (0, 1).
/// - [`DemandError::ModelFit`] when the normal quantile cannot be
///   constructed.
pub fn build_elasticity_curve(
    model: &DemandModel, grid: &PriceGrid, options: &DemandOptions,
) -> DemandResult<ElasticityCurve> {
    match options.bound_method {
        BoundMethod::Analytic => analytic_curve(model, grid, options.confidence_level),
        BoundMethod::Bootstrap { samples, seed } => {
            bootstrap_curve(model, grid, options.confidence_level, samples, seed)
        }
    }
}

// ---- Helper methods ----

fn normal_quantile(confidence_level: f64) -> DemandResult<f64> {
    if !confidence_level.is_finite() || confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(DemandError::InvalidConfidenceLevel { level: confidence_level });
    }
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| DemandError::ModelFit { reason: e.to_string() })?;
    Ok(standard.inverse_cdf(0.5 + confidence_level / 2.0))
}

fn analytic_curve(
    model: &DemandModel, grid: &PriceGrid, confidence_level: f64,
) -> DemandResult<ElasticityCurve> {
    let z = normal_quantile(confidence_level)?;
    let points = grid
        .prices()
        .iter()
        .map(|&price| {
            let (low, mean, high) = model.predict_with_bounds(price, z);
            clamp_point(price, low, mean, high)
        })
        .collect();
    Ok(ElasticityCurve { points, confidence_level, source: CurveSource::Model })
}

fn bootstrap_curve(
    model: &DemandModel, grid: &PriceGrid, confidence_level: f64, samples: usize, seed: u64,
) -> DemandResult<ElasticityCurve> {
    if samples == 0 {
        return Err(DemandError::InvalidBootstrap { samples });
    }
    normal_quantile(confidence_level)?;

    let data = model.data();
    let n = data.n_rows();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut replicate_means: Vec<Vec<f64>> = Vec::with_capacity(samples);

    for _ in 0..samples {
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        if let Ok(refit) = fit_on_data(data.resample(&indices)) {
            let means = grid.prices().iter().map(|&p| refit.predict_mean(p)).collect();
            replicate_means.push(means);
        }
    }

    // A thin replicate sample gives unreliable quantiles; degrade to the
    // analytic bounds instead.
    if replicate_means.len() < samples.div_ceil(2) {
        return analytic_curve(model, grid, confidence_level);
    }

    let alpha = (1.0 - confidence_level) / 2.0;
    let points = grid
        .prices()
        .iter()
        .enumerate()
        .map(|(k, &price)| {
            let mut draws: Vec<f64> =
                replicate_means.iter().map(|means| means[k]).collect();
            draws.sort_by(|a, b| a.total_cmp(b));
            let low = empirical_quantile(&draws, alpha);
            let high = empirical_quantile(&draws, 1.0 - alpha);
            clamp_point(price, low, model.predict_mean(price), high)
        })
        .collect();
    Ok(ElasticityCurve { points, confidence_level, source: CurveSource::Model })
}

/// Nearest-rank quantile of a sorted, non-empty slice.
fn empirical_quantile(sorted: &[f64], q: f64) -> f64 {
    let idx = (q * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Enforce `0 <= low <= mean <= high <= 1` at a grid point.
fn clamp_point(price: f64, low: f64, mean: f64, high: f64) -> ElasticityPoint {
    let mean = mean.clamp(0.0, 1.0);
    let low = low.clamp(0.0, 1.0).min(mean);
    let high = high.clamp(0.0, 1.0).max(mean);
    ElasticityPoint { price, mean, low, high }
}
