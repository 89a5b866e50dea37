//! evaluation::forecast — MAPE, CRPS, and band coverage.
//!
//! Purpose
//! -------
//! Score realized demand against forecasts. Point forecasts receive a
//! threshold-guarded MAPE only; forecasts carrying confidence bounds
//! additionally receive band coverage and a Gaussian CRPS recovered from
//! the band width. CRPS is never approximated silently from a point
//! forecast.
//!
//! Key behaviors
//! -------------
//! - MAPE is computed only over actuals above `mape_threshold`; excluded
//!   points are counted and reported, and a fully excluded series
//!   reports MAPE as unavailable rather than NaN.
//! - CRPS uses the closed-form expression for a normal predictive
//!   distribution, with the standard deviation recovered from
//!   `(high - low) / (2 z)` at the stated confidence level. A zero-width
//!   band degrades to the absolute error, which is the CRPS of a point
//!   mass.
//! - Band coverage is the fraction of actuals inside `[low, high]`.
//!
//! Conventions
//! -----------
//! - MAPE is reported in percent.
//! - Errors are reported via [`EvalResult`]; mismatched lengths are a
//!   caller bug, not a score of zero.
use crate::evaluation::errors::{EvalError, EvalResult};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Actuals at or below this value are excluded from MAPE by default.
pub const DEFAULT_MAPE_THRESHOLD: f64 = 1.0;

/// Scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalOptions {
    /// Minimum actual value for a point to enter the MAPE sum.
    pub mape_threshold: f64,
    /// Two-sided confidence level the forecast bounds were built at;
    /// used to recover the predictive standard deviation for CRPS.
    pub confidence_level: f64,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { mape_threshold: DEFAULT_MAPE_THRESHOLD, confidence_level: 0.80 }
    }
}

/// One forecast with a predictive interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub mean: f64,
    pub low: f64,
    pub high: f64,
}

/// Scores for one forecast/actual pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastScore {
    /// Mean absolute percentage error over included points, in percent;
    /// `None` when every point was excluded.
    pub mape: Option<f64>,
    /// Number of points excluded from MAPE by the threshold.
    pub mape_excluded: usize,
    /// Mean continuous ranked probability score; `None` for point
    /// forecasts, which carry no predictive distribution.
    pub crps: Option<f64>,
    /// Fraction of actuals inside the forecast band; `None` for point
    /// forecasts.
    pub band_coverage: Option<f64>,
}

/// Score point forecasts. CRPS and coverage are reported unavailable.
///
/// # Errors
/// - [`EvalError::LengthMismatch`] / [`EvalError::Empty`].
pub fn evaluate_forecast(
    forecast: &[f64], actual: &[f64], options: &EvalOptions,
) -> EvalResult<ForecastScore> {
    check_lengths(forecast.len(), actual.len())?;
    let (mape, mape_excluded) = mape_over_threshold(forecast, actual, options.mape_threshold);
    Ok(ForecastScore { mape, mape_excluded, crps: None, band_coverage: None })
}

/// Score forecasts that carry a predictive interval.
///
/// # Errors
/// - [`EvalError::LengthMismatch`] / [`EvalError::Empty`].
/// - [`EvalError::InvalidConfidenceLevel`] when
///   `options.confidence_level` is not strictly inside (0, 1); CRPS is
///   never degraded silently to absolute error.
pub fn evaluate_forecast_with_bounds(
    forecast: &[ForecastPoint], actual: &[f64], options: &EvalOptions,
) -> EvalResult<ForecastScore> {
    check_lengths(forecast.len(), actual.len())?;
    if !(options.confidence_level > 0.0 && options.confidence_level < 1.0) {
        return Err(EvalError::InvalidConfidenceLevel { value: options.confidence_level });
    }
    let means: Vec<f64> = forecast.iter().map(|p| p.mean).collect();
    let (mape, mape_excluded) = mape_over_threshold(&means, actual, options.mape_threshold);

    let covered = forecast
        .iter()
        .zip(actual.iter())
        .filter(|(p, &a)| a >= p.low && a <= p.high)
        .count();
    let band_coverage = Some(covered as f64 / actual.len() as f64);

    // z > 0 for every validated confidence level.
    let z = normal_quantile(options.confidence_level);
    let crps_sum: f64 = forecast
        .iter()
        .zip(actual.iter())
        .map(|(p, &a)| {
            let sigma = ((p.high - p.low) / (2.0 * z)).max(0.0);
            gaussian_crps(p.mean, sigma, a)
        })
        .sum();
    let crps = Some(crps_sum / actual.len() as f64);

    Ok(ForecastScore { mape, mape_excluded, crps, band_coverage })
}

// ---- Helper methods ----

fn check_lengths(forecast: usize, actual: usize) -> EvalResult<()> {
    if forecast != actual {
        return Err(EvalError::LengthMismatch { forecast, actual });
    }
    if actual == 0 {
        return Err(EvalError::Empty);
    }
    Ok(())
}

/// MAPE in percent over actuals above the threshold, plus the exclusion
/// count. Fully excluded series report `None`.
fn mape_over_threshold(
    forecast: &[f64], actual: &[f64], threshold: f64,
) -> (Option<f64>, usize) {
    let mut sum = 0.0;
    let mut included = 0usize;
    for (&f, &a) in forecast.iter().zip(actual.iter()) {
        if a > threshold {
            sum += ((a - f) / a).abs();
            included += 1;
        }
    }
    let excluded = actual.len() - included;
    if included == 0 {
        (None, excluded)
    } else {
        (Some(100.0 * sum / included as f64), excluded)
    }
}

/// Two-sided normal quantile of a confidence level already validated to
/// lie in (0, 1).
fn normal_quantile(confidence_level: f64) -> f64 {
    match Normal::new(0.0, 1.0) {
        Ok(standard) => standard.inverse_cdf(0.5 + confidence_level / 2.0),
        Err(_) => 0.0,
    }
}

/// Closed-form CRPS of a normal predictive distribution.
///
/// `crps(μ, σ; y) = σ [ z(2Φ(z) − 1) + 2φ(z) − 1/√π ]` with
/// `z = (y − μ)/σ`; a point mass (`σ = 0`) scores `|y − μ|`.
fn gaussian_crps(mean: f64, sigma: f64, observed: f64) -> f64 {
    if sigma <= 0.0 {
        return (observed - mean).abs();
    }
    let standard = match Normal::new(0.0, 1.0) {
        Ok(n) => n,
        Err(_) => return (observed - mean).abs(),
    };
    let z = (observed - mean) / sigma;
    sigma
        * (z * (2.0 * standard.cdf(z) - 1.0) + 2.0 * standard.pdf(z)
            - 1.0 / std::f64::consts::PI.sqrt())
}
