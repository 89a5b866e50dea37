//! demand::core::options — fitting configuration and price grids.
//!
//! Purpose
//! -------
//! Hold the explicit configuration the demand layer accepts: minimum
//! sample sizes, confidence levels, confidence-bound method, ridge
//! strength, and the price grid the elasticity curve is evaluated on.
//! Nothing here is global; every knob travels with the call.
//!
//! Key behaviors
//! -------------
//! - Validate configuration on construction so downstream code can
//!   assume sane values.
//! - Build price grids from observed history, extended by a fractional
//!   margin, with the grid size bounded by the caller.
//! - Degenerate to a single-point grid when history shows no price
//!   variation, so a flat curve reproduces the only price ever charged.
//!
//! Conventions
//! -----------
//! - Confidence levels are two-sided and lie in the open interval
//!   (0, 1); the default is 0.80.
//! - Grid prices are strictly ascending and finite.
//! - Errors are reported via [`DemandResult`].
use crate::demand::errors::{DemandError, DemandResult};
use crate::series::EnrichedSeries;

/// Minimum observation count before a fit is attempted.
pub const DEFAULT_MIN_OBSERVATIONS: usize = 20;

/// Default two-sided confidence level for elasticity bounds.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.80;

/// Default fractional extension of the observed price range.
pub const DEFAULT_GRID_MARGIN: f64 = 0.10;

/// Default number of grid points.
pub const DEFAULT_GRID_POINTS: usize = 50;

/// Default ridge strength applied to standardized feature columns.
pub const DEFAULT_RIDGE: f64 = 1e-4;

/// How confidence bounds around the elasticity curve are obtained.
///
/// `Analytic` uses the delta method on the fitted parameter covariance.
/// `Bootstrap` refits on resamples of the training set with a fixed seed
/// for reproducibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundMethod {
    Analytic,
    Bootstrap { samples: usize, seed: u64 },
}

impl Default for BoundMethod {
    fn default() -> Self {
        BoundMethod::Analytic
    }
}

/// Explicit configuration for demand-model fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandOptions {
    pub min_observations: usize,
    pub confidence_level: f64,
    pub bound_method: BoundMethod,
    pub ridge: f64,
}

impl DemandOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`DemandError::InvalidConfidenceLevel`] when the level is not in
    ///   the open interval (0, 1).
    /// - [`DemandError::InvalidBootstrap`] when a bootstrap method is
    ///   requested with zero samples.
    pub fn new(
        min_observations: usize, confidence_level: f64, bound_method: BoundMethod, ridge: f64,
    ) -> DemandResult<Self> {
        if !confidence_level.is_finite() || confidence_level <= 0.0 || confidence_level >= 1.0 {
            return Err(DemandError::InvalidConfidenceLevel { level: confidence_level });
        }
        if let BoundMethod::Bootstrap { samples, .. } = bound_method {
            if samples == 0 {
                return Err(DemandError::InvalidBootstrap { samples });
            }
        }
        Ok(Self { min_observations, confidence_level, bound_method, ridge: ridge.max(0.0) })
    }
}

impl Default for DemandOptions {
    fn default() -> Self {
        Self {
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            bound_method: BoundMethod::Analytic,
            ridge: DEFAULT_RIDGE,
        }
    }
}

/// Ascending grid of candidate prices for curve evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    prices: Vec<f64>,
}

impl PriceGrid {
    /// Build an evenly spaced grid over `[min, max]` with `points`
    /// entries.
    ///
    /// A degenerate range (`min == max`) yields a single-point grid.
    ///
    /// # Errors
    /// - [`DemandError::InvalidGrid`] for non-finite bounds, an inverted
    ///   range, or zero points.
    pub fn new(min: f64, max: f64, points: usize) -> DemandResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DemandError::InvalidGrid { reason: format!("non-finite bounds [{min}, {max}]") });
        }
        if min > max {
            return Err(DemandError::InvalidGrid {
                reason: format!("lower bound {min} exceeds upper bound {max}"),
            });
        }
        if points == 0 {
            return Err(DemandError::InvalidGrid { reason: "grid must have at least one point".to_string() });
        }
        if min == max || points == 1 {
            return Ok(Self { prices: vec![min] });
        }
        let step = (max - min) / (points - 1) as f64;
        let prices = (0..points).map(|i| min + step * i as f64).collect();
        Ok(Self { prices })
    }

    /// Build a grid from observed history, extending the historical
    /// min/max by a fractional `margin`.
    ///
    /// When the series shows no price variation, the grid collapses to
    /// the single observed price: there is nothing to sweep, and a flat
    /// curve should reproduce the price actually charged.
    pub fn from_series(series: &EnrichedSeries, margin: f64, points: usize) -> DemandResult<Self> {
        let (lo, hi) = series.price_range();
        if (hi - lo).abs() < f64::EPSILON {
            return Self::new(lo, lo, 1);
        }
        let margin = margin.max(0.0);
        let lower = (lo * (1.0 - margin)).max(0.0);
        let upper = hi * (1.0 + margin);
        Self::new(lower, upper, points)
    }

    /// Grid prices in ascending order.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the grid is empty (never true for a constructed grid).
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{EnrichedRecord, EnrichedSeries, Feature, TargetKind};
    use std::collections::BTreeMap;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Option validation and grid construction, including the degenerate
    // constant-price case. Curve behavior on these grids is tested in the
    // curve module.
    // -------------------------------------------------------------------------

    fn series_with_prices(prices: &[f64]) -> EnrichedSeries {
        let records = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut features = BTreeMap::new();
                features.insert(Feature::TempMax, 20.0);
                EnrichedRecord::new(i as i64, 10.0, p, features)
            })
            .collect();
        EnrichedSeries::new(records, TargetKind::Count).expect("series should validate")
    }

    #[test]
    // Purpose
    // -------
    // Options must reject out-of-range confidence levels and zero-sample
    // bootstrap configurations.
    //
    // Given / Expect: see asserts.
    fn options_validate_confidence_and_bootstrap() {
        assert!(matches!(
            DemandOptions::new(20, 1.0, BoundMethod::Analytic, DEFAULT_RIDGE),
            Err(DemandError::InvalidConfidenceLevel { .. })
        ));
        assert!(matches!(
            DemandOptions::new(20, 0.8, BoundMethod::Bootstrap { samples: 0, seed: 7 }, 0.0),
            Err(DemandError::InvalidBootstrap { .. })
        ));
        assert!(DemandOptions::new(20, 0.8, BoundMethod::Analytic, DEFAULT_RIDGE).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // An explicit grid must be evenly spaced, ascending, and hit both
    // endpoints.
    //
    // Given
    // -----
    // - Range [90, 110] with 5 points.
    //
    // Expect
    // ------
    // - Prices [90, 95, 100, 105, 110].
    fn grid_is_evenly_spaced_and_inclusive() {
        // Arrange / Act
        let grid = PriceGrid::new(90.0, 110.0, 5).expect("grid should build");

        // Assert
        let expected = [90.0, 95.0, 100.0, 105.0, 110.0];
        assert_eq!(grid.len(), 5);
        for (got, want) in grid.prices().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A constant-price history must collapse the grid to the single
    // observed price regardless of margin.
    //
    // Given
    // -----
    // - 30 records all priced at 120.
    //
    // Expect
    // ------
    // - Single-point grid at exactly 120.
    fn constant_price_history_collapses_grid() {
        // Arrange
        let series = series_with_prices(&[120.0; 30]);

        // Act
        let grid = PriceGrid::from_series(&series, DEFAULT_GRID_MARGIN, DEFAULT_GRID_POINTS)
            .expect("grid should build");

        // Assert
        assert_eq!(grid.prices(), &[120.0]);
    }

    #[test]
    // Purpose
    // -------
    // A varying history must extend the observed range by the margin and
    // reject inverted explicit ranges.
    //
    // Given
    // -----
    // - Prices spanning [100, 200], margin 0.10.
    //
    // Expect
    // ------
    // - Grid bounds [90, 220]; PriceGrid::new(110, 100, ..) errors.
    fn varying_history_extends_range_by_margin() {
        // Arrange
        let series = series_with_prices(&[100.0, 150.0, 200.0]);

        // Act
        let grid = PriceGrid::from_series(&series, 0.10, 10).expect("grid should build");

        // Assert
        assert!((grid.prices()[0] - 90.0).abs() < 1e-9);
        assert!((grid.prices()[grid.len() - 1] - 220.0).abs() < 1e-9);
        assert!(matches!(
            PriceGrid::new(110.0, 100.0, 10),
            Err(DemandError::InvalidGrid { .. })
        ));
    }
}
