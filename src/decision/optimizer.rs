//! decision::optimizer — expected-revenue search over the elasticity curve.
//!
//! Purpose
//! -------
//! Select the price that maximizes expected revenue
//! `price × mean probability` over the curve's grid, subject to hard
//! bounds, rounding granularity, and an optional margin floor. The
//! competitor signal is advisory unless a competitor band is configured.
//!
//! Key behaviors
//! -------------
//! - Candidate prices are rounded to the granularity **before**
//!   constraint checking, so rounding can never re-violate a bound.
//! - Revenue ties within [`REVENUE_EPS`] break toward the **lower**
//!   price; the choice is explicit, not an artifact of iteration order.
//! - The decision records the winning grid index and a
//!   `constraint_binding` flag, set whenever the hard bounds, the margin
//!   floor, or the band clamp moved the choice away from the
//!   unconstrained revenue argmax.
//! - The nearest competitor median is always exposed in the output; when
//!   `competitor_band` is set and the winner falls outside the band, the
//!   price is clamped to the nearest band edge and the decision is
//!   flagged `constraint_violation = true`.
//! - An empty feasible set (for example `min > max`) is a hard
//!   [`DecisionError::ConstraintInfeasible`]; the caller never receives
//!   a silently clamped answer.
//!
//! Invariants & assumptions
//! ------------------------
//! - The curve is non-empty with points in ascending price order and
//!   means already clamped to [0, 1].
//! - Re-invocation with identical inputs yields an identical decision;
//!   the search is a pure function of its arguments.
//!
//! Downstream usage
//! ----------------
//! - The waterfall builder explains the resulting decision; the KPI
//!   aggregator rolls decisions up over time.
use crate::decision::errors::{DecisionError, DecisionResult};
use crate::demand::ElasticityCurve;

/// Two revenues within this distance are considered tied.
pub const REVENUE_EPS: f64 = 1e-9;

/// Fractional band around the competitor median.
///
/// A band of `{ lower_frac: 0.1, upper_frac: 0.2 }` around a median of
/// 100 allows prices in [90, 120].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitorBand {
    pub lower_frac: f64,
    pub upper_frac: f64,
}

/// Hard constraints and advisory configuration for one decision call.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    pub min_price: f64,
    pub max_price: f64,
    /// Rounding granularity for candidate prices, e.g. 1.0 or 0.01.
    pub granularity: f64,
    pub margin_floor: Option<f64>,
    pub competitor_band: Option<CompetitorBand>,
}

impl Constraints {
    /// Construct validated constraints.
    ///
    /// `min > max` is deliberately **not** rejected here: it is a
    /// feasibility question answered by [`optimize_price`], which must
    /// surface it as `ConstraintInfeasible`.
    ///
    /// # Errors
    /// - [`DecisionError::InvalidConstraints`] for non-finite bounds,
    ///   non-positive granularity, or negative band fractions.
    pub fn new(
        min_price: f64, max_price: f64, granularity: f64, margin_floor: Option<f64>,
        competitor_band: Option<CompetitorBand>,
    ) -> DecisionResult<Self> {
        if !min_price.is_finite() || !max_price.is_finite() {
            return Err(DecisionError::InvalidConstraints {
                reason: format!("non-finite price bounds [{min_price}, {max_price}]"),
            });
        }
        if !granularity.is_finite() || granularity <= 0.0 {
            return Err(DecisionError::InvalidConstraints {
                reason: format!("granularity must be positive, got {granularity}"),
            });
        }
        if let Some(band) = competitor_band {
            if band.lower_frac < 0.0 || band.upper_frac < 0.0 {
                return Err(DecisionError::InvalidConstraints {
                    reason: "competitor band fractions must be non-negative".to_string(),
                });
            }
        }
        Ok(Self { min_price, max_price, granularity, margin_floor, competitor_band })
    }
}

/// Outcome of one price decision.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDecision {
    /// Chosen price, rounded to the granularity (band clamping may move
    /// it off-grid).
    pub price: f64,
    /// Mean sell-through probability at the chosen grid point.
    pub expected_probability: f64,
    /// Expected revenue `price × probability` of the chosen point.
    pub expected_revenue: f64,
    /// Index of the winning point on the curve's grid.
    pub grid_index: usize,
    /// Median of the supplied competitor prices, when any.
    pub competitor_median: Option<f64>,
    /// True when a hard bound, the margin floor, or the competitor band
    /// moved the choice away from the unconstrained revenue argmax.
    pub constraint_binding: bool,
    /// True when the winner was clamped to the competitor band.
    pub constraint_violation: bool,
}

/// Pick the revenue-maximizing feasible price on the curve.
///
/// # Errors
/// - [`DecisionError::ConstraintInfeasible`] when no rounded grid price
///   satisfies the hard constraints.
pub fn optimize_price(
    curve: &ElasticityCurve, competitor_prices: &[f64], constraints: &Constraints,
) -> DecisionResult<PriceDecision> {
    if constraints.min_price > constraints.max_price {
        return Err(DecisionError::ConstraintInfeasible {
            reason: format!(
                "minimum {} exceeds maximum {}",
                constraints.min_price, constraints.max_price
            ),
        });
    }

    let competitor_median = median(competitor_prices);

    // (grid index, price, probability, revenue)
    let mut best: Option<(usize, f64, f64, f64)> = None;
    // Argmax ignoring min/max and the margin floor, kept to tell a
    // binding constraint apart from one that merely exists.
    let mut free_index: Option<usize> = None;
    let mut free_best: Option<(f64, f64)> = None; // (price, revenue)
    for (index, point) in curve.points().iter().enumerate() {
        let candidate = round_to(point.price, constraints.granularity);
        let revenue = candidate * point.mean;

        let leads = |prev: Option<(f64, f64)>| match prev {
            None => true,
            Some((prev_price, prev_revenue)) => {
                revenue > prev_revenue + REVENUE_EPS
                    || ((revenue - prev_revenue).abs() <= REVENUE_EPS && candidate < prev_price)
            }
        };

        if leads(free_best) {
            free_index = Some(index);
            free_best = Some((candidate, revenue));
        }

        if candidate < constraints.min_price || candidate > constraints.max_price {
            continue;
        }
        if let Some(floor) = constraints.margin_floor {
            if candidate < floor {
                continue;
            }
        }
        if leads(best.map(|(_, price, _, revenue)| (price, revenue))) {
            best = Some((index, candidate, point.mean, revenue));
        }
    }

    let (grid_index, mut price, probability, _) = best.ok_or_else(|| {
        DecisionError::ConstraintInfeasible {
            reason: format!(
                "no grid price in [{}, {}] at granularity {} satisfies the constraints",
                constraints.min_price, constraints.max_price, constraints.granularity
            ),
        }
    })?;

    let mut constraint_violation = false;
    if let (Some(band), Some(median)) = (constraints.competitor_band, competitor_median) {
        let band_low = median * (1.0 - band.lower_frac);
        let band_high = median * (1.0 + band.upper_frac);
        if price < band_low {
            price = band_low;
            constraint_violation = true;
        } else if price > band_high {
            price = band_high;
            constraint_violation = true;
        }
    }

    let constraint_binding = constraint_violation || free_index != Some(grid_index);

    Ok(PriceDecision {
        price,
        expected_probability: probability,
        // Recomputed after any clamp so the product relation holds on
        // every decision.
        expected_revenue: price * probability,
        grid_index,
        competitor_median,
        constraint_binding,
        constraint_violation,
    })
}

// ---- Helper methods ----

fn round_to(price: f64, granularity: f64) -> f64 {
    (price / granularity).round() * granularity
}

/// Median of the finite entries, `None` when there are none.
fn median(values: &[f64]) -> Option<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(|a, b| a.total_cmp(b));
    let mid = finite.len() / 2;
    if finite.len() % 2 == 0 {
        Some(0.5 * (finite[mid - 1] + finite[mid]))
    } else {
        Some(finite[mid])
    }
}
