//! evaluation::kpi — decision-batch KPI rollup.
//!
//! Purpose
//! -------
//! Aggregate a batch of price decisions and their forecast scores into a
//! small KPI summary: expected-revenue lift against a caller-supplied
//! naive baseline, ADR delta against the competitor median, occupancy
//! gap against a target, mean band coverage, and the fraction of
//! decisions that were constraint-clamped.
//!
//! Key behaviors
//! -------------
//! - Pure rollup over already-computed values; nothing here refits a
//!   model or re-searches a grid.
//! - Every ratio with a missing or degenerate denominator is reported as
//!   unavailable rather than NaN.
//!
//! Downstream usage
//! ----------------
//! Reporting layers consume [`KpiSummary`] directly; it carries no
//! references back into the decisions it summarizes.
use crate::decision::PriceDecision;
use crate::evaluation::forecast::ForecastScore;

/// Caller-supplied comparison points for the rollup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KpiInputs {
    /// Expected revenue of the naive (do-nothing) pricing policy over
    /// the same decisions, when the caller has one.
    pub baseline_revenue: Option<f64>,
    /// Target occupancy / sell-through probability, when one is set.
    pub occupancy_target: Option<f64>,
}

/// Batch-level key performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    /// Relative lift of total expected revenue over the baseline;
    /// `None` without a positive baseline.
    pub revenue_lift: Option<f64>,
    /// Mean of (decided price − competitor median) over decisions that
    /// observed competitors; `None` when none did.
    pub adr_delta: Option<f64>,
    /// Mean expected probability minus the occupancy target; `None`
    /// without a target.
    pub occupancy_gap: Option<f64>,
    /// Mean band coverage over scores that report one.
    pub mean_band_coverage: Option<f64>,
    /// Fraction of decisions flagged as constraint-clamped.
    pub violation_fraction: f64,
    /// Number of decisions summarized.
    pub decisions: usize,
}

/// Roll a decision batch and its scores up into a [`KpiSummary`].
///
/// # Parameters
/// - `decisions`: decided prices with their expectations and flags.
/// - `scores`: forecast scores, typically one per evaluation window.
/// - `inputs`: optional baselines to compare against.
///
/// # Notes
/// - An empty batch yields an all-unavailable summary with
///   `violation_fraction == 0.0`.
pub fn summarize_kpis(
    decisions: &[PriceDecision], scores: &[ForecastScore], inputs: &KpiInputs,
) -> KpiSummary {
    let n = decisions.len();

    let revenue_lift = match (inputs.baseline_revenue, n) {
        (Some(base), _) if base > 0.0 && n > 0 => {
            let total: f64 = decisions.iter().map(|d| d.expected_revenue).sum();
            Some((total - base) / base)
        }
        _ => None,
    };

    let with_median: Vec<f64> = decisions
        .iter()
        .filter_map(|d| d.competitor_median.map(|m| d.price - m))
        .collect();
    let adr_delta = mean(&with_median);

    let occupancy_gap = match (inputs.occupancy_target, n) {
        (Some(target), _) if n > 0 => {
            let mean_prob: f64 =
                decisions.iter().map(|d| d.expected_probability).sum::<f64>() / n as f64;
            Some(mean_prob - target)
        }
        _ => None,
    };

    let coverages: Vec<f64> = scores.iter().filter_map(|s| s.band_coverage).collect();
    let mean_band_coverage = mean(&coverages);

    let violation_fraction = if n == 0 {
        0.0
    } else {
        decisions.iter().filter(|d| d.constraint_violation).count() as f64 / n as f64
    };

    KpiSummary {
        revenue_lift,
        adr_delta,
        occupancy_gap,
        mean_band_coverage,
        violation_fraction,
        decisions: n,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Rollup arithmetic against known decisions and scores.
    // - Unavailability of every ratio when its inputs are missing.
    // -------------------------------------------------------------------------

    fn decision(
        price: f64, prob: f64, median: Option<f64>, violated: bool,
    ) -> PriceDecision {
        PriceDecision {
            price,
            expected_probability: prob,
            expected_revenue: price * prob,
            grid_index: 0,
            competitor_median: median,
            constraint_binding: violated,
            constraint_violation: violated,
        }
    }

    #[test]
    // Purpose
    // -------
    // A populated batch must produce every KPI from the supplied values
    // alone.
    //
    // Given
    // -----
    // - Two decisions (one clamped, one with a competitor median), a
    //   baseline revenue of 100, and an occupancy target of 0.5.
    //
    // Expect
    // ------
    // - Lift, ADR delta, occupancy gap, coverage, and violation fraction
    //   all match hand computation.
    fn rollup_matches_hand_computation() {
        // Arrange
        let decisions = [
            decision(100.0, 0.6, Some(95.0), false),
            decision(120.0, 0.5, None, true),
        ];
        let scores = [
            ForecastScore { mape: Some(10.0), mape_excluded: 0, crps: None, band_coverage: Some(0.8) },
            ForecastScore { mape: None, mape_excluded: 3, crps: None, band_coverage: Some(0.6) },
        ];
        let inputs =
            KpiInputs { baseline_revenue: Some(100.0), occupancy_target: Some(0.5) };

        // Act
        let summary = summarize_kpis(&decisions, &scores, &inputs);

        // Assert
        // Total expected revenue = 60 + 60 = 120 against a baseline of 100.
        assert!((summary.revenue_lift.unwrap() - 0.2).abs() < 1e-12);
        assert!((summary.adr_delta.unwrap() - 5.0).abs() < 1e-12);
        assert!((summary.occupancy_gap.unwrap() - 0.05).abs() < 1e-12);
        assert!((summary.mean_band_coverage.unwrap() - 0.7).abs() < 1e-12);
        assert!((summary.violation_fraction - 0.5).abs() < 1e-12);
        assert_eq!(summary.decisions, 2);
    }

    #[test]
    // Purpose
    // -------
    // Missing baselines and empty batches must surface as unavailable
    // KPIs, never as NaN.
    //
    // Given
    // -----
    // - No decisions, no scores, no inputs.
    //
    // Expect
    // ------
    // - All optional KPIs None; violation fraction 0.
    fn empty_batch_is_all_unavailable() {
        // Arrange / Act
        let summary = summarize_kpis(&[], &[], &KpiInputs::default());

        // Assert
        assert_eq!(summary.revenue_lift, None);
        assert_eq!(summary.adr_delta, None);
        assert_eq!(summary.occupancy_gap, None);
        assert_eq!(summary.mean_band_coverage, None);
        assert_eq!(summary.violation_fraction, 0.0);
        assert_eq!(summary.decisions, 0);
    }
}
