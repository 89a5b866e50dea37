//! decision::waterfall — additive price-decomposition steps.
//!
//! Purpose
//! -------
//! Explain a final price as a base price plus a fixed-order sequence of
//! labeled adjustment steps that reconcile exactly. When the raw
//! adjustments do not add up to the final price (rounding in the
//! optimizer is the usual cause), an explicitly labeled
//! "rounding adjustment" step absorbs the residual; the discrepancy is
//! never folded into an existing labeled step.
//!
//! Key behaviors
//! -------------
//! - Step order is fixed: weather, temporal, event, competitor,
//!   elasticity correction. Identical inputs always produce identical
//!   step sequences.
//! - Zero-valued adjustments are omitted; the remaining steps carry
//!   running totals for direct chart rendering.
//! - Reconciliation is checked against [`RECONCILIATION_TOLERANCE`];
//!   an inserted rounding step is reported through a
//!   [`ReconciliationWarning`] so callers can log it.
//!
//! Invariants & assumptions
//! ------------------------
//! - `base_price + Σ deltas == final_price` within the tolerance for
//!   every built waterfall, with the rounding step included.
use std::fmt;

/// Reconciliation tolerance for the waterfall invariant.
pub const RECONCILIATION_TOLERANCE: f64 = 1e-6;

/// Label of the residual step inserted to force exact reconciliation.
pub const ROUNDING_ADJUSTMENT_LABEL: &str = "rounding adjustment";

/// Fixed categories of a price adjustment, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AdjustmentCategory {
    Weather,
    Temporal,
    Event,
    Competitor,
    ElasticityCorrection,
}

impl AdjustmentCategory {
    /// Fixed ordering used for every waterfall.
    pub const ORDER: [AdjustmentCategory; 5] = [
        AdjustmentCategory::Weather,
        AdjustmentCategory::Temporal,
        AdjustmentCategory::Event,
        AdjustmentCategory::Competitor,
        AdjustmentCategory::ElasticityCorrection,
    ];

    /// Human-readable step label.
    pub fn label(&self) -> &'static str {
        match self {
            AdjustmentCategory::Weather => "weather",
            AdjustmentCategory::Temporal => "temporal",
            AdjustmentCategory::Event => "event",
            AdjustmentCategory::Competitor => "competitor",
            AdjustmentCategory::ElasticityCorrection => "elasticity correction",
        }
    }
}

impl fmt::Display for AdjustmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw per-category price adjustments for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustments {
    pub weather: f64,
    pub temporal: f64,
    pub event: f64,
    pub competitor: f64,
    pub elasticity_correction: f64,
}

impl Adjustments {
    fn get(&self, category: AdjustmentCategory) -> f64 {
        match category {
            AdjustmentCategory::Weather => self.weather,
            AdjustmentCategory::Temporal => self.temporal,
            AdjustmentCategory::Event => self.event,
            AdjustmentCategory::Competitor => self.competitor,
            AdjustmentCategory::ElasticityCorrection => self.elasticity_correction,
        }
    }
}

/// One labeled contribution step.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallStep {
    pub label: &'static str,
    pub delta: f64,
    /// Price after applying this step to the running total.
    pub running_total: f64,
}

/// Non-fatal signal that a rounding step was required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciliationWarning {
    /// Residual the rounding step absorbed.
    pub residual: f64,
}

/// Reconciled decomposition of a final price.
#[derive(Debug, Clone, PartialEq)]
pub struct Waterfall {
    base_price: f64,
    final_price: f64,
    steps: Vec<WaterfallStep>,
    warning: Option<ReconciliationWarning>,
}

impl Waterfall {
    /// Ordered contribution steps.
    pub fn steps(&self) -> &[WaterfallStep] {
        &self.steps
    }

    /// Starting price of the decomposition.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Price the steps reconcile to.
    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    /// The reconciliation warning, when a rounding step was inserted.
    pub fn warning(&self) -> Option<ReconciliationWarning> {
        self.warning
    }
}

/// Build the reconciled waterfall for one decision.
///
/// Non-zero adjustments appear in the fixed category order; a residual
/// beyond [`RECONCILIATION_TOLERANCE`] becomes the final
/// "rounding adjustment" step and is reported as a warning.
pub fn build_waterfall(base_price: f64, adjustments: &Adjustments, final_price: f64) -> Waterfall {
    let mut steps = Vec::with_capacity(AdjustmentCategory::ORDER.len() + 1);
    let mut running = base_price;
    for category in AdjustmentCategory::ORDER {
        let delta = adjustments.get(category);
        if delta == 0.0 {
            continue;
        }
        running += delta;
        steps.push(WaterfallStep { label: category.label(), delta, running_total: running });
    }

    let residual = final_price - running;
    let warning = if residual.abs() > RECONCILIATION_TOLERANCE {
        steps.push(WaterfallStep {
            label: ROUNDING_ADJUSTMENT_LABEL,
            delta: residual,
            running_total: final_price,
        });
        Some(ReconciliationWarning { residual })
    } else {
        None
    };

    Waterfall { base_price, final_price, steps, warning }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Fixed step ordering and omission of zero adjustments.
    // - The reconciliation invariant with and without a rounding step.
    // - The warning payload carrying the absorbed residual.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Steps must follow the fixed category order and skip zero deltas.
    //
    // Given
    // -----
    // - Adjustments with event zeroed out.
    //
    // Expect
    // ------
    // - Labels [weather, temporal, competitor, elasticity correction];
    //   running totals accumulate from the base.
    fn steps_follow_fixed_order_and_skip_zeros() {
        // Arrange
        let adjustments = Adjustments {
            weather: 5.0,
            temporal: -2.0,
            event: 0.0,
            competitor: 3.0,
            elasticity_correction: 1.5,
        };

        // Act
        let waterfall = build_waterfall(100.0, &adjustments, 107.5);

        // Assert
        let labels: Vec<&str> = waterfall.steps().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["weather", "temporal", "competitor", "elasticity correction"]);
        assert_eq!(waterfall.steps()[0].running_total, 105.0);
        assert_eq!(waterfall.steps()[3].running_total, 107.5);
        assert!(waterfall.warning().is_none());
    }

    #[test]
    // Purpose
    // -------
    // A rounded final price must produce an explicit rounding step that
    // forces exact reconciliation, never a silent absorption.
    //
    // Given
    // -----
    // - Base 100, adjustments summing to 23.4, final price 124.
    //
    // Expect
    // ------
    // - A final "rounding adjustment" step of 0.6; the invariant holds
    //   within 1e-6; the warning carries the residual.
    fn rounding_step_forces_exact_reconciliation() {
        // Arrange
        let adjustments = Adjustments {
            weather: 10.0,
            temporal: 5.0,
            event: 4.0,
            competitor: 2.4,
            elasticity_correction: 2.0,
        };

        // Act
        let waterfall = build_waterfall(100.0, &adjustments, 124.0);

        // Assert
        let last = waterfall.steps().last().expect("non-empty waterfall");
        assert_eq!(last.label, ROUNDING_ADJUSTMENT_LABEL);
        assert!((last.delta - 0.6).abs() < 1e-9);
        let total: f64 = waterfall.steps().iter().map(|s| s.delta).sum();
        assert!((waterfall.base_price() + total - waterfall.final_price()).abs() < 1e-6);
        let warning = waterfall.warning().expect("rounding step must warn");
        assert!((warning.residual - 0.6).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Exactly reconciling adjustments must not grow a rounding step.
    //
    // Given
    // -----
    // - Base 80, single weather adjustment 20, final 100.
    //
    // Expect
    // ------
    // - One step, no warning, invariant holds.
    fn exact_reconciliation_needs_no_rounding_step() {
        // Arrange / Act
        let adjustments = Adjustments { weather: 20.0, ..Adjustments::default() };
        let waterfall = build_waterfall(80.0, &adjustments, 100.0);

        // Assert
        assert_eq!(waterfall.steps().len(), 1);
        assert!(waterfall.warning().is_none());
        let total: f64 = waterfall.steps().iter().map(|s| s.delta).sum();
        assert!((waterfall.base_price() + total - waterfall.final_price()).abs() < 1e-6);
    }
}
