//! correlation::weights — category weights derived from feature rankings.
//!
//! Purpose
//! -------
//! Map ranked feature scores onto the fixed category set and normalize
//! them into [`PricingWeights`]: non-negative per-category weights summing
//! to at most 1, with the base category explicitly absorbing the residual.
//! The demand model consumes these as regularization priors, and the
//! waterfall builder uses the same categories for its fixed step order.
//!
//! Key behaviors
//! -------------
//! - Sum absolute combined scores per category (signs are informational
//!   only; weights must never go negative even when correlations do).
//! - Normalize the non-base mass onto `1 - base_floor` so a configurable
//!   share is always reserved for the base price.
//! - An empty ranking yields the all-base weight vector — the explicit
//!   "fall back to base price only" signal, not an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every weight lies in [0, 1]; the weights over all categories sum to
//!   1 within floating-point tolerance (hence ≤ 1 + ε).
//! - Normalization is deterministic: identical rankings produce
//!   bit-identical weights.
use std::collections::BTreeMap;

use crate::correlation::errors::{CorrError, CorrResult};
use crate::correlation::ranking::FeatureRanking;
use crate::series::data::FeatureCategory;

/// Default share of total weight reserved for the base category.
pub const DEFAULT_BASE_FLOOR: f64 = 0.2;

/// WeightOptions — explicit configuration for weight generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightOptions {
    /// Share of total weight always reserved for [`FeatureCategory::Base`];
    /// must lie in [0, 1).
    pub base_floor: f64,
}

impl WeightOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`CorrError::InvalidBaseFloor`] when `base_floor` is not finite
    ///   or lies outside [0, 1).
    pub fn new(base_floor: f64) -> CorrResult<Self> {
        if !base_floor.is_finite() || !(0.0..1.0).contains(&base_floor) {
            return Err(CorrError::InvalidBaseFloor { value: base_floor });
        }
        Ok(Self { base_floor })
    }
}

impl Default for WeightOptions {
    fn default() -> Self {
        Self { base_floor: DEFAULT_BASE_FLOOR }
    }
}

/// PricingWeights — normalized per-category weights.
///
/// Purpose
/// -------
/// The weighting artifact handed from the correlation engine to the
/// demand model (as priors) and to explainability consumers. Derived,
/// recomputed per call, value-semantic.
///
/// Invariants
/// ----------
/// - Every category in [`FeatureCategory::ALL`] has an entry in [0, 1].
/// - Entries sum to 1 within 1e-9, with any residual made explicit on
///   the base category.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingWeights {
    weights: BTreeMap<FeatureCategory, f64>,
}

impl PricingWeights {
    /// Weight of a category (0.0 for untracked categories by invariant
    /// this never happens for members of [`FeatureCategory::ALL`]).
    pub fn get(&self, category: FeatureCategory) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    /// Sum over all categories; 1.0 within tolerance by construction.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Iterate categories in fixed precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureCategory, f64)> + '_ {
        FeatureCategory::ALL.iter().map(|&c| (c, self.get(c)))
    }

    /// True when the entire mass sits on the base category, i.e. the
    /// upstream ranking was empty.
    pub fn is_base_only(&self) -> bool {
        (self.get(FeatureCategory::Base) - 1.0).abs() < 1e-9
    }
}

/// Derive normalized category weights from a feature ranking.
///
/// Parameters
/// ----------
/// - `ranking`: ordered features with non-negative combined scores; an
///   empty ranking is valid and yields the all-base vector.
/// - `options`: validated weight configuration.
///
/// Returns
/// -------
/// `PricingWeights` satisfying the documented invariants. This function
/// cannot fail for validated inputs, so no `Result` wrapper is used.
pub fn generate_weights(ranking: &FeatureRanking, options: &WeightOptions) -> PricingWeights {
    let mut raw: BTreeMap<FeatureCategory, f64> = BTreeMap::new();
    for category in FeatureCategory::ALL {
        raw.insert(category, 0.0);
    }
    for entry in ranking.entries() {
        // combined_score is already absolute; .abs() restates the
        // no-negative-weight invariant locally.
        *raw.entry(entry.feature.category()).or_insert(0.0) += entry.combined_score.abs();
    }
    // Mass mapped onto Base (Other(..) features) counts toward the
    // residual, not the scaled share.
    raw.insert(FeatureCategory::Base, 0.0);

    let total: f64 = raw.values().sum();
    let mut weights = BTreeMap::new();
    if total <= 0.0 {
        for category in FeatureCategory::ALL {
            weights.insert(category, 0.0);
        }
        weights.insert(FeatureCategory::Base, 1.0);
        return PricingWeights { weights };
    }

    let scale = (1.0 - options.base_floor) / total;
    let mut assigned = 0.0;
    for category in FeatureCategory::ALL {
        if category == FeatureCategory::Base {
            continue;
        }
        let w = raw[&category] * scale;
        assigned += w;
        weights.insert(category, w);
    }
    weights.insert(FeatureCategory::Base, 1.0 - assigned);
    PricingWeights { weights }
}
