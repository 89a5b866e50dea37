//! correlation::ranking — combined-score feature ranking.
//!
//! Purpose
//! -------
//! Collapse the per-method target correlations of a
//! [`CorrelationMatrix`] into one `combined_score` per feature and order
//! features by it. The combination formula is explicit and swappable
//! ([`CombinePolicy`]); the crate default is the average of the absolute
//! Pearson and Spearman coefficients.
//!
//! Key behaviors
//! -------------
//! - Combine |Pearson| and |Spearman| per [`CombinePolicy`]; the signed
//!   coefficients are retained on each entry for display, but only the
//!   absolute combination drives ordering and downstream weighting.
//! - Order descending by combined score with ties broken by canonical
//!   feature name, so identical inputs always produce identical rankings.
//! - Propagate the exclusion audit from the matrix so the ranking remains
//!   self-describing.
//!
//! Conventions
//! -----------
//! - An empty ranking is a valid value, not an error; downstream
//!   components treat it as "fall back to base price only".
use crate::correlation::errors::{CorrError, CorrResult};
use crate::correlation::matrix::{
    CorrelationMatrix, CorrelationMethod, ExcludedFeature,
};
use crate::series::data::Feature;

/// CombinePolicy — how per-method correlations merge into one score.
///
/// - `MeanAbs` (default): `(|pearson| + |spearman|) / 2`.
/// - `MaxAbs`: `max(|pearson|, |spearman|)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinePolicy {
    #[default]
    MeanAbs,
    MaxAbs,
}

impl CombinePolicy {
    fn combine(&self, pearson: f64, spearman: f64) -> f64 {
        match self {
            CombinePolicy::MeanAbs => (pearson.abs() + spearman.abs()) / 2.0,
            CombinePolicy::MaxAbs => pearson.abs().max(spearman.abs()),
        }
    }
}

/// RankedFeature — one entry of a [`FeatureRanking`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFeature {
    pub feature: Feature,
    /// Non-negative combined score; the ordering key.
    pub combined_score: f64,
    /// Signed Pearson coefficient against the target (informational).
    pub pearson: f64,
    /// Signed Spearman coefficient against the target (informational).
    pub spearman: f64,
}

/// FeatureRanking — ordered features plus the exclusion audit.
///
/// Invariants
/// ----------
/// - Entries are sorted descending by `combined_score`, ties broken by
///   canonical feature name ascending.
/// - `combined_score >= 0` for every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRanking {
    entries: Vec<RankedFeature>,
    excluded: Vec<ExcludedFeature>,
}

impl FeatureRanking {
    /// Explicit empty ranking: the "fall back to base price only"
    /// signal downstream components act on.
    pub fn empty() -> Self {
        Self { entries: Vec::new(), excluded: Vec::new() }
    }

    /// Ordered entries, best first.
    pub fn entries(&self) -> &[RankedFeature] {
        &self.entries
    }

    /// Features excluded upstream for insufficient paired observations.
    pub fn excluded(&self) -> &[ExcludedFeature] {
        &self.excluded
    }

    /// True when no feature was eligible — the "base price only" signal.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of ranked features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Rank eligible features by combined correlation score.
///
/// Parameters
/// ----------
/// - `matrix`: output of
///   [`compute_correlations`](crate::correlation::matrix::compute_correlations).
/// - `top_n`: maximum number of entries to keep; must be > 0.
/// - `policy`: the combination formula (see module docs for the default
///   choice and its rationale).
///
/// Returns
/// -------
/// `CorrResult<FeatureRanking>` — possibly empty when the matrix holds no
/// eligible features; that case is an explicit valid result.
///
/// Errors
/// ------
/// - [`CorrError::InvalidTopN`] when `top_n == 0`.
pub fn rank_features(
    matrix: &CorrelationMatrix, top_n: usize, policy: CombinePolicy,
) -> CorrResult<FeatureRanking> {
    if top_n == 0 {
        return Err(CorrError::InvalidTopN);
    }

    let mut entries: Vec<RankedFeature> = matrix
        .features()
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let pearson = matrix.with_target(CorrelationMethod::Pearson, i);
            let spearman = matrix.with_target(CorrelationMethod::Spearman, i);
            RankedFeature {
                feature: feature.clone(),
                combined_score: policy.combine(pearson, spearman),
                pearson,
                spearman,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.feature.name().cmp(b.feature.name()))
    });
    entries.truncate(top_n);

    Ok(FeatureRanking { entries, excluded: matrix.excluded().to_vec() })
}
