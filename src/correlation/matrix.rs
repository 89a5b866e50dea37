//! correlation::matrix — multi-method correlation over enriched series.
//!
//! Purpose
//! -------
//! Compute Pearson (linear) and Spearman (rank) correlation matrices over
//! the candidate feature set of an enriched series plus a chosen target
//! column, using pairwise-complete observations. Combining a linear and a
//! rank-based method guards against monotonic-but-nonlinear relationships
//! being missed by a single method.
//!
//! Key behaviors
//! -------------
//! - Collect the feature universe as the union of features present across
//!   records, in lexical order for determinism.
//! - Exclude features with fewer than `min_paired_obs` non-missing pairs
//!   against the target, recording each exclusion for caller audit rather
//!   than silently dropping it.
//! - Build symmetric per-method matrices over the eligible features plus
//!   the target as the final column, with an exact unit diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both matrices are symmetric with diagonal exactly 1; every entry lies
//!   in [-1, 1] (clamped against floating-point drift).
//! - A degenerate pair (fewer than 2 complete observations, or zero
//!   variance on either side) correlates at 0.0 by convention; the sign of
//!   a correlation is informational only downstream.
//!
//! Conventions
//! -----------
//! - The target occupies the last row/column of each matrix; accessors
//!   hide the indexing so callers never deal with raw offsets.
//! - Spearman uses average ranks for ties, then Pearson on the ranks.
//!
//! Downstream usage
//! ----------------
//! - `correlation::ranking` combines the two per-feature target columns
//!   into a single score and orders features by it.
//!
//! Testing notes
//! -------------
//! - Unit tests cover symmetry/diagonal invariants, the min-pair exclusion
//!   audit, rank-based detection of monotone nonlinear signals, and the
//!   degenerate zero-variance convention.
use std::collections::BTreeSet;

use ndarray::Array2;

use crate::correlation::errors::{CorrError, CorrResult};
use crate::series::data::{EnrichedSeries, Feature};

/// Default minimum number of non-missing paired observations a feature
/// needs against the target before it may be ranked.
pub const DEFAULT_MIN_PAIRED_OBS: usize = 8;

/// Target — which series column features are correlated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Observed demand (count or occupancy fraction).
    Demand,
    /// Realized price.
    RealizedPrice,
}

/// CorrelationMethod — the individual methods combined by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
}

/// CorrelationOptions — explicit configuration for matrix construction.
///
/// Fields
/// ------
/// - `min_paired_obs`: eligibility threshold against the target
///   (default [`DEFAULT_MIN_PAIRED_OBS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationOptions {
    pub min_paired_obs: usize,
}

impl CorrelationOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`CorrError::InvalidMinPairedObs`] when `min_paired_obs < 2`; a
    ///   correlation over fewer than two pairs is undefined.
    pub fn new(min_paired_obs: usize) -> CorrResult<Self> {
        if min_paired_obs < 2 {
            return Err(CorrError::InvalidMinPairedObs { value: min_paired_obs });
        }
        Ok(Self { min_paired_obs })
    }
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self { min_paired_obs: DEFAULT_MIN_PAIRED_OBS }
    }
}

/// ExcludedFeature — audit entry for a feature dropped from ranking.
///
/// Carried on the [`CorrelationMatrix`] so callers can display why a
/// candidate signal did not participate in weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludedFeature {
    pub feature: Feature,
    /// Non-missing observations paired with the target.
    pub paired_obs: usize,
    /// The threshold that was in force.
    pub required: usize,
}

/// CorrelationMatrix — per-method correlation matrices plus exclusions.
///
/// Purpose
/// -------
/// Derived artifact holding Pearson and Spearman correlations over the
/// eligible features and the target, together with the audit list of
/// excluded features. Recomputed from scratch whenever the series
/// changes; carries no identity across calls.
///
/// Invariants
/// ----------
/// - `pearson` and `spearman` are `(k+1) × (k+1)` symmetric matrices with
///   unit diagonal, where `k = features.len()` and the final index is the
///   target column.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    features: Vec<Feature>,
    target: Target,
    pearson: Array2<f64>,
    spearman: Array2<f64>,
    excluded: Vec<ExcludedFeature>,
}

impl CorrelationMatrix {
    /// Eligible features in lexical order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The target column the matrix was built against.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Features excluded for insufficient paired observations.
    pub fn excluded(&self) -> &[ExcludedFeature] {
        &self.excluded
    }

    /// Correlation between two eligible features under a method.
    pub fn between(&self, method: CorrelationMethod, i: usize, j: usize) -> f64 {
        self.matrix(method)[(i, j)]
    }

    /// Correlation of eligible feature `i` against the target.
    pub fn with_target(&self, method: CorrelationMethod, i: usize) -> f64 {
        let t = self.features.len();
        self.matrix(method)[(i, t)]
    }

    fn matrix(&self, method: CorrelationMethod) -> &Array2<f64> {
        match method {
            CorrelationMethod::Pearson => &self.pearson,
            CorrelationMethod::Spearman => &self.spearman,
        }
    }
}

/// Compute pairwise-complete Pearson and Spearman correlation matrices.
///
/// Parameters
/// ----------
/// - `series`: validated enriched series; the feature universe is the
///   union of features present in any record.
/// - `target`: column to correlate features against (always present on
///   every record, so eligibility is purely a per-feature property).
/// - `options`: validated engine configuration.
///
/// Returns
/// -------
/// `CorrResult<CorrelationMatrix>` — the derived matrices plus the
/// exclusion audit. Zero eligible features is a valid outcome (empty
/// feature list), not an error: downstream ranking will be empty and the
/// caller falls back to base price only.
///
/// Errors
/// ------
/// - Currently never fails for a validated series and validated options;
///   the `CorrResult` wrapper keeps the contract open for stricter input
///   policies without breaking callers.
pub fn compute_correlations(
    series: &EnrichedSeries, target: Target, options: &CorrelationOptions,
) -> CorrResult<CorrelationMatrix> {
    let universe: BTreeSet<Feature> = series
        .records()
        .iter()
        .flat_map(|r| r.features.keys().cloned())
        .collect();

    let target_values: Vec<f64> = series
        .records()
        .iter()
        .map(|r| match target {
            Target::Demand => r.demand,
            Target::RealizedPrice => r.price,
        })
        .collect();

    // Eligibility against the target, with an audit trail.
    let mut features: Vec<Feature> = Vec::new();
    let mut excluded: Vec<ExcludedFeature> = Vec::new();
    for feature in universe {
        let paired = series.records().iter().filter(|r| r.features.contains_key(&feature)).count();
        if paired < options.min_paired_obs {
            excluded.push(ExcludedFeature {
                feature,
                paired_obs: paired,
                required: options.min_paired_obs,
            });
        } else {
            features.push(feature);
        }
    }

    // Column extractors: None marks a missing observation.
    let column = |feature: &Feature| -> Vec<Option<f64>> {
        series.records().iter().map(|r| r.features.get(feature).copied()).collect()
    };
    let target_column: Vec<Option<f64>> = target_values.iter().map(|&v| Some(v)).collect();

    let k = features.len();
    let n = k + 1;
    let mut pearson = Array2::<f64>::eye(n);
    let mut spearman = Array2::<f64>::eye(n);

    let mut columns: Vec<Vec<Option<f64>>> = features.iter().map(column).collect();
    columns.push(target_column);

    for i in 0..n {
        for j in (i + 1)..n {
            let (xs, ys) = complete_pairs(&columns[i], &columns[j]);
            let p = pearson_coefficient(&xs, &ys);
            let s = pearson_coefficient(&average_ranks(&xs), &average_ranks(&ys));
            pearson[(i, j)] = p;
            pearson[(j, i)] = p;
            spearman[(i, j)] = s;
            spearman[(j, i)] = s;
        }
    }
    // columns only existed to feed the pair loop
    drop(columns);

    Ok(CorrelationMatrix { features, target, pearson, spearman, excluded })
}

/// Extract the pairwise-complete observations of two sparse columns.
fn complete_pairs(a: &[Option<f64>], b: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (va, vb) in a.iter().zip(b) {
        if let (Some(x), Some(y)) = (va, vb) {
            xs.push(*x);
            ys.push(*y);
        }
    }
    (xs, ys)
}

/// Pearson correlation coefficient, with the degenerate-pair convention.
///
/// Fewer than 2 complete pairs, or zero variance on either side, yields
/// 0.0 rather than NaN; the result is clamped to [-1, 1] against
/// floating-point drift.
fn pearson_coefficient(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Average ranks (1-based) with ties sharing their mean rank.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a].partial_cmp(&values[b]).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Ties share the mean of the ranks they span.
        let mean_rank = ((i + 1 + j + 1) as f64) / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = mean_rank;
        }
        i = j + 1;
    }
    ranks
}
