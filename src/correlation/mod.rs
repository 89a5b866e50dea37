//! correlation — feature correlation, ranking, and category weighting.
//!
//! Purpose
//! -------
//! Implement the first stage of the pricing pipeline: measure how each
//! candidate feature relates to the target, rank features by a combined
//! multi-method score, and derive the normalized category weights the
//! demand model consumes as priors.
//!
//! Key behaviors
//! -------------
//! - [`matrix`] builds symmetric Pearson + Spearman matrices over
//!   pairwise-complete observations, with an auditable exclusion list for
//!   under-observed features.
//! - [`ranking`] combines the per-method target correlations under a
//!   swappable [`CombinePolicy`] and orders features deterministically.
//! - [`weights`] normalizes per-category score mass into
//!   [`PricingWeights`] with an explicit base residual.
//!
//! Invariants & assumptions
//! ------------------------
//! - Matrices are symmetric with unit diagonal; entries lie in [-1, 1].
//! - Rankings and weights are pure functions of the series content: same
//!   input, bit-identical output.
//! - Zero eligible features flows through as an empty ranking and an
//!   all-base weight vector — an explicit fallback signal, never an
//!   exception.
//!
//! Downstream usage
//! ----------------
//! - `demand` consumes [`PricingWeights`] to scale per-coefficient ridge
//!   penalties; the [`FeatureRanking`] is an audit artifact for the
//!   caller and is not re-consumed by the design matrix.

pub mod errors;
pub mod matrix;
pub mod ranking;
pub mod weights;

pub use self::errors::{CorrError, CorrResult};
pub use self::matrix::{
    compute_correlations, CorrelationMatrix, CorrelationMethod, CorrelationOptions,
    ExcludedFeature, Target, DEFAULT_MIN_PAIRED_OBS,
};
pub use self::ranking::{rank_features, CombinePolicy, FeatureRanking, RankedFeature};
pub use self::weights::{generate_weights, PricingWeights, WeightOptions, DEFAULT_BASE_FLOOR};
