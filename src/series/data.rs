//! series::data — typed features, enriched records, and validated series.
//!
//! Purpose
//! -------
//! Define the immutable data model the pricing core consumes: a closed set
//! of feature identifiers with category assignments, single enriched
//! observations ([`EnrichedRecord`]), and the validated, timestamp-ordered
//! [`EnrichedSeries`] that every downstream component reads.
//!
//! Key behaviors
//! -------------
//! - Map each [`Feature`] to exactly one [`FeatureCategory`] so that
//!   category weights can be derived deterministically from feature-level
//!   correlation scores.
//! - Enforce the series invariants (non-empty, strictly ascending
//!   timestamps, finite values, occupancy range) once at construction via
//!   [`EnrichedSeries::new`]; all downstream code may then assume them.
//! - Provide the small derived quantities fallback logic needs (in-sample
//!   capacity, historical booking rate) without caching any state.
//!
//! Invariants & assumptions
//! ------------------------
//! - An [`EnrichedSeries`] is never empty and its timestamps are strictly
//!   ascending (no duplicates).
//! - Prices and demands are finite and non-negative; occupancy-fraction
//!   targets lie in [0, 1].
//! - Feature maps use [`std::collections::BTreeMap`] keyed by [`Feature`],
//!   whose ordering is the lexical order of canonical names, so iteration
//!   order — and therefore every derived artifact — is deterministic.
//!
//! Conventions
//! -----------
//! - Timestamps are unix seconds (`i64`); the core never interprets them
//!   beyond ordering.
//! - The series is borrowed, never mutated; derived artifacts are
//!   recomputed from scratch on each call.
//!
//! Downstream usage
//! ----------------
//! - `correlation` reads feature columns and the target to build
//!   correlation matrices and category weights.
//! - `demand` builds its design matrix from the same records and holds the
//!   latest feature row fixed when sweeping prices.
//!
//! Testing notes
//! -------------
//! - Unit tests here cover feature naming/category mapping, ordering
//!   determinism, and the derived capacity / booking-rate helpers.
//! - Construction-failure paths are exercised in `series::validation`.
use std::collections::BTreeMap;

use crate::series::{errors::SeriesResult, validation::validate_records};

/// FeatureCategory — the closed category set used for pricing weights.
///
/// Categories are ordered by their fixed waterfall/weighting precedence:
/// weather, temporal, event, competitor, base. `Base` is the implicit
/// residual category; open-ended features fall into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureCategory {
    Weather,
    Temporal,
    Event,
    Competitor,
    Base,
}

impl FeatureCategory {
    /// All categories in their fixed precedence order.
    pub const ALL: [FeatureCategory; 5] = [
        FeatureCategory::Weather,
        FeatureCategory::Temporal,
        FeatureCategory::Event,
        FeatureCategory::Competitor,
        FeatureCategory::Base,
    ];

    /// Canonical lowercase name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            FeatureCategory::Weather => "weather",
            FeatureCategory::Temporal => "temporal",
            FeatureCategory::Event => "event",
            FeatureCategory::Competitor => "competitor",
            FeatureCategory::Base => "base",
        }
    }
}

impl std::fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Feature — closed enum of candidate explanatory features.
///
/// Purpose
/// -------
/// Identify the exogenous and derived signals attached to each enriched
/// record. The known variants cover the weather, temporal, event, and
/// competitor families; [`Feature::Other`] is the escape hatch for
/// genuinely open-ended enrichment columns and is assigned to the base
/// category.
///
/// Invariants
/// ----------
/// - Ordering, equality, and hashing all follow [`Feature::name`], so two
///   `Other` features with the same label are the same feature and
///   iteration over feature maps is lexically deterministic.
#[derive(Debug, Clone)]
pub enum Feature {
    /// Daily maximum temperature.
    TempMax,
    /// Daily precipitation amount.
    Precipitation,
    /// Weekend indicator (0/1).
    Weekend,
    /// Sine component of the day-of-week cyclical encoding.
    DowSin,
    /// Cosine component of the day-of-week cyclical encoding.
    DowCos,
    /// Booking lead time in days.
    LeadTime,
    /// Public-holiday indicator (0/1).
    Holiday,
    /// Calendar event intensity score.
    EventScore,
    /// Median competitor price observed for the stay date.
    CompetitorMedian,
    /// Open-ended enrichment column, identified by its label.
    Other(String),
}

impl Feature {
    /// Canonical name used for ordering, display, and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Feature::TempMax => "temp_max",
            Feature::Precipitation => "precipitation",
            Feature::Weekend => "weekend",
            Feature::DowSin => "dow_sin",
            Feature::DowCos => "dow_cos",
            Feature::LeadTime => "lead_time",
            Feature::Holiday => "holiday",
            Feature::EventScore => "event_score",
            Feature::CompetitorMedian => "competitor_median",
            Feature::Other(label) => label.as_str(),
        }
    }

    /// The fixed category this feature contributes weight to.
    pub fn category(&self) -> FeatureCategory {
        match self {
            Feature::TempMax | Feature::Precipitation => FeatureCategory::Weather,
            Feature::Weekend | Feature::DowSin | Feature::DowCos | Feature::LeadTime => {
                FeatureCategory::Temporal
            }
            Feature::Holiday | Feature::EventScore => FeatureCategory::Event,
            Feature::CompetitorMedian => FeatureCategory::Competitor,
            Feature::Other(_) => FeatureCategory::Base,
        }
    }
}

// Equality, hashing, and ordering must all agree on `name()`: an
// `Other(..)` label that spells a canonical name denotes the same
// feature as the canonical variant, so map keys never split or shadow.
impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Feature {}

impl std::hash::Hash for Feature {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl PartialOrd for Feature {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Feature {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name().cmp(other.name())
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// TargetKind — interpretation of the demand field of a series.
///
/// - `Count`: demand is a non-negative booking count; demand models use a
///   log link and predictions are normalized by in-sample capacity when a
///   probability is required.
/// - `Occupancy`: demand is a sell-through fraction in [0, 1]; demand
///   models work on the logit scale directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Count,
    Occupancy,
}

/// EnrichedRecord — one observation of demand, price, and features.
///
/// Immutable once produced by the enrichment collaborator; the core only
/// reads it. The feature map may be sparse: a feature missing from a
/// record is treated as a missing observation by the correlation engine,
/// not as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    /// Unix timestamp (seconds) of the observation.
    pub timestamp: i64,
    /// Observed demand: a booking count or an occupancy fraction,
    /// depending on the owning series' [`TargetKind`].
    pub demand: f64,
    /// Realized price for the observation.
    pub price: f64,
    /// Named feature values attached by the enrichment collaborator.
    pub features: BTreeMap<Feature, f64>,
}

impl EnrichedRecord {
    /// Build a record; validation happens at series construction.
    pub fn new(timestamp: i64, demand: f64, price: f64, features: BTreeMap<Feature, f64>) -> Self {
        Self { timestamp, demand, price, features }
    }
}

/// EnrichedSeries — validated, timestamp-ordered observations for one
/// business entity.
///
/// Purpose
/// -------
/// The single input artifact of the pricing core. Construction via
/// [`EnrichedSeries::new`] enforces every series invariant once, so all
/// downstream components can borrow the records without re-validating.
///
/// Fields
/// ------
/// - `records`: strictly ascending by timestamp, non-empty.
/// - `target`: how the demand field is to be interpreted.
///
/// Invariants
/// ----------
/// - `records.len() >= 1`; timestamps strictly ascending.
/// - All prices/demands finite and non-negative; occupancy targets in
///   [0, 1]; all feature values finite.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    records: Vec<EnrichedRecord>,
    target: TargetKind,
}

impl EnrichedSeries {
    /// Validate and construct a series.
    ///
    /// Parameters
    /// ----------
    /// - `records`: observations in any order of construction by the
    ///   caller, but required to already be sorted strictly ascending by
    ///   timestamp (the core never reorders caller data).
    /// - `target`: interpretation of the demand field.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<Self>` — the validated series, or the first
    /// [`SeriesError`](crate::series::errors::SeriesError) encountered.
    pub fn new(records: Vec<EnrichedRecord>, target: TargetKind) -> SeriesResult<Self> {
        validate_records(&records, target)?;
        Ok(Self { records, target })
    }

    /// Borrow the ordered records.
    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// A validated series is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How the demand field is interpreted.
    pub fn target_kind(&self) -> TargetKind {
        self.target
    }

    /// In-sample capacity used to turn count predictions into sell-through
    /// probabilities: the maximum observed demand, floored at 1.0. For
    /// occupancy targets the capacity is 1.0 by definition.
    pub fn capacity(&self) -> f64 {
        match self.target {
            TargetKind::Occupancy => 1.0,
            TargetKind::Count => {
                self.records.iter().map(|r| r.demand).fold(1.0_f64, f64::max)
            }
        }
    }

    /// Observed historical booking rate in [0, 1]: mean demand divided by
    /// capacity. This is the flat-elasticity fallback probability.
    pub fn booking_rate(&self) -> f64 {
        let mean =
            self.records.iter().map(|r| r.demand).sum::<f64>() / self.records.len() as f64;
        (mean / self.capacity()).clamp(0.0, 1.0)
    }

    /// Feature map of the most recent observation, used as the reference
    /// row when sweeping prices across a grid.
    pub fn latest_features(&self) -> &BTreeMap<Feature, f64> {
        // Non-empty by construction.
        &self.records[self.records.len() - 1].features
    }

    /// Minimum and maximum realized price over the series.
    pub fn price_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for r in &self.records {
            lo = lo.min(r.price);
            hi = hi.max(r.price);
        }
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Feature naming, category assignment, and lexical ordering.
    // - Derived capacity / booking-rate / price-range helpers on valid
    //   series.
    //
    // They intentionally DO NOT cover:
    // - Construction failures (covered in series::validation tests).
    // -------------------------------------------------------------------------

    fn record(ts: i64, demand: f64, price: f64) -> EnrichedRecord {
        EnrichedRecord::new(ts, demand, price, BTreeMap::new())
    }

    #[test]
    // Purpose
    // -------
    // Feature ordering must follow canonical names so BTreeMap iteration
    // is deterministic, including for Other(..) labels.
    //
    // Given
    // -----
    // - A mix of known variants and an Other label.
    //
    // Expect
    // ------
    // - Sorting follows lexical order of `name()`.
    fn feature_ordering_is_lexical_by_name() {
        let mut feats = vec![
            Feature::Weekend,
            Feature::Other("adr_lag".to_string()),
            Feature::TempMax,
            Feature::CompetitorMedian,
        ];
        feats.sort();
        let names: Vec<&str> = feats.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["adr_lag", "competitor_median", "temp_max", "weekend"]);
    }

    #[test]
    // Purpose
    // -------
    // Equality and hashing must agree with the name-based ordering, so
    // an Other(..) label spelling a canonical name is the same feature
    // and map keys never split.
    //
    // Given
    // -----
    // - Feature::Weekend and Feature::Other("weekend").
    //
    // Expect
    // ------
    // - cmp is Equal, == holds, hashes collide, and a BTreeMap keyed on
    //   both holds a single entry with the last-written value.
    fn feature_equality_and_hashing_follow_name() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        // Arrange
        let canonical = Feature::Weekend;
        let alias = Feature::Other("weekend".to_string());

        // Act & Assert: ordering, equality, and hashing agree.
        assert_eq!(alias.cmp(&canonical), std::cmp::Ordering::Equal);
        assert_eq!(alias, canonical);
        let hash = |f: &Feature| {
            let mut hasher = DefaultHasher::new();
            f.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&alias), hash(&canonical));

        // Act & Assert: a map treats them as one key.
        let mut features: BTreeMap<Feature, f64> = BTreeMap::new();
        features.insert(canonical, 0.0);
        features.insert(alias, 1.0);
        assert_eq!(features.len(), 1);
        assert_eq!(features[&Feature::Weekend], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Category assignment must route each known feature family to its
    // fixed category and open-ended features to Base.
    //
    // Given
    // -----
    // - One representative feature per family.
    //
    // Expect
    // ------
    // - Categories match the closed mapping.
    fn feature_categories_match_families() {
        assert_eq!(Feature::Precipitation.category(), FeatureCategory::Weather);
        assert_eq!(Feature::DowSin.category(), FeatureCategory::Temporal);
        assert_eq!(Feature::Holiday.category(), FeatureCategory::Event);
        assert_eq!(Feature::CompetitorMedian.category(), FeatureCategory::Competitor);
        assert_eq!(Feature::Other("x".into()).category(), FeatureCategory::Base);
    }

    #[test]
    // Purpose
    // -------
    // Capacity and booking rate must come out as documented for a
    // count-like target.
    //
    // Given
    // -----
    // - Demands [2, 4, 6] with arbitrary prices.
    //
    // Expect
    // ------
    // - capacity = 6, booking_rate = mean(2,4,6)/6 = 2/3.
    fn capacity_and_booking_rate_for_counts() {
        let series = EnrichedSeries::new(
            vec![record(0, 2.0, 100.0), record(1, 4.0, 110.0), record(2, 6.0, 90.0)],
            TargetKind::Count,
        )
        .expect("series should validate");

        assert_eq!(series.capacity(), 6.0);
        assert!((series.booking_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(series.price_range(), (90.0, 110.0));
    }

    #[test]
    // Purpose
    // -------
    // Occupancy targets have unit capacity and a booking rate equal to
    // the mean occupancy.
    //
    // Given
    // -----
    // - Occupancy demands [0.25, 0.75].
    //
    // Expect
    // ------
    // - capacity = 1.0, booking_rate = 0.5.
    fn capacity_and_booking_rate_for_occupancy() {
        let series = EnrichedSeries::new(
            vec![record(0, 0.25, 80.0), record(10, 0.75, 85.0)],
            TargetKind::Occupancy,
        )
        .expect("series should validate");

        assert_eq!(series.capacity(), 1.0);
        assert!((series.booking_rate() - 0.5).abs() < 1e-12);
    }
}
