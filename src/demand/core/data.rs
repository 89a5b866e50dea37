//! demand::core::data — design matrix construction for demand fits.
//!
//! Purpose
//! -------
//! Turn an [`EnrichedSeries`] into the standardized numeric design a
//! demand model regresses on: an intercept, the realized price, and the
//! complete feature columns, each centered and scaled, together with
//! per-column ridge penalties derived from the category weight priors.
//!
//! Key behaviors
//! -------------
//! - Keep only features present in **every** record; sparse columns are
//!   a correlation-engine concern, not a regression one.
//! - Drop zero-variance columns. A constant price cannot identify a
//!   price coefficient, so the curve degenerates to flat and the price
//!   column is recorded as absent rather than producing a singular
//!   design.
//! - Standardize every non-intercept column to zero mean and unit
//!   standard deviation, remembering the moments so grid prices can be
//!   mapped into model space later.
//! - Scale the base ridge penalty down for columns whose category
//!   carries more correlation weight, so well-supported signals are
//!   shrunk less.
//!
//! Invariants & assumptions
//! ------------------------
//! - Column 0 is always the intercept (all ones, never penalized or
//!   standardized).
//! - When present, the price column sits at index 1 and is never
//!   penalized; feature columns follow in lexical feature order.
//! - The series has already been validated; all values are finite.
//!
//! Downstream usage
//! ----------------
//! - Demand models consume the standardized design directly as their
//!   `Data` payload; the elasticity curve uses [`DemandData::row_for_price`]
//!   to evaluate the fitted model on a price grid with the most recent
//!   feature values held fixed.
use crate::correlation::PricingWeights;
use crate::series::{EnrichedSeries, Feature, TargetKind};
use ndarray::{Array1, Array2};
use std::collections::{BTreeMap, BTreeSet};

/// Column layout and standardization moments of a demand design.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignLayout {
    /// Feature columns in lexical order, after completeness and
    /// variance filtering.
    pub features: Vec<Feature>,
    /// Index of the price column in the design, absent when the
    /// observed price had zero variance.
    pub price_column: Option<usize>,
    /// Per-column means (0 for the intercept).
    pub means: Array1<f64>,
    /// Per-column standard deviations (1 for the intercept).
    pub stds: Array1<f64>,
    /// Raw feature values of the most recent observation, used as the
    /// reference row when sweeping prices.
    pub reference: BTreeMap<Feature, f64>,
}

/// Standardized regression payload for demand-model fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandData {
    design: Array2<f64>,
    counts: Array1<f64>,
    penalties: Array1<f64>,
    layout: DesignLayout,
    capacity: f64,
    target: TargetKind,
}

impl DemandData {
    /// Build the standardized design from a validated series.
    ///
    /// Parameters
    /// ----------
    /// - `series`: validated observations.
    /// - `weights`: category weight priors; higher-weight categories
    ///   receive a smaller ridge penalty.
    /// - `ridge`: base ridge strength for standardized feature columns.
    pub fn from_series(series: &EnrichedSeries, weights: &PricingWeights, ridge: f64) -> Self {
        let records = series.records();
        let n = records.len();

        // Features present in every record, lexically ordered.
        let mut complete: BTreeSet<Feature> = records[0].features.keys().cloned().collect();
        for record in &records[1..] {
            complete.retain(|f| record.features.contains_key(f));
        }

        let price_varies = column_varies(records.iter().map(|r| r.price));
        let features: Vec<Feature> = complete
            .into_iter()
            .filter(|f| column_varies(records.iter().map(|r| r.features[f])))
            .collect();

        let price_column = if price_varies { Some(1) } else { None };
        let p = 1 + usize::from(price_varies) + features.len();

        let mut design = Array2::<f64>::zeros((n, p));
        for i in 0..n {
            design[[i, 0]] = 1.0;
            if let Some(col) = price_column {
                design[[i, col]] = records[i].price;
            }
        }
        let feature_offset = 1 + usize::from(price_varies);
        for (k, feature) in features.iter().enumerate() {
            for i in 0..n {
                design[[i, feature_offset + k]] = records[i].features[feature];
            }
        }

        // Standardize every non-intercept column in place.
        let mut means = Array1::<f64>::zeros(p);
        let mut stds = Array1::<f64>::ones(p);
        for j in 1..p {
            let col = design.column(j);
            let mean = col.sum() / n as f64;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
            let std = var.sqrt();
            means[j] = mean;
            stds[j] = std;
            let mut col = design.column_mut(j);
            col.mapv_inplace(|v| (v - mean) / std);
        }

        // Ridge: intercept and price unpenalized; feature columns shrunk
        // in inverse proportion to their category weight.
        let mut penalties = Array1::<f64>::zeros(p);
        for (k, feature) in features.iter().enumerate() {
            let weight = weights.get(feature.category());
            penalties[feature_offset + k] = ridge * (1.0 - weight.clamp(0.0, 1.0));
        }

        let counts = Array1::from_iter(records.iter().map(|r| r.demand));
        let layout = DesignLayout {
            features,
            price_column,
            means,
            stds,
            reference: series.latest_features().clone(),
        };

        Self {
            design,
            counts,
            penalties,
            layout,
            capacity: series.capacity(),
            target: series.target_kind(),
        }
    }

    /// Resampled copy of this design holding the same layout but only
    /// the given row indices. Used by the bootstrap.
    pub fn resample(&self, indices: &[usize]) -> Self {
        let p = self.n_params();
        let mut design = Array2::<f64>::zeros((indices.len(), p));
        let mut counts = Array1::<f64>::zeros(indices.len());
        for (i, &idx) in indices.iter().enumerate() {
            counts[i] = self.counts[idx];
            for j in 0..p {
                design[[i, j]] = self.design[[idx, j]];
            }
        }
        Self {
            design,
            counts,
            penalties: self.penalties.clone(),
            layout: self.layout.clone(),
            capacity: self.capacity,
            target: self.target,
        }
    }

    /// Standardized design matrix (rows are observations).
    pub fn design(&self) -> &Array2<f64> {
        &self.design
    }

    /// Observed demand values, one per row.
    pub fn counts(&self) -> &Array1<f64> {
        &self.counts
    }

    /// Per-column ridge penalties.
    pub fn penalties(&self) -> &Array1<f64> {
        &self.penalties
    }

    /// Column layout and standardization moments.
    pub fn layout(&self) -> &DesignLayout {
        &self.layout
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.design.nrows()
    }

    /// Number of design columns (parameters).
    pub fn n_params(&self) -> usize {
        self.design.ncols()
    }

    /// In-sample capacity of the owning series.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Interpretation of the demand column.
    pub fn target_kind(&self) -> TargetKind {
        self.target
    }

    /// Standardized model-space row for a candidate price, holding all
    /// non-price features at their most recent observed value.
    ///
    /// A reference feature that was filtered out of the design simply
    /// does not appear; a feature kept in the design but missing from
    /// the reference map evaluates at its column mean (standardized 0).
    pub fn row_for_price(&self, price: f64) -> Array1<f64> {
        let p = self.n_params();
        let mut row = Array1::<f64>::zeros(p);
        row[0] = 1.0;
        if let Some(col) = self.layout.price_column {
            row[col] = (price - self.layout.means[col]) / self.layout.stds[col];
        }
        let feature_offset = 1 + usize::from(self.layout.price_column.is_some());
        for (k, feature) in self.layout.features.iter().enumerate() {
            let j = feature_offset + k;
            if let Some(&raw) = self.layout.reference.get(feature) {
                row[j] = (raw - self.layout.means[j]) / self.layout.stds[j];
            }
        }
        row
    }
}

/// Whether an iterator of values has nonzero variance.
fn column_varies(values: impl Iterator<Item = f64>) -> bool {
    let mut first: Option<f64> = None;
    for v in values {
        match first {
            None => first = Some(v),
            Some(f) if (v - f).abs() > f64::EPSILON => return true,
            Some(_) => {}
        }
    }
    false
}
