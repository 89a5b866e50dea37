//! series::validation — construction-time guards for enriched series.
//!
//! Purpose
//! -------
//! Centralize the shape and finiteness checks performed when an
//! [`EnrichedSeries`](crate::series::data::EnrichedSeries) is built, so
//! that every downstream component can rely on the documented invariants
//! without re-validating.
//!
//! Conventions
//! -----------
//! - Purely read-only; no allocation beyond error construction.
//! - The first violation encountered (in record order) is reported.

use crate::series::{
    data::{EnrichedRecord, TargetKind},
    errors::{SeriesError, SeriesResult},
};

/// Validate the invariants of an enriched record slice.
///
/// Parameters
/// ----------
/// - `records`: candidate observations, expected sorted strictly
///   ascending by timestamp.
/// - `target`: interpretation of the demand field; occupancy targets get
///   the additional [0, 1] range check.
///
/// Returns
/// -------
/// `SeriesResult<()>` — `Ok(())` when all invariants hold, otherwise the
/// first [`SeriesError`] in record order.
///
/// Errors
/// ------
/// - `SeriesError::Empty` for zero records.
/// - `SeriesError::NonAscendingTimestamp` for unsorted or duplicate
///   timestamps.
/// - `SeriesError::InvalidPrice` / `InvalidDemand` for non-finite or
///   negative values.
/// - `SeriesError::OccupancyOutOfRange` for occupancy targets outside
///   [0, 1].
/// - `SeriesError::InvalidFeatureValue` for NaN/±∞ feature values.
pub fn validate_records(records: &[EnrichedRecord], target: TargetKind) -> SeriesResult<()> {
    if records.is_empty() {
        return Err(SeriesError::Empty);
    }
    let mut prev_ts: Option<i64> = None;
    for (index, record) in records.iter().enumerate() {
        if let Some(prev) = prev_ts {
            if record.timestamp <= prev {
                return Err(SeriesError::NonAscendingTimestamp {
                    index,
                    prev,
                    next: record.timestamp,
                });
            }
        }
        prev_ts = Some(record.timestamp);

        if !record.price.is_finite() || record.price < 0.0 {
            return Err(SeriesError::InvalidPrice { index, value: record.price });
        }
        if !record.demand.is_finite() || record.demand < 0.0 {
            return Err(SeriesError::InvalidDemand { index, value: record.demand });
        }
        if target == TargetKind::Occupancy && record.demand > 1.0 {
            return Err(SeriesError::OccupancyOutOfRange { index, value: record.demand });
        }
        for (feature, &value) in &record.features {
            if !value.is_finite() {
                return Err(SeriesError::InvalidFeatureValue {
                    index,
                    feature: feature.name().to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}
