//! series::errors — error types for enriched-series construction.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when validating and
//! constructing [`EnrichedSeries`](crate::series::data::EnrichedSeries)
//! values. Construction is the only place the core inspects raw caller
//! data, so all shape and finiteness violations are funneled through
//! [`SeriesError`].
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints
//!   ("timestamps must be strictly ascending") rather than internals.
//! - Each variant carries the offending index/value so callers can log a
//!   useful diagnostic without re-scanning their input.

pub type SeriesResult<T> = Result<T, SeriesError>;

/// SeriesError — violations detected while building an enriched series.
///
/// Variants
/// --------
/// - `Empty`
///   The caller supplied zero records.
/// - `NonAscendingTimestamp { index, prev, next }`
///   Record `index` does not strictly follow its predecessor; covers both
///   unsorted input and duplicate timestamps.
/// - `InvalidPrice { index, value }`
///   A realized price is non-finite or negative.
/// - `InvalidDemand { index, value }`
///   An observed demand is non-finite or negative.
/// - `OccupancyOutOfRange { index, value }`
///   An occupancy-fraction target lies outside [0, 1].
/// - `InvalidFeatureValue { index, feature, value }`
///   A feature value is NaN or ±∞.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    Empty,
    NonAscendingTimestamp { index: usize, prev: i64, next: i64 },
    InvalidPrice { index: usize, value: f64 },
    InvalidDemand { index: usize, value: f64 },
    OccupancyOutOfRange { index: usize, value: f64 },
    InvalidFeatureValue { index: usize, feature: String, value: f64 },
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Empty => {
                write!(f, "enriched series must contain at least one record")
            }
            SeriesError::NonAscendingTimestamp { index, prev, next } => {
                write!(
                    f,
                    "timestamps must be strictly ascending: record {index} has {next} after {prev}"
                )
            }
            SeriesError::InvalidPrice { index, value } => {
                write!(f, "record {index}: realized price must be finite and >= 0, got {value}")
            }
            SeriesError::InvalidDemand { index, value } => {
                write!(f, "record {index}: observed demand must be finite and >= 0, got {value}")
            }
            SeriesError::OccupancyOutOfRange { index, value } => {
                write!(f, "record {index}: occupancy fraction must lie in [0, 1], got {value}")
            }
            SeriesError::InvalidFeatureValue { index, feature, value } => {
                write!(f, "record {index}: feature '{feature}' must be finite, got {value}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Display formatting only: each variant must embed its payload so logs
    // are actionable. Validation behavior itself is covered in
    // series::validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Every variant's Display message should mention the offending index
    // and value so callers can locate the bad record.
    //
    // Given
    // -----
    // - One instance of each payload-carrying variant.
    //
    // Expect
    // ------
    // - The formatted message contains the payload fields.
    fn display_embeds_payloads() {
        let e = SeriesError::NonAscendingTimestamp { index: 3, prev: 10, next: 10 };
        let msg = e.to_string();
        assert!(msg.contains('3') && msg.contains("10"), "unexpected message: {msg}");

        let e = SeriesError::InvalidFeatureValue {
            index: 7,
            feature: "temp_max".to_string(),
            value: f64::NAN,
        };
        let msg = e.to_string();
        assert!(msg.contains("temp_max") && msg.contains('7'), "unexpected message: {msg}");
    }
}
