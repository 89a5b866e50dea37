//! series — the immutable input data model of the pricing core.
//!
//! Purpose
//! -------
//! Define the typed feature vocabulary, per-observation records, and the
//! validated, timestamp-ordered series every pricing component consumes.
//! This subtree is the only place raw caller data is inspected; all other
//! modules rely on the invariants enforced here.
//!
//! Key behaviors
//! -------------
//! - [`data`] holds [`Feature`], [`FeatureCategory`], [`EnrichedRecord`],
//!   [`TargetKind`], and the validated [`EnrichedSeries`] container.
//! - [`validation`] centralizes construction-time guards (ordering,
//!   finiteness, occupancy range).
//! - [`errors`] provides [`SeriesError`] and the [`SeriesResult`] alias.
//!
//! Conventions
//! -----------
//! - Feature maps are `BTreeMap<Feature, f64>` ordered by canonical name,
//!   so every derived artifact downstream is deterministic.
//! - The series is owned by the caller and only borrowed by the core;
//!   nothing in this subtree mutates after construction.

pub mod data;
pub mod errors;
pub mod validation;

pub use self::data::{EnrichedRecord, EnrichedSeries, Feature, FeatureCategory, TargetKind};
pub use self::errors::{SeriesError, SeriesResult};
