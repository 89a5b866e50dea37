//! rust_pricing — pricing decision core for perishable-inventory demand.
//!
//! Purpose
//! -------
//! Serve as the crate root for a deterministic, in-process pricing engine:
//! from an enriched demand series it estimates feature relevance, fits a
//! price-elasticity model with confidence bounds, searches a constrained
//! price grid for the revenue-maximizing decision, explains that decision
//! as a reconciled adjustment waterfall, and closes the loop with forecast
//! scoring and KPI rollups.
//!
//! Key behaviors
//! -------------
//! - Re-export the pipeline stages as the public crate surface: [`series`],
//!   [`correlation`], [`demand`], [`decision`] and [`evaluation`], with the
//!   shared numerical machinery in [`optimization`] and [`inference`].
//! - Degrade explicitly instead of failing opaquely: sparse histories fall
//!   back to a flat booking-rate curve, unavailable metrics are `None`, and
//!   constraint clamps are flagged on the decision itself.
//!
//! Invariants & assumptions
//! ------------------------
//! - All stages are pure functions over immutable borrows; no I/O, locks,
//!   or process-wide state. Deterministic paths are idempotent, and the
//!   bootstrap is reproducible from an explicit seed.
//! - Errors are propagated as the per-subtree enums documented in each
//!   module's `errors.rs`; recoverable conditions (insufficient data) are
//!   modeled as outcomes, not errors.
//!
//! Conventions
//! -----------
//! - Prices are positive finite `f64`; probabilities live in `[0, 1]`.
//! - Vector/matrix work uses `ndarray` in the optimizer and `nalgebra`
//!   for the linear-algebra solves.
//!
//! Downstream usage
//! ----------------
//! - Callers typically run the full pipeline: build an
//!   [`series::EnrichedSeries`], derive [`correlation::PricingWeights`],
//!   fit via [`demand::fit_with_fallback`], decide via
//!   [`decision::optimize_price`], explain via
//!   [`decision::build_waterfall`], and score via [`evaluation`].
//! - Each stage is also usable standalone; none holds state between calls.
//!
//! Testing notes
//! -------------
//! - Unit tests live in `#[cfg(test)]` modules beside each file; the
//!   end-to-end pipeline is exercised in
//!   `tests/integration_pricing_pipeline.rs`.

pub mod correlation;
pub mod decision;
pub mod demand;
pub mod evaluation;
pub mod inference;
pub mod optimization;
pub mod series;
