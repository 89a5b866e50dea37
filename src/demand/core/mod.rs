//! demand::core — shared data and configuration for demand fitting.
//!
//! Purpose
//! -------
//! House the pieces every demand model consumes: the standardized design
//! matrix built from an enriched series ([`data`]) and the explicit
//! configuration and price-grid types ([`options`]). Models themselves
//! live in `demand::models`.
//!
//! Conventions
//! -----------
//! - All configuration is passed explicitly; no process-wide state.
//! - Errors are reported via `DemandResult<T>`.

pub mod data;
pub mod options;

pub use self::data::{DemandData, DesignLayout};
pub use self::options::{
    BoundMethod, DemandOptions, PriceGrid, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_GRID_MARGIN,
    DEFAULT_GRID_POINTS, DEFAULT_MIN_OBSERVATIONS, DEFAULT_RIDGE,
};
