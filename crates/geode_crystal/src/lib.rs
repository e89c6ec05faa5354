//! # GEODE Crystal
//!
//! Engagement metrics and crystal mesh generation.
//!
//! A user's published content and rating aggregates condense into a handful
//! of scalar metrics (diversity, interaction, engagement), which derive the
//! presentation parameters of their crystal (facet count, glow, purity,
//! dominant colors), which in turn generate a small 3D mesh for the viewer.
//!
//! ## Design Principles
//!
//! 1. **Exact formulas**: every metric is a fixed contract, tested to the
//!    rounded decimal
//! 2. **Idempotent**: recalculating against unchanged aggregates yields an
//!    identical crystal, mesh included (timestamp aside)
//! 3. **Per-user isolation**: no cross-user state; recalculations for
//!    distinct users may run concurrently
//!
//! ## Example
//!
//! ```rust,ignore
//! use geode_crystal::{ContentAggregates, CrystalMetricCalculator};
//!
//! let calculator = CrystalMetricCalculator::new();
//! let metric = calculator.recalculate(&mut store, user_id, &aggregates, now)?;
//! assert!(metric.facet_count >= 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod geometry;
pub mod math;
pub mod metrics;
pub mod store;

pub use error::{CrystalError, CrystalResult};
pub use geometry::{CrystalGeometry, CrystalGeometryBuilder};
pub use math::Vec3;
pub use metrics::{
    ContentAggregates, ContentType, CrystalMetric, CrystalMetricCalculator, DEFAULT_COLOR,
};
pub use store::{CrystalMetricStore, MemoryCrystalMetricStore};
