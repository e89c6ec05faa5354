//! # GEODE Procedural Generation
//!
//! Deterministic, density-driven element placement over a bounded map.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same world
//! 2. **Injectable randomness**: one explicitly-seeded generator per run,
//!    threaded through every draw - never a process-wide global
//! 3. **Soft misses**: exhausted retry budgets reduce the output count and
//!    are never errors
//! 4. **Bounded scale**: occupancy queries are brute-force axis-aligned
//!    scans, sized for hundreds to low thousands of elements
//!
//! ## Core Components
//!
//! - [`BiomeClassifier`]: radial-distance zoning of map coordinates
//! - [`CollisionIndex`]: axis-aligned occupancy and range queries
//! - [`RandomPlacementEngine`]: bounded random retry against an oracle
//! - [`ElementPlacementService`]: one placement with rarity variation
//! - [`WorldGenerationService`]: the full seeded generation run
//!
//! ## Example
//!
//! ```rust,ignore
//! use geode_procedural::{GenerationOptions, WorldGenerationService};
//!
//! let mut service = WorldGenerationService::new(map_store, element_store);
//! let report = service.generate(&catalog, &options, now)?;
//! assert!(report.success);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod collision;
pub mod error;
pub mod placement;
pub mod worldgen;

pub use biome::BiomeClassifier;
pub use collision::CollisionIndex;
pub use error::{WorldGenError, WorldGenResult};
pub use placement::{ElementPlacementService, PlaceOptions, RandomPlacementEngine};
pub use worldgen::{
    GenerationOptions, GenerationReport, GenerationStats, WorldGenerationService,
};
