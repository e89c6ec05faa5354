//! # GEODE
//!
//! The main integration crate, wiring all units together.
//!
//! ## Architecture (The Three Units)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        GEODE ENGINE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌───────────────┐   ┌────────────────┐   ┌──────────────┐  │
//! │  │ geode_core    │──>│ geode_         │   │ geode_       │  │
//! │  │               │   │ procedural     │   │ crystal      │  │
//! │  │ • enums       │   │                │   │              │  │
//! │  │ • catalog     │   │ • biomes       │   │ • metrics    │  │
//! │  │ • map config  │   │ • placement    │   │ • mesh       │  │
//! │  │ • store traits│   │ • world runs   │   │ • colors     │  │
//! │  └───────┬───────┘   └───────┬────────┘   └──────┬───────┘  │
//! │          │                   │                   │          │
//! │          └───────────────────┴───────────────────┘          │
//! │                              │                              │
//! │                     ┌────────┴────────┐                     │
//! │                     │ GenerationRunner │                    │
//! │                     │ (admin boundary, │                    │
//! │                     │  run lock)       │                    │
//! │                     └─────────────────┘                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `runner`: the admin-facing front door with the one-run-at-a-time lock

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod runner;

// Re-export the units
pub use geode_core as model;
pub use geode_crystal as crystal;
pub use geode_procedural as procedural;

// Re-export commonly used types
pub use geode_core::{
    Biome, Category, Density, ElementCatalog, ElementType, GenerationSeed, MapConfig,
    PlacedElement, Rarity,
};
pub use geode_crystal::{ContentAggregates, CrystalMetric, CrystalMetricCalculator};
pub use geode_procedural::{
    GenerationOptions, GenerationReport, GenerationStats, WorldGenerationService,
};
pub use runner::{AdminGenerationRequest, AdminGenerationResponse, GenerationRunner};
