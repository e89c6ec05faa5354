//! # GEODE Core
//!
//! Shared world model for the GEODE generation engine.
//!
//! ## Design Principles
//!
//! 1. **Closed enumerations**: biome, category, rarity, bonus type, decay
//!    state and density are tagged unions. String input parses at the
//!    boundary and unknown values are errors, never silent defaults.
//! 2. **Storage is a collaborator**: the core reads and writes through the
//!    traits in [`store`]; it never owns a database.
//! 3. **Validated configuration**: map dimensions and catalog entries are
//!    checked at construction and again in the store write path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use geode_core::{ElementCatalog, MapConfig, Biome};
//!
//! let catalog = ElementCatalog::from_toml_str(include_str!("catalog.toml"))?;
//! let config = MapConfig::new(200, 200, 64, Biome::Meadow)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod catalog;
pub mod element;
pub mod error;
pub mod map;
pub mod seed;
pub mod store;

pub use biome::Biome;
pub use catalog::ElementCatalog;
pub use element::{
    BonusType, Category, DecayState, ElementType, PlacedElement, Rarity, ResourceBonus,
};
pub use error::{CoreError, CoreResult};
pub use map::{Density, MapConfig};
pub use seed::GenerationSeed;
pub use store::{
    MapConfigStore, MemoryMapConfigStore, MemoryPlacedElementStore, PlacedElementStore,
    StoreError, StoreResult,
};
