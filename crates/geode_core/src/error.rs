//! # Core Error Types
//!
//! Validation errors for the shared world model.
//!
//! Soft misses (a placement attempt that exhausts its retry budget, a
//! generation target that rounds to zero) are NOT errors anywhere in GEODE.
//! Only genuinely invalid input lands here.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by the shared world model.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Map dimensions outside the supported range.
    #[error("map dimensions {width}x{height} outside supported range [50,1000]")]
    InvalidMapDimensions {
        /// Requested width in tiles.
        width: u32,
        /// Requested height in tiles.
        height: u32,
    },

    /// Tile size outside the supported range.
    #[error("tile size {0} outside supported range [32,128]")]
    InvalidTileSize(u32),

    /// A biome name that does not match any known biome.
    #[error("unknown biome: {0:?}")]
    UnknownBiome(String),

    /// A density name that does not match low/medium/high.
    #[error("unknown density: {0:?}")]
    UnknownDensity(String),

    /// An element type that fails catalog validation.
    #[error("invalid catalog entry {name:?}: {reason}")]
    InvalidCatalogEntry {
        /// Name of the offending element type.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Catalog file failed to parse.
    #[error("catalog parse failure: {0}")]
    Toml(#[from] toml::de::Error),

    /// A storage collaborator failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
