//! # Map Configuration
//!
//! The singleton map configuration and the global generation density knob.
//!
//! Exactly one map configuration exists; deleting it is forbidden. The
//! invariant is structural: [`crate::store::MapConfigStore`] exposes load and
//! save but no delete, and the write path re-validates dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::{CoreError, CoreResult};

/// Global density selector for a generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Density {
    /// Half the catalog weights.
    Low = 0,
    /// Catalog weights as written.
    #[default]
    Medium = 1,
    /// Half again on top of the catalog weights.
    High = 2,
}

impl Density {
    /// Multiplier applied to every element type's density weight.
    #[inline]
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 1.5,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Density {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoreError::UnknownDensity(other.to_string())),
        }
    }
}

/// The singleton map configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile edge length in pixels, for the renderer.
    pub tile_size: u32,
    /// Biome reported for coordinates no band claims.
    pub default_biome: Biome,
    /// Seed of the most recent generation run, if any.
    pub generation_seed: Option<u64>,
    /// Unix timestamp of the most recent regeneration, if any.
    pub last_regenerated_at: Option<i64>,
}

impl MapConfig {
    /// Smallest permitted width/height.
    pub const MIN_DIMENSION: u32 = 50;
    /// Largest permitted width/height.
    pub const MAX_DIMENSION: u32 = 1000;
    /// Smallest permitted tile size.
    pub const MIN_TILE_SIZE: u32 = 32;
    /// Largest permitted tile size.
    pub const MAX_TILE_SIZE: u32 = 128;

    /// Creates a validated map configuration with no generation history.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMapDimensions`] or
    /// [`CoreError::InvalidTileSize`] when a bound is violated.
    pub fn new(
        width: u32,
        height: u32,
        tile_size: u32,
        default_biome: Biome,
    ) -> CoreResult<Self> {
        let config = Self {
            width,
            height,
            tile_size,
            default_biome,
            generation_seed: None,
            last_regenerated_at: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-checks the dimension invariants. Called by store write paths.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MapConfig::new`].
    pub fn validate(&self) -> CoreResult<()> {
        let dim_ok = |v: u32| (Self::MIN_DIMENSION..=Self::MAX_DIMENSION).contains(&v);
        if !dim_ok(self.width) || !dim_ok(self.height) {
            return Err(CoreError::InvalidMapDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(Self::MIN_TILE_SIZE..=Self::MAX_TILE_SIZE).contains(&self.tile_size) {
            return Err(CoreError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    /// Map area in tiles.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
