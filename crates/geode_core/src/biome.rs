//! # Biomes
//!
//! The five biome zones of a generated map.
//!
//! Classification itself (coordinate -> biome) lives in
//! `geode_procedural::biome`; this module only defines the closed
//! enumeration shared by the whole workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Biome zones, ordered from the map origin outward.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Biome {
    /// Open grassland around the origin.
    Meadow = 0,
    /// Dense woodland.
    Forest = 1,
    /// Wetland in the upper mid-band.
    Swamp = 2,
    /// Arid outer band.
    Desert = 3,
    /// Frozen rim of the map.
    Tundra = 4,
}

impl Biome {
    /// All biomes, in band order.
    pub const ALL: [Self; 5] = [
        Self::Meadow,
        Self::Forest,
        Self::Swamp,
        Self::Desert,
        Self::Tundra,
    ];

    /// Canonical lowercase name, matching the wire/catalog form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meadow => "meadow",
            Self::Forest => "forest",
            Self::Swamp => "swamp",
            Self::Desert => "desert",
            Self::Tundra => "tundra",
        }
    }

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Meadow,
            1 => Self::Forest,
            2 => Self::Swamp,
            3 => Self::Desert,
            _ => Self::Tundra,
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Biome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meadow" => Ok(Self::Meadow),
            "forest" => Ok(Self::Forest),
            "swamp" => Ok(Self::Swamp),
            "desert" => Ok(Self::Desert),
            "tundra" => Ok(Self::Tundra),
            other => Err(CoreError::UnknownBiome(other.to_string())),
        }
    }
}
