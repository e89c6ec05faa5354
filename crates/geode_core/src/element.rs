//! # Element Model
//!
//! Element type catalog rows and placed-element records.
//!
//! Element types are immutable during a generation run; placed elements are
//! created only by the placement service, and their position and owning type
//! never change after creation. The interaction counter and decay state are
//! mutated by interaction handling outside the core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;

/// Element category, driving biome density multipliers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    /// Trees, bushes, flowers.
    Vegetation = 0,
    /// Ponds, springs, pools.
    Water = 1,
    /// Rocks, cliffs, dunes.
    Terrain = 2,
    /// Ruins, shrines, camps.
    Structure = 3,
    /// Small cosmetic scatter.
    Decoration = 4,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Vegetation,
        Self::Water,
        Self::Terrain,
        Self::Structure,
        Self::Decoration,
    ];

    /// Canonical lowercase name, matching the wire/catalog form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetation => "vegetation",
            Self::Water => "water",
            Self::Terrain => "terrain",
            Self::Structure => "structure",
            Self::Decoration => "decoration",
        }
    }
}

/// Rarity tier, ordered by scarcity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rarity {
    /// Baseline scatter, tight packing allowed.
    Common = 0,
    /// Slightly sparser than common.
    Uncommon = 1,
    /// Noticeably sparse.
    Rare = 2,
    /// Landmark-grade spacing.
    Epic = 3,
    /// One per vista.
    Legendary = 4,
}

impl Rarity {
    /// All rarities, from most to least common.
    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Minimum spacing radius (in tiles) enforced between an element of this
    /// rarity and any existing element.
    #[inline]
    #[must_use]
    pub const fn min_spacing(self) -> i32 {
        match self {
            Self::Common => 2,
            Self::Uncommon => 3,
            Self::Rare => 5,
            Self::Epic => 8,
            Self::Legendary => 10,
        }
    }

    /// Scale factor range drawn uniformly at placement time.
    #[inline]
    #[must_use]
    pub const fn scale_range(self) -> (f64, f64) {
        match self {
            Self::Legendary => (1.0, 1.5),
            Self::Epic => (0.9, 1.3),
            Self::Common | Self::Uncommon | Self::Rare => (0.8, 1.2),
        }
    }

    /// Canonical lowercase name, matching the wire/catalog form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

/// Whether a resource bonus pays out once or on a cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BonusType {
    /// Collectable exactly once; the element depletes afterwards.
    OneTime = 0,
    /// Collectable repeatedly, gated by `cooldown_hours`.
    Repeating = 1,
}

/// Visual/functional wear state of a placed element.
///
/// Elements start pristine. One-time bonus collection depletes them;
/// interaction handling outside the core may weather them over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DecayState {
    /// Freshly generated.
    #[default]
    Pristine = 0,
    /// Worn by interaction, still yields bonuses.
    Weathered = 1,
    /// Exhausted; yields nothing until regeneration.
    Depleted = 2,
}

impl DecayState {
    /// The next decay stage. Depleted is terminal.
    #[must_use]
    pub const fn advance(self) -> Self {
        match self {
            Self::Pristine => Self::Weathered,
            Self::Weathered | Self::Depleted => Self::Depleted,
        }
    }
}

/// Resource payout attached to an element type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBonus {
    /// Resource name -> amount granted per collection.
    pub resources: BTreeMap<String, u32>,
    /// One-time or repeating payout.
    pub bonus_type: BonusType,
    /// Cooldown between repeating collections, in hours.
    #[serde(default)]
    pub cooldown_hours: u32,
}

impl ResourceBonus {
    /// Whether the bonus can be collected at `now` (unix seconds), given the
    /// last collection time.
    #[must_use]
    pub fn is_available(&self, last_collected_at: Option<i64>, now: i64) -> bool {
        match (self.bonus_type, last_collected_at) {
            (_, None) => true,
            (BonusType::OneTime, Some(_)) => false,
            (BonusType::Repeating, Some(at)) => {
                now.saturating_sub(at) >= i64::from(self.cooldown_hours) * 3600
            }
        }
    }
}

/// A catalog row describing one spawnable element type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementType {
    /// Stable catalog identifier.
    pub id: u32,
    /// Human-readable name.
    pub name: String,
    /// Category, driving biome density multipliers.
    pub category: Category,
    /// Rarity tier, driving spacing and scale.
    pub rarity: Rarity,
    /// Relative spawn frequency. Must be positive.
    pub density_weight: f64,
    /// Inactive types are skipped by generation.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Biomes this type may spawn in. `None` means anywhere.
    #[serde(default)]
    pub allowed_biomes: Option<Vec<Biome>>,
    /// Optional resource payout.
    #[serde(default)]
    pub resource_bonus: Option<ResourceBonus>,
}

const fn default_true() -> bool {
    true
}

impl ElementType {
    /// Whether this type may spawn in `biome`.
    ///
    /// An absent restriction list allows every biome; an empty list allows
    /// none (the catalog author explicitly closed it).
    #[must_use]
    pub fn can_spawn_in(&self, biome: Biome) -> bool {
        match &self.allowed_biomes {
            None => true,
            Some(biomes) => biomes.contains(&biome),
        }
    }
}

/// A single element placed on the map.
///
/// Created only by the placement service. Position and owning type are
/// immutable after creation; only the interaction counter, decay state and
/// metadata are touched afterwards, by interaction handling outside the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    /// Store-assigned identifier.
    pub id: u64,
    /// Identifier of the owning [`ElementType`].
    pub element_type: u32,
    /// Grid X position in tiles.
    pub x: i32,
    /// Grid Y position in tiles.
    pub y: i32,
    /// Rotation in degrees, within [0,360).
    pub rotation: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Optional variant label (e.g. a seasonal skin).
    pub variant: Option<String>,
    /// Biome the element landed in.
    pub biome: Biome,
    /// Whether players can interact with it.
    pub interactable: bool,
    /// Interaction counter, mutated outside the core.
    pub interactions: u64,
    /// Wear state, mutated outside the core.
    pub decay_state: DecayState,
    /// Free-form metadata attached at placement time.
    pub metadata: serde_json::Value,
}
