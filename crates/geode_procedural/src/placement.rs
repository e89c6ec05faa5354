//! # Element Placement
//!
//! Bounded random position search and single-element placement.
//!
//! The engine knows nothing about elements: it samples coordinates and asks
//! a caller-supplied oracle whether each one is free. The placement service
//! layers the domain on top: rarity-driven spacing, rotation and scale
//! variation, biome assignment, and persistence through the store trait.

use rand::Rng;

use geode_core::{
    Biome, Category, DecayState, ElementType, MapConfig, PlacedElement, PlacedElementStore,
    StoreResult,
};

use crate::biome::BiomeClassifier;
use crate::collision::CollisionIndex;

/// Random position search within map bounds.
#[derive(Clone, Copy, Debug)]
pub struct RandomPlacementEngine {
    max_attempts: u32,
}

impl RandomPlacementEngine {
    /// Default retry budget for a position search.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

    /// Creates an engine with a custom retry budget.
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Uniformly samples integer coordinates within `width` x `height`
    /// until the oracle reports a free spot or the budget runs out.
    ///
    /// Returns `None` after exhausting the budget; the caller treats that
    /// as "skip this placement", never as a failure.
    pub fn find_position<R, F>(
        &self,
        rng: &mut R,
        width: u32,
        height: u32,
        min_spacing: i32,
        is_occupied: F,
    ) -> Option<(i32, i32)>
    where
        R: Rng,
        F: Fn(i32, i32, i32) -> bool,
    {
        #[allow(clippy::cast_possible_wrap)]
        let (w, h) = (width as i32, height as i32);
        for _ in 0..self.max_attempts {
            let x = rng.gen_range(0..w);
            let y = rng.gen_range(0..h);
            if !is_occupied(x, y, min_spacing) {
                return Some((x, y));
            }
        }
        None
    }
}

impl Default for RandomPlacementEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// Options for a single placement.
#[derive(Clone, Debug, Default)]
pub struct PlaceOptions {
    /// Biome to record on the element. When absent, the classifier decides.
    pub biome: Option<Biome>,
    /// Optional variant label (e.g. a seasonal skin).
    pub variant: Option<String>,
    /// Skip the collision check entirely.
    pub force: bool,
    /// Free-form metadata attached to the record.
    pub metadata: serde_json::Value,
}

impl PlaceOptions {
    /// Options recording a pre-classified biome.
    #[must_use]
    pub fn in_biome(biome: Biome) -> Self {
        Self {
            biome: Some(biome),
            ..Self::default()
        }
    }
}

/// Places single elements with rarity-driven variation.
#[derive(Clone, Copy, Debug)]
pub struct ElementPlacementService {
    width: u32,
    height: u32,
    classifier: BiomeClassifier,
    engine: RandomPlacementEngine,
}

impl ElementPlacementService {
    /// Creates a placement service for a configured map.
    #[must_use]
    pub const fn new(config: &MapConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            classifier: BiomeClassifier::from_config(config),
            engine: RandomPlacementEngine::new(RandomPlacementEngine::DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Attempts to place one element of `ty` at (x, y).
    ///
    /// Unless `options.force`, the spot must be clear at the rarity's
    /// minimum spacing; a collision yields `Ok(None)` (soft miss). On
    /// success the record is persisted, indexed, and returned.
    ///
    /// # Errors
    ///
    /// Storage failures propagate unchanged.
    pub fn place<R, S>(
        &self,
        rng: &mut R,
        index: &mut CollisionIndex,
        store: &mut S,
        ty: &ElementType,
        x: i32,
        y: i32,
        options: PlaceOptions,
    ) -> StoreResult<Option<PlacedElement>>
    where
        R: Rng,
        S: PlacedElementStore,
    {
        if !options.force && index.is_occupied(x, y, ty.rarity.min_spacing()) {
            return Ok(None);
        }

        let rotation = rng.gen_range(0.0..360.0);
        let (scale_min, scale_max) = ty.rarity.scale_range();
        let scale = rng.gen_range(scale_min..=scale_max);
        let biome = options
            .biome
            .unwrap_or_else(|| self.classifier.classify(x, y));

        let mut element = PlacedElement {
            id: 0,
            element_type: ty.id,
            x,
            y,
            rotation,
            scale,
            variant: options.variant,
            biome,
            interactable: ty.resource_bonus.is_some(),
            interactions: 0,
            decay_state: DecayState::Pristine,
            metadata: options.metadata,
        };
        element.id = store.insert(element.clone())?;
        index.insert(element.clone());
        Ok(Some(element))
    }

    /// Searches for a free position inside `biome` for an element of `ty`,
    /// using map bounds and the rarity's minimum spacing.
    ///
    /// A coordinate outside the requested biome, or one the type cannot
    /// spawn in, counts as occupied for the search.
    #[must_use]
    pub fn find_valid_position<R>(
        &self,
        rng: &mut R,
        index: &CollisionIndex,
        biome: Biome,
        ty: &ElementType,
    ) -> Option<(i32, i32)>
    where
        R: Rng,
    {
        self.engine.find_position(
            rng,
            self.width,
            self.height,
            ty.rarity.min_spacing(),
            |x, y, spacing| {
                self.classifier.classify(x, y) != biome
                    || !ty.can_spawn_in(biome)
                    || index.is_occupied(x, y, spacing)
            },
        )
    }

    /// Category spawn-frequency multiplier per biome.
    ///
    /// This table is a balance contract: forest favors vegetation, desert
    /// suppresses vegetation and water while boosting terrain, swamp boosts
    /// water, tundra boosts terrain, meadow is near-neutral.
    #[must_use]
    pub const fn density_multiplier(biome: Biome, category: Category) -> f64 {
        match (biome, category) {
            (Biome::Meadow, Category::Vegetation) => 1.5,
            (Biome::Meadow, Category::Decoration) => 1.2,
            (Biome::Meadow, Category::Water | Category::Terrain | Category::Structure) => 1.0,

            (Biome::Forest, Category::Vegetation) => 2.0,
            (Biome::Forest, Category::Water | Category::Structure) => 0.8,
            (Biome::Forest, Category::Terrain | Category::Decoration) => 1.0,

            (Biome::Swamp, Category::Vegetation) => 1.2,
            (Biome::Swamp, Category::Water) => 2.5,
            (Biome::Swamp, Category::Terrain) => 0.5,
            (Biome::Swamp, Category::Structure) => 0.6,
            (Biome::Swamp, Category::Decoration) => 0.8,

            (Biome::Desert, Category::Vegetation) => 0.2,
            (Biome::Desert, Category::Water) => 0.1,
            (Biome::Desert, Category::Terrain) => 2.0,
            (Biome::Desert, Category::Structure) => 1.0,
            (Biome::Desert, Category::Decoration) => 0.5,

            (Biome::Tundra, Category::Vegetation) => 0.3,
            (Biome::Tundra, Category::Water) => 0.4,
            (Biome::Tundra, Category::Terrain) => 1.8,
            (Biome::Tundra, Category::Structure) => 1.0,
            (Biome::Tundra, Category::Decoration) => 0.7,
        }
    }
}
