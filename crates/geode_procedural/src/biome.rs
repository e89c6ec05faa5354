//! # Biome Classification
//!
//! Maps a grid coordinate to a biome by radial-distance zoning.
//!
//! The map is banded by normalized Euclidean distance from the origin,
//! where 1.0 is the map's half-diagonal. Classification is pure and
//! deterministic; there are no error cases.

use geode_core::{Biome, MapConfig};

/// Biome classifier for one map's dimensions.
///
/// Bands by normalized distance `d` (inclusive lower bound):
///
/// | Band | Biome |
/// |------|-------|
/// | [0.0, 0.2) | meadow |
/// | [0.2, 0.4) | forest |
/// | [0.4, 0.6) | swamp above the diagonal axis, meadow below |
/// | [0.6, 0.8) | desert |
/// | [0.8, ∞)   | tundra |
#[derive(Clone, Copy, Debug)]
pub struct BiomeClassifier {
    /// Map width in tiles.
    width: u32,
    /// Map height in tiles.
    height: u32,
}

impl BiomeClassifier {
    /// Creates a classifier for a map of the given dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a classifier for a configured map.
    #[must_use]
    pub const fn from_config(config: &MapConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Classifies the biome at a grid coordinate.
    #[must_use]
    pub fn classify(&self, x: i32, y: i32) -> Biome {
        let fx = f64::from(x);
        let fy = f64::from(y);
        let distance = fx.hypot(fy);
        let half_diagonal = f64::from(self.width).hypot(f64::from(self.height)) / 2.0;
        let normalized = distance / half_diagonal;

        if normalized < 0.2 {
            Biome::Meadow
        } else if normalized < 0.4 {
            Biome::Forest
        } else if normalized < 0.6 {
            // Wetland only above the diagonal axis
            if fy.atan2(fx) > 0.0 {
                Biome::Swamp
            } else {
                Biome::Meadow
            }
        } else if normalized < 0.8 {
            Biome::Desert
        } else {
            Biome::Tundra
        }
    }
}
