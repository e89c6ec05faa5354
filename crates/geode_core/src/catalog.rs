//! # Element Catalog
//!
//! The catalog of spawnable element types, loaded once at startup from an
//! external TOML file.
//!
//! ## Example catalog
//!
//! ```toml
//! [[element_type]]
//! id = 1
//! name = "willow_cluster"
//! category = "vegetation"
//! rarity = "common"
//! density_weight = 1.0
//! allowed_biomes = ["meadow", "swamp"]
//!
//! [element_type.resource_bonus]
//! bonus_type = "repeating"
//! cooldown_hours = 6
//!
//! [element_type.resource_bonus.resources]
//! wood = 10
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::ElementType;
use crate::error::{CoreError, CoreResult};

/// An immutable catalog of element types.
///
/// Immutable for the duration of a generation run; generation iterates the
/// active entries in catalog order, which is part of the reproducibility
/// contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementCatalog {
    /// All catalog rows, active or not.
    #[serde(rename = "element_type", default)]
    types: Vec<ElementType>,
}

impl ElementCatalog {
    /// Creates a validated catalog from rows.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidCatalogEntry`] for empty names, non-positive or
    /// non-finite density weights, and duplicate ids.
    pub fn new(types: Vec<ElementType>) -> CoreResult<Self> {
        let catalog = Self { types };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// [`CoreError::Toml`] for malformed documents, plus the same
    /// validation errors as [`ElementCatalog::new`].
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let catalog: Self = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> CoreResult<()> {
        let mut seen = HashSet::with_capacity(self.types.len());
        for ty in &self.types {
            if ty.name.trim().is_empty() {
                return Err(CoreError::InvalidCatalogEntry {
                    name: ty.name.clone(),
                    reason: "name must not be empty".to_string(),
                });
            }
            if !(ty.density_weight.is_finite() && ty.density_weight > 0.0) {
                return Err(CoreError::InvalidCatalogEntry {
                    name: ty.name.clone(),
                    reason: format!("density_weight must be positive, got {}", ty.density_weight),
                });
            }
            if !seen.insert(ty.id) {
                return Err(CoreError::InvalidCatalogEntry {
                    name: ty.name.clone(),
                    reason: format!("duplicate id {}", ty.id),
                });
            }
        }
        Ok(())
    }

    /// All rows, in catalog order.
    #[must_use]
    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    /// Active rows, in catalog order.
    pub fn active_types(&self) -> impl Iterator<Item = &ElementType> {
        self.types.iter().filter(|ty| ty.is_active)
    }

    /// Looks up a row by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&ElementType> {
        self.types.iter().find(|ty| ty.id == id)
    }

    /// Number of rows, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::element::{Category, Rarity};

    const SAMPLE: &str = r#"
        [[element_type]]
        id = 1
        name = "willow_cluster"
        category = "vegetation"
        rarity = "common"
        density_weight = 1.0
        allowed_biomes = ["meadow", "swamp"]

        [element_type.resource_bonus]
        bonus_type = "repeating"
        cooldown_hours = 6

        [element_type.resource_bonus.resources]
        wood = 10

        [[element_type]]
        id = 2
        name = "obsidian_spire"
        category = "terrain"
        rarity = "legendary"
        density_weight = 0.05
        is_active = false
    "#;

    #[test]
    fn test_parses_sample_catalog() {
        let catalog = ElementCatalog::from_toml_str(SAMPLE).expect("sample must parse");
        assert_eq!(catalog.len(), 2);

        let willow = catalog.get(1).expect("id 1 present");
        assert_eq!(willow.category, Category::Vegetation);
        assert_eq!(willow.rarity, Rarity::Common);
        assert!(willow.is_active, "is_active defaults to true");
        assert!(willow.can_spawn_in(Biome::Swamp));
        assert!(!willow.can_spawn_in(Biome::Desert));
        let bonus = willow.resource_bonus.as_ref().expect("bonus present");
        assert_eq!(bonus.cooldown_hours, 6);
        assert_eq!(bonus.resources.get("wood"), Some(&10));

        let spire = catalog.get(2).expect("id 2 present");
        assert!(!spire.is_active);
    }

    #[test]
    fn test_active_types_skips_inactive() {
        let catalog = ElementCatalog::from_toml_str(SAMPLE).expect("sample must parse");
        let active: Vec<_> = catalog.active_types().map(|ty| ty.id).collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn test_rejects_non_positive_density_weight() {
        let bad = r#"
            [[element_type]]
            id = 1
            name = "ghost"
            category = "decoration"
            rarity = "rare"
            density_weight = 0.0
        "#;
        let err = ElementCatalog::from_toml_str(bad).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidCatalogEntry { .. }),
            "zero weight must be rejected: {err}"
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let bad = r#"
            [[element_type]]
            id = 7
            name = "first"
            category = "terrain"
            rarity = "common"
            density_weight = 1.0

            [[element_type]]
            id = 7
            name = "second"
            category = "terrain"
            rarity = "common"
            density_weight = 1.0
        "#;
        let err = ElementCatalog::from_toml_str(bad).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCatalogEntry { .. }));
    }

    #[test]
    fn test_unknown_enum_value_fails_parse() {
        let bad = r#"
            [[element_type]]
            id = 1
            name = "mystery"
            category = "plasma"
            rarity = "common"
            density_weight = 1.0
        "#;
        let err = ElementCatalog::from_toml_str(bad).unwrap_err();
        assert!(matches!(err, CoreError::Toml(_)), "unexpected error: {err}");
    }
}
