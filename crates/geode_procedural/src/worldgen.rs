//! # World Generation
//!
//! The top-level generation driver: seeds the run, derives per-type target
//! counts from density weights, places elements through the placement
//! service, and aggregates statistics.
//!
//! ## Run Sequence
//!
//! Each [`WorldGenerationService::generate`] call runs synchronously:
//!
//! 1. **Seeding**: optionally clear the map, resolve the seed, stamp it on
//!    the map configuration, seed one `ChaCha8Rng` for the whole run
//! 2. **Density selection**: low/medium/high -> 0.5/1.0/1.5
//! 3. **Per-type generation**: jittered target counts, bounded candidate
//!    search, placement
//! 4. **Reporting**: counts by category, biome and rarity
//!
//! The run is fully determined by its seed: catalog order, every coordinate
//! sample, the jitter draws, and every rotation/scale draw come from the one
//! run generator. At most one run may execute at a time against a given
//! store; `&mut self` makes that structural here, and `geode::GenerationRunner`
//! adds a lock for shared front doors.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use geode_core::{
    Biome, Category, Density, ElementCatalog, GenerationSeed, MapConfigStore,
    PlacedElementStore, Rarity,
};

use crate::biome::BiomeClassifier;
use crate::collision::CollisionIndex;
use crate::error::WorldGenResult;
use crate::placement::{ElementPlacementService, PlaceOptions};

/// Attempts per placement unit before it is silently dropped.
const CANDIDATE_ATTEMPTS: u32 = 50;

/// Fixed occupancy probe radius for the per-type candidate loop.
///
/// Deliberately independent of rarity: the rarity-based spacing is applied
/// inside the placement service, this probe only thins candidates cheaply.
const CANDIDATE_PROBE_RADIUS: i32 = 2;

/// Divisor turning map area x density weight into a target count.
const TARGET_DIVISOR: f64 = 10_000.0;

/// Options for one generation run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Delete all placed elements before generating.
    #[serde(default)]
    pub regenerate: bool,
    /// Only place into this biome when set.
    #[serde(default)]
    pub biome: Option<Biome>,
    /// Global density selector.
    #[serde(default)]
    pub density: Density,
    /// Seed phrase. When absent a fresh seed is derived from the clock
    /// value handed to [`WorldGenerationService::generate`].
    #[serde(default)]
    pub seed: Option<String>,
}

/// Outcome of one generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Whether the run produced a world. An empty catalog reports `false`.
    pub success: bool,
    /// Human-readable outcome summary.
    pub message: String,
    /// The seed that determined this run.
    pub seed: GenerationSeed,
    /// Elements removed by the `regenerate` flag.
    pub cleared: usize,
    /// Total elements placed.
    pub total_generated: usize,
    /// Placed counts by category.
    pub by_category: BTreeMap<Category, u64>,
    /// Placed counts by biome.
    pub by_biome: BTreeMap<Biome, u64>,
    /// Placed counts by rarity.
    pub by_rarity: BTreeMap<Rarity, u64>,
}

/// Read-only aggregation over the current world.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Total placed elements.
    pub total_elements: usize,
    /// Counts by category (types missing from the catalog are not bucketed).
    pub by_category: BTreeMap<Category, u64>,
    /// Counts by biome.
    pub by_biome: BTreeMap<Biome, u64>,
    /// Unix timestamp of the most recent regeneration, if any.
    pub last_regenerated_at: Option<i64>,
    /// Seed of the most recent generation run, if any.
    pub generation_seed: Option<u64>,
}

/// Top-level world generation driver.
#[derive(Clone, Debug)]
pub struct WorldGenerationService<M, P> {
    map_store: M,
    elements: P,
}

impl<M, P> WorldGenerationService<M, P>
where
    M: MapConfigStore,
    P: PlacedElementStore,
{
    /// Creates a driver over the given storage collaborators.
    pub const fn new(map_store: M, elements: P) -> Self {
        Self {
            map_store,
            elements,
        }
    }

    /// Runs one full generation pass.
    ///
    /// `now` is the caller's unix timestamp; it stamps the map
    /// configuration and seeds the run when no seed phrase was supplied.
    ///
    /// # Errors
    ///
    /// Storage failures propagate unchanged. An empty catalog is NOT an
    /// error: it reports `success: false`.
    pub fn generate(
        &mut self,
        catalog: &ElementCatalog,
        options: &GenerationOptions,
        now: i64,
    ) -> WorldGenResult<GenerationReport> {
        let mut config = self.map_store.load()?;

        // Seeding: clear first (irreversible, reported), then pin the seed
        let cleared = if options.regenerate {
            self.elements.delete_all()?
        } else {
            0
        };
        let seed = options
            .seed
            .as_deref()
            .map_or_else(|| GenerationSeed::from_unix_time(now), GenerationSeed::from_phrase);
        config.generation_seed = Some(seed.value());
        config.last_regenerated_at = Some(now);
        self.map_store.save(config.clone())?;

        let multiplier = options.density.multiplier();
        let active: Vec<_> = catalog.active_types().collect();
        if active.is_empty() {
            tracing::info!(seed = seed.value(), "generation skipped: empty catalog");
            return Ok(GenerationReport {
                success: false,
                message: "no active element types in catalog; nothing to generate".to_string(),
                seed,
                cleared,
                total_generated: 0,
                by_category: BTreeMap::new(),
                by_biome: BTreeMap::new(),
                by_rarity: BTreeMap::new(),
            });
        }

        tracing::info!(
            seed = seed.value(),
            density = %options.density,
            types = active.len(),
            "starting generation run"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
        let classifier = BiomeClassifier::from_config(&config);
        let placement = ElementPlacementService::new(&config);
        let mut index = CollisionIndex::from_elements(self.elements.all()?);

        #[allow(clippy::cast_precision_loss)]
        let area = config.area() as f64;
        #[allow(clippy::cast_possible_wrap)]
        let (width, height) = (config.width as i32, config.height as i32);

        let mut by_category: BTreeMap<Category, u64> = BTreeMap::new();
        let mut by_biome: BTreeMap<Biome, u64> = BTreeMap::new();
        let mut by_rarity: BTreeMap<Rarity, u64> = BTreeMap::new();
        let mut total_generated = 0usize;

        for &ty in &active {
            let base = (area * ty.density_weight * multiplier / TARGET_DIVISOR).round();
            let jitter = rng.gen_range(0.8..=1.2);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let target = (base * jitter).round().max(0.0) as u64;

            for _ in 0..target {
                for _ in 0..CANDIDATE_ATTEMPTS {
                    let x = rng.gen_range(0..width);
                    let y = rng.gen_range(0..height);
                    let biome = classifier.classify(x, y);
                    if options.biome.is_some_and(|wanted| wanted != biome) {
                        continue;
                    }
                    if !ty.can_spawn_in(biome) {
                        continue;
                    }
                    if index.is_occupied(x, y, CANDIDATE_PROBE_RADIUS) {
                        continue;
                    }
                    // One placement attempt per unit: a rarity-spacing
                    // collision inside place() drops the unit silently.
                    if let Some(placed) = placement.place(
                        &mut rng,
                        &mut index,
                        &mut self.elements,
                        ty,
                        x,
                        y,
                        PlaceOptions::in_biome(biome),
                    )? {
                        total_generated += 1;
                        *by_category.entry(ty.category).or_insert(0) += 1;
                        *by_biome.entry(placed.biome).or_insert(0) += 1;
                        *by_rarity.entry(ty.rarity).or_insert(0) += 1;
                    }
                    break;
                }
            }
        }

        tracing::info!(total_generated, cleared, "generation run finished");
        Ok(GenerationReport {
            success: true,
            message: format!(
                "generated {total_generated} elements across {} element types",
                active.len()
            ),
            seed,
            cleared,
            total_generated,
            by_category,
            by_biome,
            by_rarity,
        })
    }

    /// Deletes every placed element, returning the prior count.
    ///
    /// # Errors
    ///
    /// Storage failures propagate unchanged.
    pub fn clear_map(&mut self) -> WorldGenResult<usize> {
        let removed = self.elements.delete_all()?;
        tracing::info!(removed, "cleared map");
        Ok(removed)
    }

    /// Read-only aggregation over the current world.
    ///
    /// Elements whose type no longer exists in `catalog` still count toward
    /// the total but are not bucketed by category.
    ///
    /// # Errors
    ///
    /// Storage failures propagate unchanged.
    pub fn stats(&self, catalog: &ElementCatalog) -> WorldGenResult<GenerationStats> {
        let config = self.map_store.load()?;
        let elements = self.elements.all()?;

        let mut by_category: BTreeMap<Category, u64> = BTreeMap::new();
        let mut by_biome: BTreeMap<Biome, u64> = BTreeMap::new();
        for element in &elements {
            if let Some(ty) = catalog.get(element.element_type) {
                *by_category.entry(ty.category).or_insert(0) += 1;
            }
            *by_biome.entry(element.biome).or_insert(0) += 1;
        }

        Ok(GenerationStats {
            total_elements: elements.len(),
            by_category,
            by_biome,
            last_regenerated_at: config.last_regenerated_at,
            generation_seed: config.generation_seed,
        })
    }

    /// The placed-element store, for read access after a run.
    pub const fn element_store(&self) -> &P {
        &self.elements
    }

    /// The map-configuration store.
    pub const fn map_store(&self) -> &M {
        &self.map_store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_core::{
        ElementType, MapConfig, MemoryMapConfigStore, MemoryPlacedElementStore,
    };

    fn service() -> WorldGenerationService<MemoryMapConfigStore, MemoryPlacedElementStore> {
        let config = MapConfig::new(200, 200, 64, Biome::Meadow).expect("valid config");
        WorldGenerationService::new(
            MemoryMapConfigStore::with_config(config),
            MemoryPlacedElementStore::new(),
        )
    }

    fn one_type_catalog() -> ElementCatalog {
        ElementCatalog::new(vec![ElementType {
            id: 1,
            name: "willow_cluster".to_string(),
            category: Category::Vegetation,
            rarity: Rarity::Common,
            density_weight: 1.0,
            is_active: true,
            allowed_biomes: None,
            resource_bonus: None,
        }])
        .expect("valid catalog")
    }

    fn seeded_options(seed: &str) -> GenerationOptions {
        GenerationOptions {
            regenerate: true,
            biome: None,
            density: Density::Medium,
            seed: Some(seed.to_string()),
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let catalog = one_type_catalog();
        let mut first = service();
        let mut second = service();

        let report_a = first
            .generate(&catalog, &seeded_options("abc"), 1_700_000_000)
            .expect("run succeeds");
        let report_b = second
            .generate(&catalog, &seeded_options("abc"), 1_700_000_999)
            .expect("run succeeds");

        assert_eq!(report_a.total_generated, report_b.total_generated);
        assert_eq!(
            first.element_store().all().expect("all"),
            second.element_store().all().expect("all"),
            "identical seeds must produce identical placement sequences"
        );
    }

    #[test]
    fn test_different_seeds_diverge() {
        let catalog = one_type_catalog();
        let mut first = service();
        let mut second = service();

        first
            .generate(&catalog, &seeded_options("abc"), 0)
            .expect("run succeeds");
        second
            .generate(&catalog, &seeded_options("xyz"), 0)
            .expect("run succeeds");

        assert_ne!(
            first.element_store().all().expect("all"),
            second.element_store().all().expect("all"),
            "different seeds should produce different worlds"
        );
    }

    #[test]
    fn test_target_count_stays_in_jitter_band() {
        // 200x200 medium with weight 1.0: base target 4, jitter band [3,5]
        let catalog = one_type_catalog();
        let mut svc = service();
        let report = svc
            .generate(&catalog, &seeded_options("band"), 0)
            .expect("run succeeds");

        assert!(
            report.total_generated <= 5,
            "jitter band tops out at 5, got {}",
            report.total_generated
        );
    }

    #[test]
    fn test_empty_catalog_is_reported_failure() {
        let catalog = ElementCatalog::default();
        let mut svc = service();
        let report = svc
            .generate(&catalog, &seeded_options("abc"), 0)
            .expect("empty catalog must not be an Err");

        assert!(!report.success);
        assert_eq!(report.total_generated, 0);
        assert!(
            report.message.contains("no active element types"),
            "message should explain the failure: {}",
            report.message
        );
    }

    #[test]
    fn test_biome_filter_restricts_placements() {
        let catalog = one_type_catalog();
        let mut svc = service();
        let options = GenerationOptions {
            biome: Some(Biome::Tundra),
            ..seeded_options("filtered")
        };
        svc.generate(&catalog, &options, 0).expect("run succeeds");

        for element in svc.element_store().all().expect("all") {
            assert_eq!(element.biome, Biome::Tundra);
        }
    }

    #[test]
    fn test_regenerate_reports_cleared_count() {
        let catalog = one_type_catalog();
        let mut svc = service();
        let first = svc
            .generate(&catalog, &seeded_options("abc"), 0)
            .expect("run succeeds");

        let second = svc
            .generate(&catalog, &seeded_options("abc"), 0)
            .expect("run succeeds");
        assert_eq!(
            second.cleared, first.total_generated,
            "regenerate must clear the previous world"
        );
    }

    #[test]
    fn test_seed_and_timestamp_stored_on_config() {
        let catalog = one_type_catalog();
        let mut svc = service();
        let report = svc
            .generate(&catalog, &seeded_options("abc"), 1_234_567)
            .expect("run succeeds");

        let config = svc.map_store().load().expect("config present");
        assert_eq!(config.generation_seed, Some(report.seed.value()));
        assert_eq!(config.last_regenerated_at, Some(1_234_567));
    }

    #[test]
    fn test_clear_map_returns_prior_count() {
        let catalog = one_type_catalog();
        let mut svc = service();
        let report = svc
            .generate(&catalog, &seeded_options("abc"), 0)
            .expect("run succeeds");

        let removed = svc.clear_map().expect("clear succeeds");
        assert_eq!(removed, report.total_generated);
        assert_eq!(svc.clear_map().expect("clear succeeds"), 0);
    }

    #[test]
    fn test_stats_aggregates_current_world() {
        let catalog = one_type_catalog();
        let mut svc = service();
        let report = svc
            .generate(&catalog, &seeded_options("abc"), 42)
            .expect("run succeeds");

        let stats = svc.stats(&catalog).expect("stats");
        assert_eq!(stats.total_elements, report.total_generated);
        assert_eq!(stats.by_biome, report.by_biome);
        assert_eq!(stats.generation_seed, Some(report.seed.value()));
        assert_eq!(stats.last_regenerated_at, Some(42));
    }
}
