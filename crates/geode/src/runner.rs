//! # Generation Runner
//!
//! The admin-facing front door over [`WorldGenerationService`].
//!
//! Two jobs:
//!
//! 1. **String boundary**: admin triggers speak strings
//!    (`density: "medium"`, `biome: "tundra"`). Parsing happens here, and
//!    unknown values are validation errors surfaced to the caller - never
//!    silent defaults.
//! 2. **Run lock**: the service's RNG and stores are per-run mutable state.
//!    The runner holds a lock for the whole `generate`/`clear` call so at
//!    most one run executes at a time, no matter how many handles the admin
//!    layer clones.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use geode_core::{
    Biome, Category, Density, ElementCatalog, MapConfigStore, PlacedElementStore, Rarity,
};
use geode_procedural::{
    GenerationOptions, GenerationReport, GenerationStats, WorldGenError, WorldGenResult,
    WorldGenerationService,
};

/// Admin trigger payload for a generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminGenerationRequest {
    /// Delete all placed elements before generating.
    #[serde(default)]
    pub regenerate: bool,
    /// Optional biome filter name.
    #[serde(default)]
    pub biome: Option<String>,
    /// Density name: `low`, `medium` or `high`.
    #[serde(default = "default_density")]
    pub density: String,
    /// Optional seed phrase for reproducible runs.
    #[serde(default)]
    pub seed: Option<String>,
}

fn default_density() -> String {
    "medium".to_string()
}

impl Default for AdminGenerationRequest {
    fn default() -> Self {
        Self {
            regenerate: false,
            biome: None,
            density: default_density(),
            seed: None,
        }
    }
}

impl AdminGenerationRequest {
    /// Parses the string fields into typed generation options.
    ///
    /// # Errors
    ///
    /// Unknown density or biome names surface as validation errors.
    pub fn parse(&self) -> WorldGenResult<GenerationOptions> {
        let density: Density = self.density.parse().map_err(WorldGenError::Core)?;
        let biome = match &self.biome {
            None => None,
            Some(name) => Some(name.parse::<Biome>().map_err(WorldGenError::Core)?),
        };
        Ok(GenerationOptions {
            regenerate: self.regenerate,
            biome,
            density,
            seed: self.seed.clone(),
        })
    }
}

/// Admin trigger response for a generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminGenerationResponse {
    /// Whether the run produced a world.
    pub success: bool,
    /// Human-readable outcome summary.
    pub message: String,
    /// Aggregated run statistics.
    pub stats: AdminGenerationStats,
}

/// The stats block of an [`AdminGenerationResponse`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminGenerationStats {
    /// Total elements placed.
    pub total_generated: usize,
    /// Placed counts by category.
    pub by_category: BTreeMap<Category, u64>,
    /// Placed counts by biome.
    pub by_biome: BTreeMap<Biome, u64>,
    /// Placed counts by rarity.
    pub by_rarity: BTreeMap<Rarity, u64>,
}

impl From<GenerationReport> for AdminGenerationResponse {
    fn from(report: GenerationReport) -> Self {
        Self {
            success: report.success,
            message: report.message,
            stats: AdminGenerationStats {
                total_generated: report.total_generated,
                by_category: report.by_category,
                by_biome: report.by_biome,
                by_rarity: report.by_rarity,
            },
        }
    }
}

/// Locked front door over a [`WorldGenerationService`].
#[derive(Debug)]
pub struct GenerationRunner<M, P> {
    service: Mutex<WorldGenerationService<M, P>>,
}

impl<M, P> GenerationRunner<M, P>
where
    M: MapConfigStore,
    P: PlacedElementStore,
{
    /// Wraps a service in the run lock.
    pub const fn new(service: WorldGenerationService<M, P>) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }

    /// Validates and runs one generation pass. The lock is held for the
    /// whole run.
    ///
    /// # Errors
    ///
    /// Unknown density/biome names and storage failures.
    pub fn generate(
        &self,
        catalog: &ElementCatalog,
        request: &AdminGenerationRequest,
        now: i64,
    ) -> WorldGenResult<AdminGenerationResponse> {
        let options = request.parse()?;
        let mut service = self.service.lock();
        let report = service.generate(catalog, &options, now)?;
        Ok(report.into())
    }

    /// Deletes every placed element, returning the prior count.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub fn clear(&self) -> WorldGenResult<usize> {
        self.service.lock().clear_map()
    }

    /// Read-only aggregation over the current world.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub fn stats(&self, catalog: &ElementCatalog) -> WorldGenResult<GenerationStats> {
        self.service.lock().stats(catalog)
    }

    /// Unwraps the runner, returning the service.
    pub fn into_inner(self) -> WorldGenerationService<M, P> {
        self.service.into_inner()
    }
}
