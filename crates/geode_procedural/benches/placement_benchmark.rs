//! Benchmark for generation run performance.
//!
//! Run with: cargo bench --package geode_procedural --bench placement_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geode_core::{
    Biome, Category, DecayState, ElementCatalog, ElementType, MapConfig, MemoryMapConfigStore,
    MemoryPlacedElementStore, PlacedElement, Rarity,
};
use geode_procedural::{CollisionIndex, GenerationOptions, WorldGenerationService};

fn catalog() -> ElementCatalog {
    ElementCatalog::new(vec![
        ElementType {
            id: 1,
            name: "willow_cluster".to_string(),
            category: Category::Vegetation,
            rarity: Rarity::Common,
            density_weight: 4.0,
            is_active: true,
            allowed_biomes: None,
            resource_bonus: None,
        },
        ElementType {
            id: 2,
            name: "granite_boulder".to_string(),
            category: Category::Terrain,
            rarity: Rarity::Rare,
            density_weight: 1.0,
            is_active: true,
            allowed_biomes: None,
            resource_bonus: None,
        },
    ])
    .expect("valid catalog")
}

fn benchmark_generation_run(c: &mut Criterion) {
    let catalog = catalog();
    let options = GenerationOptions {
        regenerate: true,
        seed: Some("bench".to_string()),
        ..GenerationOptions::default()
    };

    c.bench_function("generate_400x400_run", |b| {
        b.iter(|| {
            let config = MapConfig::new(400, 400, 64, Biome::Meadow).expect("valid config");
            let mut service = WorldGenerationService::new(
                MemoryMapConfigStore::with_config(config),
                MemoryPlacedElementStore::new(),
            );
            black_box(service.generate(&catalog, &options, 0).expect("run succeeds"))
        });
    });
}

fn benchmark_occupancy_scan(c: &mut Criterion) {
    let mut index = CollisionIndex::new();
    for i in 0..2_000i32 {
        index.insert(PlacedElement {
            id: u64::try_from(i).expect("non-negative"),
            element_type: 1,
            x: (i * 7) % 997,
            y: (i * 13) % 991,
            rotation: 0.0,
            scale: 1.0,
            variant: None,
            biome: Biome::Meadow,
            interactable: false,
            interactions: 0,
            decay_state: DecayState::Pristine,
            metadata: serde_json::Value::Null,
        });
    }

    c.bench_function("is_occupied_2k_elements", |b| {
        let mut probe = 0i32;
        b.iter(|| {
            probe = probe.wrapping_add(17);
            black_box(index.is_occupied(probe % 997, probe % 991, 5))
        });
    });
}

criterion_group!(benches, benchmark_generation_run, benchmark_occupancy_scan);
criterion_main!(benches);
