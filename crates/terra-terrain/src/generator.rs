//! The world generator: one immutable object answering every terrain query.

use std::sync::Arc;

use terra_config::{Config, ConfigError};
use tracing::debug;

use crate::biome::{BiomeDef, BiomeId, BiomeRegistry};
use crate::cave::{CaveCarver, CaveEntrance, WormPath, carve_depth_at};
use crate::climate::ClimateVector;
use crate::coords::ChunkCoord;
use crate::seed::{WorldSeed, hash_coords, salt, seeded_rng};
use crate::terrain_height::{HeightField, HeightSample};

/// Deterministic terrain generator for one world seed.
///
/// Immutable after construction and `Send + Sync`, so chunk workers can share
/// it behind an `Arc`.
pub struct TerrainGenerator {
    seed: WorldSeed,
    chunk_size: f64,
    field: HeightField,
    caves: CaveCarver,
    spawn_seed: u64,
}

impl TerrainGenerator {
    /// Build a generator with the standard biome set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_registry(config, Arc::new(BiomeRegistry::standard()))
    }

    /// Build a generator with a custom biome registry.
    pub fn with_registry(
        config: &Config,
        registry: Arc<BiomeRegistry>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = WorldSeed::from_text(&config.world.seed);
        let field = HeightField::new(seed, &config.terrain, config.world.sea_level, registry);
        let caves = CaveCarver::new(
            seed,
            &config.caves,
            config.world.chunk_size,
            config.terrain.plateau_radius,
        );
        debug!(
            seed = seed.value(),
            biomes = field.classifier().registry().len(),
            cave_check_radius = caves.check_radius(),
            "terrain generator ready"
        );
        Ok(Self {
            seed,
            chunk_size: config.world.chunk_size,
            field,
            caves,
            spawn_seed: seed.derive(salt::SPAWN),
        })
    }

    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    pub fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    pub fn sea_level(&self) -> f64 {
        self.field.sea_level()
    }

    pub fn registry(&self) -> &Arc<BiomeRegistry> {
        self.field.classifier().registry()
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn caves(&self) -> &CaveCarver {
        &self.caves
    }

    pub fn climate_at(&self, x: f64, z: f64) -> ClimateVector {
        self.field.climate_at(x, z)
    }

    pub fn classify_at(&self, x: f64, z: f64) -> BiomeId {
        self.field.classifier().classify(&self.climate_at(x, z))
    }

    pub fn biome_at(&self, x: f64, z: f64) -> &BiomeDef {
        self.registry().get(self.classify_at(x, z))
    }

    /// Surface before cave entrances are carved.
    pub fn surface_at(&self, x: f64, z: f64) -> HeightSample {
        self.field.surface_at(x, z)
    }

    fn surface_elevation(&self, x: f64, z: f64) -> f64 {
        self.field.surface_at(x, z).elevation
    }

    /// Surface sample with the given entrance bowls carved in.
    pub fn sample_with_entrances(
        &self,
        x: f64,
        z: f64,
        entrances: &[CaveEntrance],
    ) -> HeightSample {
        let mut sample = self.field.surface_at(x, z);
        sample.elevation -= carve_depth_at(entrances, x, z);
        sample
    }

    /// Final terrain sample, cave entrances included.
    ///
    /// Traces the worms around the containing chunk on every call; streaming
    /// code should fetch entrances once per chunk and use
    /// [`sample_with_entrances`](Self::sample_with_entrances).
    pub fn height_at(&self, x: f64, z: f64) -> HeightSample {
        let coord = ChunkCoord::containing(x, z, self.chunk_size);
        let entrances = self.entrances_near_chunk(coord);
        self.sample_with_entrances(x, z, &entrances)
    }

    /// Entrance bowls overlapping `coord`.
    pub fn entrances_near_chunk(&self, coord: ChunkCoord) -> Vec<CaveEntrance> {
        self.caves
            .entrances_near_chunk(coord, &|x, z| self.surface_elevation(x, z))
    }

    /// Unmerged entrance candidates of the worms seeded by `coord`.
    pub fn entrance_candidates_from(&self, coord: ChunkCoord) -> Vec<CaveEntrance> {
        self.caves
            .candidates_from_origin_chunk(coord, &|x, z| self.surface_elevation(x, z))
    }

    /// Worm paths seeded by `coord`.
    pub fn trace_worms_for_chunk(&self, coord: ChunkCoord) -> Vec<WormPath> {
        self.caves
            .trace_worms_for_chunk(coord, &|x, z| self.surface_elevation(x, z))
    }

    /// Entity picked from the local biome's spawn table for the integer cell
    /// containing `(x, z)`. `None` where the biome spawns nothing.
    pub fn spawn_at(&self, x: f64, z: f64) -> Option<&str> {
        let mut rng = seeded_rng(hash_coords(
            self.spawn_seed,
            x.floor() as i32,
            z.floor() as i32,
        ));
        self.biome_at(x, z)
            .spawn_table()
            .pick(&mut rng)
            .map(|entry| entry.entity.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha() -> Config {
        let mut config = Config::default();
        config.world.seed = "alpha".into();
        config
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TerrainGenerator>();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = alpha();
        config.world.chunk_size = 0.0;
        assert!(matches!(
            TerrainGenerator::new(&config),
            Err(ConfigError::Invalid { field: "world.chunk_size", .. })
        ));
    }

    #[test]
    fn test_height_deterministic_across_instances() {
        let a = TerrainGenerator::new(&alpha()).unwrap();
        let b = TerrainGenerator::new(&alpha()).unwrap();
        for i in 0..16 {
            let x = f64::from(i) * 733.3 - 4000.0;
            let z = f64::from(i) * -411.9 + 900.0;
            let ha = a.height_at(x, z);
            let hb = b.height_at(x, z);
            assert_eq!(ha.elevation.to_bits(), hb.elevation.to_bits());
            assert_eq!(ha.biome, hb.biome);
        }
    }

    #[test]
    fn test_numeric_seed_text_matches_integer() {
        let mut text = Config::default();
        text.world.seed = "12345".into();
        let generator = TerrainGenerator::new(&text).unwrap();
        assert_eq!(generator.seed(), WorldSeed::from(12345));
    }

    #[test]
    fn test_origin_is_plateau() {
        let generator = TerrainGenerator::new(&alpha()).unwrap();
        assert_eq!(generator.height_at(0.0, 0.0).elevation, 0.0);
    }

    #[test]
    fn test_entrances_only_lower_terrain() {
        let generator = TerrainGenerator::new(&alpha()).unwrap();
        let coord = ChunkCoord::new(3, -2);
        let entrances = generator.entrances_near_chunk(coord);
        for e in &entrances {
            let carved = generator.sample_with_entrances(e.x, e.z, &entrances).elevation;
            let surface = generator.surface_at(e.x, e.z).elevation;
            assert!(carved < surface, "bowl at ({}, {}) did not carve", e.x, e.z);
            assert!(surface - carved <= generator.caves().config().max_carve_depth + 1e-9);
        }
    }

    #[test]
    fn test_height_total_at_far_coordinates() {
        let generator = TerrainGenerator::new(&alpha()).unwrap();
        for (x, z) in [(2.0e12, 0.0), (-2.0e12, 0.0), (0.0, 2.0e12), (-2.0e12, -2.0e12)] {
            let sample = generator.height_at(x, z);
            assert!(sample.elevation.is_finite(), "({x}, {z})");
            assert_eq!(sample.elevation.to_bits(), generator.height_at(x, z).elevation.to_bits());
        }
    }

    #[test]
    fn test_biome_at_matches_sample() {
        let generator = TerrainGenerator::new(&alpha()).unwrap();
        let sample = generator.surface_at(2500.0, -700.0);
        assert_eq!(generator.classify_at(2500.0, -700.0), sample.biome);
        assert_eq!(
            generator.biome_at(2500.0, -700.0).name,
            generator.registry().get(sample.biome).name
        );
    }

    #[test]
    fn test_spawn_deterministic() {
        let a = TerrainGenerator::new(&alpha()).unwrap();
        let b = TerrainGenerator::new(&alpha()).unwrap();
        for i in 0..32 {
            let x = f64::from(i) * 97.5;
            assert_eq!(a.spawn_at(x, 12.0), b.spawn_at(x, 12.0));
        }
    }

    #[test]
    fn test_empty_registry_uses_fallback() {
        let generator =
            TerrainGenerator::with_registry(&alpha(), Arc::new(BiomeRegistry::new())).unwrap();
        let sample = generator.surface_at(1000.0, 1000.0);
        assert_eq!(sample.biome, BiomeId::FALLBACK);
        assert_eq!(generator.biome_at(1000.0, 1000.0).name, "default");
    }
}
