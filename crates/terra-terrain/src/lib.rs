//! Procedural terrain generation: climate noise, biome classification, the
//! height field, and cave worm carving.
//!
//! Every public sampling function is a pure function of its coordinates and
//! the world seed.

mod cave;
mod climate;
mod coords;
mod generator;
mod heightmap;
mod terrain_height;

pub mod biome;
pub mod debug_viz;
pub mod seed;

pub use biome::{
    BiomeClassifier, BiomeDef, BiomeId, BiomeRegistry, BiomeRegistryError, CLIMATE_WEIGHTS,
    GroundCover, SpawnEntry, SpawnTable, TerrainShape, Vegetation, climate_distance_sq,
};
pub use cave::{
    CaveCarver, CaveEntrance, WormOrigin, WormPath, WormSegment, carve_depth_at, merge_entrances,
};
pub use climate::{ClimateSampler, ClimateVector};
pub use coords::{CHUNK_COORD_LIMIT, ChunkCoord};
pub use generator::TerrainGenerator;
pub use heightmap::{HeightmapParams, HeightmapSampler, fbm_normalized};
pub use seed::WorldSeed;
pub use terrain_height::{HeightField, HeightSample, smoothstep};
