//! Biome system: registry, climate-space classification, and the standard
//! biome set.
//!
//! Each biome owns a target point in five-dimensional climate space. A
//! location belongs to the biome whose target is nearest under a weighted
//! squared distance.

mod classifier;
mod def;
mod registry;
mod standard;

pub use classifier::{BiomeClassifier, CLIMATE_WEIGHTS, TIE_EPSILON, climate_distance_sq};
pub use def::{BiomeDef, GroundCover, SpawnEntry, SpawnTable, TerrainShape, Vegetation};
pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};
