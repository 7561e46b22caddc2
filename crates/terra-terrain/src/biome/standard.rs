//! The standard biome set.
//!
//! Order matters: it fixes [`BiomeId`](super::BiomeId) values and breaks
//! equidistant classification ties in favour of the earlier entry.

use super::{BiomeDef, GroundCover, SpawnTable, TerrainShape, Vegetation};
use crate::climate::ClimateVector;

fn plants(
    density: f64,
    trees: f64,
    shrubs: f64,
    grass: f64,
    tree_type: Option<&str>,
) -> Vegetation {
    Vegetation {
        density,
        tree_weight: trees,
        shrub_weight: shrubs,
        grass_weight: grass,
        tree_type: tree_type.map(str::to_owned),
    }
}

/// Default biome used when a registry is empty.
pub(super) fn fallback_biome() -> BiomeDef {
    BiomeDef {
        name: "default".into(),
        climate: ClimateVector::default(),
        color: [118, 168, 82],
        ground_cover: GroundCover::Grass,
        vegetation: plants(0.2, 0.1, 0.2, 0.7, Some("oak")),
        spawns: SpawnTable::new([("rabbit", 1)]),
        shape: TerrainShape::new(0.5, 6.0),
    }
}

pub(super) fn standard_biomes() -> Vec<BiomeDef> {
    vec![
        BiomeDef {
            name: "ocean".into(),
            climate: ClimateVector::new(0.0, 0.0, -0.8, 0.0, 0.0),
            color: [36, 82, 150],
            ground_cover: GroundCover::Sand,
            vegetation: plants(0.05, 0.0, 0.0, 1.0, None),
            spawns: SpawnTable::new([("fish", 10), ("squid", 2)]),
            shape: TerrainShape::new(0.6, -60.0),
        },
        BiomeDef {
            name: "beach".into(),
            climate: ClimateVector::new(0.3, 0.0, -0.3, 0.4, 0.0),
            color: [222, 206, 150],
            ground_cover: GroundCover::Sand,
            vegetation: plants(0.02, 0.2, 0.3, 0.5, Some("palm")),
            spawns: SpawnTable::new([("crab", 5), ("gull", 3)]),
            shape: TerrainShape::new(0.2, 2.0),
        },
        BiomeDef {
            name: "plains".into(),
            climate: ClimateVector::new(0.2, -0.1, 0.3, 0.4, -0.3),
            color: [124, 176, 78],
            ground_cover: GroundCover::Grass,
            vegetation: plants(0.3, 0.05, 0.15, 0.8, Some("oak")),
            spawns: SpawnTable::new([("horse", 4), ("cow", 6), ("rabbit", 3)]),
            shape: TerrainShape::new(0.5, 8.0),
        },
        BiomeDef {
            name: "forest".into(),
            climate: ClimateVector::new(0.1, 0.4, 0.3, 0.2, -0.2),
            color: [58, 122, 54],
            ground_cover: GroundCover::Grass,
            vegetation: plants(0.8, 0.6, 0.25, 0.15, Some("birch")),
            spawns: SpawnTable::new([("deer", 5), ("boar", 3), ("wolf", 1)]),
            shape: TerrainShape::new(0.8, 12.0),
        },
        BiomeDef {
            name: "desert".into(),
            climate: ClimateVector::new(0.8, -0.8, 0.4, 0.3, 0.0),
            color: [219, 196, 120],
            ground_cover: GroundCover::Sand,
            vegetation: plants(0.01, 0.0, 0.9, 0.1, None),
            spawns: SpawnTable::new([("lizard", 4), ("scorpion", 2)]),
            shape: TerrainShape::new(0.6, 10.0),
        },
        BiomeDef {
            name: "savanna".into(),
            climate: ClimateVector::new(0.6, -0.3, 0.3, 0.5, 0.2),
            color: [176, 170, 88],
            ground_cover: GroundCover::Grass,
            vegetation: plants(0.2, 0.1, 0.2, 0.7, Some("acacia")),
            spawns: SpawnTable::new([("zebra", 4), ("lion", 1)]),
            shape: TerrainShape::new(0.6, 10.0),
        },
        BiomeDef {
            name: "jungle".into(),
            climate: ClimateVector::new(0.8, 0.8, 0.3, 0.1, 0.1),
            color: [40, 130, 40],
            ground_cover: GroundCover::Mud,
            vegetation: plants(0.95, 0.7, 0.2, 0.1, Some("kapok")),
            spawns: SpawnTable::new([("parrot", 5), ("monkey", 3), ("jaguar", 1)]),
            shape: TerrainShape::new(0.9, 14.0),
        },
        BiomeDef {
            name: "taiga".into(),
            climate: ClimateVector::new(-0.5, 0.3, 0.4, 0.0, 0.0),
            color: [70, 110, 90],
            ground_cover: GroundCover::Dirt,
            vegetation: plants(0.6, 0.8, 0.15, 0.05, Some("spruce")),
            spawns: SpawnTable::new([("elk", 3), ("wolf", 2), ("fox", 2)]),
            shape: TerrainShape::new(0.9, 16.0),
        },
        BiomeDef {
            name: "tundra".into(),
            climate: ClimateVector::new(-0.8, -0.3, 0.4, 0.3, 0.0),
            color: [200, 210, 215],
            ground_cover: GroundCover::Snow,
            vegetation: plants(0.03, 0.0, 0.4, 0.6, None),
            spawns: SpawnTable::new([("caribou", 3), ("arctic_fox", 2)]),
            shape: TerrainShape::new(0.5, 12.0),
        },
        BiomeDef {
            name: "swamp".into(),
            climate: ClimateVector::new(0.4, 0.7, 0.0, 0.7, -0.4),
            color: [76, 96, 60],
            ground_cover: GroundCover::Mud,
            vegetation: plants(0.5, 0.3, 0.3, 0.4, Some("willow")),
            spawns: SpawnTable::new([("frog", 6), ("heron", 2)]),
            shape: TerrainShape::new(0.2, 1.0),
        },
        BiomeDef {
            name: "highlands".into(),
            climate: ClimateVector::new(0.0, 0.0, 0.6, -0.4, 0.3),
            color: [120, 140, 96],
            ground_cover: GroundCover::Gravel,
            vegetation: plants(0.15, 0.2, 0.4, 0.4, Some("pine")),
            spawns: SpawnTable::new([("goat", 4), ("eagle", 1)]),
            shape: TerrainShape::new(1.4, 60.0),
        },
        BiomeDef {
            name: "mountains".into(),
            climate: ClimateVector::new(-0.3, 0.0, 0.8, -0.8, 0.2),
            color: [130, 128, 124],
            ground_cover: GroundCover::Stone,
            vegetation: plants(0.05, 0.3, 0.5, 0.2, Some("pine")),
            spawns: SpawnTable::new([("goat", 3), ("eagle", 2)]),
            shape: TerrainShape::new(2.0, 120.0),
        },
        BiomeDef {
            name: "badlands".into(),
            climate: ClimateVector::new(0.7, -0.6, 0.5, -0.3, 0.7),
            color: [184, 100, 60],
            ground_cover: GroundCover::RedSand,
            vegetation: plants(0.02, 0.0, 0.8, 0.2, None),
            spawns: SpawnTable::new([("vulture", 2), ("lizard", 3)]),
            shape: TerrainShape::new(1.2, 40.0),
        },
    ]
}
