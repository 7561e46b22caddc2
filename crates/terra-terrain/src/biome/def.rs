//! Biome definition: describes the properties of a single biome type.

use rand::Rng;

use crate::climate::ClimateVector;

/// Material tag for the top layer of a biome's ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroundCover {
    Grass,
    Sand,
    RedSand,
    Snow,
    Dirt,
    Stone,
    Gravel,
    Mud,
}

impl GroundCover {
    /// Stable lowercase name, used by asset painters to pick textures.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Sand => "sand",
            Self::RedSand => "red_sand",
            Self::Snow => "snow",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Gravel => "gravel",
            Self::Mud => "mud",
        }
    }
}

/// Vegetation density and the relative mix of plant kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct Vegetation {
    /// Probability of a plant per surface cell, in `[0.0, 1.0]`.
    pub density: f64,
    /// Relative weight of trees among placed plants.
    pub tree_weight: f64,
    /// Relative weight of shrubs among placed plants.
    pub shrub_weight: f64,
    /// Relative weight of grass tufts among placed plants.
    pub grass_weight: f64,
    /// Tree archetype for this biome. `None` for treeless biomes.
    pub tree_type: Option<String>,
}

impl Vegetation {
    /// A biome with no plants at all.
    pub fn barren() -> Self {
        Self {
            density: 0.0,
            tree_weight: 0.0,
            shrub_weight: 0.0,
            grass_weight: 0.0,
            tree_type: None,
        }
    }
}

/// One entity kind and its relative spawn weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnEntry {
    pub entity: String,
    pub weight: u32,
}

/// Weighted table of entities that may spawn in a biome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnTable {
    entries: Vec<SpawnEntry>,
    total_weight: u32,
}

impl SpawnTable {
    /// Builds a table from `(entity, weight)` pairs. Zero-weight entries are dropped.
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, u32)>) -> Self {
        let entries: Vec<SpawnEntry> = entries
            .into_iter()
            .filter(|(_, weight)| *weight > 0)
            .map(|(entity, weight)| SpawnEntry {
                entity: entity.into(),
                weight,
            })
            .collect();
        let total_weight = entries.iter().map(|e| e.weight).sum();
        Self {
            entries,
            total_weight,
        }
    }

    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picks an entry with probability proportional to its weight.
    ///
    /// Returns `None` for an empty table.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&SpawnEntry> {
        if self.total_weight == 0 {
            return None;
        }
        let mut roll = rng.random_range(0..self.total_weight);
        for entry in &self.entries {
            if roll < entry.weight {
                return Some(entry);
            }
            roll -= entry.weight;
        }
        None
    }
}

/// How a biome reshapes the base elevation: `h * height_scale + height_offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainShape {
    pub height_scale: f64,
    pub height_offset: f64,
}

impl TerrainShape {
    /// Leaves the base elevation untouched.
    pub const IDENTITY: Self = Self {
        height_scale: 1.0,
        height_offset: 0.0,
    };

    pub const fn new(height_scale: f64, height_offset: f64) -> Self {
        Self {
            height_scale,
            height_offset,
        }
    }

    /// Apply the shape to a base elevation.
    pub fn apply(self, base: f64) -> f64 {
        base * self.height_scale + self.height_offset
    }
}

impl Default for TerrainShape {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Full descriptor for a biome type.
#[derive(Clone, Debug)]
pub struct BiomeDef {
    /// Human-readable biome name (e.g., "temperate_forest").
    pub name: String,
    /// Target point in climate space. Locations nearest this point get this biome.
    pub climate: ClimateVector,
    /// Display colour (sRGB).
    pub color: [u8; 3],
    /// Material tag for the ground surface.
    pub ground_cover: GroundCover,
    /// Plant density and mix.
    pub vegetation: Vegetation,
    /// Entities that may spawn here.
    pub spawns: SpawnTable,
    /// Height multiplier and offset applied to the base elevation.
    pub shape: TerrainShape,
}

impl BiomeDef {
    pub fn spawn_table(&self) -> &SpawnTable {
        &self.spawns
    }

    /// Display colour as linear-ish floats in `[0, 1]`.
    pub fn color_f32(&self) -> [f32; 3] {
        self.color.map(|c| f32::from(c) / 255.0)
    }
}
