//! Surface elevation: base fBm, biome shaping, the spawn plateau, distant
//! ridged mountains, and the river flag.
//!
//! Cave entrance bowls are applied on top of this by
//! [`TerrainGenerator`](crate::TerrainGenerator); the value produced here is
//! the pre-cave surface worms steer against.

use std::sync::Arc;

use noise::Simplex;
use terra_config::TerrainConfig;

use crate::biome::{BiomeClassifier, BiomeId, BiomeRegistry};
use crate::climate::{ClimateSampler, ClimateVector};
use crate::heightmap::{HeightmapParams, HeightmapSampler, fbm_normalized};
use crate::seed::{WorldSeed, salt};

/// Octaves of the ridged mountain noise.
const MOUNTAIN_OCTAVES: u32 = 4;
/// Octaves of the river channel noise.
const RIVER_OCTAVES: u32 = 2;

/// Hermite smoothstep of `x` between `edge0` and `edge1`.
///
/// Degenerate ranges (`edge1 <= edge0`) act as a hard step at `edge0`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Result of sampling the terrain at a world column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    /// Surface elevation in world units.
    pub elevation: f64,
    /// Climate at this column.
    pub climate: ClimateVector,
    /// Biome classified from the climate.
    pub biome: BiomeId,
    /// Whether a river channel runs through this column.
    pub is_river: bool,
}

/// Pure function from world column to surface elevation, climate and biome.
pub struct HeightField {
    base: HeightmapSampler,
    climate: ClimateSampler,
    classifier: BiomeClassifier,
    mountain_noise: Simplex,
    river_noise: Simplex,
    config: TerrainConfig,
    sea_level: f64,
}

impl HeightField {
    pub fn new(
        seed: WorldSeed,
        config: &TerrainConfig,
        sea_level: f64,
        registry: Arc<BiomeRegistry>,
    ) -> Self {
        let base = HeightmapSampler::new(HeightmapParams {
            seed: seed.noise_seed(salt::BASE_HEIGHT),
            octaves: config.octaves,
            lacunarity: config.lacunarity,
            persistence: config.persistence,
            base_frequency: config.base_frequency,
            amplitude: config.hill_height,
        });
        Self {
            base,
            climate: ClimateSampler::new(seed, config.climate_frequency),
            classifier: BiomeClassifier::new(registry),
            mountain_noise: Simplex::new(seed.noise_seed(salt::MOUNTAIN)),
            river_noise: Simplex::new(seed.noise_seed(salt::RIVER)),
            config: config.clone(),
            sea_level,
        }
    }

    pub fn climate_at(&self, x: f64, z: f64) -> ClimateVector {
        self.climate.climate_at(x, z)
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    pub fn sea_level(&self) -> f64 {
        self.sea_level
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Unshaped fBm elevation in `[-hill_height, hill_height]`.
    pub fn base_elevation(&self, x: f64, z: f64) -> f64 {
        self.base.sample(x, z)
    }

    /// Multiplier pulling elevation toward zero near the origin: 0 at the
    /// origin, 1 from `plateau_radius` outward.
    pub fn plateau_factor(&self, x: f64, z: f64) -> f64 {
        smoothstep(0.0, self.config.plateau_radius, x.hypot(z))
    }

    /// Height added by ridged mountains. Zero inside `mountain_start_radius`.
    pub fn mountain_contribution(&self, x: f64, z: f64, climate: &ClimateVector) -> f64 {
        let start = self.config.mountain_start_radius;
        let d = x.hypot(z);
        if d <= start {
            return 0.0;
        }
        let ramp = smoothstep(start, start + self.config.mountain_transition, d);
        let n = fbm_normalized(
            &self.mountain_noise,
            x,
            z,
            MOUNTAIN_OCTAVES,
            2.0,
            0.5,
            self.config.mountain_frequency,
        );
        let ridge = (1.0 - n.abs()).powi(2);
        let erosion_factor = ((1.0 - climate.erosion) * 0.5).clamp(0.0, 1.0);
        ridge * ramp * erosion_factor * self.config.mountain_height
    }

    fn river_at(&self, x: f64, z: f64, elevation: f64) -> bool {
        if x.hypot(z) <= self.config.plateau_radius || elevation <= self.sea_level {
            return false;
        }
        let n = fbm_normalized(
            &self.river_noise,
            x,
            z,
            RIVER_OCTAVES,
            2.0,
            0.5,
            self.config.river_frequency,
        );
        n.abs() < self.config.river_width
    }

    /// Surface before cave carving.
    pub fn surface_at(&self, x: f64, z: f64) -> HeightSample {
        let climate = self.climate.climate_at(x, z);
        let biome = self.classifier.classify(&climate);
        let shape = self.classifier.terrain_shape(&climate);

        let mut elevation = shape.apply(self.base_elevation(x, z));
        elevation *= self.plateau_factor(x, z);
        elevation += self.mountain_contribution(x, z, &climate);

        HeightSample {
            elevation,
            climate,
            biome,
            is_river: self.river_at(x, z, elevation),
        }
    }
}
