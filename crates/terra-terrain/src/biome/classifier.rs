//! Climate-space nearest-neighbour biome classification.

use std::sync::Arc;

use super::{BiomeDef, BiomeId, BiomeRegistry, TerrainShape};
use crate::climate::ClimateVector;

/// Per-axis weights: temperature, humidity, continentalness, erosion, weirdness.
pub const CLIMATE_WEIGHTS: [f64; 5] = [1.0, 1.0, 2.0, 2.0, 0.5];

/// Distances closer than this count as a tie, which the earlier biome wins.
pub const TIE_EPSILON: f64 = 1e-12;

/// Sharpness of the soft-min used to blend terrain shapes across borders.
const SHAPE_BLEND_SHARPNESS: f64 = 12.0;

/// Weighted squared Euclidean distance between two climate points.
pub fn climate_distance_sq(a: &ClimateVector, b: &ClimateVector) -> f64 {
    let a = a.to_array();
    let b = b.to_array();
    CLIMATE_WEIGHTS
        .iter()
        .zip(a.iter().zip(b.iter()))
        .map(|(w, (x, y))| w * (x - y) * (x - y))
        .sum()
}

/// Assigns biomes to climate vectors using a shared registry.
#[derive(Clone)]
pub struct BiomeClassifier {
    registry: Arc<BiomeRegistry>,
}

impl BiomeClassifier {
    pub fn new(registry: Arc<BiomeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<BiomeRegistry> {
        &self.registry
    }

    /// The nearest biome's id. The first registered biome wins ties, including
    /// distances that differ by less than [`TIE_EPSILON`].
    ///
    /// Returns [`BiomeId::FALLBACK`] when the registry is empty.
    pub fn classify(&self, climate: &ClimateVector) -> BiomeId {
        let mut best = BiomeId::FALLBACK;
        let mut best_dist = f64::INFINITY;
        for (id, def) in self.registry.iter() {
            let d = climate_distance_sq(climate, &def.climate);
            if d < best_dist - TIE_EPSILON {
                best_dist = d;
                best = id;
            }
        }
        best
    }

    /// The nearest biome's definition.
    pub fn biome_at(&self, climate: &ClimateVector) -> &BiomeDef {
        self.registry.get(self.classify(climate))
    }

    /// Terrain shape blended over all biomes by soft-min of climate distance.
    ///
    /// Near a border both neighbours contribute, so elevation changes smoothly
    /// even though the categorical biome switches abruptly.
    pub fn terrain_shape(&self, climate: &ClimateVector) -> TerrainShape {
        if self.registry.is_empty() {
            return self.registry.fallback().shape;
        }

        let distances: Vec<f64> = self
            .registry
            .iter()
            .map(|(_, def)| climate_distance_sq(climate, &def.climate))
            .collect();
        let min = distances.iter().copied().fold(f64::INFINITY, f64::min);

        let mut weight_sum = 0.0;
        let mut scale = 0.0;
        let mut offset = 0.0;
        for ((_, def), d) in self.registry.iter().zip(&distances) {
            let w = (-(d - min) * SHAPE_BLEND_SHARPNESS).exp();
            weight_sum += w;
            scale += w * def.shape.height_scale;
            offset += w * def.shape.height_offset;
        }

        // The nearest biome always contributes weight 1, so the sum is >= 1.
        TerrainShape::new(scale / weight_sum, offset / weight_sum)
    }
}
