//! Climate model: five decorrelated noise fields sampled per world column.

use noise::Simplex;

use crate::heightmap::fbm_normalized;
use crate::seed::{WorldSeed, salt};

/// Five-dimensional climate descriptor of a world location.
///
/// Every field lies in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClimateVector {
    /// Cold (-1) to hot (+1).
    pub temperature: f64,
    /// Arid (-1) to wet (+1).
    pub humidity: f64,
    /// Deep ocean (-1) to far inland (+1).
    pub continentalness: f64,
    /// Rugged (-1) to worn flat (+1).
    pub erosion: f64,
    /// Ordinary (-1) to strange (+1).
    pub weirdness: f64,
}

impl ClimateVector {
    /// Creates a climate vector from its five components.
    pub const fn new(
        temperature: f64,
        humidity: f64,
        continentalness: f64,
        erosion: f64,
        weirdness: f64,
    ) -> Self {
        Self {
            temperature,
            humidity,
            continentalness,
            erosion,
            weirdness,
        }
    }

    /// Components in canonical order: temperature, humidity, continentalness,
    /// erosion, weirdness.
    pub fn to_array(self) -> [f64; 5] {
        [
            self.temperature,
            self.humidity,
            self.continentalness,
            self.erosion,
            self.weirdness,
        ]
    }
}

/// One climate channel: a seeded simplex field with its own frequency.
struct ClimateField {
    noise: Simplex,
    frequency: f64,
}

impl ClimateField {
    fn new(seed: WorldSeed, salt: u64, frequency: f64) -> Self {
        Self {
            noise: Simplex::new(seed.noise_seed(salt)),
            frequency,
        }
    }

    fn sample(&self, x: f64, z: f64) -> f64 {
        let raw = fbm_normalized(&self.noise, x, z, 2, 2.0, 0.5, self.frequency);
        // Simplex rarely reaches its extremes; stretch so biome targets near
        // +-1 are reachable.
        (raw * 1.4).clamp(-1.0, 1.0)
    }
}

/// Samples the five climate fields at any world column.
pub struct ClimateSampler {
    temperature: ClimateField,
    humidity: ClimateField,
    continentalness: ClimateField,
    erosion: ClimateField,
    weirdness: ClimateField,
}

impl ClimateSampler {
    /// Create a sampler for `seed` with the given base field frequency.
    ///
    /// Each field runs at a fixed multiple of `base_frequency` so climate zones
    /// of different kinds do not line up.
    pub fn new(seed: WorldSeed, base_frequency: f64) -> Self {
        Self {
            temperature: ClimateField::new(seed, salt::TEMPERATURE, base_frequency),
            humidity: ClimateField::new(seed, salt::HUMIDITY, base_frequency * 1.3),
            continentalness: ClimateField::new(seed, salt::CONTINENTALNESS, base_frequency * 0.6),
            erosion: ClimateField::new(seed, salt::EROSION, base_frequency * 1.7),
            weirdness: ClimateField::new(seed, salt::WEIRDNESS, base_frequency * 2.3),
        }
    }

    /// Climate at world column `(x, z)`.
    pub fn climate_at(&self, x: f64, z: f64) -> ClimateVector {
        ClimateVector {
            temperature: self.temperature.sample(x, z),
            humidity: self.humidity.sample(x, z),
            continentalness: self.continentalness.sample(x, z),
            erosion: self.erosion.sample(x, z),
            weirdness: self.weirdness.sample(x, z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler() -> ClimateSampler {
        ClimateSampler::new(WorldSeed::from_text("alpha"), 0.00035)
    }

    #[test]
    fn test_climate_deterministic() {
        let a = sampler().climate_at(1234.5, -987.25);
        let b = sampler().climate_at(1234.5, -987.25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fields_within_unit_range() {
        let s = sampler();
        for i in 0..400 {
            let x = (i as f64 - 200.0) * 173.0;
            let z = (i as f64 * 7.0 - 1400.0) * 61.0;
            for v in s.climate_at(x, z).to_array() {
                assert!((-1.0..=1.0).contains(&v), "climate value {v} out of range");
            }
        }
    }

    #[test]
    fn test_fields_are_decorrelated() {
        let s = sampler();
        let samples: Vec<ClimateVector> = (0..500)
            .map(|i| s.climate_at(i as f64 * 311.0, i as f64 * -197.0))
            .collect();
        let identical = samples
            .iter()
            .filter(|c| (c.temperature - c.humidity).abs() < 1e-9)
            .count();
        assert!(identical < 5, "temperature and humidity track each other");
    }

    #[test]
    fn test_different_seeds_give_different_climate() {
        let a = ClimateSampler::new(WorldSeed::from(1), 0.00035);
        let b = ClimateSampler::new(WorldSeed::from(2), 0.00035);
        let differs = (0..50).any(|i| {
            let x = i as f64 * 400.0 + 13.0;
            a.climate_at(x, 77.0) != b.climate_at(x, 77.0)
        });
        assert!(differs);
    }
}
