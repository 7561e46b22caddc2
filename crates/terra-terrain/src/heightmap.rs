//! Multi-octave fractal Brownian motion (fBm) heightmap sampler.
//!
//! Composites octaves of simplex noise, each doubling in frequency and
//! halving in amplitude by default, and normalises the sum by the total
//! possible amplitude so the result stays within `[-1, 1]` before scaling.

use noise::{NoiseFn, Simplex};

/// Configuration for multi-octave fBm noise used in heightmap generation.
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    /// Noise seed for deterministic generation.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first (lowest) octave.
    pub base_frequency: f64,
    /// Scale applied to the normalised sum ("hill height").
    pub amplitude: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.0012,
            amplitude: 90.0,
        }
    }
}

/// Sum `octaves` layers of 2D noise and divide by the total amplitude.
///
/// The result lies in the same range as a single `noise_fn` sample.
pub fn fbm_normalized(
    noise_fn: &impl NoiseFn<f64, 2>,
    x: f64,
    z: f64,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
    base_frequency: f64,
) -> f64 {
    let mut total = 0.0;
    let mut total_amplitude = 0.0;
    let mut frequency = base_frequency;
    let mut amplitude = 1.0;

    for _ in 0..octaves {
        total += noise_fn.get([x * frequency, z * frequency]) * amplitude;
        total_amplitude += amplitude;

        frequency *= lacunarity;
        amplitude *= persistence;
    }

    if total_amplitude > 0.0 {
        total / total_amplitude
    } else {
        0.0
    }
}

/// Generates base terrain elevation using fractal Brownian motion over simplex noise.
pub struct HeightmapSampler {
    noise: Simplex,
    params: HeightmapParams,
}

impl HeightmapSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: HeightmapParams) -> Self {
        let noise = Simplex::new(params.seed);
        Self { noise, params }
    }

    /// Sample the normalised fBm at a world coordinate, in `[-1, 1]`.
    pub fn sample_normalized(&self, x: f64, z: f64) -> f64 {
        fbm_normalized(
            &self.noise,
            x,
            z,
            self.params.octaves,
            self.params.lacunarity,
            self.params.persistence,
            self.params.base_frequency,
        )
    }

    /// Sample the heightmap at a world coordinate, in `[-amplitude, amplitude]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.sample_normalized(x, z) * self.params.amplitude
    }

    /// The largest absolute value [`sample`](Self::sample) can return.
    pub fn max_amplitude(&self) -> f64 {
        self.params.amplitude.abs()
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let params = HeightmapParams {
            seed: 42,
            ..Default::default()
        };
        let sampler_a = HeightmapSampler::new(params.clone());
        let sampler_b = HeightmapSampler::new(params);

        let h1 = sampler_a.sample(100.0, 200.0);
        let h2 = sampler_b.sample(100.0, 200.0);
        assert_eq!(h1.to_bits(), h2.to_bits(), "{h1} vs {h2}");
    }

    #[test]
    fn test_different_seeds_produce_different_heights() {
        let sampler_a = HeightmapSampler::new(HeightmapParams {
            seed: 1,
            ..Default::default()
        });
        let sampler_b = HeightmapSampler::new(HeightmapParams {
            seed: 999,
            ..Default::default()
        });

        let differs = (0..20).any(|i| {
            let x = 137.0 + i as f64 * 91.0;
            (sampler_a.sample(x, 500.0) - sampler_b.sample(x, 500.0)).abs() > EPSILON
        });
        assert!(differs, "Different seeds should produce different heights");
    }

    #[test]
    fn test_height_within_expected_range() {
        let sampler = HeightmapSampler::new(HeightmapParams::default());
        let max_amp = sampler.max_amplitude();

        for x in (0..100).map(|i| i as f64 * 37.0) {
            for z in (0..100).map(|i| i as f64 * 37.0) {
                let h = sampler.sample(x, z);
                assert!(
                    h.abs() <= max_amp + EPSILON,
                    "Height {h} exceeds max amplitude {max_amp} at ({x}, {z})"
                );
            }
        }
    }

    #[test]
    fn test_more_octaves_adds_detail() {
        let step = 2.0;
        let count = 1000;
        let sampler_1 = HeightmapSampler::new(HeightmapParams {
            seed: 7,
            octaves: 1,
            ..Default::default()
        });
        let sampler_8 = HeightmapSampler::new(HeightmapParams {
            seed: 7,
            octaves: 8,
            ..Default::default()
        });

        let roughness = |s: &HeightmapSampler| {
            (0..count)
                .map(|i| {
                    let x = i as f64 * step;
                    (s.sample_normalized(x + step, 0.0) - s.sample_normalized(x, 0.0)).abs()
                })
                .sum::<f64>()
                / count as f64
        };

        let diff_1oct = roughness(&sampler_1);
        let diff_8oct = roughness(&sampler_8);
        assert!(
            diff_8oct > diff_1oct,
            "8 octaves should have more high-frequency detail than 1 octave: \
             avg_diff_1={diff_1oct}, avg_diff_8={diff_8oct}"
        );
    }

    #[test]
    fn test_zero_amplitude_returns_zero() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            amplitude: 0.0,
            ..Default::default()
        });
        let h = sampler.sample(123.0, 456.0);
        assert!(h.abs() < EPSILON, "Zero amplitude should produce zero height, got {h}");
    }

    #[test]
    fn test_fbm_normalized_zero_octaves_is_zero() {
        let noise = Simplex::new(3);
        assert_eq!(fbm_normalized(&noise, 10.0, 20.0, 0, 2.0, 0.5, 0.01), 0.0);
    }
}
