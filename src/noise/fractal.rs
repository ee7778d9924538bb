//! Multi-octave fractal Brownian motion (fBm) noise generation.

use serde::{Deserialize, Serialize};

use super::perlin::NoiseSampler;
use crate::error::{ConfigError, ensure_positive};

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves (>= 1).
    pub octaves: u8,
    /// Base frequency applied to grid coordinates (0.05-0.2 typical).
    pub noise_scale: f32,
    /// Frequency multiplier per octave (typically 2.0, must be > 1).
    pub lacunarity: f32,
    /// Amplitude decay per octave, in (0, 1].
    pub persistence: f32,
    /// Permutation seed for reproducible generation.
    pub seed: u32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            noise_scale: 0.1,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 0,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Broad, gently rolling basins with little fine detail.
    pub fn smooth(seed: u32) -> Self {
        Self {
            octaves: 3,
            noise_scale: 0.03,
            lacunarity: 2.0,
            persistence: 0.4,
            seed,
        }
    }

    /// Broken seabed with reefs and shoals.
    pub fn rugged(seed: u32) -> Self {
        Self {
            octaves: 6,
            noise_scale: 0.08,
            lacunarity: 2.2,
            persistence: 0.55,
            seed,
        }
    }

    /// Checks the octave, frequency and amplitude parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves < 1 {
            return Err(ConfigError::InvalidOctaves(self.octaves));
        }
        ensure_positive("noise_scale", self.noise_scale)?;
        ensure_positive("persistence", self.persistence)?;
        if self.persistence > 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "persistence",
                value: self.persistence,
                range: "(0, 1]",
            });
        }
        ensure_positive("lacunarity", self.lacunarity)?;
        if self.lacunarity <= 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "lacunarity",
                value: self.lacunarity,
                range: "(1, inf)",
            });
        }
        Ok(())
    }
}

/// Sum of the amplitudes of every octave: `1 + p + p^2 + ...`.
pub fn fractal_amplitude_sum(config: &FractalNoiseConfig) -> f32 {
    let mut amplitude = 1.0f32;
    let mut total = 0.0f32;
    for _ in 0..config.octaves {
        total += amplitude;
        amplitude *= config.persistence;
    }
    total
}

/// Samples fractal noise at a grid position.
///
/// Octave `i` samples at frequency `noise_scale * lacunarity^i` with
/// amplitude `persistence^i`; the weighted sum is divided by the amplitude
/// sum, so the result stays in [0, 1] whatever the octave count. With a
/// single octave the result is exactly the raw sample.
///
/// # Arguments
/// * `x`, `y` - Grid coordinates (cell indices, not world units)
/// * `config` - Noise configuration parameters
/// * `sampler` - Base noise returning values in [0, 1]
pub fn sample_fractal_noise<N: NoiseSampler + ?Sized>(
    x: f64,
    y: f64,
    config: &FractalNoiseConfig,
    sampler: &N,
) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = config.noise_scale as f64;
    let mut max_amplitude = 0.0f32;

    for _ in 0..config.octaves {
        total += sampler.sample(x * frequency, y * frequency) * amplitude;
        max_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity as f64;
    }

    if max_amplitude <= 0.0 {
        return 0.0;
    }

    // Rounding in the weighted sum can land a hair outside [0, 1].
    (total / max_amplitude).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::PerlinSampler;

    /// Returns the same value everywhere.
    struct Flat(f32);

    impl NoiseSampler for Flat {
        fn sample(&self, _x: f64, _y: f64) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 4);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(FractalNoiseConfig::smooth(1).validate().is_ok());
        assert!(FractalNoiseConfig::rugged(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let zero_octaves = FractalNoiseConfig { octaves: 0, ..Default::default() };
        assert_eq!(zero_octaves.validate(), Err(ConfigError::InvalidOctaves(0)));

        let flat_lacunarity = FractalNoiseConfig { lacunarity: 1.0, ..Default::default() };
        assert!(matches!(
            flat_lacunarity.validate(),
            Err(ConfigError::OutOfRange { name: "lacunarity", .. })
        ));

        let big_persistence = FractalNoiseConfig { persistence: 1.5, ..Default::default() };
        assert!(big_persistence.validate().is_err());

        let zero_persistence = FractalNoiseConfig { persistence: 0.0, ..Default::default() };
        assert!(zero_persistence.validate().is_err());

        let negative_scale = FractalNoiseConfig { noise_scale: -0.1, ..Default::default() };
        assert!(negative_scale.validate().is_err());
    }

    #[test]
    fn test_amplitude_sum() {
        let config = FractalNoiseConfig { octaves: 3, persistence: 0.5, ..Default::default() };
        assert!((fractal_amplitude_sum(&config) - 1.75).abs() < 1e-6);

        let single = FractalNoiseConfig { octaves: 1, ..Default::default() };
        assert_eq!(fractal_amplitude_sum(&single), 1.0);
    }

    #[test]
    fn test_single_octave_equals_raw_sample() {
        let sampler = PerlinSampler::new(5);
        let config = FractalNoiseConfig { octaves: 1, noise_scale: 0.1, seed: 5, ..Default::default() };

        for (x, y) in [(1.0, 2.0), (3.0, 0.0), (7.0, 5.0), (13.0, 11.0)] {
            let fractal = sample_fractal_noise(x, y, &config, &sampler);
            let raw = sampler.sample(x * 0.1f32 as f64, y * 0.1f32 as f64);
            assert_eq!(fractal, raw);
        }
    }

    #[test]
    fn test_normalization_independent_of_octaves() {
        // A sampler pinned at its maximum must stay at exactly 1.0.
        for octaves in 1..=12 {
            let config = FractalNoiseConfig { octaves, persistence: 0.9, ..Default::default() };
            let v = sample_fractal_noise(3.0, 4.0, &config, &Flat(1.0));
            assert!((0.0..=1.0).contains(&v), "octaves={} gave {}", octaves, v);
            assert!((v - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_noise_range_many_octaves() {
        let sampler = PerlinSampler::new(42);
        for octaves in 1..=10 {
            let config = FractalNoiseConfig { octaves, ..Default::default() };
            for i in 0..50 {
                let v = sample_fractal_noise(i as f64, (i * 3 % 17) as f64, &config, &sampler);
                assert!((0.0..=1.0).contains(&v), "Noise value {} out of range", v);
            }
        }
    }

    #[test]
    fn test_noise_reproducibility() {
        let config = FractalNoiseConfig::with_seed(12345);
        let a = PerlinSampler::new(config.seed);
        let b = PerlinSampler::new(config.seed);

        let result1 = sample_fractal_noise(17.0, 23.0, &config, &a);
        let result2 = sample_fractal_noise(17.0, 23.0, &config, &b);

        assert_eq!(result1, result2, "Same seed and position should produce same result");
    }
}
