//! Coherent gradient noise sampling.

use ::noise::{NoiseFn, Perlin};

/// Maps continuous 2D coordinates to a coherent scalar in [0, 1].
///
/// Implementations must be pure: the same coordinates always produce the
/// same value for the lifetime of the sampler.
pub trait NoiseSampler: Send + Sync {
    /// Samples the noise at `(x, y)`. The result lies in [0, 1].
    fn sample(&self, x: f64, y: f64) -> f32;
}

/// Seeded 2D Perlin noise.
///
/// The underlying gradient noise is roughly in [-1, 1]; it is shifted and
/// scaled into [0, 1] and clamped so rare overshoots never leave the range.
#[derive(Clone)]
pub struct PerlinSampler {
    perlin: Perlin,
    seed: u32,
}

impl PerlinSampler {
    /// Creates a sampler with the given permutation seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// Returns the seed this sampler was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl std::fmt::Debug for PerlinSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinSampler").field("seed", &self.seed).finish()
    }
}

impl NoiseSampler for PerlinSampler {
    fn sample(&self, x: f64, y: f64) -> f32 {
        let raw = self.perlin.get([x, y]);
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}
