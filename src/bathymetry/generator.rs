//! Depth-field generation using fractal noise.

use std::time::Instant;

use rayon::prelude::*;

use super::config::DepthMapConfig;
use super::field::DepthField;
use crate::error::ConfigError;
use crate::noise::{NoiseSampler, PerlinSampler, sample_fractal_noise};

/// Generates a depth field using seeded Perlin fBm.
///
/// Higher normalized noise means deeper water: a normalized value of 0 maps
/// to `min_depth` and 1 maps to `max_depth`. This is the only sign
/// convention in the crate.
///
/// The output is bit-for-bit reproducible for a given configuration.
///
/// # Errors
/// Returns a `ConfigError` before anything is allocated if the
/// configuration is invalid.
pub fn generate_depth_field(config: &DepthMapConfig) -> Result<DepthField, ConfigError> {
    let sampler = PerlinSampler::new(config.noise.seed);
    generate_depth_field_with(config, &sampler)
}

/// Generates a depth field from any [`NoiseSampler`].
///
/// Cells are filled in parallel; each cell depends only on its own
/// coordinates, so the result does not depend on scheduling.
pub fn generate_depth_field_with<N: NoiseSampler + ?Sized>(
    config: &DepthMapConfig,
    sampler: &N,
) -> Result<DepthField, ConfigError> {
    config.validate()?;

    let start = Instant::now();
    let width = config.width as usize;
    let cells = width * config.height as usize;
    let (min_depth, max_depth) = (config.min_depth, config.max_depth);

    let mut depths = vec![0.0f32; cells];
    depths.par_iter_mut().enumerate().for_each(|(i, depth)| {
        let x = (i % width) as f64;
        let y = (i / width) as f64;
        let normalized = sample_fractal_noise(x, y, &config.noise, sampler);
        *depth = normalized_to_depth(normalized, min_depth, max_depth);
    });

    let field = DepthField::from_generated(config, depths);
    let (lo, hi) = field.depth_range();
    log::debug!(
        "Generated {}x{} depth field (seed {}, {} octaves) in {:.2?}; depth range [{:.2}, {:.2}]",
        config.width,
        config.height,
        config.noise.seed,
        config.noise.octaves,
        start.elapsed(),
        lo,
        hi,
    );

    Ok(field)
}

/// Scales a normalized value in [0, 1] into `[min_depth, max_depth]`.
pub fn normalized_to_depth(normalized: f32, min_depth: f32, max_depth: f32) -> f32 {
    (normalized * (max_depth - min_depth) + min_depth).clamp(min_depth, max_depth)
}
