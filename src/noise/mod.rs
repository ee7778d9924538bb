//! Noise generation module for seabed synthesis.
//!
//! Uses the `noise` crate's seeded Perlin gradient noise, remapped to [0, 1].

mod fractal;
mod perlin;

pub use fractal::{FractalNoiseConfig, sample_fractal_noise, fractal_amplitude_sum};
pub use perlin::{NoiseSampler, PerlinSampler};
