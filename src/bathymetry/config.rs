//! Configuration for depth-field generation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_finite, ensure_positive};
use crate::noise::FractalNoiseConfig;

/// Configuration parameters for seabed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthMapConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Edge length of one square cell in world units.
    pub world_scale: f32,
    /// World position of the corner of cell (0, 0).
    pub origin: Vec2,
    /// Fractal noise parameters (frequency, octaves, seed).
    pub noise: FractalNoiseConfig,
    /// Depth assigned to a normalized noise value of 0.
    pub min_depth: f32,
    /// Depth assigned to a normalized noise value of 1.
    pub max_depth: f32,
}

/// Cell count of a `width x height` grid of `f32` depths, or `None` when
/// the buffer would exceed `isize::MAX` bytes.
pub(crate) fn grid_cell_count(width: u32, height: u32) -> Option<usize> {
    let cells = (width as usize).checked_mul(height as usize)?;
    let bytes = cells.checked_mul(std::mem::size_of::<f32>())?;
    (bytes <= isize::MAX as usize).then_some(cells)
}

/// Rejects depth ranges that are inverted or too wide to represent.
pub(crate) fn ensure_depth_range(min_depth: f32, max_depth: f32) -> Result<(), ConfigError> {
    ensure_finite("min_depth", min_depth)?;
    ensure_finite("max_depth", max_depth)?;
    if min_depth >= max_depth || !(max_depth - min_depth).is_finite() {
        return Err(ConfigError::InvalidDepthRange(min_depth, max_depth));
    }
    Ok(())
}

impl Default for DepthMapConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            world_scale: 1.0,
            origin: Vec2::ZERO,
            noise: FractalNoiseConfig::default(),
            min_depth: 0.0,
            max_depth: 100.0,
        }
    }
}

impl DepthMapConfig {
    /// Creates a configuration of the given size with default noise.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Shallow coastal waters: reefs and sandbanks close to the surface.
    pub fn coastal(seed: u32) -> Self {
        Self {
            noise: FractalNoiseConfig::rugged(seed),
            min_depth: 0.0,
            max_depth: 25.0,
            ..Default::default()
        }
    }

    /// Deep open water with broad, smooth basins.
    pub fn open_ocean(seed: u32) -> Self {
        Self {
            noise: FractalNoiseConfig::smooth(seed),
            min_depth: 20.0,
            max_depth: 400.0,
            ..Default::default()
        }
    }

    /// Number of cells in the grid, or `None` if its depth buffer could
    /// never be allocated.
    pub fn cell_count(&self) -> Option<usize> {
        grid_cell_count(self.width, self.height)
    }

    /// World-space size covered by the whole grid.
    pub fn world_extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.world_scale
    }

    /// Validates every parameter. Called before any grid is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.cell_count().is_none() {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        ensure_positive("world_scale", self.world_scale)?;
        ensure_finite("origin.x", self.origin.x)?;
        ensure_finite("origin.y", self.origin.y)?;
        self.noise.validate()?;
        ensure_depth_range(self.min_depth, self.max_depth)
    }
}
