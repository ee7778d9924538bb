//! Immutable depth grid and its query surface.

use glam::Vec2;

use super::config::{DepthMapConfig, ensure_depth_range, grid_cell_count};
use super::generator::generate_depth_field;
use crate::error::{ConfigError, ensure_finite, ensure_positive};
use crate::vessel::VesselProfile;

/// A rectangular block of cells, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left column.
    pub col: u32,
    /// Top row.
    pub row: u32,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl CellRect {
    pub fn new(col: u32, row: u32, width: u32, height: u32) -> Self {
        Self { col, row, width, height }
    }
}

/// A bathymetric grid: water depth below the surface for every cell.
///
/// Depths are stored row-major (`row * width + col`) and never change after
/// construction. Replacing the seabed means building a new `DepthField` and
/// swapping the shared handle; holders of the old one keep a valid snapshot.
///
/// World positions map to cells by flooring
/// `(position - origin) / world_scale`; positions past any edge clamp to
/// the nearest edge cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthField {
    width: u32,
    height: u32,
    depths: Vec<f32>,
    origin: Vec2,
    world_scale: f32,
    min_depth: f32,
    max_depth: f32,
    config: Option<DepthMapConfig>,
}

impl DepthField {
    /// Builds a field from generator output. The caller guarantees the
    /// buffer length and value range.
    pub(crate) fn from_generated(config: &DepthMapConfig, depths: Vec<f32>) -> Self {
        debug_assert_eq!(depths.len(), config.width as usize * config.height as usize);
        Self {
            width: config.width,
            height: config.height,
            depths,
            origin: config.origin,
            world_scale: config.world_scale,
            min_depth: config.min_depth,
            max_depth: config.max_depth,
            config: Some(config.clone()),
        }
    }

    /// Wraps a host-supplied grid (e.g. a surveyed chart or a test fixture).
    ///
    /// # Arguments
    /// * `width`, `height` - Grid dimensions in cells
    /// * `depths` - Row-major depth values, `width * height` long
    /// * `origin` - World position of the corner of cell (0, 0)
    /// * `world_scale` - Edge length of one cell in world units
    /// * `min_depth`, `max_depth` - Declared range every value must lie in
    pub fn from_depths(
        width: u32,
        height: u32,
        depths: Vec<f32>,
        origin: Vec2,
        world_scale: f32,
        min_depth: f32,
        max_depth: f32,
    ) -> Result<Self, ConfigError> {
        let expected = grid_cell_count(width, height);
        if width == 0 || height == 0 || expected.is_none() {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if expected != Some(depths.len()) {
            return Err(ConfigError::BufferLength {
                got: depths.len(),
                width,
                height,
            });
        }
        ensure_positive("world_scale", world_scale)?;
        ensure_finite("origin.x", origin.x)?;
        ensure_finite("origin.y", origin.y)?;
        ensure_depth_range(min_depth, max_depth)?;
        if let Some((index, &value)) = depths
            .iter()
            .enumerate()
            .find(|&(_, &d)| !(min_depth..=max_depth).contains(&d))
        {
            return Err(ConfigError::DepthOutOfRange {
                index,
                value,
                min: min_depth,
                max: max_depth,
            });
        }

        Ok(Self {
            width,
            height,
            depths,
            origin,
            world_scale,
            min_depth,
            max_depth,
            config: None,
        })
    }

    /// Generates a brand-new field from `config`.
    ///
    /// `self` is left untouched; anything holding it keeps seeing the old
    /// depths.
    pub fn regenerate(&self, config: &DepthMapConfig) -> Result<DepthField, ConfigError> {
        if self.config.as_ref() == Some(config) {
            log::warn!("Regenerating depth field with unchanged parameters");
        }
        generate_depth_field(config)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World position of the corner of cell (0, 0).
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Edge length of one cell in world units.
    pub fn world_scale(&self) -> f32 {
        self.world_scale
    }

    /// Lower bound of the declared depth range.
    pub fn min_depth(&self) -> f32 {
        self.min_depth
    }

    /// Upper bound of the declared depth range.
    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    /// Generation parameters, or `None` for host-supplied grids.
    pub fn config(&self) -> Option<&DepthMapConfig> {
        self.config.as_ref()
    }

    /// The dense row-major grid, read-only.
    pub fn depths(&self) -> &[f32] {
        &self.depths
    }

    /// Returns the total number of cells.
    pub fn cell_count(&self) -> usize {
        self.depths.len()
    }

    /// World-space size covered by the grid.
    pub fn world_extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.world_scale
    }

    /// Returns the depth of a cell, or `None` if it lies outside the grid.
    pub fn get(&self, col: u32, row: u32) -> Option<f32> {
        if col < self.width && row < self.height {
            Some(self.depths[self.index(col, row)])
        } else {
            None
        }
    }

    /// Returns the depth of the cell nearest to `(col, row)`, clamping to
    /// the grid edges.
    pub fn depth_at_cell(&self, col: i64, row: i64) -> f32 {
        let col = col.clamp(0, self.width as i64 - 1) as u32;
        let row = row.clamp(0, self.height as i64 - 1) as u32;
        self.depths[self.index(col, row)]
    }

    /// Maps a world position to the cell containing it, clamped to the grid.
    pub fn world_to_cell(&self, position: Vec2) -> (u32, u32) {
        let grid = (position - self.origin) / self.world_scale;
        // `as` saturates and maps NaN to 0, so this never leaves the grid.
        let col = (grid.x.floor() as i64).clamp(0, self.width as i64 - 1) as u32;
        let row = (grid.y.floor() as i64).clamp(0, self.height as i64 - 1) as u32;
        (col, row)
    }

    /// World position of a cell's center.
    pub fn cell_center(&self, col: u32, row: u32) -> Vec2 {
        self.origin + (Vec2::new(col as f32, row as f32) + 0.5) * self.world_scale
    }

    /// Depth at a world position, from the nearest cell.
    ///
    /// No interpolation: depth steps at cell boundaries. Out-of-range
    /// positions read the nearest edge cell.
    pub fn depth_at(&self, position: Vec2) -> f32 {
        let (col, row) = self.world_to_cell(position);
        self.depths[self.index(col, row)]
    }

    /// Depth at a world position, bilinearly interpolated between the four
    /// surrounding cell centers.
    ///
    /// Smooth across cell boundaries, so it differs from [`depth_at`] near
    /// edges. Grounding checks use [`depth_at`].
    ///
    /// [`depth_at`]: DepthField::depth_at
    pub fn depth_at_bilinear(&self, position: Vec2) -> f32 {
        let grid = (position - self.origin) / self.world_scale - 0.5;
        if !grid.is_finite() {
            return self.depth_at(position);
        }
        let gx = grid.x.clamp(0.0, (self.width - 1) as f32);
        let gy = grid.y.clamp(0.0, (self.height - 1) as f32);

        let x0 = gx.floor() as u32;
        let y0 = gy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = gx - x0 as f32;
        let ty = gy - y0 as f32;

        let d00 = self.depths[self.index(x0, y0)];
        let d10 = self.depths[self.index(x1, y0)];
        let d01 = self.depths[self.index(x0, y1)];
        let d11 = self.depths[self.index(x1, y1)];

        let top = d00 + (d10 - d00) * tx;
        let bottom = d01 + (d11 - d01) * tx;
        (top + (bottom - top) * ty).clamp(self.min_depth, self.max_depth)
    }

    /// Read-only view of a rectangular block of cells.
    ///
    /// The rectangle is clipped to the grid; a rectangle entirely outside
    /// yields an empty view.
    pub fn region_depths(&self, rect: CellRect) -> DepthRegion<'_> {
        let col = rect.col.min(self.width);
        let row = rect.row.min(self.height);
        let width = rect.width.min(self.width - col);
        let height = rect.height.min(self.height - row);
        DepthRegion {
            field: self,
            col,
            row,
            width,
            height,
        }
    }

    /// Returns true if the water at `position` is deep enough for `profile`.
    pub fn can_navigate(&self, position: Vec2, profile: &VesselProfile) -> bool {
        self.depth_at(position) >= profile.required_clearance()
    }

    /// Observed (min, max) depth across all cells.
    pub fn depth_range(&self) -> (f32, f32) {
        self.depths
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &d| (lo.min(d), hi.max(d)))
    }

    /// Mean depth across all cells.
    pub fn mean_depth(&self) -> f32 {
        let sum: f64 = self.depths.iter().map(|&d| d as f64).sum();
        (sum / self.depths.len() as f64) as f32
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

/// Borrowed, read-only rectangular view into a [`DepthField`].
#[derive(Debug, Clone, Copy)]
pub struct DepthRegion<'a> {
    field: &'a DepthField,
    col: u32,
    row: u32,
    width: u32,
    height: u32,
}

impl<'a> DepthRegion<'a> {
    /// The clipped rectangle this view covers.
    pub fn rect(&self) -> CellRect {
        CellRect::new(self.col, self.row, self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Depth at a position relative to the region's top-left cell.
    pub fn get(&self, col: u32, row: u32) -> Option<f32> {
        if col < self.width && row < self.height {
            self.field.get(self.col + col, self.row + row)
        } else {
            None
        }
    }

    /// Iterates over the region's rows as slices of the underlying grid.
    pub fn rows(&self) -> impl Iterator<Item = &'a [f32]> + 'a {
        let field = self.field;
        let (col, row, width) = (self.col as usize, self.row as usize, self.width as usize);
        let stride = field.width as usize;
        (row..row + self.height as usize).map(move |r| {
            let start = r * stride + col;
            &field.depths[start..start + width]
        })
    }

    /// Copies the region into a new row-major buffer.
    pub fn to_vec(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }
}
