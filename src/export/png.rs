//! PNG export functionality for depth fields.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgb};
use thiserror::Error;

use crate::bathymetry::DepthField;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid depth range: min ({0}) >= max ({1})")]
    InvalidDepthRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Depth mapped to black (or white in the preview).
    pub min_depth: f32,
    /// Depth mapped to full intensity (or deep blue in the preview).
    pub max_depth: f32,
    /// Put grid row 0 at the bottom of the image, so world +Y points up.
    pub flip_vertical: bool,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_depth: 0.0,
            max_depth: 100.0,
            flip_vertical: true,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Uses the field's declared depth range.
    pub fn declared_range(field: &DepthField) -> Self {
        Self {
            min_depth: field.min_depth(),
            max_depth: field.max_depth(),
            ..Default::default()
        }
    }

    /// Stretches the observed depth range across the full intensity scale.
    pub fn auto_range(field: &DepthField) -> Self {
        let (min, max) = field.depth_range();
        let max = if max > min { max } else { min + 1e-6 };
        Self {
            min_depth: min,
            max_depth: max,
            ..Default::default()
        }
    }

    fn normalize(&self, depth: f32) -> f32 {
        ((depth - self.min_depth) / (self.max_depth - self.min_depth)).clamp(0.0, 1.0)
    }

    fn source_row(&self, y: u32, height: u32) -> u32 {
        if self.flip_vertical {
            height - 1 - y
        } else {
            y
        }
    }
}

/// Exports a depth field as a 16-bit grayscale PNG (deeper = brighter).
///
/// # Arguments
/// * `field` - The depth field to export
/// * `path` - Output file path
/// * `options` - Depth range for normalization and encoder settings
pub fn export_depth_png(
    field: &DepthField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if options.min_depth >= options.max_depth {
        return Err(PngExportError::InvalidDepthRange(options.min_depth, options.max_depth));
    }

    let (width, height) = (field.width(), field.height());
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(width, height, |x, y| {
        let row = options.source_row(y, height);
        let depth = field.get(x, row).unwrap_or(options.min_depth);
        Luma([(options.normalize(depth) * 65535.0) as u16])
    });

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert u16 slice to bytes for the encoder
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    Ok(())
}

/// Preview color for a normalized depth: white at the surface fading to
/// pure blue at the deepest point.
pub fn depth_preview_rgb(normalized: f32) -> [u8; 3] {
    let t = normalized.clamp(0.0, 1.0);
    let fade = ((1.0 - t) * 255.0).round() as u8;
    [fade, fade, 255]
}

/// Exports a depth field as an 8-bit RGB preview image.
pub fn export_depth_preview_png(
    field: &DepthField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if options.min_depth >= options.max_depth {
        return Err(PngExportError::InvalidDepthRange(options.min_depth, options.max_depth));
    }

    let (width, height) = (field.width(), field.height());
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let row = options.source_row(y, height);
        let depth = field.get(x, row).unwrap_or(options.min_depth);
        Rgb(depth_preview_rgb(options.normalize(depth)))
    });

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)?;

    Ok(())
}
