//! RAW format export for game engine compatibility.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::bathymetry::DepthField;

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// RAW export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian (Unity default).
    #[default]
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian, raw depth values.
    R32Float,
}

impl RawFormat {
    /// Bytes written per cell.
    pub fn bytes_per_cell(self) -> usize {
        match self {
            RawFormat::R16LittleEndian | RawFormat::R16BigEndian => 2,
            RawFormat::R32Float => 4,
        }
    }
}

/// Exports a depth field as a headerless row-major RAW file.
///
/// R16 formats normalize against the field's declared depth range, so 0 is
/// `min_depth` and 65535 is `max_depth`.
pub fn export_depth_raw(field: &DepthField, path: &Path, format: RawFormat) -> Result<(), RawExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let min = field.min_depth();
    let range = field.max_depth() - min;
    let quantize = |depth: f32| (((depth - min) / range).clamp(0.0, 1.0) * 65535.0) as u16;

    match format {
        RawFormat::R16LittleEndian => {
            for &depth in field.depths() {
                writer.write_all(&quantize(depth).to_le_bytes())?;
            }
        }
        RawFormat::R16BigEndian => {
            for &depth in field.depths() {
                writer.write_all(&quantize(depth).to_be_bytes())?;
            }
        }
        RawFormat::R32Float => {
            for &depth in field.depths() {
                writer.write_all(&depth.to_le_bytes())?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use tempfile::tempdir;

    fn field() -> DepthField {
        DepthField::from_depths(2, 2, vec![0.0, 50.0, 100.0, 25.0], Vec2::ZERO, 1.0, 0.0, 100.0).unwrap()
    }

    #[test]
    fn test_export_r16_le() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("depth.raw");
        export_depth_raw(&field(), &path, RawFormat::R16LittleEndian).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 4 * RawFormat::R16LittleEndian.bytes_per_cell());
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), 0);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 65535);
    }

    #[test]
    fn test_export_r16_be() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("depth.raw");
        export_depth_raw(&field(), &path, RawFormat::R16BigEndian).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(u16::from_be_bytes([bytes[4], bytes[5]]), 65535);
    }

    #[test]
    fn test_export_r32() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("depth.r32");
        export_depth_raw(&field(), &path, RawFormat::R32Float).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 16);
        let third = f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        assert_eq!(third, 100.0);
    }
}
