//! JSON sidecar describing how a depth field was produced.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bathymetry::{DepthField, DepthMapConfig};

/// Errors that can occur while reading or writing the sidecar.
#[derive(Error, Debug)]
pub enum ParamsExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Depth field was not generated - no parameters to export")]
    NoParameters,
}

/// Generation parameters plus a few statistics for sanity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthFieldManifest {
    pub config: DepthMapConfig,
    pub observed_min: f32,
    pub observed_max: f32,
    pub mean_depth: f32,
}

impl DepthFieldManifest {
    /// Builds a manifest, or `None` for a host-supplied field.
    pub fn from_field(field: &DepthField) -> Option<Self> {
        let config = field.config()?.clone();
        let (observed_min, observed_max) = field.depth_range();
        Some(Self {
            config,
            observed_min,
            observed_max,
            mean_depth: field.mean_depth(),
        })
    }
}

/// Writes the manifest of a generated field as pretty-printed JSON.
pub fn export_params_json(field: &DepthField, path: &Path) -> Result<(), ParamsExportError> {
    let manifest = DepthFieldManifest::from_field(field).ok_or(ParamsExportError::NoParameters)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &manifest)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a manifest back.
pub fn load_params_json(path: &Path) -> Result<DepthFieldManifest, ParamsExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
