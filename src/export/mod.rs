//! Export module for handing depth fields to renderers and tools.
//!
//! Supports 16-bit PNG depth maps, a white-to-blue preview image, RAW
//! grids for game engine imports, and a JSON parameter sidecar. Exporters
//! only read the field; a failed export never affects simulation state.

mod params;
mod png;
mod raw;

pub use params::{DepthFieldManifest, ParamsExportError, export_params_json, load_params_json};
pub use png::{
    PngExportError, PngExportOptions, depth_preview_rgb, export_depth_png,
    export_depth_preview_png,
};
pub use raw::{RawExportError, RawFormat, export_depth_raw};
