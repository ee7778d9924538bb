//! Seabed generation and depth queries.
//!
//! Provides the generator configuration, the fBm depth-field generator and
//! the immutable [`DepthField`] shared by every vessel.

mod config;
mod field;
mod generator;

pub use config::DepthMapConfig;
pub use field::{CellRect, DepthField, DepthRegion};
pub use generator::{generate_depth_field, generate_depth_field_with, normalized_to_depth};
