//! Procedural seabed generation and depth-constrained boat motion.
//!
//! This crate generates a bathymetric grid from fractal Perlin noise and
//! simulates boats moving over it, slowing them down whenever the water is
//! shallower than their draft plus safety margin.

pub mod error;
pub mod noise;
pub mod bathymetry;
pub mod vessel;
pub mod motion;
pub mod simulation;
pub mod export;

pub use error::ConfigError;
pub use crate::noise::{FractalNoiseConfig, NoiseSampler, PerlinSampler};
pub use bathymetry::{CellRect, DepthField, DepthMapConfig, DepthRegion, generate_depth_field};
pub use vessel::{NavigationStatus, VesselCatalog, VesselProfile};
pub use motion::{GroundingEvent, GroundingState, MotionConfig, MotionController, VesselState};
pub use simulation::{ScenarioConfig, Simulation, SimulationError, TickEvent, VesselId};
