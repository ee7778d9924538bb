//! Fixed-timestep driver owning the shared seabed and every vessel.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bathymetry::{DepthField, DepthMapConfig, generate_depth_field};
use crate::error::ConfigError;
use crate::motion::{GroundingEvent, MotionConfig, MotionController, VesselState};
use crate::vessel::VesselProfile;

/// Upper bound on catch-up steps per frame, so a long stall does not
/// freeze the loop.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Errors that can occur while building or driving a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid timestep: {0} (must be finite and > 0)")]
    InvalidTimestep(f32),
    #[error("Unknown vessel class '{0}'")]
    UnknownVessel(String),
}

/// Handle to a vessel inside a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VesselId(pub usize);

/// A grounding transition, stamped with the tick that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    pub tick: u64,
    pub vessel: VesselId,
    pub event: GroundingEvent,
    pub state: VesselState,
}

/// Explicit simulation state: one seabed, many vessels, one clock.
///
/// The depth field is published behind an `Arc`; regeneration swaps the
/// handle and never mutates depths another reader may hold.
#[derive(Debug)]
pub struct Simulation {
    depth_field: Arc<DepthField>,
    vessels: Vec<MotionController>,
    fixed_dt: f32,
    accumulator: f32,
    tick: u64,
}

impl Simulation {
    /// Creates an empty simulation over an existing depth field.
    pub fn new(depth_field: Arc<DepthField>, fixed_dt: f32) -> Result<Self, SimulationError> {
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(SimulationError::InvalidTimestep(fixed_dt));
        }
        Ok(Self {
            depth_field,
            vessels: Vec::new(),
            fixed_dt,
            accumulator: 0.0,
            tick: 0,
        })
    }

    /// Generates a depth field and wraps it in a new simulation.
    pub fn generate(config: &DepthMapConfig, fixed_dt: f32) -> Result<Self, SimulationError> {
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(SimulationError::InvalidTimestep(fixed_dt));
        }
        let field = generate_depth_field(config)?;
        Self::new(Arc::new(field), fixed_dt)
    }

    /// Adds a vessel at rest at `position`.
    pub fn spawn_vessel(
        &mut self,
        config: MotionConfig,
        profile: Arc<VesselProfile>,
        position: Vec2,
    ) -> Result<VesselId, SimulationError> {
        let controller = MotionController::new(config, Arc::clone(&self.depth_field), profile, position)?;
        let id = VesselId(self.vessels.len());
        log::debug!(
            "Spawned vessel {} ('{}') at {:?}",
            id.0,
            controller.profile().name(),
            position
        );
        self.vessels.push(controller);
        Ok(id)
    }

    pub fn vessel(&self, id: VesselId) -> Option<&MotionController> {
        self.vessels.get(id.0)
    }

    pub fn vessel_mut(&mut self, id: VesselId) -> Option<&mut MotionController> {
        self.vessels.get_mut(id.0)
    }

    /// Returns the number of vessels.
    pub fn vessel_count(&self) -> usize {
        self.vessels.len()
    }

    pub fn vessels(&self) -> impl Iterator<Item = (VesselId, &MotionController)> {
        self.vessels.iter().enumerate().map(|(i, v)| (VesselId(i), v))
    }

    /// The currently published depth field.
    pub fn depth_field(&self) -> &Arc<DepthField> {
        &self.depth_field
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Number of completed fixed steps.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Runs exactly one fixed step for every vessel.
    ///
    /// `input` is asked once per vessel for this step's directional input.
    /// Grounding events are returned in vessel order.
    pub fn step<F>(&mut self, mut input: F) -> Vec<TickEvent>
    where
        F: FnMut(VesselId) -> Vec2,
    {
        let tick = self.tick;
        let dt = self.fixed_dt;
        let mut events = Vec::new();

        for (i, vessel) in self.vessels.iter_mut().enumerate() {
            let id = VesselId(i);
            if let Some(event) = vessel.advance(input(id), dt) {
                events.push(TickEvent {
                    tick,
                    vessel: id,
                    event,
                    state: vessel.state(),
                });
            }
        }

        self.tick += 1;
        events
    }

    /// Feeds a variable frame time into the fixed-step loop.
    ///
    /// Runs as many whole steps as the accumulated time allows, up to
    /// [`MAX_STEPS_PER_FRAME`]; leftover time carries into the next frame.
    pub fn advance_frame<F>(&mut self, frame_time: f32, mut input: F) -> Vec<TickEvent>
    where
        F: FnMut(VesselId) -> Vec2,
    {
        if !(frame_time.is_finite() && frame_time > 0.0) {
            return Vec::new();
        }

        self.accumulator += frame_time;
        let mut events = Vec::new();
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < MAX_STEPS_PER_FRAME {
            events.extend(self.step(&mut input));
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= self.fixed_dt {
            log::warn!(
                "Simulation fell behind by {:.3}s; dropping backlog",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        events
    }

    /// Generates a new depth field and publishes it to every vessel.
    ///
    /// Returns the previous field, which stays valid for anyone still
    /// holding it. On error nothing changes.
    pub fn regenerate(&mut self, config: &DepthMapConfig) -> Result<Arc<DepthField>, SimulationError> {
        let fresh = Arc::new(self.depth_field.regenerate(config)?);
        for vessel in &mut self.vessels {
            vessel.set_depth_field(Arc::clone(&fresh));
        }
        log::debug!(
            "Published regenerated {}x{} depth field to {} vessel(s)",
            fresh.width(),
            fresh.height(),
            self.vessels.len()
        );
        Ok(std::mem::replace(&mut self.depth_field, fresh))
    }

    /// Snapshots of every vessel, for a renderer.
    pub fn snapshots(&self) -> Vec<(VesselId, VesselState)> {
        self.vessels().map(|(id, v)| (id, v.state())).collect()
    }
}
