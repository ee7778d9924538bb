//! Tick-loop ownership of the seabed and vessels.

mod scenario;
mod world;

pub use scenario::{InputSegment, ScenarioConfig, ScenarioReport, VesselChoice, run_scenario};
pub use world::{MAX_STEPS_PER_FRAME, Simulation, SimulationError, TickEvent, VesselId};
