//! Scripted, headless single-vessel runs.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{Simulation, SimulationError, TickEvent};
use crate::bathymetry::DepthMapConfig;
use crate::motion::{MotionConfig, VesselState};
use crate::vessel::{NavigationStatus, VesselCatalog, VesselProfile};

/// Constant input held for a span of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSegment {
    /// Directional input, nominally in [-1, 1] per axis.
    pub input: Vec2,
    /// Seconds to hold it.
    pub duration: f32,
}

/// Which vessel class a scenario uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VesselChoice {
    /// A class from the standard catalog, by name.
    Named(String),
    /// A custom profile.
    Custom(VesselProfile),
}

impl VesselChoice {
    fn resolve(&self) -> Result<VesselProfile, SimulationError> {
        match self {
            VesselChoice::Named(name) => VesselCatalog::standard()
                .by_name(name)
                .cloned()
                .ok_or_else(|| SimulationError::UnknownVessel(name.clone())),
            VesselChoice::Custom(profile) => Ok(profile.clone()),
        }
    }
}

/// Everything needed to reproduce a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub depth_map: DepthMapConfig,
    pub motion: MotionConfig,
    pub vessel: VesselChoice,
    /// World position the vessel starts at.
    pub start: Vec2,
    /// Fixed step in seconds.
    pub timestep: f32,
    pub segments: Vec<InputSegment>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            depth_map: DepthMapConfig::with_size(128, 128),
            motion: MotionConfig::default(),
            vessel: VesselChoice::Named("Sailboat".to_string()),
            start: Vec2::new(64.0, 64.0),
            timestep: 0.02,
            segments: vec![InputSegment {
                input: Vec2::new(1.0, 0.0),
                duration: 5.0,
            }],
        }
    }
}

/// Outcome of [`run_scenario`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub ticks: u64,
    pub events: Vec<TickEvent>,
    pub final_state: VesselState,
    pub final_depth: f32,
    pub navigation: NavigationStatus,
}

/// Generates the seabed, spawns the vessel and plays every input segment.
///
/// Each segment runs for `round(duration / timestep)` steps.
pub fn run_scenario(scenario: &ScenarioConfig) -> Result<ScenarioReport, SimulationError> {
    let profile = Arc::new(scenario.vessel.resolve()?);
    let mut sim = Simulation::generate(&scenario.depth_map, scenario.timestep)?;
    let id = sim.spawn_vessel(scenario.motion.clone(), profile, scenario.start)?;

    let mut events = Vec::new();
    for segment in &scenario.segments {
        let steps = if segment.duration.is_finite() && segment.duration > 0.0 {
            (segment.duration / scenario.timestep).round() as u64
        } else {
            0
        };
        for _ in 0..steps {
            events.extend(sim.step(|_| segment.input));
        }
    }

    let ticks = sim.tick();
    let vessel = sim
        .vessel(id)
        .ok_or_else(|| SimulationError::UnknownVessel(format!("#{}", id.0)))?;

    Ok(ScenarioReport {
        ticks,
        events,
        final_state: vessel.state(),
        final_depth: vessel.depth_below(),
        navigation: vessel.navigation_status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_runs() {
        let report = run_scenario(&ScenarioConfig::default()).unwrap();
        assert_eq!(report.ticks, 250);
        assert!(report.final_state.speed > 0.0);
        assert!(report.final_state.position.x > 64.0);
    }

    #[test]
    fn test_unknown_vessel() {
        let scenario = ScenarioConfig {
            vessel: VesselChoice::Named("Trireme".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            run_scenario(&scenario),
            Err(SimulationError::UnknownVessel(name)) if name == "Trireme"
        ));
    }

    #[test]
    fn test_deep_vessel_grounds_in_shallow_sea() {
        // Every cell is at most 10 deep; a cargo ship needs 15.
        let scenario = ScenarioConfig {
            depth_map: DepthMapConfig {
                min_depth: 0.0,
                max_depth: 10.0,
                ..DepthMapConfig::with_size(32, 32)
            },
            vessel: VesselChoice::Named("Cargo Ship".to_string()),
            start: Vec2::new(16.0, 16.0),
            segments: vec![InputSegment { input: Vec2::ZERO, duration: 0.1 }],
            ..Default::default()
        };
        let report = run_scenario(&scenario).unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].tick, 0);
        assert_eq!(report.navigation, NavigationStatus::Beached);
    }

    #[test]
    fn test_scenario_json() {
        let json = r#"{
            "vessel": {"name": "Raft", "draft": 0.1, "safety_margin": 0.0},
            "timestep": 0.1,
            "segments": [{"input": [0.0, 1.0], "duration": 1.0}]
        }"#;
        let scenario: ScenarioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.segments.len(), 1);
        assert!(matches!(scenario.vessel, VesselChoice::Custom(_)));

        let report = run_scenario(&scenario).unwrap();
        assert_eq!(report.ticks, 10);
        assert!(report.final_state.velocity.y > 0.0);
    }
}
