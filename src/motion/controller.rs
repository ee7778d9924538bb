//! Per-vessel motion state machine.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::MotionConfig;
use super::kinematics::{
    STATIONARY_EPSILON, clamp_input, clamp_speed, heading_of, move_towards, move_towards_angle,
    snap_to_eight_directions,
};
use crate::bathymetry::DepthField;
use crate::error::{ConfigError, ensure_finite};
use crate::vessel::{NavigationStatus, VesselProfile, assess_navigation};

/// Whether the hull is touching the seabed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroundingState {
    /// Enough water under the keel.
    #[default]
    Free,
    /// Water is shallower than the vessel's required clearance.
    Grounded,
}

/// A change of [`GroundingState`], reported by the tick that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundingEvent {
    /// `Free -> Grounded`.
    Grounded,
    /// `Grounded -> Free`.
    Ungrounded,
}

/// Snapshot of a vessel for rendering and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    /// Degrees; 0 is +X, 90 is +Y.
    pub heading: f32,
    pub grounding: GroundingState,
}

/// Callback invoked synchronously, inside `advance`, on every grounding
/// transition. Must return quickly.
pub type GroundingObserver = Box<dyn FnMut(GroundingEvent, &VesselState) + Send>;

/// Integrates player input into velocity and position for one vessel and
/// tracks whether it has run aground.
///
/// The depth field and vessel profile are shared, read-only handles; the
/// controller is the only writer of its own state.
pub struct MotionController {
    config: MotionConfig,
    depth_field: Arc<DepthField>,
    profile: Arc<VesselProfile>,
    position: Vec2,
    velocity: Vec2,
    speed: f32,
    heading: f32,
    grounding: GroundingState,
    observers: Vec<GroundingObserver>,
}

impl std::fmt::Debug for MotionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionController")
            .field("vessel", &self.profile.name())
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("heading", &self.heading)
            .field("grounding", &self.grounding)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl MotionController {
    /// Creates a controller at rest at `position`, in the `Free` state.
    ///
    /// # Errors
    /// `ConfigError` if the motion configuration is invalid or the starting
    /// position is not finite.
    pub fn new(
        config: MotionConfig,
        depth_field: Arc<DepthField>,
        profile: Arc<VesselProfile>,
        position: Vec2,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        ensure_finite("position.x", position.x)?;
        ensure_finite("position.y", position.y)?;
        Ok(Self {
            config,
            depth_field,
            profile,
            position,
            velocity: Vec2::ZERO,
            speed: 0.0,
            heading: 0.0,
            grounding: GroundingState::Free,
            observers: Vec::new(),
        })
    }

    /// Registers a callback for grounding transitions.
    pub fn on_grounding_change<F>(&mut self, observer: F)
    where
        F: FnMut(GroundingEvent, &VesselState) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Runs one simulation step.
    ///
    /// `input` is the raw directional input, nominally in [-1, 1] per axis.
    /// A non-positive or non-finite `delta_time` is a no-op.
    ///
    /// Returns the grounding transition this step caused, if any. The same
    /// event has already been delivered to every registered observer.
    pub fn advance(&mut self, input: Vec2, delta_time: f32) -> Option<GroundingEvent> {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            return None;
        }

        let mut input = clamp_input(input);
        if self.config.eight_directional_movement {
            input = snap_to_eight_directions(input);
        }
        let input_magnitude = input.length();

        let mut target_velocity = input * self.config.move_speed;
        if self.grounding == GroundingState::Grounded {
            target_velocity *= self.config.beached_speed_multiplier;
        }

        if input_magnitude > self.config.deadzone {
            self.velocity = move_towards(
                self.velocity,
                target_velocity,
                self.config.acceleration * delta_time,
            );
            let target_heading = heading_of(input);
            self.heading = move_towards_angle(
                self.heading,
                target_heading,
                self.config.rotation_speed * delta_time,
            );
        } else {
            self.velocity = move_towards(
                self.velocity,
                Vec2::ZERO,
                self.config.deceleration * delta_time,
            );
        }

        self.velocity = clamp_speed(self.velocity, self.config.max_speed);
        self.speed = self.velocity.length();
        self.position += self.velocity * delta_time;

        log::trace!(
            "{}: pos={:?} vel={:?} speed={:.3}",
            self.profile.name(),
            self.position,
            self.velocity,
            self.speed
        );

        self.update_grounding()
    }

    /// Forces the grounding state, e.g. for a scripted event.
    ///
    /// Holds until the next `advance` re-checks the depth. No event is
    /// emitted.
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounding = if grounded {
            GroundingState::Grounded
        } else {
            GroundingState::Free
        };
        log::debug!("{}: grounding forced to {:?}", self.profile.name(), self.grounding);
    }

    /// Moves the vessel without integrating physics. Velocity is kept.
    /// Non-finite positions are ignored.
    pub fn teleport(&mut self, position: Vec2) {
        if position.is_finite() {
            self.position = position;
        }
    }

    /// Points the controller at a new depth field (after regeneration).
    /// Takes effect from the next grounding check.
    pub fn set_depth_field(&mut self, depth_field: Arc<DepthField>) {
        self.depth_field = depth_field;
    }

    /// Current speed (magnitude of velocity).
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading in degrees; 0 is +X, 90 is +Y.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Unit vector along the velocity, or zero when stationary.
    pub fn movement_direction(&self) -> Vec2 {
        if self.speed <= STATIONARY_EPSILON {
            Vec2::ZERO
        } else {
            self.velocity.normalize_or_zero()
        }
    }

    /// True if the vessel moves faster than the input deadzone.
    pub fn is_moving(&self) -> bool {
        self.speed > self.config.deadzone
    }

    pub fn is_grounded(&self) -> bool {
        self.grounding == GroundingState::Grounded
    }

    pub fn grounding_state(&self) -> GroundingState {
        self.grounding
    }

    /// Water depth at the vessel's position.
    pub fn depth_below(&self) -> f32 {
        self.depth_field.depth_at(self.position)
    }

    /// Navigation warning level at the current position.
    pub fn navigation_status(&self) -> NavigationStatus {
        assess_navigation(self.depth_below(), &self.profile)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn profile(&self) -> &Arc<VesselProfile> {
        &self.profile
    }

    pub fn depth_field(&self) -> &Arc<DepthField> {
        &self.depth_field
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> VesselState {
        VesselState {
            position: self.position,
            velocity: self.velocity,
            speed: self.speed,
            heading: self.heading,
            grounding: self.grounding,
        }
    }

    fn update_grounding(&mut self) -> Option<GroundingEvent> {
        let depth = self.depth_below();
        let grounded = depth < self.profile.required_clearance();

        let event = match (self.grounding, grounded) {
            (GroundingState::Free, true) => {
                self.grounding = GroundingState::Grounded;
                log::info!(
                    "Vessel '{}' has run aground (depth {:.2} < clearance {:.2})",
                    self.profile.name(),
                    depth,
                    self.profile.required_clearance()
                );
                Some(GroundingEvent::Grounded)
            }
            (GroundingState::Grounded, false) => {
                self.grounding = GroundingState::Free;
                log::info!("Vessel '{}' is back in deep water", self.profile.name());
                Some(GroundingEvent::Ungrounded)
            }
            _ => None,
        };

        if let Some(event) = event {
            let state = self.state();
            for observer in &mut self.observers {
                observer(event, &state);
            }
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Uniform-depth field 10x10 cells of 1 unit.
    fn flat_field(depth: f32) -> Arc<DepthField> {
        Arc::new(DepthField::from_depths(10, 10, vec![depth; 100], Vec2::ZERO, 1.0, 0.0, 100.0).unwrap())
    }

    /// Left half (cols 0-4) at `shallow`, right half at `deep`.
    fn split_field(shallow: f32, deep: f32) -> Arc<DepthField> {
        let depths = (0..10)
            .flat_map(|_| (0..10).map(move |col| if col < 5 { shallow } else { deep }))
            .collect();
        Arc::new(DepthField::from_depths(10, 10, depths, Vec2::ZERO, 1.0, 0.0, 100.0).unwrap())
    }

    fn profile(clearance: f32) -> Arc<VesselProfile> {
        Arc::new(VesselProfile::new("Test", clearance, 0.0).unwrap())
    }

    fn controller(field: Arc<DepthField>, clearance: f32) -> MotionController {
        MotionController::new(MotionConfig::default(), field, profile(clearance), Vec2::new(5.5, 5.5)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let c = controller(flat_field(50.0), 3.5);
        assert_eq!(c.grounding_state(), GroundingState::Free);
        assert_eq!(c.speed(), 0.0);
        assert_eq!(c.movement_direction(), Vec2::ZERO);
        assert!(!c.is_moving());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MotionConfig { move_speed: -1.0, ..Default::default() };
        assert!(MotionController::new(config, flat_field(50.0), profile(1.0), Vec2::ZERO).is_err());
        assert!(MotionController::new(
            MotionConfig::default(),
            flat_field(50.0),
            profile(1.0),
            Vec2::new(f32::NAN, 0.0)
        )
        .is_err());
    }

    #[test]
    fn test_single_tick_acceleration() {
        let config = MotionConfig {
            move_speed: 5.0,
            acceleration: 10.0,
            max_speed: 8.0,
            deadzone: 0.1,
            ..Default::default()
        };
        let mut c = MotionController::new(config, flat_field(50.0), profile(1.0), Vec2::ZERO).unwrap();

        c.advance(Vec2::new(1.0, 0.0), 0.1);

        let vx = c.velocity().x;
        assert!(vx > 0.0);
        assert!(vx <= 1.0 + 1e-6, "step exceeded acceleration * dt: {}", vx);
        assert!(vx <= 5.0);
        assert_eq!(c.velocity().y, 0.0);
    }

    #[test]
    fn test_reaches_target_without_overshoot() {
        let mut c = controller(flat_field(50.0), 1.0);
        for _ in 0..100 {
            c.advance(Vec2::new(1.0, 0.0), 0.05);
            assert!(c.velocity().x <= 5.0 + 1e-6);
        }
        assert_eq!(c.velocity(), Vec2::new(5.0, 0.0));
        assert!(c.is_moving());
        assert_eq!(c.movement_direction(), Vec2::X);
    }

    #[test]
    fn test_diagonal_not_faster() {
        let mut straight = controller(flat_field(50.0), 1.0);
        let mut diagonal = controller(flat_field(50.0), 1.0);
        for _ in 0..100 {
            straight.advance(Vec2::new(0.0, 1.0), 0.05);
            diagonal.advance(Vec2::new(1.0, 1.0), 0.05);
        }
        assert!((straight.speed() - diagonal.speed()).abs() < 1e-4);
    }

    #[test]
    fn test_max_speed_clamp() {
        let config = MotionConfig { move_speed: 20.0, max_speed: 8.0, ..Default::default() };
        let mut c = MotionController::new(config, flat_field(50.0), profile(1.0), Vec2::ZERO).unwrap();
        for _ in 0..200 {
            c.advance(Vec2::new(-1.0, 0.0), 0.05);
            assert!(c.speed() <= 8.0 + 1e-4);
        }
        assert!((c.speed() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_deceleration_reaches_exact_zero() {
        let mut c = controller(flat_field(50.0), 1.0);
        for _ in 0..50 {
            c.advance(Vec2::new(0.0, 1.0), 0.05);
        }
        let initial_speed = c.speed();
        assert!(initial_speed > 0.0);

        // deceleration 15 * dt 0.05 = 0.75 per tick.
        let ticks = (initial_speed / 0.75).ceil() as usize;
        for _ in 0..ticks {
            c.advance(Vec2::ZERO, 0.05);
        }
        assert_eq!(c.velocity(), Vec2::ZERO);
        assert_eq!(c.speed(), 0.0);
        assert!(!c.is_moving());
    }

    #[test]
    fn test_input_inside_deadzone_decelerates() {
        let mut c = controller(flat_field(50.0), 1.0);
        c.advance(Vec2::new(1.0, 0.0), 0.1);
        let before = c.speed();
        c.advance(Vec2::new(0.05, 0.0), 0.1);
        assert!(c.speed() < before);
    }

    #[test]
    fn test_zero_delta_time_is_noop() {
        let mut c = controller(flat_field(1.0), 3.5);
        let before = c.state();
        assert_eq!(c.advance(Vec2::new(1.0, 0.0), 0.0), None);
        assert_eq!(c.advance(Vec2::new(1.0, 0.0), -0.1), None);
        assert_eq!(c.advance(Vec2::new(1.0, 0.0), f32::NAN), None);
        assert_eq!(c.state(), before);
    }

    #[test]
    fn test_grounding_matches_constant_depth() {
        for (depth, clearance) in [(2.0, 3.5), (3.5, 3.5), (10.0, 3.5), (0.0, 0.5), (3.4, 3.5)] {
            for pos in [Vec2::ZERO, Vec2::new(9.9, 0.1), Vec2::new(-40.0, 70.0)] {
                let mut c = MotionController::new(
                    MotionConfig::default(),
                    flat_field(depth),
                    profile(clearance),
                    pos,
                )
                .unwrap();
                c.advance(Vec2::ZERO, 0.1);
                assert_eq!(c.is_grounded(), depth < clearance, "depth {} clearance {}", depth, clearance);
            }
        }
    }

    #[test]
    fn test_grounding_applies_beached_penalty() {
        let profile = Arc::new(VesselProfile::new("Sailboat", 1.5, 2.0).unwrap());
        assert_eq!(profile.required_clearance(), 3.5);
        let mut c = MotionController::new(MotionConfig::default(), flat_field(2.0), profile, Vec2::new(5.0, 5.0)).unwrap();

        let event = c.advance(Vec2::ZERO, 0.1);
        assert_eq!(event, Some(GroundingEvent::Grounded));
        assert!(c.is_grounded());

        // Target is 5.0 * 0.2 = 1.0; with ample acceleration the vessel
        // lands on the reduced target.
        for _ in 0..20 {
            assert_eq!(c.advance(Vec2::new(1.0, 0.0), 0.1), None);
        }
        assert!((c.velocity().x - 1.0).abs() < 1e-5);
        assert_eq!(c.navigation_status(), NavigationStatus::Beached);
    }

    #[test]
    fn test_transition_events_and_observer() {
        // Start in shallow water, drive right into deep water.
        let field = split_field(1.0, 50.0);
        let mut c = MotionController::new(MotionConfig::default(), field, profile(3.0), Vec2::new(4.0, 5.0)).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        c.on_grounding_change(move |event, state| {
            sink.lock().unwrap().push((event, state.grounding));
        });

        assert_eq!(c.advance(Vec2::ZERO, 0.1), Some(GroundingEvent::Grounded));
        assert_eq!(c.advance(Vec2::ZERO, 0.1), None);

        let mut events = Vec::new();
        for _ in 0..200 {
            if let Some(e) = c.advance(Vec2::new(1.0, 0.0), 0.05) {
                events.push(e);
            }
            if c.position().x > 6.0 {
                break;
            }
        }
        assert_eq!(events, vec![GroundingEvent::Ungrounded]);
        assert!(!c.is_grounded());

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (GroundingEvent::Grounded, GroundingState::Grounded),
                (GroundingEvent::Ungrounded, GroundingState::Free),
            ]
        );
    }

    #[test]
    fn test_set_grounded_override() {
        let mut c = controller(flat_field(50.0), 1.0);
        c.set_grounded(true);
        assert!(c.is_grounded());

        // The override shapes this tick's target, then the depth check
        // frees the vessel.
        let event = c.advance(Vec2::new(1.0, 0.0), 1.0);
        assert!((c.velocity().x - 1.0).abs() < 1e-5);
        assert_eq!(event, Some(GroundingEvent::Ungrounded));
        assert!(!c.is_grounded());
    }

    #[test]
    fn test_position_integration() {
        let mut c = controller(flat_field(50.0), 1.0);
        c.teleport(Vec2::ZERO);
        c.advance(Vec2::new(1.0, 0.0), 0.1);
        // velocity 1.0 after one tick, so 0.1 units travelled.
        assert!((c.position().x - 0.1).abs() < 1e-6);
        c.teleport(Vec2::new(f32::INFINITY, 0.0));
        assert!(c.position().is_finite());
    }

    #[test]
    fn test_heading_turns_at_rotation_speed() {
        let config = MotionConfig { rotation_speed: 90.0, ..Default::default() };
        let mut c = MotionController::new(config, flat_field(50.0), profile(1.0), Vec2::ZERO).unwrap();
        c.advance(Vec2::new(0.0, 1.0), 0.5);
        assert!((c.heading() - 45.0).abs() < 1e-4);
        c.advance(Vec2::new(0.0, 1.0), 0.5);
        assert!((c.heading() - 90.0).abs() < 1e-4);
        // No input: heading holds.
        c.advance(Vec2::ZERO, 0.5);
        assert!((c.heading() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_eight_directional_snapping() {
        let compass = MotionConfig { eight_directional_movement: true, ..Default::default() };
        let mut snapped = MotionController::new(compass, flat_field(50.0), profile(1.0), Vec2::ZERO).unwrap();
        let mut analog = controller(flat_field(50.0), 1.0);

        snapped.advance(Vec2::new(1.0, 0.2), 0.1);
        analog.advance(Vec2::new(1.0, 0.2), 0.1);
        assert_eq!(snapped.velocity().y, 0.0);

        // Default config steers along the clamped analog input.
        let expected = Vec2::new(1.0, 0.2).normalize();
        assert!((analog.movement_direction() - expected).length() < 1e-5);
        assert!((analog.speed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_depth_field_swap() {
        let mut c = controller(flat_field(50.0), 3.0);
        c.advance(Vec2::ZERO, 0.1);
        assert!(!c.is_grounded());

        let old = Arc::clone(c.depth_field());
        c.set_depth_field(flat_field(1.0));
        assert_eq!(c.advance(Vec2::ZERO, 0.1), Some(GroundingEvent::Grounded));
        assert_eq!(old.depth_at(c.position()), 50.0);
    }
}
