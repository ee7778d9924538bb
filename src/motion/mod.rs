//! Boat motion model.
//!
//! Acceleration-limited velocity integration with a speed cap and a
//! depth-driven grounding penalty.

mod config;
mod controller;
mod kinematics;

pub use config::MotionConfig;
pub use controller::{
    GroundingEvent, GroundingObserver, GroundingState, MotionController, VesselState,
};
pub use kinematics::{
    clamp_input, clamp_speed, heading_of, move_towards, move_towards_angle,
    snap_to_eight_directions, wrap_degrees, STATIONARY_EPSILON,
};
