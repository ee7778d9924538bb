//! Motion tuning parameters.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_finite, ensure_non_negative, ensure_positive};

/// Configuration parameters for a boat's motion model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Speed at full input, in world units per second.
    pub move_speed: f32,
    /// Maximum heading change, in degrees per second.
    pub rotation_speed: f32,
    /// Velocity change per second while input is held.
    pub acceleration: f32,
    /// Velocity change per second while coasting to a stop.
    pub deceleration: f32,
    /// Hard cap on speed.
    pub max_speed: f32,
    /// Target-speed factor while grounded, in (0, 1].
    pub beached_speed_multiplier: f32,
    /// Snap the input direction to the nearest multiple of 45 degrees.
    ///
    /// Applied after the unit clamp; the input magnitude is kept. Off by
    /// default, which steers along the analog input direction.
    pub eight_directional_movement: bool,
    /// Input magnitude at or below which the boat coasts, in [0, 1).
    pub deadzone: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 180.0,
            acceleration: 10.0,
            deceleration: 15.0,
            max_speed: 8.0,
            beached_speed_multiplier: 0.2,
            eight_directional_movement: false,
            deadzone: 0.1,
        }
    }
}

impl MotionConfig {
    /// Light, quick-turning small craft.
    pub fn nimble() -> Self {
        Self {
            move_speed: 7.0,
            rotation_speed: 360.0,
            acceleration: 20.0,
            deceleration: 25.0,
            max_speed: 10.0,
            ..Default::default()
        }
    }

    /// Heavy vessel that takes a long time to get going and to stop.
    pub fn heavy() -> Self {
        Self {
            move_speed: 3.0,
            rotation_speed: 45.0,
            acceleration: 1.5,
            deceleration: 1.0,
            max_speed: 4.0,
            beached_speed_multiplier: 0.05,
            ..Default::default()
        }
    }

    /// Validates every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("move_speed", self.move_speed)?;
        ensure_non_negative("rotation_speed", self.rotation_speed)?;
        ensure_non_negative("acceleration", self.acceleration)?;
        ensure_non_negative("deceleration", self.deceleration)?;
        ensure_non_negative("max_speed", self.max_speed)?;
        ensure_positive("beached_speed_multiplier", self.beached_speed_multiplier)?;
        if self.beached_speed_multiplier > 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "beached_speed_multiplier",
                value: self.beached_speed_multiplier,
                range: "(0, 1]",
            });
        }
        ensure_finite("deadzone", self.deadzone)?;
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(ConfigError::OutOfRange {
                name: "deadzone",
                value: self.deadzone,
                range: "[0, 1)",
            });
        }
        Ok(())
    }
}
