//! Vector helpers for the motion model.

use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

/// Speeds below this are treated as stationary.
pub const STATIONARY_EPSILON: f32 = 1e-5;

/// Relative slack on the speed cap so a clamped vector is never re-clamped.
const CLAMP_TOLERANCE: f32 = 1e-5;

/// Caps the magnitude of `velocity` at `max_speed`, keeping its direction.
///
/// Idempotent: clamping an already-clamped vector returns it unchanged.
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let length_sq = velocity.length_squared();
    if length_sq > max_speed * max_speed * (1.0 + CLAMP_TOLERANCE) {
        velocity * (max_speed / length_sq.sqrt())
    } else {
        velocity
    }
}

/// Moves `current` toward `target` by at most `max_delta`.
///
/// Lands exactly on `target` when it is within reach; never overshoots.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Sanitizes raw input: non-finite components become 0 and anything longer
/// than 1 is scaled back to unit length.
pub fn clamp_input(input: Vec2) -> Vec2 {
    let input = Vec2::new(
        if input.x.is_finite() { input.x } else { 0.0 },
        if input.y.is_finite() { input.y } else { 0.0 },
    );
    if input.length_squared() > 1.0 {
        input.normalize_or_zero()
    } else {
        input
    }
}

/// Rotates `input` onto the nearest multiple of 45 degrees, keeping its
/// length.
pub fn snap_to_eight_directions(input: Vec2) -> Vec2 {
    let length = input.length();
    if length <= STATIONARY_EPSILON {
        return Vec2::ZERO;
    }
    let angle = input.y.atan2(input.x);
    let snapped = (angle / FRAC_PI_4).round() * FRAC_PI_4;
    let (sin, cos) = snapped.sin_cos();
    // Exact axes and diagonals, so (1, 0) stays (1, 0).
    let dir = Vec2::new(round_unit(cos), round_unit(sin)).normalize_or_zero();
    dir * length
}

fn round_unit(v: f32) -> f32 {
    if v.abs() < 1e-6 {
        0.0
    } else {
        v.signum()
    }
}

/// Wraps an angle in degrees into (-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Turns `current` toward `target` (degrees) along the shorter arc by at
/// most `max_step` degrees.
pub fn move_towards_angle(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = wrap_degrees(target - current);
    if diff.abs() <= max_step {
        wrap_degrees(target)
    } else {
        wrap_degrees(current + max_step * diff.signum())
    }
}

/// Heading in degrees of a direction vector; 0 is +X, 90 is +Y.
pub fn heading_of(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees()
}
