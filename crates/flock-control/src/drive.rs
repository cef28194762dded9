//! Differential-drive wheel mapping.

use nalgebra::Vector2;

/// Floor applied to the velocity norm before the heading division.
pub const VELOCITY_NOISE_FLOOR: f64 = 0.01;

/// Left/right wheel angular velocities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelCommand {
    pub left: f64,
    pub right: f64,
}

/// Map a desired planar velocity and the current heading to wheel speeds.
///
/// `norm = max(‖v‖, 0.01)`, `Δ = atan2(vy/norm, vx/norm) − heading`, then
/// `left = −sinΔ·norm + cosΔ·norm` and `right = sinΔ·norm + cosΔ·norm`.
/// Both wheels share the speed magnitude, split by the heading error; this
/// approximate inversion is kept as is for parity with the reference
/// behavior. The floor makes the mapping total: zero velocity yields a
/// finite, bounded command instead of a division fault.
pub fn to_wheel_speeds(velocity: Vector2<f64>, heading: f64) -> WheelCommand {
    let norm = velocity.norm().max(VELOCITY_NOISE_FLOOR);
    let desired_heading = (velocity.y / norm).atan2(velocity.x / norm);
    let delta = desired_heading - heading;
    WheelCommand {
        left: -delta.sin() * norm + delta.cos() * norm,
        right: delta.sin() * norm + delta.cos() * norm,
    }
}
