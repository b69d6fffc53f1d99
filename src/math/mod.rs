//! Vector and matrix types plus the angle conventions shared by the
//! renderer and the flight model.
//!
//! Two angle systems are in play:
//! - **Binary degrees** (`ANGLE_UNITS` per full turn) for object and view
//!   orientation, matching the world file format.
//! - **Degrees** in the range (-180, 180] for aircraft attitude.

pub mod ivec3;
pub mod mat4;
pub mod vec3;

use std::f32::consts::TAU;

/// Number of binary-degree units in a full turn.
pub const ANGLE_UNITS: i32 = 256;

/// Converts binary degrees to radians. Any integer is accepted and wrapped.
#[inline]
pub fn units_to_radians(units: i32) -> f32 {
    units.rem_euclid(ANGLE_UNITS) as f32 * (TAU / ANGLE_UNITS as f32)
}

/// Converts degrees in the (-180, 180] system to binary degrees.
///
/// Negative angles are shifted into [0, 360) before scaling, and the result
/// is floored.
pub fn degrees_to_units(degrees: f64) -> i32 {
    let positive = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    (positive * (ANGLE_UNITS as f64 / 360.0)).floor() as i32
}

/// Wraps an angle in degrees back into (-180, 180] after a single overshoot.
pub fn wrap_degrees(degrees: f64) -> f64 {
    if degrees > 180.0 {
        -180.0 + (degrees - 180.0)
    } else if degrees < -180.0 {
        180.0 + (degrees + 180.0)
    } else {
        degrees
    }
}

/// Reflects an attitude whose pitch has gone past straight up or down.
///
/// Pitch is mirrored back into [-90, 90] and roll and yaw turn half a turn
/// towards zero, which describes the same orientation. Attitudes already in
/// range are returned unchanged. Returns `(pitch, yaw, roll)`.
pub fn flip_past_vertical(pitch: f64, yaw: f64, roll: f64) -> (f64, f64, f64) {
    if (-90.0..=90.0).contains(&pitch) {
        return (pitch, yaw, roll);
    }
    let roll = if roll >= 0.0 { roll - 180.0 } else { roll + 180.0 };
    let yaw = if yaw >= 0.0 { yaw - 180.0 } else { yaw + 180.0 };
    let pitch = if pitch > 0.0 {
        180.0 - pitch
    } else {
        -180.0 - pitch
    };
    (pitch, yaw, roll)
}
