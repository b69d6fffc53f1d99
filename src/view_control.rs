//! Turning the aircraft's pose into a camera for the renderer.

use std::fmt;

use crate::config::ViewConfig;
use crate::flight::{AircraftState, OpMode};
use crate::math::{degrees_to_units, flip_past_vertical, ivec3::IVec3, wrap_degrees};
use crate::render::view::Viewport;
use crate::transform::ViewPose;

/// Which way the pilot is looking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewDirection {
    #[default]
    Forward,
    Right,
    Rear,
    Left,
}

impl ViewDirection {
    pub const ALL: [ViewDirection; 4] = [
        ViewDirection::Forward,
        ViewDirection::Right,
        ViewDirection::Rear,
        ViewDirection::Left,
    ];

    /// Heading of the view relative to the nose, in degrees.
    pub fn yaw_offset(self) -> f64 {
        match self {
            ViewDirection::Forward => 0.0,
            ViewDirection::Right => -90.0,
            ViewDirection::Rear => 180.0,
            ViewDirection::Left => 90.0,
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ViewDirection::Forward => "forward",
            ViewDirection::Right => "right",
            ViewDirection::Rear => "rear",
            ViewDirection::Left => "left",
        };
        f.write_str(name)
    }
}

/// Camera attitude in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewAttitude {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Attitude of a camera looking out in `direction` from an aircraft with the
/// given attitude.
///
/// Looking sideways trades pitch for bank; looking back reverses both.
pub fn view_shift(pitch: f64, yaw: f64, roll: f64, direction: ViewDirection) -> ViewAttitude {
    let yaw = yaw + direction.yaw_offset();
    let (pitch, roll) = match direction {
        ViewDirection::Forward => (pitch, roll),
        ViewDirection::Right => (-roll.trunc(), pitch),
        ViewDirection::Rear => (-pitch, -roll),
        ViewDirection::Left => (roll.trunc(), -pitch),
    };

    let (pitch, yaw, roll) = flip_past_vertical(pitch, wrap_degrees(yaw), wrap_degrees(roll));
    ViewAttitude { pitch, yaw, roll }
}

/// Convert a camera attitude to binary-degree view angles: x is pitch, y is
/// yaw and z is roll.
pub fn map_angles(attitude: &ViewAttitude) -> IVec3 {
    IVec3::new(
        degrees_to_units(attitude.pitch),
        degrees_to_units(attitude.yaw),
        degrees_to_units(attitude.roll),
    )
}

/// Camera pose for the aircraft's current view selection.
pub fn view_pose(state: &AircraftState) -> ViewPose {
    let attitude = view_shift(state.pitch, state.yaw, state.roll, state.view);
    ViewPose {
        position: state.position(),
        angles: map_angles(&attitude),
    }
}

/// Screen viewport for the aircraft's current view selection.
pub fn viewport(config: &ViewConfig, state: &AircraftState) -> Viewport {
    if state.op_mode == OpMode::Walk {
        config.walk_viewport()
    } else {
        config.viewport(state.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_view_passes_attitude_through() {
        let v = view_shift(12.5, -30.0, 5.0, ViewDirection::Forward);
        assert_eq!(
            v,
            ViewAttitude {
                pitch: 12.5,
                yaw: -30.0,
                roll: 5.0
            }
        );
    }

    #[test]
    fn test_side_and_rear_views() {
        let right = view_shift(10.0, 0.0, 20.7, ViewDirection::Right);
        assert_relative_eq!(right.pitch, -20.0);
        assert_relative_eq!(right.roll, 10.0);
        assert_relative_eq!(right.yaw, -90.0);

        let left = view_shift(10.0, 0.0, 20.7, ViewDirection::Left);
        assert_relative_eq!(left.pitch, 20.0);
        assert_relative_eq!(left.roll, -10.0);
        assert_relative_eq!(left.yaw, 90.0);

        let rear = view_shift(10.0, 45.0, -20.0, ViewDirection::Rear);
        assert_relative_eq!(rear.pitch, -10.0);
        assert_relative_eq!(rear.roll, 20.0);
        assert_relative_eq!(rear.yaw, -135.0);
    }

    #[test]
    fn test_view_past_vertical_is_reflected() {
        let v = view_shift(100.0, 10.0, 0.0, ViewDirection::Forward);
        assert_relative_eq!(v.pitch, 80.0);
        assert_relative_eq!(v.yaw, -170.0);
        assert_relative_eq!(v.roll, -180.0);
    }

    #[test]
    fn test_map_angles() {
        let angles = map_angles(&ViewAttitude {
            pitch: -45.0,
            yaw: 90.0,
            roll: 180.0,
        });
        assert_eq!(angles, IVec3::new(224, 64, 128));

        let tiny = map_angles(&ViewAttitude {
            pitch: 1.0,
            yaw: -1.0,
            roll: 0.0,
        });
        assert_eq!(tiny, IVec3::new(0, 255, 0));
    }

    #[test]
    fn test_pose_uses_aircraft_position() {
        let mut state = AircraftState::default();
        state.yaw = 90.0;
        state.view = ViewDirection::Rear;
        let pose = view_pose(&state);
        assert_eq!(pose.position, state.position());
        assert_eq!(pose.angles, IVec3::new(0, 192, 0));
    }

    #[test]
    fn test_walk_mode_uses_full_screen() {
        let config = ViewConfig::default();
        let mut state = AircraftState::new(OpMode::Walk);
        assert_eq!(viewport(&config, &state).window.ymax, 199);
        state.op_mode = OpMode::Flight;
        assert_eq!(viewport(&config, &state).window.ymax, 147);
    }
}
