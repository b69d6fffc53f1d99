//! The aircraft state vector and the per-frame control snapshot.

use std::fmt;

use super::{
    FUEL_CONSUMPTION, MAX_DEFLECTION, MAX_THROTTLE, START_X, START_Y, START_Z, TANK_SIZE,
};
use crate::math::ivec3::IVec3;
use crate::view_control::ViewDirection;

/// How the simulator runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpMode {
    /// Normal flight with ground contact handling.
    #[default]
    Flight,
    /// Fly the eye around the scenery without dynamics.
    Walk,
    /// Flight dynamics with a text dump instead of ground handling.
    Debug,
}

impl fmt::Display for OpMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OpMode::Flight => "flight",
            OpMode::Walk => "walk",
            OpMode::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Control positions and frame time sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Positive rolls left.
    pub aileron: i32,
    /// Positive pushes the nose down.
    pub elevator: i32,
    pub rudder: i32,
    pub throttle: i32,
    pub ignition: bool,
    pub brake: bool,
    pub view: ViewDirection,
    /// Milliseconds since the previous frame, `None` if no timer is running.
    pub elapsed_ms: Option<u32>,
}

impl ControlInput {
    /// Copy with every control limited to its travel.
    pub fn clamped(self) -> Self {
        Self {
            aileron: self.aileron.clamp(-MAX_DEFLECTION, MAX_DEFLECTION),
            elevator: self.elevator.clamp(-MAX_DEFLECTION, MAX_DEFLECTION),
            rudder: self.rudder.clamp(-MAX_DEFLECTION, MAX_DEFLECTION),
            throttle: self.throttle.clamp(0, MAX_THROTTLE),
            ..self
        }
    }
}

/// Everything known about the simulated aircraft.
#[derive(Clone, Debug, PartialEq)]
pub struct AircraftState {
    pub op_mode: OpMode,

    pub aileron: i32,
    pub elevator: i32,
    pub throttle: i32,
    pub rudder: i32,

    pub ignition_on: bool,
    pub engine_on: bool,
    pub rpm: i32,
    /// Tens of gallons.
    pub fuel: u8,
    /// Gallons per hour.
    pub fuel_consumption: u8,

    pub x_pos: i32,
    pub y_pos: i32,
    pub z_pos: i32,

    /// Degrees, positive nose down.
    pub pitch: f64,
    /// Degrees.
    pub yaw: f64,
    /// Degrees, positive banked left.
    pub roll: f64,

    /// Miles per hour.
    pub h_speed: f32,
    /// Vertical displacement over the last step.
    pub v_speed: f32,
    /// Forward displacement over the last step.
    pub delta_z: f32,
    /// Angle of the flight path, degrees.
    pub ef_aof: f32,
    /// Feet per minute.
    pub climb_rate: f32,
    /// Feet above the ground plane.
    pub altitude: i32,

    pub airborne: bool,
    pub stall: bool,
    pub brake: bool,

    pub view: ViewDirection,
}

impl AircraftState {
    /// Parked at the start of the runway, brake set, engine off.
    pub fn new(op_mode: OpMode) -> Self {
        Self {
            op_mode,
            aileron: 0,
            elevator: 0,
            throttle: 0,
            rudder: 0,
            ignition_on: false,
            engine_on: false,
            rpm: 0,
            fuel: TANK_SIZE,
            fuel_consumption: FUEL_CONSUMPTION,
            x_pos: START_X,
            y_pos: START_Y,
            z_pos: START_Z,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            h_speed: 0.0,
            v_speed: 0.0,
            delta_z: 0.0,
            ef_aof: 0.0,
            climb_rate: 0.0,
            altitude: 0,
            airborne: false,
            stall: false,
            brake: true,
            view: ViewDirection::Forward,
        }
    }

    /// World position of the cockpit.
    pub fn position(&self) -> IVec3 {
        IVec3::new(self.x_pos, self.y_pos, self.z_pos)
    }

    /// Take over a frame's control positions, limited to their travel.
    pub fn apply_controls(&mut self, input: &ControlInput) {
        let input = input.clamped();
        self.aileron = input.aileron;
        self.elevator = input.elevator;
        self.rudder = input.rudder;
        self.throttle = input.throttle;
        self.ignition_on = input.ignition;
        self.brake = input.brake;
        self.view = input.view;
    }
}

impl Default for AircraftState {
    fn default() -> Self {
        Self::new(OpMode::default())
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "right aileron: {}", -self.aileron)?;
        writeln!(f, "left aileron:  {}", self.aileron)?;
        writeln!(f, "elevator:      {}", self.elevator)?;
        writeln!(f, "rudder:        {}", self.rudder)?;
        writeln!(f, "throttle:      {}", self.throttle)?;
        writeln!(f, "ignition:      {}", self.ignition_on)?;
        writeln!(f, "engine on:     {}", self.engine_on)?;
        writeln!(f, "prop rpm:      {}", self.rpm)?;
        writeln!(f, "fuel level:    {}", self.fuel)?;
        writeln!(f, "x coordinate:  {}", self.x_pos)?;
        writeln!(f, "y coordinate:  {}", self.y_pos)?;
        writeln!(f, "z coordinate:  {}", self.z_pos)?;
        writeln!(f, "pitch:         {:.6}", self.pitch)?;
        writeln!(f, "effect. pitch: {:.6}", self.ef_aof)?;
        writeln!(f, "roll:          {:.6}", self.roll)?;
        writeln!(f, "yaw:           {:.6}", self.yaw)?;
        writeln!(f, "speed:         {:.6}", self.h_speed)?;
        writeln!(f, "rate of climb: {:.6}", self.climb_rate)?;
        write!(f, "altitude:      {}", self.altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::SEA_LVL_Y;

    #[test]
    fn test_start_pose() {
        let state = AircraftState::new(OpMode::Flight);
        assert_eq!(state.position(), IVec3::new(0, SEA_LVL_Y, -7000));
        assert!(state.brake);
        assert!(!state.airborne);
        assert_eq!(state.fuel, TANK_SIZE);
        assert_eq!(state.view, ViewDirection::Forward);
    }

    #[test]
    fn test_controls_are_clamped() {
        let mut state = AircraftState::default();
        let input = ControlInput {
            aileron: 40,
            elevator: -16,
            rudder: 3,
            throttle: 99,
            ignition: true,
            brake: false,
            view: ViewDirection::Rear,
            elapsed_ms: Some(20),
        };
        state.apply_controls(&input);
        assert_eq!(state.aileron, 15);
        assert_eq!(state.elevator, -15);
        assert_eq!(state.rudder, 3);
        assert_eq!(state.throttle, 15);
        assert!(state.ignition_on);
        assert!(!state.brake);
        assert_eq!(state.view, ViewDirection::Rear);

        state.apply_controls(&ControlInput {
            throttle: -2,
            ..input
        });
        assert_eq!(state.throttle, 0);
    }

    #[test]
    fn test_dump_lists_every_field() {
        let text = AircraftState::default().to_string();
        assert_eq!(text.lines().count(), 19);
        assert!(text.contains("z coordinate:  -7000"));
    }
}
