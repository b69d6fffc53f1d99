//! The flight dynamics integrator.
//!
//! [`FlightModel::run`] advances the aircraft by one frame. The stages run
//! in a fixed order, each reading what the previous one wrote:
//!
//! 1. power: ignition and rpm
//! 2. flight: speed, lift, sink rate, flight path angle and stall
//! 3. inertial damping of the angular rates
//! 4. control torques added to the angular rates
//! 5. angular rates applied to the attitude
//! 6. position: the frame's forward travel rotated into the world
//!
//! World-walk mode replaces stages 1 and 2 with a fixed speed.

use log::{info, warn};

use super::state::{AircraftState, ControlInput, OpMode};
use super::telemetry::{FrameTimes, Telemetry};
use super::{GRAV_C, LOOP_FALLBACK_MS, LOOP_MAX_MS, SEA_LVL_Y, WALK_RATE, WALK_SPEED};
use crate::math::{flip_past_vertical, vec3::Vec3, wrap_degrees};

/// Rates below this are snapped to zero by damping.
const DAMP_EPSILON: f64 = 0.01;

/// Attitudes within this of zero are snapped to zero.
const ATTITUDE_DEADBAND: f64 = 0.5;

/// Largest pitch or roll, in degrees, that still counts as a landing.
const LANDING_LIMIT: f64 = 10.0;

/// Degrees of attitude change per frame about each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngularRates {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl AngularRates {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    /// Lose a tenth of each rate, snapping small rates to zero.
    pub fn damp(&mut self) {
        self.pitch = damp_rate(self.pitch);
        self.yaw = damp_rate(self.yaw);
        self.roll = damp_rate(self.roll);
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

fn damp_rate(rate: f64) -> f64 {
    if rate == 0.0 {
        return 0.0;
    }
    let rate = rate - rate / 10.0;
    if rate.abs() < DAMP_EPSILON {
        0.0
    } else {
        rate
    }
}

/// Yaw torque from bank alone. Zero beyond a vertical bank.
fn turn_rate(roll: f64) -> f64 {
    if roll != 0.0 && (-90.0..=90.0).contains(&roll) {
        roll * 0.0005
    } else {
        0.0
    }
}

fn deadband(angle: f64) -> f64 {
    if angle.abs() < ATTITUDE_DEADBAND {
        0.0
    } else {
        angle
    }
}

/// What happened at the ground this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroundContact {
    /// No touchdown this frame.
    Airborne,
    /// Touched down level enough; the aircraft is back on its wheels.
    Landed,
    /// Touched down too steep or banked; the aircraft was reset.
    Crashed,
}

/// Simulation context: the aircraft plus everything the integrator carries
/// between frames.
#[derive(Clone, Debug)]
pub struct FlightModel {
    state: AircraftState,
    rates: AngularRates,
    /// Sub-unit world displacement not yet applied to the position.
    collect: Vec3,
    loop_time: u32,
    frames: FrameTimes,
}

impl Default for FlightModel {
    fn default() -> Self {
        Self::new(OpMode::default())
    }
}

impl FlightModel {
    pub fn new(op_mode: OpMode) -> Self {
        Self {
            state: AircraftState::new(op_mode),
            rates: AngularRates::ZERO,
            collect: Vec3::ZERO,
            loop_time: 0,
            frames: FrameTimes::new(),
        }
    }

    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AircraftState {
        &mut self.state
    }

    pub fn rates(&self) -> AngularRates {
        self.rates
    }

    pub fn set_rates(&mut self, rates: AngularRates) {
        self.rates = rates;
    }

    /// Length of the last step in milliseconds.
    pub fn loop_time(&self) -> u32 {
        self.loop_time
    }

    pub fn frame_times(&self) -> &FrameTimes {
        &self.frames
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            state: self.state.clone(),
            rates: self.rates,
            loop_time: self.loop_time,
            average_ms: self.frames.average_ms(),
        }
    }

    /// Take a frame's controls, integrate, then handle ground contact.
    pub fn step(&mut self, input: &ControlInput) -> GroundContact {
        self.state.apply_controls(input);
        self.run(input.elapsed_ms);
        self.ground_approach()
    }

    /// Advance the aircraft by one frame of `elapsed_ms` milliseconds.
    ///
    /// A zero step counts as one millisecond and long stalls are cut to
    /// [`LOOP_MAX_MS`]; without a timer a fixed step is used.
    pub fn run(&mut self, elapsed_ms: Option<u32>) {
        self.loop_time = match elapsed_ms {
            Some(ms) => ms.clamp(1, LOOP_MAX_MS),
            None => LOOP_FALLBACK_MS,
        };
        self.frames.push(self.loop_time);

        let flight_path = if self.state.op_mode == OpMode::Walk {
            self.walk()
        } else {
            self.power_dynamics();
            self.flight_dynamics()
        };
        self.rates.damp();
        self.control_rates();
        self.apply_rotations();
        self.integrate_position(flight_path);
    }

    /// rpm chases the throttle setting while the ignition is on and winds
    /// down when it is off.
    fn power_dynamics(&mut self) {
        let s = &mut self.state;
        let step = (self.loop_time / 2).max(1) as i32;

        if s.ignition_on {
            s.engine_on = true;
            let target = 375 + s.throttle * 117;
            if s.rpm < target {
                s.rpm = (s.rpm + step).min(target);
            } else if s.rpm > target {
                s.rpm = (s.rpm - step).max(target);
            }
        } else {
            s.engine_on = false;
            if s.rpm > 0 {
                s.rpm -= step;
            }
        }
        s.rpm = s.rpm.max(0);
    }

    /// Speed, lift and sink for this step. Returns the flight path angle in
    /// radians, positive when descending.
    fn flight_dynamics(&mut self) -> f32 {
        let s = &mut self.state;
        let loop_time = self.loop_time as f32;
        let pitch = s.pitch as f32;

        // Speed the propeller would hold at this rpm and attitude.
        let ideal_speed = s.rpm as f32 / 17.5 + pitch * 1.5;
        let h_accel = (s.rpm as f32 * (ideal_speed - s.h_speed)) / 10000.0 / 1000.0 * loop_time;

        if s.brake && !s.airborne {
            s.h_speed = (s.h_speed - 1.0).max(0.0);
        } else {
            s.h_speed += h_accel;
        }

        // Lift follows an arctangent of speed, centred on 65 mph.
        let lift_speed = (s.h_speed / 65.0 - 1.0).min(1.0);
        let mut lift = lift_speed.atan().to_degrees();
        lift += 45.0;
        lift /= 5.29;
        lift *= -(pitch * 0.157) + 1.0;
        lift = lift / 1000.0 * loop_time;

        let gravity = loop_time * (GRAV_C / 1000.0);
        s.v_speed = gravity + lift;
        if !s.airborne && s.v_speed < 0.0 {
            s.v_speed = 0.0;
        }
        s.climb_rate = s.v_speed / loop_time * 60000.0;

        // mph to feet per millisecond, times the step.
        s.delta_z = s.h_speed * 5280.0 / 3_600_000.0 * loop_time;

        let flight_path = if s.delta_z != 0.0 {
            -(s.v_speed / s.delta_z).atan()
        } else {
            -s.v_speed.atan()
        };

        let aoa = flight_path.to_degrees() as f64;
        if s.pitch < aoa && aoa < 0.0 && s.h_speed < 40.0 && s.pitch - aoa < -20.0 {
            s.stall = true;
        }
        if s.stall {
            if s.pitch > 30.0 {
                s.stall = false;
            } else {
                s.pitch += 1.0;
            }
        }
        flight_path
    }

    /// Throttle maps straight to forward travel; the nose sets the path.
    fn walk(&mut self) -> f32 {
        let s = &mut self.state;
        s.delta_z = (s.throttle * (WALK_RATE / 15)) as f32 / 60000.0 * self.loop_time as f32;
        s.h_speed = WALK_SPEED;
        (s.pitch as f32).to_radians()
    }

    /// Add control surface torques to the angular rates.
    fn control_rates(&mut self) {
        let s = &self.state;
        let rates = &mut self.rates;
        let loop_time = self.loop_time as f64;
        let speed = s.h_speed as f64;

        if s.airborne && s.aileron != 0 {
            let torque = speed * s.aileron as f64 / 10000.0;
            if rates.roll != torque * loop_time {
                rates.roll += torque * 6.0;
            }
        }

        if s.elevator != 0 {
            let mut torque = speed * s.elevator as f64 / 10000.0;
            // The wheels stop the nose going down on the ground.
            if !s.airborne && torque > 0.0 {
                torque = 0.0;
            }
            if rates.pitch != torque * loop_time {
                rates.pitch += torque * 1.5;
            }
        }

        if s.h_speed != 0.0 {
            let mut torque = 0.0;
            if s.rudder != 0 {
                torque = -(speed * s.rudder as f64 / 10000.0);
            }
            torque += turn_rate(s.roll);
            if rates.yaw != torque * loop_time {
                rates.yaw += torque * 1.5;
            }
        }
    }

    fn apply_rotations(&mut self) {
        let s = &mut self.state;
        let rates = self.rates;

        s.roll += rates.roll;
        s.yaw += rates.yaw;
        // Pitching while banked turns part of the pitch into yaw.
        let roll = s.roll.to_radians();
        s.pitch += rates.pitch * roll.cos();
        s.yaw -= rates.pitch * roll.sin();

        s.roll = wrap_degrees(s.roll);
        s.yaw = wrap_degrees(s.yaw);

        let (pitch, yaw, roll) = flip_past_vertical(s.pitch, s.yaw, s.roll);
        s.pitch = deadband(pitch);
        s.yaw = deadband(yaw);
        s.roll = deadband(roll);
    }

    /// Rotate the step's forward travel by roll, flight path and yaw, and
    /// move the aircraft once a whole unit has built up on an axis.
    fn integrate_position(&mut self, flight_path: f32) {
        let s = &mut self.state;

        let travel = Vec3::new(0.0, 0.0, s.delta_z)
            .rotate_z((s.roll as f32).to_radians())
            .rotate_x(flight_path)
            .rotate_y((s.yaw as f32).to_radians());
        s.ef_aof = flight_path.to_degrees();

        self.collect = self.collect + travel;
        s.x_pos -= take_whole(&mut self.collect.x);
        s.y_pos -= take_whole(&mut self.collect.y);
        s.z_pos += take_whole(&mut self.collect.z);

        s.altitude = -(s.y_pos - SEA_LVL_Y);
        if !s.airborne && s.altitude != 0 {
            s.airborne = true;
        }
    }

    /// In flight mode, decide whether reaching the ground was a landing or a
    /// crash. A crash resets the aircraft to the start of the runway.
    pub fn ground_approach(&mut self) -> GroundContact {
        let s = &self.state;
        if s.op_mode != OpMode::Flight || !s.airborne || s.altitude > 0 {
            return GroundContact::Airborne;
        }

        if s.pitch.abs() > LANDING_LIMIT || s.roll.abs() > LANDING_LIMIT {
            warn!(
                "crashed at pitch {:.1}, roll {:.1}, speed {:.1}",
                s.pitch, s.roll, s.h_speed
            );
            self.reset();
            GroundContact::Crashed
        } else {
            info!("landed at speed {:.1}", s.h_speed);
            self.land();
            GroundContact::Landed
        }
    }

    /// Back to the start pose, engine off and brake set. The operating mode
    /// and frame history survive.
    pub fn reset(&mut self) {
        self.state = AircraftState::new(self.state.op_mode);
        self.rates = AngularRates::ZERO;
        self.collect = Vec3::ZERO;
    }

    /// Settle onto the ground level.
    pub fn land(&mut self) {
        let s = &mut self.state;
        s.airborne = false;
        s.pitch = 0.0;
        s.roll = 0.0;
        s.y_pos = SEA_LVL_Y;
        self.rates = AngularRates::ZERO;
    }
}

/// Remove and return the whole part of an accumulator once it exceeds one
/// unit either way. The fraction left over stays for the next step.
fn take_whole(collect: &mut f32) -> i32 {
    if collect.abs() > 1.0 {
        let whole = collect.trunc();
        *collect -= whole;
        whole as i32
    } else {
        0
    }
}
