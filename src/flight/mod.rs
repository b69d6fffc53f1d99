//! Aircraft state and the per-frame flight dynamics integrator.
//!
//! The dynamics are empirical curves tuned to feel right in a light
//! aircraft, not an aerodynamic model. Units are loose: positions are world
//! units (one foot each), speeds are miles per hour, attitudes are degrees in
//! (-180, 180], and angular rates are degrees per frame.
//!
//! Sign conventions follow the world's y-down axis: positive pitch lowers
//! the nose, and climbing means y decreases.

pub mod model;
pub mod state;
pub mod telemetry;

pub use model::{AngularRates, FlightModel, GroundContact};
pub use state::{AircraftState, ControlInput, OpMode};
pub use telemetry::{FrameRateReport, FrameTimes, Telemetry};

/// World y of the ground plane.
pub const SEA_LVL_Y: i32 = -20;
/// Start pose after initialisation and after a crash.
pub const START_X: i32 = 0;
pub const START_Y: i32 = SEA_LVL_Y;
pub const START_Z: i32 = -7000;

/// Vertical speed from gravity, feet per second.
pub const GRAV_C: f32 = -16.0;

/// Step length used when no frame timing is available.
pub const LOOP_FALLBACK_MS: u32 = 40;
/// Longest step integrated at once, for frames after a long stall.
pub const LOOP_MAX_MS: u32 = 1000;

/// Frame times kept for the frame-rate average.
pub const NUM_FRAMES: usize = 500;

/// Fuel tank size, in tens of gallons.
pub const TANK_SIZE: u8 = 8;
/// Fuel burn in gallons per hour.
pub const FUEL_CONSUMPTION: u8 = 8;

/// World-walk speed at full throttle, feet per minute.
pub const WALK_RATE: i32 = 100_000;
/// Horizontal speed reported while walking.
pub const WALK_SPEED: f32 = 140.0;

/// Largest control surface deflection either way.
pub const MAX_DEFLECTION: i32 = 15;
/// Largest throttle setting.
pub const MAX_THROTTLE: i32 = 15;
