//! A flat-shaded light aircraft flight simulator.
//!
//! Scenery is a list of polygon objects loaded from a world file. Each frame
//! the flight model advances the aircraft from a control snapshot, and the
//! cockpit view is drawn back to front into a 320x200 palette-indexed
//! framebuffer on the CPU. SDL2 is used only for the window and keyboard.
//!
//! # Quick Start
//!
//! ```ignore
//! use skyward::prelude::*;
//!
//! let world = load_world("assets/world.wld")?;
//! let mut engine = Engine::new(world, OpMode::Flight);
//! let outcome = engine.frame(&ControlInput::default());
//! ```

// Public API - exposed to library consumers
pub mod clipper;
pub mod config;
pub mod engine;
pub mod flight;
pub mod math;
pub mod render;
pub mod transform;
pub mod view_control;
pub mod window;
pub mod world;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, FrameOutcome};
pub use transform::Transform;
pub use world::{LoadError, World};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use skyward::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, FrameOutcome};

    // Configuration
    pub use crate::config::ViewConfig;

    // Flight
    pub use crate::flight::{
        AircraftState, ControlInput, FlightModel, GroundContact, OpMode, Telemetry,
    };

    // Scenery
    pub use crate::world::{load_world, parse_world, LoadError, Object, Polygon, World};

    // Transform
    pub use crate::transform::{Transform, ViewPose};

    // Math
    pub use crate::math::ivec3::IVec3;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{Palette, View, Viewport};
    pub use crate::view_control::ViewDirection;

    // Window & Input
    pub use crate::window::{FrameLimiter, KeyboardControls, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::ClippedPolygon;
    pub use crate::render::{
        fill_convex, EdgeWalkRasterizer, FrameBuffer, Rasterizer, SCREEN_HEIGHT, SCREEN_WIDTH,
    };
}
