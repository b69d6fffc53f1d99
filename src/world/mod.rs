//! Scenery storage and world-file loading.

pub mod geometry;
pub mod loader;

pub use geometry::{Object, Polygon, Vertex, World};
pub use loader::{load_world, parse_world, LoadError};
