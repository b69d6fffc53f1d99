//! Software rendering into an 8-bit indexed framebuffer.

pub mod framebuffer;
pub mod horizon;
pub mod line;
pub mod palette;
pub mod rasterizer;
pub mod sorting;
pub mod view;
pub mod visibility;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use line::draw_line;
pub use palette::Palette;
pub use rasterizer::{fill_convex, EdgeWalkRasterizer, Rasterizer};
pub use view::{FrameStats, View, Viewport};
pub use visibility::VisiblePolygon;
