//! Convex polygon scan conversion.
//!
//! # Algorithm Overview
//!
//! The polygon is filled one scanline at a time, top to bottom, by two edge
//! walkers that leave the topmost vertex in opposite directions:
//!
//! ```text
//!            top
//!           /   \
//!   edge 1 /     \ edge 2        edge 1 walks the vertex list backwards,
//!         /       \              edge 2 walks it forwards
//!        +---------+  <- span filled between the two walkers
//!         \       /
//!          \     /
//!           \   /
//!            bot
//! ```
//!
//! Each walker tracks its current pixel with an [`EdgeStepper`], the integer
//! Bresenham stepping [`draw_line`] also uses, so edges land on exactly the
//! pixels a line between the same vertices would light.
//!
//! # Edge Stepping
//!
//! Per scanline each walker advances in one of two ways:
//!
//! - **X-major** (`|dx| > |dy|`): step along x, plotting each intermediate
//!   pixel, until the error term says it is time to move down a row.
//! - **Y-major**: move down one row, stepping x once when the error term
//!   overflows.
//!
//! The two walkers choose independently, which covers all four combinations
//! (x/x, x/y, y/x, y/y). When either walker reaches its end vertex the next
//! polygon edge is started from the walker's current pixel while the other
//! continues.
//!
//! [`draw_line`]: super::line::draw_line
//! [`EdgeStepper`]: super::line::EdgeStepper

use super::framebuffer::FrameBuffer;
use super::line::EdgeStepper;
use crate::clipper::ClippedPolygon;
use crate::math::ivec3::IVec3;

/// Trait for polygon rasterization algorithms.
///
/// Implementors define how a clipped, screen-space polygon is filled into a
/// pixel buffer.
pub trait Rasterizer {
    /// Fill a convex polygon into the frame buffer with its flat colour.
    ///
    /// Polygons with fewer than three vertices are ignored.
    fn fill_polygon(&self, polygon: &ClippedPolygon, buffer: &mut FrameBuffer);
}

/// Bresenham edge-walking scan converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeWalkRasterizer;

impl Rasterizer for EdgeWalkRasterizer {
    fn fill_polygon(&self, polygon: &ClippedPolygon, buffer: &mut FrameBuffer) {
        if !polygon.is_drawable() {
            return;
        }
        fill_convex(polygon.vertices(), polygon.color, buffer);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

/// One side of the polygon being walked down the screen.
struct EdgeWalker<'v> {
    vertices: &'v [IVec3],
    direction: Direction,
    end: usize,
    edge: EdgeStepper,
}

impl<'v> EdgeWalker<'v> {
    fn new(vertices: &'v [IVec3], start: usize, direction: Direction) -> Self {
        let top = vertices[start];
        let mut walker = Self {
            vertices,
            direction,
            end: start,
            edge: EdgeStepper::new(top.x, top.y, top.x, top.y),
        };
        walker.advance_end();
        walker
    }

    fn advance_end(&mut self) {
        let n = self.vertices.len();
        self.end = match self.direction {
            Direction::Backward => (self.end + n - 1) % n,
            Direction::Forward => (self.end + 1) % n,
        };
    }

    /// Set up stepping from the current pixel to the end vertex.
    fn begin(&mut self) {
        let end = self.vertices[self.end];
        self.edge = EdgeStepper::new(self.edge.x, self.edge.y, end.x, end.y);
    }

    /// Move this walker to its pixel on the current scanline.
    fn step(&mut self, buffer: &mut FrameBuffer, color: u8) {
        self.edge.step(|x, y| buffer.set_pixel(x, y, color));
    }
}

/// Scan-convert a convex polygon given in screen coordinates.
pub fn fill_convex(vertices: &[IVec3], color: u8, buffer: &mut FrameBuffer) {
    if vertices.len() < 3 {
        return;
    }

    let top = vertices
        .iter()
        .enumerate()
        .fold(0, |best, (i, v)| if v.y < vertices[best].y { i } else { best });

    let mut edge1 = EdgeWalker::new(vertices, top, Direction::Backward);
    let mut edge2 = EdgeWalker::new(vertices, top, Direction::Forward);
    let mut edges_left = vertices.len() as i32 - 1;

    while edges_left > 0 {
        edge1.begin();
        edge2.begin();

        while edge1.edge.count > 0 && edge2.edge.count > 0 {
            edge1.step(buffer, color);
            edge2.step(buffer, color);
            buffer.fill_span(edge1.edge.y, edge1.edge.x, edge2.edge.x, color);
            edge1.edge.y += 1;
            edge2.edge.y += 1;
        }

        if edge1.edge.count == 0 {
            edges_left -= 1;
            edge1.advance_end();
        }
        if edge2.edge.count == 0 {
            edges_left -= 1;
            edge2.advance_end();
        }
    }
}
