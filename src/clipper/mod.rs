//! Polygon clipping.
//!
//! Both stages use the Sutherland-Hodgman algorithm: the polygon is walked
//! edge by edge against one half-space at a time, emitting zero, one or two
//! vertices per edge.
//!
//! - [`near_plane`]: clips view-aligned polygons against `z = NEAR_Z`.
//! - [`viewport`]: clips projected polygons against the four screen window
//!   edges.
//!
//! Clipped vertices live in a [`ClippedPolygon`], a bounded buffer that
//! reports [`ClipError::Overflow`] instead of growing.

pub mod near_plane;
pub mod viewport;

pub use near_plane::{zclip, NEAR_Z};
pub use viewport::{xyclip, ClipRect, ViewportEdge};

use std::fmt;

use crate::math::ivec3::IVec3;

/// Capacity of a [`ClippedPolygon`].
pub const MAX_CLIP_VERTICES: usize = 20;

/// Errors raised while clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipError {
    /// The clipped polygon needs more vertices than the buffer holds.
    Overflow { capacity: usize },
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClipError::Overflow { capacity } => {
                write!(f, "clipped polygon exceeds {} vertices", capacity)
            }
        }
    }
}

impl std::error::Error for ClipError {}

/// A transient polygon produced by clipping and consumed by the scan converter.
///
/// Holds view-aligned coordinates after [`zclip`], and screen coordinates
/// after projection and [`xyclip`].
#[derive(Clone, Copy, Debug)]
pub struct ClippedPolygon {
    vertices: [IVec3; MAX_CLIP_VERTICES],
    len: usize,
    pub color: u8,
}

impl Default for ClippedPolygon {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ClippedPolygon {
    pub fn new(color: u8) -> Self {
        Self {
            vertices: [IVec3::ZERO; MAX_CLIP_VERTICES],
            len: 0,
            color,
        }
    }

    /// Build a polygon directly from vertices already in screen space.
    pub fn from_vertices(vertices: &[IVec3], color: u8) -> Result<Self, ClipError> {
        let mut poly = Self::new(color);
        for &v in vertices {
            poly.push(v)?;
        }
        Ok(poly)
    }

    pub fn push(&mut self, v: IVec3) -> Result<(), ClipError> {
        if self.len == MAX_CLIP_VERTICES {
            return Err(ClipError::Overflow {
                capacity: MAX_CLIP_VERTICES,
            });
        }
        self.vertices[self.len] = v;
        self.len += 1;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// True once the polygon has been clipped out of existence.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The scan converter needs at least a triangle.
    pub fn is_drawable(&self) -> bool {
        self.len >= 3
    }

    pub fn vertices(&self) -> &[IVec3] {
        &self.vertices[..self.len]
    }

    pub fn vertices_mut(&mut self) -> &mut [IVec3] {
        &mut self.vertices[..self.len]
    }
}

/// One Sutherland-Hodgman pass over the closed loop `input`.
///
/// Each edge runs from the previous vertex to the current one:
/// - both inside: emit the current vertex
/// - leaving: emit the crossing point
/// - entering: emit the crossing point, then the current vertex
/// - both outside: emit nothing
pub(crate) fn clip_pass<I, X>(
    input: &[IVec3],
    out: &mut ClippedPolygon,
    inside: I,
    intersect: X,
) -> Result<(), ClipError>
where
    I: Fn(IVec3) -> bool,
    X: Fn(IVec3, IVec3) -> IVec3,
{
    out.clear();
    let Some(&last) = input.last() else {
        return Ok(());
    };

    let mut v1 = last;
    for &v2 in input {
        match (inside(v1), inside(v2)) {
            (true, true) => out.push(v2)?,
            (true, false) => out.push(intersect(v1, v2))?,
            (false, true) => {
                out.push(intersect(v1, v2))?;
                out.push(v2)?;
            }
            (false, false) => {}
        }
        v1 = v2;
    }
    Ok(())
}
