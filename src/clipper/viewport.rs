//! Clipping of projected polygons against the screen window.

use super::{clip_pass, ClipError, ClippedPolygon};
use crate::math::ivec3::IVec3;

/// An inclusive screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl ClipRect {
    pub const fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn width(&self) -> i32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> i32 {
        self.ymax - self.ymin
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }
}

/// The four window edges, in the order [`xyclip`] applies them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ViewportEdge {
    pub const ALL: [ViewportEdge; 4] = [
        ViewportEdge::Left,
        ViewportEdge::Right,
        ViewportEdge::Top,
        ViewportEdge::Bottom,
    ];

    /// Whether a vertex lies on the visible side of this edge.
    pub fn inside(&self, v: IVec3, rect: &ClipRect) -> bool {
        match self {
            Self::Left => v.x >= rect.xmin,
            Self::Right => v.x <= rect.xmax,
            Self::Top => v.y >= rect.ymin,
            Self::Bottom => v.y <= rect.ymax,
        }
    }

    /// Where the segment `v1 -> v2` meets this edge.
    ///
    /// Only called for segments that cross the edge, so the crossing axis
    /// never has a zero extent.
    pub fn intersect(&self, v1: IVec3, v2: IVec3, rect: &ClipRect) -> IVec3 {
        match self {
            Self::Left => at_x(v1, v2, rect.xmin),
            Self::Right => at_x(v1, v2, rect.xmax),
            Self::Top => at_y(v1, v2, rect.ymin),
            Self::Bottom => at_y(v1, v2, rect.ymax),
        }
    }
}

fn at_x(v1: IVec3, v2: IVec3, edge: i32) -> IVec3 {
    let m = (v2.y - v1.y) as f32 / (v2.x - v1.x) as f32;
    let y = v1.y as f32 + m * (edge - v1.x) as f32;
    IVec3::new(edge, y as i32, v1.z)
}

fn at_y(v1: IVec3, v2: IVec3, edge: i32) -> IVec3 {
    let dx = v2.x - v1.x;
    let x = if dx != 0 {
        let m = (v2.y - v1.y) as f32 / dx as f32;
        (v1.x as f32 + (edge - v1.y) as f32 / m) as i32
    } else {
        v1.x
    };
    IVec3::new(x, edge, v1.z)
}

/// Clip a projected polygon against the left, right, top and bottom edges of
/// `rect`, in that order. Each pass consumes the previous pass's output.
pub fn xyclip(poly: &mut ClippedPolygon, rect: &ClipRect) -> Result<(), ClipError> {
    let mut scratch = ClippedPolygon::new(poly.color);
    for edge in ViewportEdge::ALL {
        if poly.is_empty() {
            break;
        }
        clip_pass(
            poly.vertices(),
            &mut scratch,
            |v| edge.inside(v, rect),
            |a, b| edge.intersect(a, b, rect),
        )?;
        std::mem::swap(poly, &mut scratch);
    }
    Ok(())
}
