//! Near-plane clipping of view-aligned polygons.

use super::{clip_pass, ClipError, ClippedPolygon};
use crate::math::ivec3::IVec3;

/// Smallest view-space z a clipped vertex may have.
pub const NEAR_Z: i32 = 2;

/// Clip a polygon's aligned vertices against `z >= NEAR_Z` into `out`.
///
/// A polygon entirely behind the plane leaves `out` empty.
pub fn zclip(vertices: &[IVec3], color: u8, out: &mut ClippedPolygon) -> Result<(), ClipError> {
    out.color = color;
    clip_pass(vertices, out, |v| v.z >= NEAR_Z, crossing)
}

fn crossing(v1: IVec3, v2: IVec3) -> IVec3 {
    let t = (NEAR_Z - v1.z) as f32 / (v2.z - v1.z) as f32;
    IVec3::new(
        (v1.x as f32 + (v2.x - v1.x) as f32 * t) as i32,
        (v1.y as f32 + (v2.y - v1.y) as f32 * t) as i32,
        NEAR_Z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: [i32; 4]) -> [IVec3; 4] {
        [
            IVec3::new(-10, -10, z[0]),
            IVec3::new(10, -10, z[1]),
            IVec3::new(10, 10, z[2]),
            IVec3::new(-10, 10, z[3]),
        ]
    }

    #[test]
    fn test_fully_in_front_is_unchanged() {
        let sq = square([50, 50, 50, 50]);
        let mut out = ClippedPolygon::default();
        zclip(&sq, 7, &mut out).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out.color, 7);
        // Each edge emits its end vertex, so the loop starts at vertex 0.
        assert_eq!(out.vertices(), &sq[..]);
    }

    #[test]
    fn test_fully_behind_is_empty() {
        let sq = square([1, 0, -5, 1]);
        let mut out = ClippedPolygon::default();
        zclip(&sq, 7, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_straddling_square_adds_crossing_points() {
        // Two vertices behind: two crossing edges replace them.
        let sq = square([10, 10, -10, -10]);
        let mut out = ClippedPolygon::default();
        zclip(&sq, 1, &mut out).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.vertices().iter().all(|v| v.z >= NEAR_Z));

        // One vertex behind: one vertex becomes two.
        let sq = square([10, 10, 10, -10]);
        zclip(&sq, 1, &mut out).unwrap();
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_crossing_point_interpolates() {
        let v1 = IVec3::new(0, 0, 12);
        let v2 = IVec3::new(100, -50, -8);
        // t = (2 - 12) / (-20) = 0.5
        assert_eq!(crossing(v1, v2), IVec3::new(50, -25, NEAR_Z));
    }

    #[test]
    fn test_vertex_on_plane_counts_as_inside() {
        let tri = [
            IVec3::new(0, 0, NEAR_Z),
            IVec3::new(10, 0, NEAR_Z),
            IVec3::new(0, 10, NEAR_Z),
        ];
        let mut out = ClippedPolygon::default();
        zclip(&tri, 1, &mut out).unwrap();
        assert_eq!(out.len(), 3);
    }
}
