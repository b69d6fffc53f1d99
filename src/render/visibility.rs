//! Backface culling and construction of the per-frame polygon list.

use crate::math::ivec3::IVec3;
use crate::world::World;

/// Whether a polygon faces away from the viewer, judged from its first three
/// view-aligned vertices.
///
/// A polygon that winds clockwise on screen (x right, y down) is a backface.
/// Only meaningful for polygons of convex solids.
pub fn backface(vertices: &[IVec3]) -> bool {
    let [v1, v2, v3] = match vertices {
        [a, b, c, ..] => [*a, *b, *c],
        _ => return false,
    };
    let (x1, y1, z1) = (v1.x as i64, v1.y as i64, v1.z as i64);
    let (x2, y2, z2) = (v2.x as i64, v2.y as i64, v2.z as i64);
    let (x3, y3, z3) = (v3.x as i64, v3.y as i64, v3.z as i64);

    let c = x3 * (z1 * y2 - y1 * z2) + y3 * (x1 * z2 - z1 * x2) + z3 * (y1 * x2 - x1 * y2);
    c < 0
}

/// Axis-aligned extent of a polygon in view space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub xmin: i32,
    pub xmax: i32,
    pub ymin: i32,
    pub ymax: i32,
    pub zmin: i32,
    pub zmax: i32,
}

impl Bounds {
    /// Bounds of a non-empty point set.
    pub fn of(points: &[IVec3]) -> Option<Self> {
        let first = *points.first()?;
        let init = Bounds {
            xmin: first.x,
            xmax: first.x,
            ymin: first.y,
            ymax: first.y,
            zmin: first.z,
            zmax: first.z,
        };
        Some(points[1..].iter().fold(init, |b, p| Bounds {
            xmin: b.xmin.min(p.x),
            xmax: b.xmax.max(p.x),
            ymin: b.ymin.min(p.y),
            ymax: b.ymax.max(p.y),
            zmin: b.zmin.min(p.z),
            zmax: b.zmax.max(p.z),
        }))
    }

    /// Squared distance of the box centre from the viewer.
    pub fn center_distance_sq(&self) -> f64 {
        let xc = (self.xmin as f64 + self.xmax as f64) / 2.0;
        let yc = (self.ymin as f64 + self.ymax as f64) / 2.0;
        let zc = (self.zmin as f64 + self.zmax as f64) / 2.0;
        xc * xc + yc * yc + zc * zc
    }
}

/// A polygon that survived culling this frame, with its aligned vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct VisiblePolygon {
    pub vertices: Vec<IVec3>,
    pub color: u8,
    pub bounds: Bounds,
    /// Sort key: squared distance of the bounds centre.
    pub distance: f64,
}

impl VisiblePolygon {
    pub fn new(vertices: Vec<IVec3>, color: u8) -> Option<Self> {
        let bounds = Bounds::of(&vertices)?;
        Some(Self {
            distance: bounds.center_distance_sq(),
            vertices,
            color,
            bounds,
        })
    }
}

/// Collect every potentially visible polygon of the aligned world into `list`.
///
/// Backfaces of convex objects are dropped, as is anything lying entirely at
/// or behind `z = 1`.
pub fn build_polygon_list(world: &World, list: &mut Vec<VisiblePolygon>) {
    list.clear();
    for object in world.objects() {
        for polygon in &object.polygons {
            if polygon.vertex_count() < 3 {
                continue;
            }
            let vertices: Vec<IVec3> = polygon.aligned(&object.vertices).collect();
            if object.convex && backface(&vertices) {
                continue;
            }
            if let Some(visible) = VisiblePolygon::new(vertices, polygon.color) {
                if visible.bounds.zmax > 1 {
                    list.push(visible);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Object, Polygon};
    use approx::assert_relative_eq;

    // Counter-clockwise on screen (y down): facing the viewer.
    fn front_facing(z: i32) -> Vec<IVec3> {
        vec![
            IVec3::new(0, 0, z),
            IVec3::new(0, 10, z),
            IVec3::new(10, 0, z),
        ]
    }

    #[test]
    fn test_backface_clockwise_is_culled() {
        let mut tri = front_facing(10);
        assert!(!backface(&tri));
        tri.reverse();
        assert!(backface(&tri));
    }

    #[test]
    fn test_backface_antisymmetric_for_quads() {
        let quad = vec![
            IVec3::new(-20, -15, 40),
            IVec3::new(-25, 30, 55),
            IVec3::new(35, 20, 60),
            IVec3::new(30, -10, 45),
        ];
        let mut reversed = quad.clone();
        reversed.reverse();
        assert_ne!(backface(&quad), backface(&reversed));
    }

    #[test]
    fn test_bounds_and_distance() {
        let pts = [
            IVec3::new(-2, 4, 10),
            IVec3::new(6, -4, 20),
            IVec3::new(0, 0, 30),
        ];
        let b = Bounds::of(&pts).unwrap();
        assert_eq!((b.xmin, b.xmax), (-2, 6));
        assert_eq!((b.ymin, b.ymax), (-4, 4));
        assert_eq!((b.zmin, b.zmax), (10, 30));
        // centre (2, 0, 20)
        assert_relative_eq!(b.center_distance_sq(), 404.0);
        assert!(Bounds::of(&[]).is_none());
    }

    fn object(vertices: Vec<IVec3>, convex: bool) -> Object {
        let n = vertices.len();
        let mut obj = Object::new(vertices, vec![Polygon::new((0..n).collect(), 3)]).with_convex(convex);
        for v in &mut obj.vertices {
            v.aligned = v.local;
        }
        obj
    }

    #[test]
    fn test_list_culls_backfaces_of_convex_objects_only() {
        let mut back = front_facing(10);
        back.reverse();
        let world = World::new(vec![
            object(front_facing(10), true),
            object(back.clone(), true),
            object(back, false),
        ]);
        let mut list = Vec::new();
        build_polygon_list(&world, &mut list);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_list_drops_polygons_behind_viewer() {
        let world = World::new(vec![
            object(front_facing(1), false),
            object(front_facing(-40), false),
            object(front_facing(2), false),
        ]);
        let mut list = vec![];
        build_polygon_list(&world, &mut list);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].bounds.zmax, 2);
    }
}
