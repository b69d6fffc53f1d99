//! Painter's-algorithm depth ordering.
//!
//! [`z_sort`] is the per-frame sort: a bubble sort on the squared distance
//! of each polygon's bounds centre, farthest first. It is cheap and can
//! misorder polygons whose extents interleave.
//!
//! [`should_be_swapped`] is the exact pairwise test for one drawing order:
//! given `first` drawn before `second`, it reports whether that order can
//! paint the wrong polygon on top. It is not used by `z_sort`.

use super::visibility::VisiblePolygon;
use crate::math::ivec3::IVec3;

/// Sort farthest-first by [`VisiblePolygon::distance`].
///
/// Adjacent pairs are swapped until a full pass makes no swap, so equal keys
/// keep their relative order.
pub fn z_sort(list: &mut [VisiblePolygon]) {
    let mut swapped = true;
    while swapped {
        swapped = false;
        for i in 1..list.len() {
            if list[i - 1].distance < list[i].distance {
                list.swap(i - 1, i);
                swapped = true;
            }
        }
    }
}

/// Whether the z extents of two polygons overlap. Touching extents do not.
pub fn z_overlap(a: &VisiblePolygon, b: &VisiblePolygon) -> bool {
    !(a.bounds.zmin >= b.bounds.zmax || b.bounds.zmin >= a.bounds.zmax)
}

/// Whether the x and y extents of two polygons both overlap. Touching
/// extents count as overlapping.
pub fn xy_overlap(a: &VisiblePolygon, b: &VisiblePolygon) -> bool {
    let (a, b) = (&a.bounds, &b.bounds);
    if a.xmin > b.xmax || b.xmin > a.xmax {
        return false;
    }
    if a.ymin > b.ymax || b.ymin > a.ymax {
        return false;
    }
    true
}

/// Supporting plane `a*x + b*y + c*z + d = 0` through a polygon's first
/// three vertices, in exact integer arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plane {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
}

impl Plane {
    pub fn through(vertices: &[IVec3]) -> Option<Self> {
        let [p1, p2, p3] = match vertices {
            [a, b, c, ..] => [*a, *b, *c],
            _ => return None,
        };
        let (x1, y1, z1) = (p1.x as i64, p1.y as i64, p1.z as i64);
        let (x2, y2, z2) = (p2.x as i64, p2.y as i64, p2.z as i64);
        let (x3, y3, z3) = (p3.x as i64, p3.y as i64, p3.z as i64);

        Some(Self {
            a: y1 * (z2 - z3) + y2 * (z3 - z1) + y3 * (z1 - z2),
            b: z1 * (x2 - x3) + z2 * (x3 - x1) + z3 * (x1 - x2),
            c: x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2),
            d: -x1 * (y2 * z3 - y3 * z2) - x2 * (y3 * z1 - y1 * z3) - x3 * (y1 * z2 - y2 * z1),
        })
    }

    pub fn eval(&self, p: IVec3) -> i64 {
        self.a * p.x as i64 + self.b * p.y as i64 + self.c * p.z as i64 + self.d
    }

    /// Sign of the side the viewer (view-space origin) is on; 0 if the eye
    /// lies in the plane.
    pub fn viewer_side(&self) -> i64 {
        self.d.signum()
    }
}

/// Whether every vertex of `first` lies on the far side of `second`'s
/// plane, or in it. If so, `first` cannot cover `second`.
pub fn surface_outside(first: &VisiblePolygon, second: &VisiblePolygon) -> bool {
    let Some(plane) = Plane::through(&second.vertices) else {
        return true;
    };
    let viewer = plane.viewer_side();
    if viewer == 0 {
        return true;
    }
    first
        .vertices
        .iter()
        .all(|&v| plane.eval(v).signum() != viewer)
}

/// Whether every vertex of `second` lies on the viewer's side of `first`'s
/// plane, or in it. If so, `first` cannot cover `second`.
pub fn surface_inside(first: &VisiblePolygon, second: &VisiblePolygon) -> bool {
    let Some(plane) = Plane::through(&first.vertices) else {
        return true;
    };
    let viewer = plane.viewer_side();
    if viewer == 0 {
        return true;
    }
    second
        .vertices
        .iter()
        .all(|&v| plane.eval(v).signum() != -viewer)
}

/// Whether drawing `first` and then `second` is the wrong painter's order.
///
/// True only if the polygons overlap in x and y and neither plane test
/// separates them.
pub fn should_be_swapped(first: &VisiblePolygon, second: &VisiblePolygon) -> bool {
    if !xy_overlap(first, second) {
        return false;
    }
    if surface_outside(first, second) {
        return false;
    }
    if surface_inside(first, second) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(x: i32, y: i32, size: i32, z: i32, color: u8) -> VisiblePolygon {
        VisiblePolygon::new(
            vec![
                IVec3::new(x, y, z),
                IVec3::new(x, y + size, z),
                IVec3::new(x + size, y + size, z),
                IVec3::new(x + size, y, z),
            ],
            color,
        )
        .unwrap()
    }

    #[test]
    fn test_z_sort_farthest_first() {
        let mut list = vec![
            quad(0, 0, 10, 50, 1),
            quad(0, 0, 10, 300, 2),
            quad(0, 0, 10, 120, 3),
            quad(0, 0, 10, 80, 4),
        ];
        z_sort(&mut list);
        let colors: Vec<u8> = list.iter().map(|p| p.color).collect();
        assert_eq!(colors, vec![2, 3, 4, 1]);
        assert!(list.windows(2).all(|w| w[0].distance >= w[1].distance));
    }

    #[test]
    fn test_z_sort_keeps_ties_in_order() {
        let mut list = vec![quad(0, 0, 10, 50, 1), quad(0, 0, 10, 50, 2)];
        z_sort(&mut list);
        assert_eq!(list[0].color, 1);
        z_sort(&mut []);
    }

    #[test]
    fn test_overlap_tests() {
        let a = quad(0, 0, 10, 50, 1);
        let b = quad(10, 10, 10, 60, 2);
        let c = quad(11, 0, 10, 50, 3);
        assert!(xy_overlap(&a, &b));
        assert!(!xy_overlap(&a, &c));
        assert!(!z_overlap(&a, &b));

        let deep = VisiblePolygon::new(
            vec![
                IVec3::new(0, 0, 40),
                IVec3::new(0, 10, 80),
                IVec3::new(10, 10, 80),
            ],
            4,
        )
        .unwrap();
        assert!(z_overlap(&a, &deep));
    }

    #[test]
    fn test_no_xy_overlap_never_swaps() {
        let a = quad(0, 0, 10, 50, 1);
        let b = quad(100, 100, 10, 20, 2);
        assert!(!should_be_swapped(&a, &b));
        assert!(!should_be_swapped(&b, &a));
    }

    #[test]
    fn test_exactly_one_order_is_wrong() {
        let far = quad(-20, -20, 40, 100, 1);
        let near = quad(-10, -10, 40, 50, 2);
        assert!(!should_be_swapped(&far, &near));
        assert!(should_be_swapped(&near, &far));
    }

    #[test]
    fn test_swap_verdict_ignores_winding() {
        let far = quad(-20, -20, 40, 100, 1);
        let mut near = quad(-10, -10, 40, 50, 2);
        near.vertices.reverse();
        assert!(!should_be_swapped(&far, &near));
        assert!(should_be_swapped(&near, &far));
    }

    #[test]
    fn test_tilted_polygons_with_interleaved_depth() {
        // A floor strip receding from the viewer and a wall standing on its
        // far end: the wall is behind the floor's near part.
        let floor = VisiblePolygon::new(
            vec![
                IVec3::new(-50, 20, 20),
                IVec3::new(-50, 20, 200),
                IVec3::new(50, 20, 200),
                IVec3::new(50, 20, 20),
            ],
            1,
        )
        .unwrap();
        let wall = VisiblePolygon::new(
            vec![
                IVec3::new(-50, -40, 150),
                IVec3::new(-50, 20, 150),
                IVec3::new(50, 20, 150),
                IVec3::new(50, -40, 150),
            ],
            2,
        )
        .unwrap();
        assert!(z_overlap(&floor, &wall));
        // Wall is entirely above the floor plane, on the viewer's side.
        assert!(surface_inside(&floor, &wall));
        assert!(!should_be_swapped(&floor, &wall));
    }
}
