//! Composable affine transform and the two vertex passes built on it.
//!
//! A [`Transform`] holds one running matrix. Every operation pre-multiplies
//! its own matrix onto the running one, so operations apply to points in the
//! order they are called:
//!
//! ```ignore
//! let mut t = Transform::new();
//! t.scale(2.0, 2.0, 2.0).rotate(0, 64, 0).translate(100, 0, 0);
//! // points are scaled, then rotated, then translated
//! ```
//!
//! [`update_object`] runs the local-to-world pass for dirty objects only;
//! [`align_world`] runs the world-to-view pass over every object.

use crate::math::{ivec3::IVec3, mat4::Mat4, units_to_radians};
use crate::world::{Object, World};

/// Eye position and orientation (binary degrees) used to align the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewPose {
    pub position: IVec3,
    pub angles: IVec3,
}

/// A running 4x4 transform built from scale, rotate, translate and reflect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Create an identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// The composed matrix.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Reset to the identity matrix.
    pub fn reset(&mut self) -> &mut Self {
        self.matrix = Mat4::identity();
        self
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.compose(Mat4::scaling(sx, sy, sz))
    }

    /// Rotate by binary-degree angles, about Y first, then X, then Z.
    pub fn rotate(&mut self, ax: i32, ay: i32, az: i32) -> &mut Self {
        self.compose(Mat4::rotation_y(units_to_radians(ay)))
            .compose(Mat4::rotation_x(units_to_radians(ax)))
            .compose(Mat4::rotation_z(units_to_radians(az)))
    }

    /// Undo `rotate(ax, ay, az)`: Z first, then X, then Y, each negated.
    pub fn unrotate(&mut self, ax: i32, ay: i32, az: i32) -> &mut Self {
        self.compose(Mat4::rotation_z(units_to_radians(-az)))
            .compose(Mat4::rotation_x(units_to_radians(-ax)))
            .compose(Mat4::rotation_y(units_to_radians(-ay)))
    }

    pub fn translate(&mut self, tx: i32, ty: i32, tz: i32) -> &mut Self {
        self.compose(Mat4::translation(tx as f32, ty as f32, tz as f32))
    }

    /// Mirror each flagged axis.
    pub fn reflect(&mut self, rx: bool, ry: bool, rz: bool) -> &mut Self {
        self.compose(Mat4::reflection(rx, ry, rz))
    }

    /// Transform a point, rounding to integer coordinates.
    #[inline]
    pub fn apply(&self, p: IVec3) -> IVec3 {
        self.matrix.transform_point(p)
    }

    fn compose(&mut self, op: Mat4) -> &mut Self {
        self.matrix = op * self.matrix;
        self
    }
}

/// Recompute world coordinates of a dirty object and clear its flag.
///
/// Returns `false` without touching the object when it is clean.
pub fn update_object(object: &mut Object) -> bool {
    if !object.dirty {
        return false;
    }

    let s = object.scale as f32;
    let mut t = Transform::new();
    t.scale(s, s, s)
        .rotate(object.angles.x, object.angles.y, object.angles.z)
        .translate(object.origin.x, object.origin.y, object.origin.z);

    for vertex in &mut object.vertices {
        vertex.world = t.apply(vertex.local);
    }
    object.dirty = false;
    true
}

/// Express every object's world coordinates relative to the viewer.
pub fn align_world(world: &mut World, view: &ViewPose) {
    let mut t = Transform::new();
    t.translate(-view.position.x, -view.position.y, -view.position.z)
        .rotate(-view.angles.x, -view.angles.y, -view.angles.z);

    for object in world.objects_mut() {
        for vertex in &mut object.vertices {
            vertex.aligned = t.apply(vertex.world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Polygon;
    use approx::assert_abs_diff_eq;

    fn cube_corner_object() -> Object {
        Object::new(
            vec![IVec3::new(10, 0, 0), IVec3::new(0, 10, 0), IVec3::new(0, 0, 10)],
            vec![Polygon::new(vec![0, 1, 2], 1)],
        )
    }

    #[test]
    fn test_new_is_identity() {
        assert_eq!(Transform::new().matrix(), Mat4::identity());
    }

    #[test]
    fn test_operations_apply_in_call_order() {
        let mut t = Transform::new();
        t.scale(2.0, 2.0, 2.0).translate(5, 0, 0);
        assert_eq!(t.apply(IVec3::new(1, 1, 1)), IVec3::new(7, 2, 2));

        let mut u = Transform::new();
        u.translate(5, 0, 0).scale(2.0, 2.0, 2.0);
        assert_eq!(u.apply(IVec3::new(1, 1, 1)), IVec3::new(12, 2, 2));
    }

    #[test]
    fn test_rotate_round_trip_restores_matrix() {
        let mut t = Transform::new();
        t.translate(3, -4, 5).rotate(17, 200, 91).unrotate(17, 200, 91);
        let mut expected = Transform::new();
        expected.translate(3, -4, 5);
        for row in 0..4 {
            for col in 0..4 {
                assert_abs_diff_eq!(
                    t.matrix().get(row, col),
                    expected.matrix().get(row, col),
                    epsilon = 1e-4
                );
            }
        }
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let mut t = Transform::new();
        t.rotate(0, 64, 0);
        assert_eq!(t.apply(IVec3::new(0, 0, 100)), IVec3::new(100, 0, 0));
    }

    #[test]
    fn test_reset_and_reflect() {
        let mut t = Transform::new();
        t.translate(9, 9, 9).reset().reflect(false, true, false);
        assert_eq!(t.apply(IVec3::new(1, 2, 3)), IVec3::new(1, -2, 3));
    }

    #[test]
    fn test_update_object_only_when_dirty() {
        let mut obj = cube_corner_object()
            .with_origin(IVec3::new(100, 0, 0))
            .with_scale(2);
        assert!(update_object(&mut obj));
        assert!(!obj.dirty);
        assert_eq!(obj.vertices[0].world, IVec3::new(120, 0, 0));

        // A clean object keeps stale world coordinates.
        obj.origin = IVec3::new(0, 0, 0);
        assert!(!update_object(&mut obj));
        assert_eq!(obj.vertices[0].world, IVec3::new(120, 0, 0));

        obj.set_origin(IVec3::new(0, 0, 0));
        assert!(update_object(&mut obj));
        assert_eq!(obj.vertices[0].world, IVec3::new(20, 0, 0));
    }

    #[test]
    fn test_align_world_translates_then_rotates() {
        let mut world = World::new(vec![cube_corner_object()]);
        for object in world.objects_mut() {
            update_object(object);
        }
        let view = ViewPose {
            position: IVec3::new(0, 0, -50),
            angles: IVec3::new(0, 64, 0),
        };
        align_world(&mut world, &view);
        // (0,0,10) moves to (0,0,60), then turns a quarter back about Y.
        assert_eq!(
            world.objects()[0].vertices[2].aligned,
            IVec3::new(-60, 0, 0)
        );
    }
}
