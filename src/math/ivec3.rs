//! Integer 3D coordinates used for geometry stored on vertices.

use std::ops::{Add, Neg, Sub};

use super::vec3::Vec3;

/// A point in an integer coordinate space (local, world, or view-aligned).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Rounds each component of a float vector to the nearest integer.
    pub fn round_from(v: Vec3) -> Self {
        Self::new(v.x.round() as i32, v.y.round() as i32, v.z.round() as i32)
    }
}

impl Add for IVec3 {
    type Output = IVec3;

    fn add(self, rhs: IVec3) -> Self::Output {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IVec3 {
    type Output = IVec3;

    fn sub(self, rhs: IVec3) -> Self::Output {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for IVec3 {
    type Output = IVec3;

    fn neg(self) -> Self::Output {
        IVec3::new(-self.x, -self.y, -self.z)
    }
}
