//! Polygonal scenery: vertices, polygons, objects and the world that owns them.
//!
//! Polygons refer to their vertices by index into the owning object's vertex
//! array, so several polygons can share one vertex without aliasing.

use crate::math::ivec3::IVec3;

/// A single vertex in its three coordinate spaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertex {
    /// Object-local coordinates, fixed after load.
    pub local: IVec3,
    /// World coordinates, recomputed when the owning object is dirty.
    pub world: IVec3,
    /// View-aligned coordinates, recomputed every frame.
    pub aligned: IVec3,
}

impl Vertex {
    pub fn new(local: IVec3) -> Self {
        Self {
            local,
            world: local,
            aligned: local,
        }
    }
}

/// A flat-coloured polygon whose corners are indices into the object's vertices.
///
/// Edge `i` connects `vertices[i]` to `vertices[(i + 1) % n]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<usize>,
    pub color: u8,
}

impl Polygon {
    pub fn new(vertices: Vec<usize>, color: u8) -> Self {
        Self { vertices, color }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates the aligned coordinates of this polygon's corners.
    pub fn aligned<'a>(&'a self, vertices: &'a [Vertex]) -> impl Iterator<Item = IVec3> + 'a {
        self.vertices.iter().map(move |&i| vertices[i].aligned)
    }
}

/// A rigid body of vertices and polygons placed in the world.
#[derive(Clone, Debug)]
pub struct Object {
    /// World position of the local origin.
    pub origin: IVec3,
    /// Orientation in binary degrees.
    pub angles: IVec3,
    /// Uniform scale factor.
    pub scale: i32,
    pub vertices: Vec<Vertex>,
    pub polygons: Vec<Polygon>,
    /// Closed convex solid: backface culling is valid.
    pub convex: bool,
    /// Local-to-world transform must be recomputed.
    pub dirty: bool,
}

impl Object {
    pub fn new(vertices: Vec<IVec3>, polygons: Vec<Polygon>) -> Self {
        Self {
            origin: IVec3::ZERO,
            angles: IVec3::ZERO,
            scale: 1,
            vertices: vertices.into_iter().map(Vertex::new).collect(),
            polygons,
            convex: false,
            dirty: true,
        }
    }

    pub fn with_origin(mut self, origin: IVec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_angles(mut self, angles: IVec3) -> Self {
        self.angles = angles;
        self
    }

    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_convex(mut self, convex: bool) -> Self {
        self.convex = convex;
        self
    }

    /// Moves the object and flags it for a transform update.
    pub fn set_origin(&mut self, origin: IVec3) {
        self.origin = origin;
        self.dirty = true;
    }

    /// Reorients the object and flags it for a transform update.
    pub fn set_angles(&mut self, angles: IVec3) {
        self.angles = angles;
        self.dirty = true;
    }
}

/// All scenery objects. The set of objects is fixed after load.
#[derive(Clone, Debug, Default)]
pub struct World {
    objects: Vec<Object>,
}

impl World {
    pub fn new(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.objects.iter().map(|o| o.polygons.len()).sum()
    }

    pub fn mark_all_dirty(&mut self) {
        for object in &mut self.objects {
            object.dirty = true;
        }
    }
}
