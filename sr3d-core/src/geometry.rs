/// Geometry primitives and the mesh entity with its kinematic state
use tracing::debug;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::math::{radians, Mat4, Vec3};
use crate::transform::Transform;

/// A triangle face in model space.
///
/// Vertices are stored by value; faces never point back into a shared
/// vertex table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Face {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Unnormalized face normal, `(b - a) x (c - a)`.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Apply a 4x4 transform to every vertex.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            a: Transform::apply(&self.a, m),
            b: Transform::apply(&self.b, m),
            c: Transform::apply(&self.c, m),
        }
    }
}

/*
 Cube vertex numbering
   6--4
  /| /|
 1--2 |
 | 7|-5
 |/ |/
 0--3
*/
const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

const CUBE_FACES: [[usize; 3]; 12] = [
    // front
    [0, 2, 1],
    [0, 3, 2],
    // right
    [2, 3, 4],
    [3, 5, 4],
    // back
    [4, 5, 6],
    [5, 7, 6],
    // left
    [0, 1, 6],
    [0, 6, 7],
    // top
    [1, 2, 6],
    [2, 4, 6],
    // bottom
    [0, 7, 3],
    [3, 7, 5],
];

/// A triangle mesh together with its draw colors and physics state
#[derive(Debug, Clone)]
pub struct Mesh {
    faces: Vec<Face>,

    /// Edge color; [`Color::NONE`] disables edges.
    pub line_color: Color,
    /// Vertex marker color; [`Color::NONE`] disables markers.
    pub point_color: Color,

    /// Accumulated orientation. Increments are multiplied on and never
    /// re-orthogonalized.
    pub rotation: Mat4,
    pub scale: Vec3,
    pub position: Vec3,
    /// Added to `position` once per [`Mesh::advance`] call.
    pub linear_momentum: Vec3,
    /// Degrees per second around X (pitch), Y (yaw) and Z (roll).
    pub angular_momentum: Vec3,
    /// Seconds since creation.
    pub lifetime: f64,
}

impl Mesh {
    /// Create a mesh with room for `faces` triangles, all at the origin.
    ///
    /// Fails with [`Error::Allocation`] if the face buffer cannot be
    /// reserved.
    pub fn new(faces: usize) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(faces)
            .map_err(|_| Error::face_buffer(faces))?;
        buffer.resize(faces, Face::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros()));

        debug!(faces, "Created mesh");
        Ok(Self::with_buffer(buffer))
    }

    /// Take ownership of an existing face list.
    pub fn from_faces(faces: Vec<Face>) -> Self {
        debug!(faces = faces.len(), "Created mesh from faces");
        Self::with_buffer(faces)
    }

    fn with_buffer(faces: Vec<Face>) -> Self {
        Self {
            faces,
            line_color: Color::WHITE,
            point_color: Color::NONE,
            rotation: Mat4::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            position: Vec3::zeros(),
            linear_momentum: Vec3::zeros(),
            angular_momentum: Vec3::zeros(),
            lifetime: 0.0,
        }
    }

    /// Unit cube spanning -1..1 on every axis (12 triangles).
    pub fn cube() -> Result<Self> {
        let mut mesh = Self::new(CUBE_FACES.len())?;
        let vertex = |i: usize| Vec3::from(CUBE_VERTICES[i]);
        for (face, [a, b, c]) in mesh.faces.iter_mut().zip(CUBE_FACES) {
            *face = Face::new(vertex(a), vertex(b), vertex(c));
        }
        Ok(mesh)
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Release the face buffer. The mesh keeps its physics state but has
    /// nothing left to draw.
    pub fn destroy(&mut self) {
        debug!(faces = self.faces.len(), "Releasing mesh faces");
        self.faces = Vec::new();
    }

    /// Advance the physics state by `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        self.lifetime += delta;

        let increment_angles = self.angular_momentum * radians(delta as f32);
        let increment = Transform::euler(&Mat4::identity(), &increment_angles);
        self.rotation *= increment;

        self.position += self.linear_momentum;
    }

    /// Model-to-world transform: translate, then rotation, then scale.
    pub fn world_transform(&self) -> Mat4 {
        let t = Transform::translate(&Mat4::identity(), &self.position);
        Transform::scale(&(t * self.rotation), &self.scale)
    }

    pub fn add_pitch(&mut self, deg: f32) {
        self.angular_momentum.x += deg;
    }

    pub fn add_roll(&mut self, deg: f32) {
        self.angular_momentum.z += deg;
    }

    pub fn add_yaw(&mut self, deg: f32) {
        self.angular_momentum.y += deg;
    }

    /// Zero all momentum, keeping the current orientation and position.
    pub fn stop(&mut self) {
        self.angular_momentum = Vec3::zeros();
        self.linear_momentum = Vec3::zeros();
    }

    /// Zero all momentum and return to the initial pose.
    pub fn reset(&mut self) {
        self.stop();
        self.rotation = Mat4::identity();
        self.position = Vec3::zeros();
    }
}
