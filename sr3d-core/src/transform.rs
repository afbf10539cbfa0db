/// 2D and 3D transformation matrices
///
/// Every builder takes the matrix accumulated so far and right-multiplies the
/// new step onto it, so chained calls read in application order from the
/// outside in: `translate(scale(I, s), t)` scales first, then translates.
use crate::math::{from_homogeneous, to_homogeneous, Mat3, Mat4, Vec2, Vec3, Vec4};

/// Transform builder for 2D (screen space) transformations
pub struct Transform2d;

impl Transform2d {
    pub fn identity() -> Mat3 {
        Mat3::identity()
    }

    pub fn translate(m: &Mat3, t: &Vec2) -> Mat3 {
        m * Mat3::new_translation(t)
    }

    pub fn scale(m: &Mat3, s: &Vec2) -> Mat3 {
        m * Mat3::new_nonuniform_scaling(s)
    }

    pub fn rotate(m: &Mat3, a: f32) -> Mat3 {
        let (sin, cos) = a.sin_cos();
        #[rustfmt::skip]
        let n = Mat3::new(
            cos, -sin, 0.0,
            sin,  cos, 0.0,
            0.0,  0.0, 1.0,
        );
        m * n
    }

    /// Apply a 2D transform to a point (implicit w = 1, dropped afterwards).
    pub fn apply(p: &Vec2, m: &Mat3) -> Vec2 {
        let v = m * Vec3::new(p.x, p.y, 1.0);
        Vec2::new(v.x, v.y)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Mat4 {
        Mat4::identity()
    }

    /// Create a translation matrix composed onto `m`
    pub fn translate(m: &Mat4, t: &Vec3) -> Mat4 {
        m * Mat4::new_translation(t)
    }

    /// Create a scale matrix composed onto `m`
    pub fn scale(m: &Mat4, s: &Vec3) -> Mat4 {
        m * Mat4::new_nonuniform_scaling(s)
    }

    pub fn rot_x(m: &Mat4, a: f32) -> Mat4 {
        let (sin, cos) = a.sin_cos();
        #[rustfmt::skip]
        let n = Mat4::new(
            1.0, 0.0,  0.0, 0.0,
            0.0, cos, -sin, 0.0,
            0.0, sin,  cos, 0.0,
            0.0, 0.0,  0.0, 1.0,
        );
        m * n
    }

    pub fn rot_y(m: &Mat4, a: f32) -> Mat4 {
        let (sin, cos) = a.sin_cos();
        #[rustfmt::skip]
        let n = Mat4::new(
             cos, 0.0, sin, 0.0,
             0.0, 1.0, 0.0, 0.0,
            -sin, 0.0, cos, 0.0,
             0.0, 0.0, 0.0, 1.0,
        );
        m * n
    }

    pub fn rot_z(m: &Mat4, a: f32) -> Mat4 {
        let (sin, cos) = a.sin_cos();
        #[rustfmt::skip]
        let n = Mat4::new(
            cos, -sin, 0.0, 0.0,
            sin,  cos, 0.0, 0.0,
            0.0,  0.0, 1.0, 0.0,
            0.0,  0.0, 0.0, 1.0,
        );
        m * n
    }

    /// Compose Euler angles (radians) onto `m`.
    ///
    /// Rotations are applied as X, then Z, then Y. Changing the order changes
    /// the resulting orientation.
    pub fn euler(m: &Mat4, angles: &Vec3) -> Mat4 {
        let m = Self::rot_x(m, angles.x);
        let m = Self::rot_z(&m, angles.z);
        Self::rot_y(&m, angles.y)
    }

    /// Perspective matrix mapping view space to clip space, with the view
    /// depth carried into `w`.
    ///
    /// `aspect` is height / width.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov / 2.0).tan();
        let depth = far - near;
        #[rustfmt::skip]
        let m = Mat4::new(
            aspect * f, 0.0, 0.0,         0.0,
            0.0,        f,   0.0,         0.0,
            0.0,        0.0, far / depth, -far * near / depth,
            0.0,        0.0, 1.0,         0.0,
        );
        m
    }

    /// Apply a 4x4 transform to a 3D point.
    ///
    /// The point is lifted with w = 1 and w is dropped afterwards; there is no
    /// perspective divide here.
    pub fn apply(p: &Vec3, m: &Mat4) -> Vec3 {
        from_homogeneous(&Self::apply4(&to_homogeneous(p), m))
    }

    /// Multiply a full homogeneous vector, keeping `w`. Clip-space callers
    /// such as [`crate::Projection::clip`] need it; `apply` builds on it.
    pub fn apply4(v: &Vec4, m: &Mat4) -> Vec4 {
        m * v
    }
}
