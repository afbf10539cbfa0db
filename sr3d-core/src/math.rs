/// Vector and matrix types shared by every pipeline stage
///
/// Everything is `f32`. Matrices follow the usual column-vector convention:
/// a point is transformed as `M * v`, so `A * B` applies `B` first.
use nalgebra as na;

pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Vec4 = na::Vector4<f32>;

/// 2D affine transform in homogeneous form.
pub type Mat3 = na::Matrix3<f32>;
/// 3D affine (or projective) transform in homogeneous form.
pub type Mat4 = na::Matrix4<f32>;

/// Lift a 3D point to homogeneous coordinates (w = 1).
#[inline]
pub fn to_homogeneous(p: &Vec3) -> Vec4 {
    Vec4::new(p.x, p.y, p.z, 1.0)
}

/// Drop the homogeneous coordinate without dividing by it.
#[inline]
pub fn from_homogeneous(v: &Vec4) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Rotate a 2D vector counterclockwise by `a` radians.
///
/// The renderer works with matrices; this is for hosts rotating overlay
/// or screen-space points directly.
pub fn vec2_rotate(p: &Vec2, a: f32) -> Vec2 {
    let (sin, cos) = a.sin_cos();
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Degrees to radians
#[inline]
pub fn radians(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
        assert_eq!(a.dot(&b), 32.0);
    }

    #[test]
    fn test_cross_product() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_length() {
        assert!((Vec2::new(3.0, 4.0).norm() - 5.0).abs() < EPS);
        assert!((Vec3::new(2.0, 3.0, 6.0).norm() - 7.0).abs() < EPS);
    }

    #[test]
    fn test_homogeneous_round_trip() {
        let p = Vec3::new(1.5, -2.0, 0.25);
        let h = to_homogeneous(&p);
        assert_eq!(h.w, 1.0);
        assert_eq!(from_homogeneous(&h), p);
    }

    #[test]
    fn test_vec2_rotate_quarter_turn() {
        let p = vec2_rotate(&Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }
}
