/// Camera and projection utilities
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::{to_homogeneous, Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::transform::{Transform, Transform2d};

/// Distance the default camera is pulled back along z.
pub const CAMERA_DISTANCE: f32 = 5.0;
pub const FIELD_OF_VIEW_DEG: f32 = 60.0;
pub const NEAR: f32 = 0.3;
pub const FAR: f32 = 1000.0;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Maps world-space points onto the pixel grid
#[derive(Debug, Clone)]
pub struct Projection {
    pub mode: ProjectionMode,
    /// Normalized 2D coordinates to pixels.
    pub view_transform: Mat3,
    /// World to camera space. Only translations are supported, see
    /// [`Projection::camera_position`].
    pub camera_transform: Mat4,
    pub perspective_matrix: Mat4,
}

impl Projection {
    /// Default projection for a `width` x `height` frame.
    ///
    /// The origin sits in the middle of the frame and one unit spans half the
    /// frame height, so y = -1..1 covers the full height and the horizontal
    /// extent depends on the aspect ratio. The camera is pulled back to
    /// z = [`CAMERA_DISTANCE`].
    pub fn new(width: usize, height: usize) -> Self {
        let center = Vec2::new((width / 2) as f32, (height / 2) as f32);
        let unit = (height / 2) as f32;
        let view_transform = Transform2d::scale(
            &Transform2d::translate(&Transform2d::identity(), &center),
            &Vec2::new(unit, unit),
        );

        let camera_transform =
            Transform::translate(&Transform::identity(), &Vec3::new(0.0, 0.0, CAMERA_DISTANCE));

        let aspect = height as f32 / width.max(1) as f32;
        let perspective_matrix =
            Transform::perspective(FIELD_OF_VIEW_DEG.to_radians(), aspect, NEAR, FAR);

        debug!(width, height, "Initialized projection");

        Self {
            mode: ProjectionMode::Perspective,
            view_transform,
            camera_transform,
            perspective_matrix,
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Project a world-space point using the current mode.
    pub fn project(&self, point: &Vec3) -> Vec2 {
        match self.mode {
            ProjectionMode::Orthographic => self.orthographic(point),
            ProjectionMode::Perspective => self.perspective(point),
        }
    }

    /// Drop z and map to pixels.
    pub fn orthographic(&self, point: &Vec3) -> Vec2 {
        Transform2d::apply(&point.xy(), &self.view_transform)
    }

    /// Move into camera space, divide x and y by depth, then map to pixels.
    ///
    /// Points at depth zero produce non-finite coordinates; there is no
    /// clipping against the view volume.
    pub fn perspective(&self, point: &Vec3) -> Vec2 {
        let p = Transform::apply(point, &self.camera_transform);
        let normalized = Vec2::new(p.x / p.z, p.y / p.z);
        Transform2d::apply(&normalized, &self.view_transform)
    }

    /// Clip-space coordinates through the camera and perspective matrices.
    /// `w` carries the camera-space depth.
    ///
    /// Neither drawing mode uses this; it is for hosts that want a depth
    /// test or their own frustum checks.
    pub fn clip(&self, point: &Vec3) -> Vec4 {
        let view = Transform::apply(point, &self.camera_transform);
        Transform::apply4(&to_homogeneous(&view), &self.perspective_matrix)
    }

    /// World-space camera position, derived from the camera transform.
    ///
    /// Only correct while the camera transform is a pure translation.
    pub fn camera_position(&self) -> Vec3 {
        let origin = Vec3::zeros();
        origin - Transform::apply(&origin, &self.camera_transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_projection_creation() {
        let projection = Projection::new(800, 600);
        assert_eq!(projection.mode, ProjectionMode::Perspective);
        assert!((projection.camera_position() - Vec3::new(0.0, 0.0, -5.0)).norm() < EPS);
    }

    #[test]
    fn test_view_transform_maps_unit_height() {
        let projection = Projection::new(800, 600);
        let top = Transform2d::apply(&Vec2::new(0.0, -1.0), &projection.view_transform);
        let bottom = Transform2d::apply(&Vec2::new(0.0, 1.0), &projection.view_transform);
        assert!((top - Vec2::new(400.0, 0.0)).norm() < EPS);
        assert!((bottom - Vec2::new(400.0, 600.0)).norm() < EPS);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let projection = Projection::new(800, 600);
        let p = projection.perspective(&Vec3::zeros());
        assert!((p - Vec2::new(400.0, 300.0)).norm() < EPS);
    }

    #[test]
    fn test_perspective_foreshortens() {
        let projection = Projection::new(800, 600);
        let near = projection.perspective(&Vec3::new(1.0, 0.0, -1.0));
        let far = projection.perspective(&Vec3::new(1.0, 0.0, 1.0));
        // 1/4 and 1/6 of a unit right of center
        assert!((near.x - (400.0 + 300.0 / 4.0)).abs() < EPS);
        assert!((far.x - (400.0 + 300.0 / 6.0)).abs() < EPS);
    }

    #[test]
    fn test_orthographic_ignores_depth() {
        let projection = Projection::new(800, 600).with_mode(ProjectionMode::Orthographic);
        let a = projection.project(&Vec3::new(0.5, -0.5, -3.0));
        let b = projection.project(&Vec3::new(0.5, -0.5, 9.0));
        assert_eq!(a, b);
        assert!((a - Vec2::new(550.0, 150.0)).norm() < EPS);
    }

    #[test]
    fn test_clip_depth() {
        let projection = Projection::new(800, 600);
        let clip = projection.clip(&Vec3::new(0.0, 0.0, 1.0));
        assert!((clip.w - 6.0).abs() < EPS);
    }
}
