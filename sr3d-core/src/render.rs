/// Per-frame mesh rendering: world transform, culling, projection, drawing
use tracing::trace;

use crate::geometry::{Face, Mesh};
use crate::math::Vec3;
use crate::projection::Projection;
use crate::raster::Canvas;

/// Side length in pixels of the square drawn at each vertex.
pub const DEFAULT_POINT_SIZE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub cull_backfaces: bool,
    pub point_size: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cull_backfaces: true,
            point_size: DEFAULT_POINT_SIZE,
        }
    }
}

/// Face counts from one draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.culled += rhs.culled;
    }
}

/// True when `face` (in world space) is turned toward `camera`.
///
/// The ray runs from the camera to the first vertex; the face is visible
/// when that ray and the face normal point the same way.
pub fn faces_camera(face: &Face, camera: &Vec3) -> bool {
    let camera_ray = face.a - camera;
    camera_ray.dot(&face.normal()) > 0.0
}

/// Draws meshes into a canvas through a projection
#[derive(Debug, Clone)]
pub struct Renderer {
    pub projection: Projection,
    pub options: RenderOptions,
}

impl Renderer {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn draw_mesh(&self, mesh: &Mesh, canvas: &mut Canvas) -> FrameStats {
        let transform = mesh.world_transform();
        let camera = self.projection.camera_position();
        let mut stats = FrameStats::default();

        canvas.line_color = mesh.line_color;
        canvas.fill_color = mesh.point_color;

        for face in mesh.faces() {
            let world = face.transformed(&transform);
            if self.options.cull_backfaces && !faces_camera(&world, &camera) {
                stats.culled += 1;
                continue;
            }
            self.draw_face(mesh, &world, canvas);
            stats.drawn += 1;
        }

        trace!(drawn = stats.drawn, culled = stats.culled, "Drew mesh");
        stats
    }

    /// Project a world-space face and draw its edges and vertex markers.
    /// A zero line or point color on `mesh` skips that part.
    fn draw_face(&self, mesh: &Mesh, world: &Face, canvas: &mut Canvas) {
        let [a, b, c] = world.vertices().map(|v| self.projection.project(&v));

        if !mesh.line_color.is_none() {
            canvas.move_to(&a);
            canvas.line_to(&b);
            canvas.line_to(&c);
            canvas.line_to(&a);
        }

        if !mesh.point_color.is_none() {
            let size = self.options.point_size;
            for p in [a, b, c] {
                canvas.fill_centered_rect(p.x as i32, p.y as i32, size, size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::math::Mat4;
    use crate::transform::Transform;

    fn lit_count(canvas: &Canvas) -> usize {
        canvas
            .frame()
            .pixels()
            .iter()
            .filter(|c| **c != Color::BLACK)
            .count()
    }

    fn renderer() -> Renderer {
        Renderer::new(Projection::new(200, 100))
    }

    #[test]
    fn test_faces_camera() {
        let camera = Vec3::new(0.0, 0.0, -5.0);
        // Normal +z, pointing along the camera ray
        let toward = Face::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        );
        assert!(toward.normal().z > 0.0);
        assert!(faces_camera(&toward, &camera));

        let away = Face::new(toward.a, toward.c, toward.b);
        assert!(!faces_camera(&away, &camera));
    }

    #[test]
    fn test_cube_head_on_shows_front_side() {
        let canvas = &mut Canvas::new(200, 100).unwrap();
        let cube = Mesh::cube().unwrap();
        let stats = renderer().draw_mesh(&cube, canvas);
        // Only the front side (two triangles) is visible head on
        assert_eq!(stats, FrameStats { drawn: 2, culled: 10 });
        assert!(lit_count(canvas) > 0);
    }

    #[test]
    fn test_culling_can_be_disabled() {
        let canvas = &mut Canvas::new(200, 100).unwrap();
        let cube = Mesh::cube().unwrap();
        let renderer = renderer().with_options(RenderOptions {
            cull_backfaces: false,
            ..RenderOptions::default()
        });
        let stats = renderer.draw_mesh(&cube, canvas);
        assert_eq!(stats, FrameStats { drawn: 12, culled: 0 });
    }

    #[test]
    fn test_zero_colors_draw_nothing() {
        let canvas = &mut Canvas::new(200, 100).unwrap();
        let mut cube = Mesh::cube().unwrap();
        cube.line_color = Color::NONE;
        cube.point_color = Color::NONE;
        let stats = renderer().draw_mesh(&cube, canvas);
        assert_eq!(stats.drawn, 2);
        assert_eq!(lit_count(canvas), 0);
    }

    #[test]
    fn test_points_only() {
        let canvas = &mut Canvas::new(200, 100).unwrap();
        let mut cube = Mesh::cube().unwrap();
        cube.line_color = Color::NONE;
        cube.point_color = Color::from_rgba(0, 255, 0, 255);
        cube.rotation = Transform::rot_y(&Mat4::identity(), 0.3);
        renderer().draw_mesh(&cube, canvas);

        let lit = lit_count(canvas);
        assert!(lit > 0);
        assert!(canvas
            .frame()
            .pixels()
            .iter()
            .all(|c| *c == Color::BLACK || *c == cube.point_color));
    }
}
