/// A set of meshes driven as one unit each frame
use crate::geometry::Mesh;
use crate::input::Action;
use crate::raster::Canvas;
use crate::render::{FrameStats, Renderer};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh(mesh: Mesh) -> Self {
        Self { meshes: vec![mesh] }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Advance every mesh by `delta` seconds.
    pub fn update(&mut self, delta: f64) {
        for mesh in &mut self.meshes {
            mesh.advance(delta);
        }
    }

    /// Draw every mesh in insertion order.
    pub fn draw(&self, renderer: &Renderer, canvas: &mut Canvas) -> FrameStats {
        let mut stats = FrameStats::default();
        for mesh in &self.meshes {
            stats += renderer.draw_mesh(mesh, canvas);
        }
        stats
    }

    /// Apply an input action to every mesh. Returns `false` on quit.
    pub fn apply(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return false;
        }
        for mesh in &mut self.meshes {
            mesh.apply(action);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_update_and_apply_reach_every_mesh() {
        let mut scene = Scene::with_mesh(Mesh::cube().unwrap());
        scene.add_mesh(Mesh::cube().unwrap());

        assert!(scene.apply(Action::Yaw(10.0)));
        scene.update(0.5);

        for mesh in &scene.meshes {
            assert_eq!(mesh.angular_momentum, Vec3::new(0.0, 10.0, 0.0));
            assert_eq!(mesh.lifetime, 0.5);
        }
        assert!(!scene.apply(Action::Quit));
    }
}
