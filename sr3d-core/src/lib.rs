/// SR3D Core Library - software transform and rasterization pipeline
///
/// This library provides the math kernel, mesh physics, projection and the
/// wireframe rasterizer. It knows nothing about windows or terminals: callers
/// hand it a time delta and input actions, and read back a packed-pixel
/// frame buffer.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod projection;
pub mod raster;
pub mod render;
pub mod scene;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use color::Color;
pub use error::{Error, Result};
pub use geometry::{Face, Mesh};
pub use input::Action;
pub use projection::{Projection, ProjectionMode};
pub use raster::{Canvas, FrameBuffer};
pub use render::{FrameStats, RenderOptions, Renderer};
pub use scene::Scene;
pub use transform::{Transform, Transform2d};
