/// Application configuration.
///
/// Loaded from a JSON file and command-line flags; every field has a default
/// so an empty object (or no file at all) is a valid configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sr3d_core::{Color, ProjectionMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame buffer width in pixels. Defaults to the terminal width.
    #[serde(default)]
    pub width: Option<usize>,
    /// Frame buffer height in pixels. Defaults to twice the terminal height
    /// minus the status line.
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_line_color")]
    pub line_color: Color,
    /// Zero disables vertex markers.
    #[serde(default)]
    pub point_color: Color,
    #[serde(default = "default_point_size")]
    pub point_size: i32,
    #[serde(default)]
    pub projection: ProjectionMode,
    #[serde(default = "default_true")]
    pub cull_backfaces: bool,
    /// Initial pitch, yaw and roll momentum in degrees per second.
    #[serde(default = "default_angular_momentum")]
    pub angular_momentum: [f32; 3],
    /// Momentum change per key press, degrees per second.
    #[serde(default = "default_key_step")]
    pub key_step: f32,
    /// Cycle the line hue at this many degrees per second. Zero keeps
    /// `line_color` fixed.
    #[serde(default)]
    pub hue_speed: f64,
    /// Mesh to load instead of the built-in cube.
    #[serde(default)]
    pub stl: Option<PathBuf>,
}

fn default_fps() -> u32 {
    30
}

fn default_line_color() -> Color {
    Color::WHITE
}

fn default_point_size() -> i32 {
    sr3d_core::render::DEFAULT_POINT_SIZE
}

fn default_true() -> bool {
    true
}

fn default_angular_momentum() -> [f32; 3] {
    [15.0, 25.0, 0.0]
}

fn default_key_step() -> f32 {
    1.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            fps: default_fps(),
            line_color: default_line_color(),
            point_color: Color::NONE,
            point_size: default_point_size(),
            projection: ProjectionMode::default(),
            cull_backfaces: true,
            angular_momentum: default_angular_momentum(),
            key_step: default_key_step(),
            hue_speed: 0.0,
            stl: None,
        }
    }
}

impl AppConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Build a config from command-line arguments, program name excluded.
    /// `--config` is read first and the other flags override it.
    pub fn from_args(args: &[String]) -> anyhow::Result<Self> {
        let mut cfg = match args.iter().position(|a| a == "--config") {
            Some(i) => Self::load(Path::new(flag_value(args, i)?))?,
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => i += 1,
                "--stl" => {
                    cfg.stl = Some(PathBuf::from(flag_value(args, i)?));
                    i += 1;
                }
                "--fps" => {
                    let value = flag_value(args, i)?;
                    cfg.fps = value
                        .parse()
                        .with_context(|| format!("--fps needs a number, got {value:?}"))?;
                    i += 1;
                }
                "--ortho" => cfg.projection = ProjectionMode::Orthographic,
                other => anyhow::bail!("unknown argument {other:?}"),
            }
            i += 1;
        }
        Ok(cfg)
    }
}

fn flag_value<'a>(args: &'a [String], i: usize) -> anyhow::Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .filter(|v| !v.starts_with("--"))
        .with_context(|| format!("{} needs a value", args[i]))
}
