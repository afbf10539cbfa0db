/// SR3D Terminal Demo - Spinning wireframe
///
/// Usage:
///   sr3d-terminal [--config app.json] [--stl model.stl] [--ortho] [--fps 30]
///
/// Controls:
///   - W/X or Up/Down: Pitch momentum
///   - A/D or Left/Right: Yaw momentum
///   - E/R: Roll momentum
///   - S: Stop, Space/0: Reset
///   - Q/ESC: Quit
///
/// Logs go to stderr; set `RUST_LOG` to change the level.

use std::env;

use anyhow::Context;
use sr3d_terminal::{build_scene, AppConfig, TerminalApp};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cfg = AppConfig::from_args(&args)?;
    info!(stl = ?cfg.stl, projection = ?cfg.projection, "Starting terminal renderer");

    let scene = build_scene(&cfg).context("building scene")?;
    let mut app = TerminalApp::new(scene, cfg)?;
    app.run()
}
