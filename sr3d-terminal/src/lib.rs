/// Terminal front end: presents the software-rendered frame with crossterm
use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use sr3d_core::math::Vec3;
use sr3d_core::{
    Canvas, Color, FrameStats, Mesh, Projection, RenderOptions, Renderer, Scene,
};

pub mod config;
pub mod keymap;
pub mod presenter;

pub use config::AppConfig;
pub use presenter::HalfBlockPresenter;

/// Terminal rows reserved above the frame for the status line.
const STATUS_ROWS: u16 = 1;

/// Frame buffer size for a terminal of `cols` x `rows` cells.
pub fn frame_size(cols: u16, rows: u16, config: &AppConfig) -> (usize, usize) {
    let width = config.width.unwrap_or(cols as usize).max(1);
    let pixel_rows = rows.saturating_sub(STATUS_ROWS) as usize * 2;
    let height = config.height.unwrap_or(pixel_rows).max(1);
    (width, height)
}

/// Build the scene described by `config`: the STL mesh if one is named,
/// the unit cube otherwise.
pub fn build_scene(config: &AppConfig) -> sr3d_core::Result<Scene> {
    let mut mesh = match &config.stl {
        Some(path) => sr3d_core::stl::load_stl(path)?,
        None => Mesh::cube()?,
    };
    mesh.line_color = config.line_color;
    mesh.point_color = config.point_color;
    mesh.angular_momentum = Vec3::from(config.angular_momentum);
    Ok(Scene::with_mesh(mesh))
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    config: AppConfig,
    scene: Scene,
    renderer: Renderer,
    canvas: Canvas,
    presenter: HalfBlockPresenter,
    running: bool,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: AppConfig) -> anyhow::Result<Self> {
        let (cols, rows) = terminal::size().context("querying terminal size")?;
        let (width, height) = frame_size(cols, rows, &config);
        info!(width, height, "Creating frame buffer");

        let projection = Projection::new(width, height).with_mode(config.projection);
        let renderer = Renderer::new(projection).with_options(RenderOptions {
            cull_backfaces: config.cull_backfaces,
            point_size: config.point_size,
        });
        let now = Instant::now();

        Ok(Self {
            scene,
            renderer,
            canvas: Canvas::new(width, height)?,
            presenter: HalfBlockPresenter::new(STATUS_ROWS),
            running: true,
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
            config,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.config.fps.max(1) as f64);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            // Update
            let delta = frame_start.duration_since(self.last_tick).as_secs_f64();
            self.last_tick = frame_start;
            self.update(delta);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        info!("Quit requested");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if let Some(action) = keymap::action_for_key(&key, self.config.key_step) {
                debug!(?action, "Input action");
                self.running = self.scene.apply(action);
            }
        }
    }

    fn update(&mut self, delta: f64) {
        self.scene.update(delta);

        if self.config.hue_speed != 0.0 {
            for mesh in &mut self.scene.meshes {
                if !mesh.line_color.is_none() {
                    let hue = mesh.lifetime * self.config.hue_speed;
                    mesh.line_color = Color::from_hsv(hue, 1.0, 1.0, 1.0);
                }
            }
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.canvas.clear(Color::BLACK);
        self.stats = self.scene.draw(&self.renderer, &mut self.canvas);

        let mut stdout = stdout();
        self.presenter.draw(self.canvas.frame(), &mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "SR3D | FPS: {:.1} | Faces: {} drawn, {} culled | W/X/Arrows/A/D=Pitch/Yaw E/R=Roll S=Stop Space=Reset Q=Quit",
                self.fps, self.stats.drawn, self.stats.culled
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
