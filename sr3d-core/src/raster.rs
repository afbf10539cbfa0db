/// Software rasterizer writing packed colors into a frame buffer
use tracing::trace;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::math::Vec2;

/// Row-major grid of packed colors
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a buffer cleared to [`Color::BLACK`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| x + y * self.width)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel. Coordinates outside the buffer are ignored; colors
    /// that are not fully opaque are blended over the existing pixel.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.pixels[i] = if color.is_opaque() {
            color
        } else {
            self.pixels[i].blend(color)
        };
    }
}

/// A frame buffer plus the pen state used by the 2D drawing calls
#[derive(Debug, Clone)]
pub struct Canvas {
    frame: FrameBuffer,
    pub line_color: Color,
    pub fill_color: Color,
    pub cursor: Vec2,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self::from_frame(FrameBuffer::new(width, height)?))
    }

    pub fn from_frame(frame: FrameBuffer) -> Self {
        Self {
            frame,
            line_color: Color::WHITE,
            fill_color: Color::WHITE,
            cursor: Vec2::zeros(),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn width(&self) -> usize {
        self.frame.width
    }

    pub fn height(&self) -> usize {
        self.frame.height
    }

    pub fn clear(&mut self, color: Color) {
        self.frame.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.frame.set_pixel(x, y, color);
    }

    pub fn move_to(&mut self, p: &Vec2) {
        self.cursor = *p;
    }

    /// Draw from the cursor to `p` with the line color and move the cursor.
    pub fn line_to(&mut self, p: &Vec2) {
        let from = self.cursor;
        self.draw_line(&from, p, self.line_color);
        self.cursor = *p;
    }

    /// Step along the major axis one pixel at a time, flooring the
    /// position at each step. Plots `floor(steps) + 1` pixels where
    /// `steps = max(|dx|, |dy|)`; step `i` sits at `from + i * delta / steps`.
    ///
    /// Only the steps that can land inside the frame are visited, so a line
    /// reaching far off-screen costs no more than its visible part.
    pub fn draw_line(&mut self, from: &Vec2, to: &Vec2, color: Color) {
        let delta = to - from;
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            trace!(?from, ?to, "Skipping line with non-finite length");
            return;
        }

        let steps = delta.x.abs().max(delta.y.abs());
        let step = delta / steps.max(1.0);
        let last = steps as u64;

        let Some((x_lo, x_hi)) = visible_steps(from.x, step.x, self.frame.width, last) else {
            return;
        };
        let Some((y_lo, y_hi)) = visible_steps(from.y, step.y, self.frame.height, last) else {
            return;
        };

        let (start, (sx, sy)) = ((from.x as f64, from.y as f64), (step.x as f64, step.y as f64));
        for i in x_lo.max(y_lo)..=x_hi.min(y_hi) {
            let (x, y) = (start.0 + sx * i as f64, start.1 + sy * i as f64);
            self.frame.set_pixel(x.floor() as i32, y.floor() as i32, color);
        }
    }

    /// Fill a `w` x `h` rectangle with its top-left corner at (`x`, `y`)
    /// using the fill color.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.fill_clipped(x as i64, y as i64, w as i64, h as i64);
    }

    pub fn fill_centered_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.fill_clipped(
            x as i64 - (w / 2) as i64,
            y as i64 - (h / 2) as i64,
            w as i64,
            h as i64,
        );
    }

    fn fill_clipped(&mut self, x: i64, y: i64, w: i64, h: i64) {
        let color = self.fill_color;
        let (width, height) = (self.frame.width as i64, self.frame.height as i64);
        for y1 in y.max(0)..(y + h).min(height) {
            for x1 in x.max(0)..(x + w).min(width) {
                self.frame.set_pixel(x1 as i32, y1 as i32, color);
            }
        }
    }
}

/// Range of step indices `0..=last` whose coordinate `start + i * step`
/// can fall inside `0..limit`, padded by one step on each side. `None` when
/// no step is visible.
fn visible_steps(start: f32, step: f32, limit: usize, last: u64) -> Option<(u64, u64)> {
    let (start, step, limit) = (start as f64, step as f64, limit as f64);
    if step == 0.0 {
        return (0.0..limit).contains(&start).then_some((0, last));
    }

    let (a, b) = (-start / step, (limit - start) / step);
    let (lo, hi) = (a.min(b).floor() - 1.0, a.max(b).ceil() + 1.0);
    if hi < 0.0 || lo > last as f64 {
        return None;
    }
    Some((lo.max(0.0) as u64, hi.min(last as f64) as u64))
}
