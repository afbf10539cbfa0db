/// Half-block presenter for packed-pixel frame buffers
///
/// Each terminal cell shows two pixel rows: the upper half block glyph is
/// drawn with the top pixel as foreground and the bottom pixel as
/// background.
use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use sr3d_core::{Color, FrameBuffer};
use std::io::Write;

const UPPER_HALF_BLOCK: char = '▀';

/// Two vertically stacked pixels shown in one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub top: Color,
    pub bottom: Color,
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

/// Number of terminal rows needed for `pixel_rows` rows of pixels.
pub fn cell_rows(pixel_rows: usize) -> usize {
    pixel_rows.div_ceil(2)
}

/// Fold a frame into terminal cells, row-major. An odd last pixel row is
/// paired with black.
pub fn cells(frame: &FrameBuffer) -> Vec<Cell> {
    let (width, height) = (frame.width(), frame.height());
    let pixels = frame.pixels();
    let mut out = Vec::with_capacity(width * cell_rows(height));

    for row in 0..cell_rows(height) {
        let top = row * 2;
        for x in 0..width {
            let bottom = if top + 1 < height {
                pixels[(top + 1) * width + x]
            } else {
                Color::BLACK
            };
            out.push(Cell {
                top: pixels[top * width + x],
                bottom,
            });
        }
    }
    out
}

/// Writes frames to a terminal through crossterm commands
pub struct HalfBlockPresenter {
    origin_row: u16,
}

impl HalfBlockPresenter {
    /// Frames are drawn starting at terminal row `origin_row`.
    pub fn new(origin_row: u16) -> Self {
        Self { origin_row }
    }

    /// Queue the commands that draw `frame`. The caller flushes.
    pub fn draw<W: Write>(&self, frame: &FrameBuffer, writer: &mut W) -> std::io::Result<()> {
        let width = frame.width();
        let mut current: Option<Cell> = None;

        for (i, cell) in cells(frame).into_iter().enumerate() {
            if i % width == 0 {
                let row = self.origin_row as usize + i / width;
                writer.queue(MoveTo(0, row as u16))?;
            }

            // Only switch colors when they change
            if current.map(|c| c.top) != Some(cell.top) {
                writer.queue(SetForegroundColor(term_color(cell.top)))?;
            }
            if current.map(|c| c.bottom) != Some(cell.bottom) {
                writer.queue(SetBackgroundColor(term_color(cell.bottom)))?;
            }
            current = Some(cell);

            writer.queue(Print(UPPER_HALF_BLOCK))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
