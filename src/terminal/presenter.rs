//! Terminal presenter: Draws presented pixmaps as half-block character art.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block (`▀`): foreground is the top sample, background the bottom.
//! The pixmap is sampled down to the largest square that fits.

use super::output::OutputBuffer;
use crate::surface::Pixmap;
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// Renders pixmaps to a grid of terminal cells.
pub struct TerminalPresenter {
    /// Grid width in columns.
    cols: u16,
    /// Grid height in rows.
    rows: u16,
    /// Frame accumulated before the single flush.
    output: OutputBuffer,
    /// Frames rendered so far.
    frames: u64,
}

impl TerminalPresenter {
    /// Create a presenter for a grid of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            output: OutputBuffer::new(),
            frames: 0,
        }
    }

    /// Create a presenter sized to the current terminal, keeping the last
    /// row free for status text.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn from_terminal() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows.saturating_sub(1)))
    }

    /// Side of the square sample grid, in half-rows.
    fn side(&self) -> u32 {
        u32::from(self.cols).min(u32::from(self.rows) * 2)
    }

    /// Frames rendered so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Build the ANSI sequence for a frame without writing it.
    pub fn compose(&mut self, pixmap: &Pixmap) -> &OutputBuffer {
        let side = self.side();
        let size = pixmap.size();
        // Center of sample cell `i` along an axis of `len` pixels.
        let sample = |i: u32, len: u32| {
            let pos = (u64::from(i) * 2 + 1) * u64::from(len) / (u64::from(side) * 2);
            u32::try_from(pos).unwrap_or(u32::MAX)
        };

        self.output.clear();
        for row in 0..side.div_ceil(2) {
            self.output.cursor_move(0, u16::try_from(row).unwrap_or(u16::MAX));
            for col in 0..side {
                let x = sample(col, size.width);
                let top = pixmap.pixel(x, sample(row * 2, size.height));
                let bottom = pixmap.pixel(x, sample(row * 2 + 1, size.height));
                self.output.set_fg(top.unwrap_or_default());
                self.output.set_bg(bottom.or(top).unwrap_or_default());
                self.output.write_str(UPPER_HALF_BLOCK);
            }
        }
        self.output.reset_attrs();
        &self.output
    }

    /// Render a frame and flush it to `writer` in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn present<W: Write>(&mut self, pixmap: &Pixmap, writer: &mut W) -> io::Result<()> {
        self.compose(pixmap);
        self.output.flush_to(writer)?;
        self.frames += 1;
        Ok(())
    }
}

/// Alternate-screen session restored on drop.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Enter the alternate screen and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Rect, Rgb, Size, Surface};

    #[test]
    fn test_square_fit() {
        assert_eq!(TerminalPresenter::new(80, 24).side(), 48);
        assert_eq!(TerminalPresenter::new(20, 24).side(), 20);
    }

    #[test]
    fn test_compose_samples_pixels() {
        let mut pixmap = Pixmap::new(Size::new(4, 4));
        // Top half white, bottom half green.
        pixmap.fill(Rect::from_corners(0, 0, 4, 2), Rgb::WHITE);
        pixmap.fill(Rect::from_corners(0, 2, 4, 4), Rgb::GREEN);

        let mut presenter = TerminalPresenter::new(2, 1);
        let text = String::from_utf8(presenter.compose(&pixmap).as_bytes().to_vec()).unwrap();

        assert!(text.contains("\x1b[38;2;255;255;255m"));
        assert!(text.contains("\x1b[48;2;0;255;0m"));
        assert_eq!(text.matches(UPPER_HALF_BLOCK).count(), 2);
        assert!(text.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_present_counts_frames() {
        let pixmap = Pixmap::new(Size::new(8, 8));
        let mut presenter = TerminalPresenter::new(4, 2);
        let mut sink = Vec::new();
        presenter.present(&pixmap, &mut sink).unwrap();
        presenter.present(&pixmap, &mut sink).unwrap();
        assert_eq!(presenter.frames(), 2);
        assert!(!sink.is_empty());
    }
}
