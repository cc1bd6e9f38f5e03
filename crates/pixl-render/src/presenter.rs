#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! A [`Presenter`] keeps the last frame it wrote, diffs each new frame
//! against it, and emits only the changed runs. It tracks the terminal's
//! cursor position and current colors so redundant cursor moves and SGR
//! sequences are skipped.
//!
//! The compositor never talks to a terminal directly: output goes through
//! the [`FrameSink`] trait, passed in by the caller. [`HeadlessSink`] is the
//! in-memory implementation used for tests and snapshots.
//!
//! # Usage
//!
//! ```
//! use pixl_render::cell::Pixel;
//! use pixl_render::grid::Grid;
//! use pixl_render::presenter::{FrameSink, Presenter, PresenterConfig};
//!
//! let mut presenter = Presenter::new(Vec::new(), PresenterConfig::default());
//! let mut frame: Grid<Pixel> = Grid::filled(4, 1, Pixel::from_char(' '));
//! frame.set(0, 0, Pixel::from_char('A'));
//! presenter.present(&frame).unwrap();
//! let bytes = presenter.into_inner().unwrap();
//! assert!(String::from_utf8_lossy(&bytes).contains('A'));
//! ```

use std::io::{self, BufWriter, Write};

use pixl_core::Vec2;
use unicode_width::UnicodeWidthChar;

use crate::ansi;
use crate::cell::{Color, Pixel};
use crate::diff::FrameDiff;
use crate::grid::Grid;
use crate::view::View;

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// Destination for finished frames.
pub trait FrameSink {
    /// Write `frame` out. Called once per composed frame.
    fn present(&mut self, frame: &dyn View<Pixel>) -> io::Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn present(&mut self, frame: &dyn View<Pixel>) -> io::Result<()> {
        (**self).present(frame)
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn present(&mut self, frame: &dyn View<Pixel>) -> io::Result<()> {
        (**self).present(frame)
    }
}

/// Presenter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterConfig {
    /// Terminal cell where frame `(0, 0)` is drawn. Default: `(0, 0)`.
    pub origin: Vec2,
    /// Hide the cursor while a frame is written. Default: true.
    pub hide_cursor: bool,
    /// Bracket each frame in DEC 2026 synchronized output. Default: false.
    pub sync_output: bool,
    /// Clear the screen before repainting after a size change. Default: true.
    pub reset_on_resize: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            hide_cursor: true,
            sync_output: false,
            reset_on_resize: true,
        }
    }
}

impl PresenterConfig {
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_hide_cursor(mut self, hide_cursor: bool) -> Self {
        self.hide_cursor = hide_cursor;
        self
    }

    #[must_use]
    pub fn with_sync_output(mut self, sync_output: bool) -> Self {
        self.sync_output = sync_output;
        self
    }

    #[must_use]
    pub fn with_reset_on_resize(mut self, reset_on_resize: bool) -> Self {
        self.reset_on_resize = reset_on_resize;
        self
    }
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    config: PresenterConfig,
    /// Last frame written (None = nothing written yet, repaint everything).
    previous: Option<Grid<Pixel>>,
    /// Current `(foreground, background)` (None = unknown/reset).
    current_style: Option<(Color, Color)>,
    /// Cursor position in frame coordinates (None = unknown).
    cursor: Option<Vec2>,
    frames: u64,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W, config: PresenterConfig) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            config,
            previous: None,
            current_style: None,
            cursor: None,
            frames: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The last frame written, if any.
    pub fn previous(&self) -> Option<&Grid<Pixel>> {
        self.previous.as_ref()
    }

    fn write_frame(&mut self, frame: &dyn View<Pixel>) -> io::Result<()> {
        let _span = pixl_core::debug_span!("present").entered();

        let size = frame.size();
        let resized = self.previous.as_ref().is_some_and(|p| p.size() != size);
        if resized {
            pixl_core::debug!(width = size.x, height = size.y, "frame resized, repainting");
            if self.config.reset_on_resize {
                self.writer.write_all(ansi::CLEAR_SCREEN)?;
                self.reset_state();
            }
        }
        let diff = match &self.previous {
            Some(previous) if !resized => FrameDiff::compute(previous, frame),
            _ => FrameDiff::full(size),
        };
        self.frames += 1;

        if diff.is_empty() {
            return Ok(());
        }

        if self.config.sync_output {
            self.writer.write_all(ansi::SYNC_BEGIN)?;
        }
        if self.config.hide_cursor {
            self.writer.write_all(ansi::CURSOR_HIDE)?;
        }

        let runs = diff.runs();
        pixl_core::trace!(runs = runs.len(), changes = diff.len(), "emitting runs");
        for run in runs {
            for x in run.x0..=run.x1 {
                self.emit_cell(Vec2::new(x, run.y), frame.get(x, run.y))?;
            }
        }

        self.writer.write_all(ansi::RESET)?;
        self.current_style = None;

        if self.config.hide_cursor {
            self.writer.write_all(ansi::CURSOR_SHOW)?;
        }
        if self.config.sync_output {
            self.writer.write_all(ansi::SYNC_END)?;
        }
        self.writer.flush()
    }

    fn emit_cell(&mut self, position: Vec2, pixel: Pixel) -> io::Result<()> {
        let Some((col, row)) = self.terminal_position(position) else {
            self.cursor = None;
            return Ok(());
        };
        if self.cursor != Some(position) {
            ansi::move_to(&mut self.writer, row, col)?;
            self.cursor = Some(position);
        }

        let style = (pixel.foreground, pixel.background);
        if self.current_style != Some(style) {
            ansi::colors(&mut self.writer, pixel.foreground, pixel.background)?;
            self.current_style = Some(style);
        }

        let glyph = display_char(pixel);
        let mut buf = [0u8; 4];
        self.writer.write_all(glyph.encode_utf8(&mut buf).as_bytes())?;

        // Only single-column glyphs advance the cursor predictably.
        self.cursor = match glyph.width() {
            Some(1) => Some(position + Vec2::new(1, 0)),
            _ => None,
        };
        Ok(())
    }

    fn terminal_position(&self, position: Vec2) -> Option<(u16, u16)> {
        let p = position + self.config.origin;
        Some((u16::try_from(p.x).ok()?, u16::try_from(p.y).ok()?))
    }

    fn reset_state(&mut self) {
        self.current_style = None;
        self.cursor = None;
    }

    /// Clear the entire screen and forget the previous frame.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.writer.write_all(ansi::CLEAR_SCREEN)?;
        self.reset();
        self.writer.flush()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.writer.write_all(ansi::CURSOR_HIDE)?;
        self.writer.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.writer.write_all(ansi::CURSOR_SHOW)?;
        self.writer.flush()
    }

    /// Forget all terminal state; the next frame is repainted in full.
    pub fn reset(&mut self) {
        self.reset_state();
        self.previous = None;
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Get the inner writer, flushing buffered output first.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

impl<W: Write> FrameSink for Presenter<W> {
    fn present(&mut self, frame: &dyn View<Pixel>) -> io::Result<()> {
        let result = self.write_frame(frame);
        match result {
            Ok(()) => self.previous = Some(frame.bake()),
            Err(_) => self.reset(),
        }
        result
    }
}

/// The glyph a terminal should print for `pixel`.
fn display_char(pixel: Pixel) -> char {
    if pixel.has_transparent_char() || pixel.character.is_control() {
        Pixel::BLANK_CHAR
    } else {
        pixel.character
    }
}

/// In-memory sink that keeps the last presented frame.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSink {
    last: Option<Grid<Pixel>>,
    frames: u64,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame, baked.
    pub fn last(&self) -> Option<&Grid<Pixel>> {
        self.last.as_ref()
    }

    /// Number of frames presented.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The glyphs of the last frame, one string per row.
    pub fn lines(&self) -> Vec<String> {
        self.last
            .as_ref()
            .map(|frame| (0..frame.height()).map(|y| frame.row_text(y)).collect())
            .unwrap_or_default()
    }
}

impl FrameSink for HeadlessSink {
    fn present(&mut self, frame: &dyn View<Pixel>) -> io::Result<()> {
        self.last = Some(frame.bake());
        self.frames += 1;
        Ok(())
    }
}
