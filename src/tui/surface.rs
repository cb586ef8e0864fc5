//! # Terminal Surface
//!
//! Cursor-addressed drawing straight onto a ratatui [`Backend`].
//!
//! The dashboard repaints regions in place instead of building a full frame
//! and diffing it, so it does not go through `Terminal::draw`. Instead the
//! surface keeps a cursor and a current colour pair, turns every `print`
//! into cells, and hands them to `Backend::draw` on [`Surface::flush`].
//!
//! Anything that falls outside the terminal is dropped, and backend errors
//! are ignored: drawing is best-effort and never fails the render pass.
//!
//! Tests use a headless [`TestBackend`] surface and read the result back with
//! `Surface::row_text`. Those fixtures only exist under `cfg(test)` or the
//! `test-support` feature.

use ratatui::Terminal;
use ratatui::backend::Backend;
#[cfg(any(test, feature = "test-support"))]
use ratatui::backend::TestBackend;
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

pub struct Surface<B: Backend> {
    terminal: Terminal<B>,
    size: Size,
    cursor: Position,
    fg: Color,
    bg: Color,
    pending: Vec<(u16, u16, Cell)>,
}

impl<B: Backend> Surface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        let size = terminal.size().unwrap_or_default();
        Self {
            terminal,
            size,
            cursor: Position::ORIGIN,
            fg: Color::Reset,
            bg: Color::Reset,
            pending: Vec::new(),
        }
    }

    /// Re-read the terminal size and hide the cursor. Called once per pass.
    pub fn begin_frame(&mut self) -> Size {
        self.size = self.terminal.size().unwrap_or_default();
        let _ = self.terminal.backend_mut().hide_cursor();
        self.size
    }

    /// Size captured by the last [`Surface::begin_frame`].
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor = Position::new(x, y);
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_fg(&mut self, color: Color) {
        self.fg = color;
    }

    pub fn set_bg(&mut self, color: Color) {
        self.bg = color;
    }

    /// Advance the cursor without writing, leaving what is on screen.
    pub fn skip(&mut self, columns: u16) {
        self.cursor.x = self.cursor.x.saturating_add(columns);
    }

    pub fn print(&mut self, text: &str) {
        for ch in text.chars() {
            self.print_char(ch);
        }
    }

    pub fn print_char(&mut self, ch: char) {
        let width = ch.width().unwrap_or(0) as u16;
        if width == 0 {
            return;
        }
        let Position { x, y } = self.cursor;
        if y < self.size.height && x.saturating_add(width) <= self.size.width {
            let mut cell = Cell::default();
            cell.set_char(ch).set_fg(self.fg).set_bg(self.bg);
            self.pending.push((x, y, cell));
        }
        self.cursor.x = x.saturating_add(width);
    }

    /// Fill from the cursor up to the last usable column (`width - 1`).
    pub fn fill_line(&mut self, ch: char) {
        let end = self.size.width.saturating_sub(1);
        for _ in self.cursor.x..end {
            self.print_char(ch);
        }
    }

    /// Push queued cells to the backend and flush it.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            let backend = self.terminal.backend_mut();
            let _ = backend.draw(self.pending.iter().map(|(x, y, cell)| (*x, *y, cell)));
            self.pending.clear();
        }
        let _ = Backend::flush(self.terminal.backend_mut());
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Surface<TestBackend> {
    /// Headless surface of the given size.
    pub fn headless(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend does not fail");
        Self::new(terminal)
    }

    /// The symbols of row `y`, as currently shown.
    pub fn row_text(&self, y: u16) -> String {
        let buffer = self.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    /// Foreground colour of the cell at `(x, y)`.
    pub fn fg_at(&self, x: u16, y: u16) -> Color {
        self.backend().buffer()[(x, y)].fg
    }

    /// Background colour of the cell at `(x, y)`.
    pub fn bg_at(&self, x: u16, y: u16) -> Color {
        self.backend().buffer()[(x, y)].bg
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.backend_mut().resize(width, height);
    }
}
