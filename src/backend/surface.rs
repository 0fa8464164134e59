use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use super::Backend;
use crate::theme::CellStyle;

/// Render target handed to widgets for one frame.
///
/// Every write is clipped to the backend geometry, so widgets never fail
/// because part of them falls off-screen.
pub struct Surface<'a> {
    backend: &'a mut dyn Backend,
    area: Rect,
    cursor: Option<(u16, u16)>,
}

impl<'a> Surface<'a> {
    pub fn new(backend: &'a mut dyn Backend) -> Self {
        let (rows, cols) = backend.geometry();
        Self {
            backend,
            area: Rect::new(0, 0, cols, rows),
            cursor: None,
        }
    }

    /// Whole drawable area
    pub fn area(&self) -> Rect {
        self.area
    }

    fn contains(&self, x: u16, y: u16) -> bool {
        x < self.area.width && y < self.area.height
    }

    /// Write a single glyph at column `x`, row `y`. Returns false when clipped.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: impl Into<CellStyle>) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.backend.write_cell(y, x, ch, style.into());
        true
    }

    /// Write `text` starting at `(x, y)`, using at most `max_width` columns.
    ///
    /// Wide glyphs take two columns; a glyph that would straddle the limit is
    /// not drawn. Control characters are skipped. Returns the columns consumed.
    pub fn put_str(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        max_width: u16,
        style: impl Into<CellStyle>,
    ) -> u16 {
        let style = style.into();
        let mut used: u16 = 0;
        for ch in text.chars() {
            let width = match ch.width() {
                Some(w) if w > 0 => w as u16,
                _ => continue,
            };
            if used + width > max_width {
                break;
            }
            self.put_char(x.saturating_add(used), y, ch, style);
            used += width;
        }
        used
    }

    /// Fill a rectangle with one glyph
    pub fn fill(&mut self, rect: Rect, ch: char, style: impl Into<CellStyle>) {
        let style = style.into();
        let clipped = rect.intersection(self.area);
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                self.backend.write_cell(y, x, ch, style);
            }
        }
    }

    /// Ask for the hardware cursor at `(x, y)` once the frame is flushed.
    /// Ignored when the position is off-screen.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        if self.contains(x, y) {
            self.cursor = Some((x, y));
        }
    }

    /// Drop any cursor request made so far
    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Requested cursor position as `(x, y)`
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::theme::ColorPair;

    #[test]
    fn test_put_str_clips_to_width_and_screen() {
        let mut backend = TestBackend::new(8, 2);
        let mut surface = Surface::new(&mut backend);

        assert_eq!(surface.put_str(0, 0, "hello world", 5, ColorPair::Default), 5);
        // Runs off the right edge: columns are counted, writes are dropped
        surface.put_str(6, 1, "abcd", 4, ColorPair::Default);

        assert_eq!(backend.row_text(0), "hello   ");
        assert_eq!(backend.row_text(1), "      ab");
    }

    #[test]
    fn test_put_str_wide_glyphs() {
        let mut backend = TestBackend::new(6, 1);
        let mut surface = Surface::new(&mut backend);

        // "日本" is 4 columns; the third glyph would exceed the limit of 5
        assert_eq!(surface.put_str(0, 0, "日本語", 5, ColorPair::Default), 4);
    }

    #[test]
    fn test_out_of_bounds_writes_are_dropped() {
        let mut backend = TestBackend::new(4, 2);
        let mut surface = Surface::new(&mut backend);

        assert!(!surface.put_char(4, 0, 'x', ColorPair::Default));
        assert!(!surface.put_char(0, 2, 'x', ColorPair::Default));
        surface.fill(Rect::new(2, 1, 10, 10), '#', ColorPair::Accent);

        assert_eq!(backend.write_count(), 2);
        assert_eq!(backend.row_text(1), "  ##");
    }

    #[test]
    fn test_cursor_request_must_be_on_screen() {
        let mut backend = TestBackend::new(4, 2);
        let mut surface = Surface::new(&mut backend);

        surface.set_cursor(9, 9);
        assert_eq!(surface.cursor(), None);
        surface.set_cursor(3, 1);
        assert_eq!(surface.cursor(), Some((3, 1)));
        surface.clear_cursor();
        assert_eq!(surface.cursor(), None);
    }
}
