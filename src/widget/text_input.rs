use ratatui::layout::Rect;

use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::{CellStyle, ColorPair};

/// Single-line editable text.
///
/// The cursor is a char index with `0 <= cursor <= len`. Printable keys insert
/// at the cursor, so `h` and `l` type letters rather than move.
#[derive(Debug, Clone)]
pub struct TextInput {
    geometry: Geometry,
    text: String,
    cursor: usize,
    pair: ColorPair,
    highlight: ColorPair,
    focused: bool,
}

impl TextInput {
    pub fn new(text: impl Into<String>, x: u16, y: u16, width: u16) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            geometry: Geometry::sized(x, y, width, 1),
            text,
            cursor,
            pair: ColorPair::Default,
            highlight: ColorPair::Warning,
            focused: false,
        }
    }

    pub fn colors(mut self, pair: ColorPair, highlight: ColorPair) -> Self {
        self.pair = pair;
        self.highlight = highlight;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the contents and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    pub fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
    }

    /// Remove the char before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.text.remove(offset);
        self.cursor -= 1;
    }

    /// Remove the char under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let offset = self.byte_offset(self.cursor);
            self.text.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    /// First visible char index so the cursor stays inside `width` columns
    fn scroll_start(&self, width: usize) -> usize {
        if width == 0 {
            self.cursor
        } else if self.cursor >= width {
            self.cursor + 1 - width
        } else {
            0
        }
    }
}

impl Widget for TextInput {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    fn render(&mut self, surface: &mut Surface<'_>, bounds: Rect) {
        if !self.geometry.visible {
            return;
        }
        let Some(area) = self.geometry.clip(bounds) else {
            return;
        };
        let width = self.geometry.width.unwrap_or(area.width) as usize;
        let start = self.scroll_start(width);

        let mut window: String = self.text.chars().skip(start).take(width).collect();
        let fill = width.saturating_sub(window.chars().count());
        window.extend(std::iter::repeat(' ').take(fill));

        let style = if self.focused {
            CellStyle::new(self.highlight).bold()
        } else {
            CellStyle::new(self.pair)
        };
        surface.put_str(area.x, area.y, &window, area.width, style);

        if self.focused {
            let offset = (self.cursor - start) as u16;
            surface.set_cursor(area.x.saturating_add(offset), area.y);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &mut EventContext<'_>) -> bool {
        if !self.focused {
            return false;
        }
        let Some(key) = event.as_key() else {
            return false;
        };
        if let Some(ch) = key.ch {
            self.insert(ch);
            return true;
        }
        match key.code {
            Key::Backspace | Key::Char('\x7f') | Key::Char('\x08') => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
