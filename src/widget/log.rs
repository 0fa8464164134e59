use std::collections::VecDeque;

use ratatui::layout::Rect;

use super::text::pad_right;
use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::{CellStyle, ColorPair};

pub const DEFAULT_CAPACITY: usize = 1000;

/// Bounded scrollback of text lines, newest at the bottom.
///
/// `scroll` counts lines up from the newest one. While auto-scroll is on the
/// view follows new lines; scrolling up turns it off and returning to the
/// bottom turns it back on.
#[derive(Debug, Clone)]
pub struct LogDisplay {
    geometry: Geometry,
    lines: VecDeque<String>,
    capacity: usize,
    scroll: usize,
    auto_scroll: bool,
    pair: ColorPair,
    focused: bool,
}

impl LogDisplay {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            geometry: Geometry::sized(x, y, width, height),
            lines: VecDeque::new(),
            capacity: DEFAULT_CAPACITY,
            scroll: 0,
            auto_scroll: true,
            pair: ColorPair::Default,
            focused: false,
        }
    }

    /// Keep at most `capacity` lines; zero is treated as one
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self.trim();
        self
    }

    pub fn color(mut self, pair: ColorPair) -> Self {
        self.pair = pair;
        self
    }

    /// Append text, one entry per line. Evicts the oldest lines past capacity.
    pub fn push(&mut self, text: &str) {
        for line in text.lines() {
            self.lines.push_back(line.to_string());
        }
        if text.is_empty() {
            self.lines.push_back(String::new());
        }
        self.trim();
        self.auto_scroll = true;
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
        self.auto_scroll = true;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn is_auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.lines.len().saturating_sub(self.visible_rows());
        self.scroll = (self.scroll + lines).min(max);
        self.auto_scroll = self.scroll == 0;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.auto_scroll = self.scroll == 0;
    }

    fn visible_rows(&self) -> usize {
        self.geometry.height.unwrap_or(1).max(1) as usize
    }

    fn trim(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

impl Widget for LogDisplay {
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
        let rows = area.height as usize;
        let end = self.lines.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(rows);
        let shown = end - start;
        // Bottom-aligned: short logs leave blank rows on top
        let top = area.y + (rows - shown) as u16;
        let style = CellStyle::new(self.pair);
        for (row, line) in self.lines.range(start..end).enumerate() {
            let text = pad_right(line, area.width as usize);
            surface.put_str(area.x, top + row as u16, &text, area.width, style);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &mut EventContext<'_>) -> bool {
        if !self.focused {
            return false;
        }
        let Some(key) = event.as_key() else {
            return false;
        };
        let page = self.visible_rows();
        match key.code {
            Key::Up | Key::Char('k') => self.scroll_up(1),
            Key::Down | Key::Char('j') => self.scroll_down(1),
            Key::PageUp => self.scroll_up(page),
            Key::PageDown => self.scroll_down(page),
            Key::End => self.scroll_down(self.scroll),
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
