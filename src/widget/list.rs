use ratatui::layout::Rect;

use super::text::pad_right;
use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::{CellStyle, ColorPair};

type SelectCallback = Box<dyn FnMut(&str, &mut EventContext<'_>)>;

/// Scrollable list with a single selection.
///
/// For a non-empty list `selected < items.len()`, and the scroll window of
/// `height` rows always contains `selected`.
pub struct List {
    geometry: Geometry,
    items: Vec<String>,
    selected: usize,
    scroll: usize,
    pair: ColorPair,
    highlight: ColorPair,
    on_select: Option<SelectCallback>,
    focused: bool,
}

impl List {
    pub fn new<I, S>(items: I, x: u16, y: u16, width: u16, height: u16) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            geometry: Geometry::sized(x, y, width, height),
            items: items.into_iter().map(Into::into).collect(),
            selected: 0,
            scroll: 0,
            pair: ColorPair::Default,
            highlight: ColorPair::Warning,
            on_select: None,
            focused: false,
        }
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &mut EventContext<'_>) + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn colors(mut self, pair: ColorPair, highlight: ColorPair) -> Self {
        self.pair = pair;
        self.highlight = highlight;
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replace the items, keeping the selection when it is still in range
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.scroll_to_selection();
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    fn visible_rows(&self) -> usize {
        self.geometry.height.unwrap_or(1).max(1) as usize
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.scroll_to_selection();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        let rows = self.visible_rows();
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }
    }
}

impl Widget for List {
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
        // Height may have changed since the last key
        self.scroll_to_selection();
        let Some(area) = self.geometry.clip(bounds) else {
            return;
        };

        let rows = self.items.iter().enumerate().skip(self.scroll);
        for (row, (index, item)) in rows.take(area.height as usize).enumerate() {
            let is_selected = index == self.selected;
            let indicator = if is_selected { "> " } else { "  " };
            let line = pad_right(&format!("{indicator}{item}"), area.width as usize);
            let style = match (is_selected, self.focused) {
                (true, true) => CellStyle::new(self.highlight).bold().reversed(),
                (true, false) => CellStyle::new(self.pair).bold(),
                _ => CellStyle::new(self.pair),
            };
            surface.put_str(area.x, area.y + row as u16, &line, area.width, style);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        if !self.focused || self.items.is_empty() {
            return false;
        }
        let Some(key) = event.as_key() else {
            return false;
        };
        match key.code {
            Key::Up | Key::Char('k') => self.select_previous(),
            Key::Down | Key::Char('j') => self.select_next(),
            _ if key.is_enter() => {
                if let Some(callback) = self.on_select.as_mut() {
                    callback(&self.items[self.selected], ctx);
                }
            }
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

impl std::fmt::Debug for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("List")
            .field("geometry", &self.geometry)
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("scroll", &self.scroll)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}
