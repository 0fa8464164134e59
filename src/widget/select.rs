use ratatui::layout::Rect;

use super::text::{center, truncate};
use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::{CellStyle, ColorPair};

type ChangeCallback = Box<dyn FnMut(&str, &mut EventContext<'_>)>;

/// One-of-many picker rendered as `< choice >`; cycles with wraparound
pub struct Select {
    geometry: Geometry,
    options: Vec<String>,
    selected: usize,
    pair: ColorPair,
    highlight: ColorPair,
    on_change: Option<ChangeCallback>,
    focused: bool,
}

impl Select {
    pub fn new<I, S>(options: I, x: u16, y: u16, width: u16) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            geometry: Geometry::sized(x, y, width, 1),
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
            pair: ColorPair::Default,
            highlight: ColorPair::Warning,
            on_change: None,
            focused: false,
        }
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &mut EventContext<'_>) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn colors(mut self, pair: ColorPair, highlight: ColorPair) -> Self {
        self.pair = pair;
        self.highlight = highlight;
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    fn step(&mut self, forward: bool, ctx: &mut EventContext<'_>) {
        let count = self.options.len();
        self.selected = if forward {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.options[self.selected], ctx);
        }
    }
}

impl Widget for Select {
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
        let choice = self.selected().unwrap_or("");
        let text = truncate(&center(&format!("< {choice} >"), width), width);
        let style = if self.focused {
            CellStyle::new(self.highlight)
        } else {
            CellStyle::new(self.pair)
        };
        surface.put_str(area.x, area.y, &text, area.width, style);
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        if !self.focused || self.options.is_empty() {
            return false;
        }
        let Some(key) = event.as_key() else {
            return false;
        };
        match key.code {
            Key::Left | Key::Char('h') => self.step(false, ctx),
            Key::Right | Key::Char('l') | Key::Char(' ') => self.step(true, ctx),
            _ if key.is_enter() => self.step(true, ctx),
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

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("geometry", &self.geometry)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}
