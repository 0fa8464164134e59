use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::{CellStyle, ColorPair};

type ToggleCallback = Box<dyn FnMut(bool, &mut EventContext<'_>)>;

/// `[X] label` toggle
pub struct Checkbox {
    geometry: Geometry,
    label: String,
    checked: bool,
    pair: ColorPair,
    highlight: ColorPair,
    on_change: Option<ToggleCallback>,
    focused: bool,
}

impl Checkbox {
    pub fn new(label: impl Into<String>, x: u16, y: u16) -> Self {
        let label = label.into();
        let width = label.width() as u16 + 4;
        Self {
            geometry: Geometry::sized(x, y, width, 1),
            label,
            checked: false,
            pair: ColorPair::Default,
            highlight: ColorPair::Warning,
            on_change: None,
            focused: false,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(bool, &mut EventContext<'_>) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn colors(mut self, pair: ColorPair, highlight: ColorPair) -> Self {
        self.pair = pair;
        self.highlight = highlight;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Widget for Checkbox {
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
        let mark = if self.checked { "[X]" } else { "[ ]" };
        let style = if self.focused {
            CellStyle::new(self.highlight)
        } else {
            CellStyle::new(self.pair)
        };
        surface.put_str(area.x, area.y, &format!("{mark} {}", self.label), area.width, style);
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        if !self.focused {
            return false;
        }
        let Some(key) = event.as_key() else {
            return false;
        };
        if key.code != Key::Char(' ') && !key.is_enter() {
            return false;
        }
        self.checked = !self.checked;
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.checked, ctx);
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

impl std::fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkbox")
            .field("geometry", &self.geometry)
            .field("label", &self.label)
            .field("checked", &self.checked)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}
