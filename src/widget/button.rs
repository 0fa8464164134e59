use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::text::center;
use super::{Callback, Geometry, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::{CellStyle, ColorPair};

/// Clickable label. Fires `on_click` on Enter or Space while focused.
pub struct Button {
    geometry: Geometry,
    label: String,
    on_click: Option<Callback>,
    pair: ColorPair,
    highlight: ColorPair,
    focused: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, x: u16, y: u16) -> Self {
        let label = label.into();
        let width = label.width() as u16 + 4;
        Self {
            geometry: Geometry::sized(x, y, width, 1),
            label,
            on_click: None,
            pair: ColorPair::Default,
            highlight: ColorPair::Warning,
            focused: false,
        }
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut EventContext<'_>) + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn colors(mut self, pair: ColorPair, highlight: ColorPair) -> Self {
        self.pair = pair;
        self.highlight = highlight;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label centered in the button width
    pub fn text(&self) -> String {
        match self.geometry.width {
            Some(width) => center(&self.label, width as usize),
            None => format!("  {}  ", self.label),
        }
    }

    /// Fire the click callback as if activated by a key
    pub fn click(&mut self, ctx: &mut EventContext<'_>) {
        if let Some(callback) = self.on_click.as_mut() {
            callback(ctx);
        }
    }
}

impl Widget for Button {
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
        let style = if self.focused {
            CellStyle::new(self.highlight).bold().reversed()
        } else {
            CellStyle::new(self.pair)
        };
        surface.put_str(area.x, area.y, &self.text(), area.width, style);
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        if !self.focused {
            return false;
        }
        let Some(key) = event.as_key() else {
            return false;
        };
        if key.is_enter() || key.code == Key::Char(' ') {
            self.click(ctx);
            return true;
        }
        false
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("geometry", &self.geometry)
            .field("label", &self.label)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::event::Request;
    use crate::widget::testing::{press, render, send};
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let button = Button::new("OK", 0, 0).on_click(move |_| counter.set(counter.get() + 1));
        (button, clicks)
    }

    #[test]
    fn test_unfocused_button_ignores_keys() {
        let (mut button, clicks) = counting_button();
        assert!(!press(&mut button, Key::Enter));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_enter_and_space_click() {
        let (mut button, clicks) = counting_button();
        button.set_focused(true);

        assert!(press(&mut button, Key::Enter));
        assert!(press(&mut button, Key::Char(' ')));
        assert!(!press(&mut button, Key::Char('x')));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_click_can_make_requests() {
        let mut button = Button::new("Quit", 0, 0).on_click(|ctx| ctx.exit());
        button.set_focused(true);

        let (consumed, requests) = send(&mut button, &Event::key(Key::Enter));
        assert!(consumed);
        assert!(matches!(requests.as_slice(), [Request::Exit]));
    }

    #[test]
    fn test_render_centered_and_highlighted() {
        let mut backend = TestBackend::new(8, 1);
        let mut button = Button::new("OK", 1, 0);
        button.set_focused(true);
        render(&mut button, &mut backend);

        assert_eq!(backend.row_text(0), "   OK   ");
        let cell = backend.cell(3, 0).unwrap();
        assert_eq!(cell.style, CellStyle::new(ColorPair::Warning).bold().reversed());
    }
}
