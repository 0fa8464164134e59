use ratatui::layout::Rect;

use super::text::center;
use super::{Button, Frame, Geometry, Label, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext, Key};
use crate::theme::ColorPair;

const WIDTH: u16 = 50;
const HEIGHT: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

/// Yes/no confirmation box, centered in whatever bounds it is rendered into.
///
/// Meant to be shown as the screen's modal: it consumes every key. Tab,
/// Shift-Tab, Left/Right and h/l move focus between the two buttons; other
/// keys go to the focused button. With auto-close on (the default) a choice
/// also asks the screen to close the modal.
#[derive(Debug)]
pub struct Dialog {
    geometry: Geometry,
    frame: Frame,
    message: String,
    yes: Button,
    no: Button,
    focus: Choice,
    auto_close: bool,
}

impl Dialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        let mut yes = Button::new("YES", 0, 0);
        yes.set_focused(true);
        Self {
            geometry: Geometry::sized(0, 0, WIDTH, HEIGHT),
            frame: Frame::new(title, 0, 0, WIDTH, HEIGHT).color(ColorPair::Alert),
            message: message.into(),
            yes,
            no: Button::new("NO", 0, 0),
            focus: Choice::Yes,
            auto_close: true,
        }
    }

    pub fn on_yes<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut EventContext<'_>) + 'static,
    {
        self.yes = self.yes.on_click(callback);
        self
    }

    pub fn on_no<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut EventContext<'_>) + 'static,
    {
        self.no = self.no.on_click(callback);
        self
    }

    /// Keep the dialog open after a choice; callbacks then close it themselves
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn title(&self) -> &str {
        self.frame.title()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn focused_choice(&self) -> Choice {
        self.focus
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Choice::Yes => Choice::No,
            Choice::No => Choice::Yes,
        };
        self.yes.set_focused(self.focus == Choice::Yes);
        self.no.set_focused(self.focus == Choice::No);
    }

    fn place(&mut self, bounds: Rect) {
        let x = bounds.x + bounds.width.saturating_sub(WIDTH) / 2;
        let y = bounds.y + bounds.height.saturating_sub(HEIGHT) / 2;
        self.move_to(x, y);
        self.frame.move_to(x, y);
        self.yes.move_to(x + 10, y + 5);
        self.no.move_to(x + 30, y + 5);
    }
}

impl Widget for Dialog {
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
        self.place(bounds);
        self.frame.render(surface, bounds);

        let Geometry { x, y, .. } = self.geometry;
        let text = center(&self.message, (WIDTH - 4) as usize);
        Label::new(text, x + 2, y + 2)
            .width(WIDTH - 4)
            .render(surface, bounds);

        self.yes.render(surface, bounds);
        self.no.render(surface, bounds);
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        let Some(key) = event.as_key() else {
            return false;
        };
        match key.code {
            Key::Tab | Key::BackTab | Key::Left | Key::Right | Key::Char('h') | Key::Char('l') => {
                self.toggle_focus();
            }
            _ => {
                let button = match self.focus {
                    Choice::Yes => &mut self.yes,
                    Choice::No => &mut self.no,
                };
                if button.handle_event(event, ctx) && self.auto_close {
                    ctx.close_modal();
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::event::Request;
    use crate::widget::testing::{render, send};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (Dialog, Rc<RefCell<Vec<Choice>>>) {
        let choices = Rc::new(RefCell::new(Vec::new()));
        let yes = Rc::clone(&choices);
        let no = Rc::clone(&choices);
        let dialog = Dialog::new("Confirm", "Delete file?")
            .on_yes(move |_| yes.borrow_mut().push(Choice::Yes))
            .on_no(move |_| no.borrow_mut().push(Choice::No));
        (dialog, choices)
    }

    #[test]
    fn test_focus_toggles() {
        let (mut dialog, _) = recording();
        assert_eq!(dialog.focused_choice(), Choice::Yes);
        for key in [Key::Tab, Key::BackTab, Key::Left, Key::Right, Key::Char('h'), Key::Char('l')] {
            let before = dialog.focused_choice();
            let (consumed, _) = send(&mut dialog, &Event::key(key));
            assert!(consumed);
            assert_ne!(dialog.focused_choice(), before);
        }
    }

    #[test]
    fn test_enter_chooses_focused_and_closes() {
        let (mut dialog, choices) = recording();
        send(&mut dialog, &Event::key(Key::Tab));
        let (consumed, requests) = send(&mut dialog, &Event::key(Key::Enter));

        assert!(consumed);
        assert_eq!(*choices.borrow(), vec![Choice::No]);
        assert!(matches!(requests.as_slice(), [Request::CloseModal]));
    }

    #[test]
    fn test_swallows_unrelated_keys() {
        let (mut dialog, choices) = recording();
        let (consumed, requests) = send(&mut dialog, &Event::key(Key::Char('z')));
        assert!(consumed);
        assert!(requests.is_empty());
        assert!(choices.borrow().is_empty());
    }

    #[test]
    fn test_ignores_non_key_events() {
        let (mut dialog, _) = recording();
        let (consumed, _) = send(&mut dialog, &Event::custom("render_tick"));
        assert!(!consumed);
    }

    #[test]
    fn test_without_auto_close() {
        let mut dialog = Dialog::new("Confirm", "Sure?")
            .auto_close(false)
            .on_yes(|ctx| ctx.exit());
        let (_, requests) = send(&mut dialog, &Event::key(Key::Char(' ')));
        assert!(matches!(requests.as_slice(), [Request::Exit]));
    }

    #[test]
    fn test_render_centered() {
        let mut backend = TestBackend::new(60, 12);
        let (mut dialog, _) = recording();
        render(&mut dialog, &mut backend);

        // (60 - 50) / 2 = 5, (12 - 8) / 2 = 2
        assert_eq!(dialog.geometry().x, 5);
        assert_eq!(dialog.geometry().y, 2);
        assert_eq!(backend.cell(5, 2).unwrap().glyph, '+');
        assert!(backend.row_text(2).contains(" Confirm "));
        assert!(backend.row_text(4).contains("Delete file?"));
        assert!(backend.row_text(7).contains("YES"));
        assert!(backend.row_text(7).contains("NO"));
        assert_eq!(
            backend.cell(5, 2).unwrap().style,
            crate::theme::CellStyle::new(ColorPair::Alert)
        );
    }
}
