use ratatui::layout::Rect;

use super::{Geometry, Node, Widget};
use crate::backend::Surface;
use crate::event::{Event, EventContext};

/// Extent assumed for a child that declares no height
const FALLBACK_HEIGHT: u16 = 1;
/// Extent assumed for a child that declares no width
const FALLBACK_WIDTH: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

/// Children placed one after another along an axis. Positions are derived
/// from the children's size hints on every render.
#[derive(Debug)]
struct Stack {
    geometry: Geometry,
    axis: Axis,
    spacing: u16,
    children: Vec<Node>,
}

impl Stack {
    fn new(axis: Axis, x: u16, y: u16, spacing: u16) -> Self {
        Self {
            geometry: Geometry::new(x, y, None, None),
            axis,
            spacing,
            children: Vec::new(),
        }
    }

    fn extent(&self, child: &Node) -> u16 {
        let (width, height) = child.size_hint();
        match self.axis {
            Axis::Vertical => height.unwrap_or(FALLBACK_HEIGHT),
            Axis::Horizontal => width.unwrap_or(FALLBACK_WIDTH),
        }
    }

    fn layout(&mut self) {
        let Geometry { x, y, .. } = self.geometry;
        let mut offset: u16 = 0;
        for index in 0..self.children.len() {
            let extent = self.extent(&self.children[index]);
            let child = &mut self.children[index];
            match self.axis {
                Axis::Vertical => child.move_to(x, y.saturating_add(offset)),
                Axis::Horizontal => child.move_to(x.saturating_add(offset), y),
            }
            offset = offset.saturating_add(extent).saturating_add(self.spacing);
        }
    }

    fn content_size(&self) -> (u16, u16) {
        let gaps = self.spacing.saturating_mul(self.children.len().saturating_sub(1) as u16);
        let mut along: u16 = 0;
        let mut across: u16 = 0;
        for child in &self.children {
            let (width, height) = child.size_hint();
            let (main, cross) = match self.axis {
                Axis::Vertical => (height.unwrap_or(FALLBACK_HEIGHT), width.unwrap_or(FALLBACK_WIDTH)),
                Axis::Horizontal => (width.unwrap_or(FALLBACK_WIDTH), height.unwrap_or(FALLBACK_HEIGHT)),
            };
            along = along.saturating_add(main);
            across = across.max(cross);
        }
        let along = along.saturating_add(gaps);
        match self.axis {
            Axis::Vertical => (across, along),
            Axis::Horizontal => (along, across),
        }
    }

    fn render(&mut self, surface: &mut Surface<'_>, bounds: Rect) {
        if !self.geometry.visible {
            return;
        }
        self.layout();
        let Some(area) = self.geometry.clip(bounds) else {
            return;
        };
        for child in &mut self.children {
            child.render(surface, area);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        self.children
            .iter_mut()
            .any(|child| child.handle_event(event, ctx))
    }
}

macro_rules! stack_widget {
    ($(#[$meta:meta])* $name:ident, $axis:expr, $spacing:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(Stack);

        impl $name {
            pub fn new(x: u16, y: u16) -> Self {
                Self(Stack::new($axis, x, y, $spacing))
            }

            pub fn spacing(mut self, spacing: u16) -> Self {
                self.0.spacing = spacing;
                self
            }

            pub fn child(mut self, child: impl Into<Node>) -> Self {
                self.push(child);
                self
            }

            pub fn push(&mut self, child: impl Into<Node>) {
                self.0.children.push(child.into());
            }

            pub fn children(&self) -> &[Node] {
                &self.0.children
            }

            pub fn children_mut(&mut self) -> &mut [Node] {
                &mut self.0.children
            }

            /// Place every child from the current size hints
            pub fn layout(&mut self) {
                self.0.layout();
            }
        }

        impl Widget for $name {
            fn geometry(&self) -> &Geometry {
                &self.0.geometry
            }

            fn geometry_mut(&mut self) -> &mut Geometry {
                &mut self.0.geometry
            }

            fn render(&mut self, surface: &mut Surface<'_>, bounds: Rect) {
                self.0.render(surface, bounds);
            }

            fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
                self.0.handle_event(event, ctx)
            }

            fn size_hint(&self) -> (Option<u16>, Option<u16>) {
                let (width, height) = self.0.content_size();
                (Some(width), Some(height))
            }
        }
    };
}

stack_widget!(
    /// Children top to bottom, no gap by default
    VStack,
    Axis::Vertical,
    0
);

stack_widget!(
    /// Children left to right, one column apart by default
    HStack,
    Axis::Horizontal,
    1
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::event::Key;
    use crate::widget::testing::{press, render};
    use crate::widget::{Block, Button, Label, TextInput};

    #[test]
    fn test_vertical_origins_accumulate() {
        let heights = [3u16, 1, 4, 2];
        for spacing in [0u16, 1, 3] {
            let mut stack = VStack::new(2, 1).spacing(spacing);
            for &h in &heights {
                stack.push(Block::new(0, 0, 5, h));
            }
            stack.layout();

            for (i, child) in stack.children().iter().enumerate() {
                let expected: u16 = heights[..i].iter().sum::<u16>() + i as u16 * spacing;
                assert_eq!(child.geometry().y, 1 + expected);
                assert_eq!(child.geometry().x, 2);
            }
        }
    }

    #[test]
    fn test_horizontal_default_spacing() {
        let mut stack = HStack::new(0, 0)
            .child(Button::new("OK", 0, 0))
            .child(Label::new("free", 0, 0))
            .child(Button::new("Cancel", 0, 0));
        stack.layout();

        let xs: Vec<u16> = stack.children().iter().map(|c| c.geometry().x).collect();
        // Button "OK" is 6 wide, the unsized label counts as 10
        assert_eq!(xs, vec![0, 7, 18]);
    }

    #[test]
    fn test_size_hint_reports_content() {
        let stack = VStack::new(0, 0)
            .spacing(1)
            .child(Block::new(0, 0, 8, 3))
            .child(Block::new(0, 0, 4, 2));
        assert_eq!(stack.size_hint(), (Some(8), Some(6)));

        let nested = HStack::new(0, 0).child(stack).child(Block::new(0, 0, 2, 9));
        assert_eq!(nested.size_hint(), (Some(11), Some(9)));
    }

    #[test]
    fn test_render_places_children() {
        let mut backend = TestBackend::new(6, 3);
        let mut stack = VStack::new(1, 0)
            .child(Label::new("ab", 9, 9))
            .child(Label::new("cd", 9, 9));
        render(&mut stack, &mut backend);

        assert_eq!(backend.row_text(0), " ab   ");
        assert_eq!(backend.row_text(1), " cd   ");
    }

    #[test]
    fn test_hidden_stack_writes_nothing() {
        let mut backend = TestBackend::new(6, 3);
        let mut stack = VStack::new(0, 0).child(Label::new("ab", 0, 0));
        stack.set_visible(false);
        render(&mut stack, &mut backend);
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_first_consumer_stops_propagation() {
        let mut first = TextInput::new("", 0, 0, 5);
        first.set_focused(true);
        let mut second = TextInput::new("", 0, 0, 5);
        second.set_focused(true);
        let mut stack = VStack::new(0, 0).child(first).child(second);

        assert!(press(&mut stack, Key::Char('x')));
        let texts: Vec<&str> = stack
            .children()
            .iter()
            .map(|c| match c {
                Node::TextInput(input) => input.text(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["x", ""]);
    }

    #[test]
    fn test_unconsumed_event_reaches_all_children() {
        let mut stack = VStack::new(0, 0)
            .child(Label::new("a", 0, 0))
            .child(Label::new("b", 0, 0));
        assert!(!press(&mut stack, Key::Enter));
    }
}
