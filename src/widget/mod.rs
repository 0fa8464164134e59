//! Widget protocol
//!
//! Every widget is a [`Geometry`] plus two capabilities: paint itself onto a
//! [`Surface`] and react to an [`Event`]. The set of widgets is closed: the
//! [`Node`] enum holds every variant and delegates to the concrete type, so
//! containers and the screen work on `Node` values without trait objects.
//!
//! Visibility only gates painting. Hidden widgets still receive events.

mod block;
mod braille;
mod button;
mod chart;
mod checkbox;
mod dialog;
mod label;
mod list;
mod log;
mod progress;
mod select;
mod stack;
pub(crate) mod text;
mod text_input;
mod tree;

pub use block::{Block, Frame};
pub use braille::{DotGrid, GLYPHS};
pub use button::Button;
pub use chart::{Chart, Series};
pub use checkbox::Checkbox;
pub use dialog::{Choice, Dialog};
pub use label::Label;
pub use list::List;
pub use log::LogDisplay;
pub use progress::ProgressBar;
pub use select::Select;
pub use stack::{HStack, VStack};
pub use text_input::TextInput;
pub use tree::{WidgetId, WidgetTree};

use ratatui::layout::Rect;

use crate::backend::Surface;
use crate::event::{Event, EventContext};

/// Callback fired by buttons and dialogs
pub type Callback = Box<dyn FnMut(&mut EventContext<'_>)>;

/// Position, optional declared size and visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: u16,
    pub y: u16,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub visible: bool,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(0, 0, None, None)
    }
}

impl Geometry {
    pub fn new(x: u16, y: u16, width: Option<u16>, height: Option<u16>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            visible: true,
        }
    }

    pub fn sized(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::new(x, y, Some(width), Some(height))
    }

    /// Declared area clipped to `bounds`. An undeclared dimension extends to
    /// the edge of `bounds`. `None` when nothing of the widget is drawable.
    pub fn clip(&self, bounds: Rect) -> Option<Rect> {
        if self.x < bounds.x || self.y < bounds.y {
            return None;
        }
        if self.x >= bounds.right() || self.y >= bounds.bottom() {
            return None;
        }
        let max_w = bounds.right() - self.x;
        let max_h = bounds.bottom() - self.y;
        let width = self.width.map_or(max_w, |w| w.min(max_w));
        let height = self.height.map_or(max_h, |h| h.min(max_h));
        if width == 0 || height == 0 {
            return None;
        }
        Some(Rect::new(self.x, self.y, width, height))
    }
}

pub trait Widget {
    fn geometry(&self) -> &Geometry;

    fn geometry_mut(&mut self) -> &mut Geometry;

    /// Paint onto `surface`, clipped to `bounds`. Hidden widgets write nothing.
    fn render(&mut self, surface: &mut Surface<'_>, bounds: Rect);

    /// Returns true when the event was consumed and should not propagate
    fn handle_event(&mut self, _event: &Event, _ctx: &mut EventContext<'_>) -> bool {
        false
    }

    /// Extent as `(width, height)` used by stacks to place the next sibling
    fn size_hint(&self) -> (Option<u16>, Option<u16>) {
        let geometry = self.geometry();
        (geometry.width, geometry.height)
    }

    fn set_focused(&mut self, _focused: bool) {}

    fn is_focused(&self) -> bool {
        false
    }

    fn is_visible(&self) -> bool {
        self.geometry().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.geometry_mut().visible = visible;
    }

    fn move_to(&mut self, x: u16, y: u16) {
        let geometry = self.geometry_mut();
        geometry.x = x;
        geometry.y = y;
    }
}

macro_rules! nodes {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Any widget
        #[derive(Debug)]
        pub enum Node {
            $($variant($ty),)*
        }

        $(
            impl From<$ty> for Node {
                fn from(widget: $ty) -> Self {
                    Node::$variant(widget)
                }
            }
        )*

        impl Node {
            fn inner(&self) -> &dyn Widget {
                match self {
                    $(Node::$variant(widget) => widget,)*
                }
            }

            fn inner_mut(&mut self) -> &mut dyn Widget {
                match self {
                    $(Node::$variant(widget) => widget,)*
                }
            }
        }
    };
}

nodes! {
    Label(Label),
    Block(Block),
    Frame(Frame),
    Button(Button),
    TextInput(TextInput),
    List(List),
    Select(Select),
    Checkbox(Checkbox),
    ProgressBar(ProgressBar),
    LogDisplay(LogDisplay),
    Chart(Chart),
    VStack(VStack),
    HStack(HStack),
    Dialog(Dialog),
}

impl Widget for Node {
    fn geometry(&self) -> &Geometry {
        self.inner().geometry()
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        self.inner_mut().geometry_mut()
    }

    fn render(&mut self, surface: &mut Surface<'_>, bounds: Rect) {
        self.inner_mut().render(surface, bounds)
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventContext<'_>) -> bool {
        self.inner_mut().handle_event(event, ctx)
    }

    fn size_hint(&self) -> (Option<u16>, Option<u16>) {
        self.inner().size_hint()
    }

    fn set_focused(&mut self, focused: bool) {
        self.inner_mut().set_focused(focused)
    }

    fn is_focused(&self) -> bool {
        self.inner().is_focused()
    }
}
