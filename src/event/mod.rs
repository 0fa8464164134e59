//! Event model
//!
//! Events are immutable tagged values. Input capture and any component can
//! create them; the screen consumes each exactly once, either through the
//! active modal or through the [`Dispatcher`].
//!
//! # Module Structure
//!
//! - `queue` - FIFO owned by the screen
//! - `context` - requests handlers make back to the screen
//! - `dispatcher` - kind to handler registry

mod context;
mod dispatcher;
mod queue;

pub use context::{EventContext, Request};
pub use dispatcher::{Dispatcher, Handler};
pub use queue::EventQueue;

use serde_json::{Map, Value};

/// Dispatch tag of key events
pub const KEY: &str = "key";
/// Dispatch tag of mouse events
pub const MOUSE: &str = "mouse";
/// Custom event dispatched once per frame interval
pub const RENDER_TICK: &str = "render_tick";

/// Backend-independent key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Esc,
    F(u8),
}

/// Key press. `ch` is only set for printable ASCII (32..=126).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: Key,
    pub ch: Option<char>,
}

impl KeyEvent {
    pub fn new(code: Key) -> Self {
        let ch = match code {
            Key::Char(c) if (' '..='~').contains(&c) => Some(c),
            _ => None,
        };
        Self { code, ch }
    }

    /// `q` and `Q` end the run loop regardless of focus or modal state
    pub fn is_quit(&self) -> bool {
        matches!(self.code, Key::Char('q') | Key::Char('Q'))
    }

    /// Enter, also accepting a raw newline or carriage return
    pub fn is_enter(&self) -> bool {
        matches!(self.code, Key::Enter | Key::Char('\n') | Key::Char('\r'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Press,
    Release,
    Drag,
    Move,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub button: u8,
    pub action: MouseAction,
}

/// Named application event with a key-value payload
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    pub name: String,
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Custom(CustomEvent),
}

impl Event {
    pub fn key(code: Key) -> Self {
        Event::Key(KeyEvent::new(code))
    }

    pub fn mouse(x: u16, y: u16, button: u8, action: MouseAction) -> Self {
        Event::Mouse(MouseEvent {
            x,
            y,
            button,
            action,
        })
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self::custom_with(name, Map::new())
    }

    pub fn custom_with(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Event::Custom(CustomEvent {
            name: name.into(),
            payload,
        })
    }

    /// Tag used to route the event through the dispatcher
    pub fn kind(&self) -> &str {
        match self {
            Event::Key(_) => KEY,
            Event::Mouse(_) => MOUSE,
            Event::Custom(custom) => &custom.name,
        }
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Event::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_quit(&self) -> bool {
        self.as_key().is_some_and(KeyEvent::is_quit)
    }

    /// Payload value of a custom event
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Event::Custom(custom) => custom.payload.get(field),
            _ => None,
        }
    }
}
