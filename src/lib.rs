//! lattice-tui - terminal UI toolkit
//!
//! A single-threaded run loop ([`Screen`]) polls a [`Backend`] for keys,
//! drains an [`EventQueue`] through a [`Dispatcher`] (or the active modal) and
//! repaints a tree of [`Node`] widgets on a fixed cadence.
//!
//! # Module Structure
//!
//! - `backend` - terminal interface, crossterm implementation, test grid
//! - `config` - TOML configuration
//! - `error` - crate error type
//! - `event` - events, queue, dispatcher
//! - `screen` - run loop
//! - `theme` - fixed color palette
//! - `widget` - widget protocol, leaves, stacks, chart

pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod screen;
pub mod theme;
pub mod widget;

pub use backend::{Backend, CrosstermTerminal, Surface, TestBackend};
pub use config::Config;
pub use error::{Error, Result};
pub use event::{Dispatcher, Event, EventContext, EventQueue, Key, Request};
pub use screen::{forward_to_widgets, LoopState, Screen};
pub use theme::{CellStyle, ColorPair, Palette};
pub use widget::{Node, Widget, WidgetId, WidgetTree};
