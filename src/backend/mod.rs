//! Terminal backends
//!
//! The run loop and widgets only talk to the [`Backend`] trait; the crossterm
//! implementation lives in `terminal.rs` and a headless grid for tests in
//! `test.rs`.
//!
//! # Module Structure
//!
//! - `session` - scoped init/teardown guard
//! - `surface` - clipped drawing helpers handed to widgets
//! - `terminal` - real terminal over ratatui + crossterm
//! - `test` - in-memory backend with scripted input

mod session;
mod surface;
mod terminal;

pub use session::Session;
pub use surface::Surface;
pub use terminal::{translate_key, CrosstermTerminal};
pub use test::TestBackend;

use std::io;

use crate::event::Key;
use crate::theme::{CellStyle, Palette};

/// Character-grid terminal consumed by the screen.
///
/// `init` and `teardown` are paired; callers should go through [`Session`]
/// which guarantees teardown on every exit path.
pub trait Backend {
    /// Enter raw mode, hide the cursor and register the color palette
    fn init(&mut self, palette: &Palette) -> io::Result<()>;

    /// Restore echo, line mode and the cursor
    fn teardown(&mut self) -> io::Result<()>;

    /// Next pending key, `None` when nothing is available. Never blocks.
    fn read_key(&mut self) -> io::Result<Option<Key>>;

    /// Write one glyph. Out-of-bounds writes are dropped silently.
    fn write_cell(&mut self, row: u16, col: u16, glyph: char, style: CellStyle);

    /// Blank the back buffer before a full repaint
    fn clear(&mut self) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()>;

    /// Screen size as `(rows, cols)`
    fn geometry(&self) -> (u16, u16);

    /// Push everything written since the last flush to the terminal
    fn flush(&mut self) -> io::Result<()>;
}
