//! Crossterm terminal backend
//!
//! Cells are written into ratatui's back buffer; `flush` diffs it against the
//! previous frame and emits only the changed cells.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, KeyCode as CtKeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend as _, CrosstermBackend};
use ratatui::Terminal;

use super::Backend;
use crate::event::Key;
use crate::theme::{CellStyle, Palette};

/// Convert a crossterm key event to a toolkit key.
///
/// Only presses are kept. Characters typed with Ctrl or Alt and keys the
/// toolkit has no code for are dropped here, so they never reach the queue.
pub fn translate_key(key: &crossterm::event::KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let code = match key.code {
        CtKeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            return None
        }
        CtKeyCode::Char(c) => Key::Char(c),
        CtKeyCode::Enter => Key::Enter,
        CtKeyCode::Tab => Key::Tab,
        CtKeyCode::BackTab => Key::BackTab,
        CtKeyCode::Backspace => Key::Backspace,
        CtKeyCode::Delete => Key::Delete,
        CtKeyCode::Left => Key::Left,
        CtKeyCode::Right => Key::Right,
        CtKeyCode::Up => Key::Up,
        CtKeyCode::Down => Key::Down,
        CtKeyCode::Home => Key::Home,
        CtKeyCode::End => Key::End,
        CtKeyCode::PageUp => Key::PageUp,
        CtKeyCode::PageDown => Key::PageDown,
        CtKeyCode::Esc => Key::Esc,
        CtKeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(code)
}

/// Real terminal on stdout
pub struct CrosstermTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    palette: Palette,
}

impl CrosstermTerminal {
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            palette: Palette::standard(),
        })
    }
}

impl Backend for CrosstermTerminal {
    fn init(&mut self, palette: &Palette) -> io::Result<()> {
        self.palette = palette.clone();
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    fn teardown(&mut self) -> io::Result<()> {
        // Try every step even if one fails
        let mut first_err: Option<io::Error> = None;

        if let Err(err) = disable_raw_mode() {
            first_err.get_or_insert(err);
        }
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            first_err.get_or_insert(err);
        }
        if let Err(err) = self.terminal.show_cursor() {
            first_err.get_or_insert(err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            event::Event::Key(key) => Ok(translate_key(&key)),
            _ => Ok(None),
        }
    }

    fn write_cell(&mut self, row: u16, col: u16, glyph: char, style: CellStyle) {
        let style = self.palette.resolve(style);
        if let Some(cell) = self.terminal.current_buffer_mut().cell_mut((col, row)) {
            cell.set_char(glyph).set_style(style);
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.autoresize()?;
        self.terminal.current_buffer_mut().reset();
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.terminal.show_cursor()
        } else {
            self.terminal.hide_cursor()
        }
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.terminal.set_cursor_position((col, row))
    }

    fn geometry(&self) -> (u16, u16) {
        match self.terminal.size() {
            Ok(size) => (size.height, size.width),
            Err(e) => {
                tracing::debug!("terminal size unavailable: {}", e);
                (0, 0)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.terminal.flush()?;
        self.terminal.swap_buffers();
        self.terminal.backend_mut().flush()
    }
}
