//! Fixed color palette
//!
//! Provides:
//! - `ColorPair` - the four named slots every widget picks from
//! - `Palette` - slot to ratatui style mapping, registered with the backend at init
//! - `CellStyle` - a slot plus text modifiers (bold, reverse, dim)

use ratatui::style::{Color, Modifier, Style};

/// Named color slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorPair {
    /// Primary text (white on terminal default)
    #[default]
    Default,
    /// Borders, highlights, progress fill
    Accent,
    /// Focus highlight, overlay messages
    Warning,
    /// Dialog frames, errors
    Alert,
}

impl ColorPair {
    pub const ALL: [ColorPair; 4] = [
        ColorPair::Default,
        ColorPair::Accent,
        ColorPair::Warning,
        ColorPair::Alert,
    ];

    /// Pick a slot for the i-th item of a sequence (chart series)
    pub fn cycle(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Slot to style mapping
#[derive(Debug, Clone)]
pub struct Palette {
    /// Primary text
    pub default: Style,
    /// Borders and highlights
    pub accent: Style,
    /// Focus and overlay text
    pub warning: Style,
    /// Dialogs and errors
    pub alert: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl Palette {
    /// Foregrounds on the terminal's own background. Warning is yellow on default.
    pub fn standard() -> Self {
        Self {
            default: Style::default().fg(Color::White).bg(Color::Reset),
            accent: Style::default().fg(Color::Cyan).bg(Color::Reset),
            warning: Style::default().fg(Color::Yellow).bg(Color::Reset),
            alert: Style::default().fg(Color::Red).bg(Color::Reset),
        }
    }

    /// Style registered for a slot
    pub fn style(&self, pair: ColorPair) -> Style {
        match pair {
            ColorPair::Default => self.default,
            ColorPair::Accent => self.accent,
            ColorPair::Warning => self.warning,
            ColorPair::Alert => self.alert,
        }
    }

    /// Full style for a cell
    pub fn resolve(&self, style: CellStyle) -> Style {
        self.style(style.pair).add_modifier(style.modifier)
    }
}

/// Style of a single written cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub pair: ColorPair,
    pub modifier: Modifier,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(ColorPair::Default)
    }
}

impl CellStyle {
    pub fn new(pair: ColorPair) -> Self {
        Self {
            pair,
            modifier: Modifier::empty(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.modifier |= Modifier::BOLD;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.modifier |= Modifier::REVERSED;
        self
    }

    pub fn dim(mut self) -> Self {
        self.modifier |= Modifier::DIM;
        self
    }
}

impl From<ColorPair> for CellStyle {
    fn from(pair: ColorPair) -> Self {
        Self::new(pair)
    }
}
