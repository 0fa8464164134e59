use ratatui::layout::Rect;

use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::theme::{CellStyle, ColorPair};

const DEFAULT_FILL: char = '█';
const DEFAULT_EMPTY: char = '░';

/// Horizontal bar filled to `floor(ratio * width)` cells
#[derive(Debug, Clone)]
pub struct ProgressBar {
    geometry: Geometry,
    ratio: f64,
    pair: ColorPair,
    fill: char,
    empty: char,
}

impl ProgressBar {
    pub fn new(x: u16, y: u16, width: u16) -> Self {
        Self {
            geometry: Geometry::sized(x, y, width, 1),
            ratio: 0.0,
            pair: ColorPair::Accent,
            fill: DEFAULT_FILL,
            empty: DEFAULT_EMPTY,
        }
    }

    pub fn color(mut self, pair: ColorPair) -> Self {
        self.pair = pair;
        self
    }

    /// Glyphs for the filled and the remaining cells
    pub fn chars(mut self, fill: char, empty: char) -> Self {
        self.fill = fill;
        self.empty = empty;
        self
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Clamped to `[0, 1]`; NaN counts as zero
    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    }

    fn filled_cells(&self, width: u16) -> u16 {
        (self.ratio * f64::from(width)).floor() as u16
    }
}

impl Widget for ProgressBar {
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
        let width = self.geometry.width.unwrap_or(area.width);
        let filled = self.filled_cells(width);
        let style = CellStyle::new(self.pair);
        for offset in 0..area.width {
            let glyph = if offset < filled { self.fill } else { self.empty };
            surface.put_char(area.x + offset, area.y, glyph, style);
        }
    }
}
