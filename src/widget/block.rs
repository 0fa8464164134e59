use ratatui::layout::Rect;

use super::text::truncate;
use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::theme::ColorPair;

/// Rectangular border
#[derive(Debug, Clone)]
pub struct Block {
    geometry: Geometry,
    border: char,
    corner: char,
    side: char,
    pair: ColorPair,
}

impl Block {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            geometry: Geometry::sized(x, y, width, height),
            border: '─',
            corner: '+',
            side: '|',
            pair: ColorPair::Default,
        }
    }

    pub fn color(mut self, pair: ColorPair) -> Self {
        self.pair = pair;
        self
    }

    /// Glyphs for horizontal edges and corners
    pub fn chars(mut self, border: char, corner: char) -> Self {
        self.border = border;
        self.corner = corner;
        self
    }

    pub fn pair(&self) -> ColorPair {
        self.pair
    }
}

impl Widget for Block {
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
        if area.width < 2 || area.height < 2 {
            return;
        }

        let (left, top) = (area.left(), area.top());
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);

        for x in left + 1..right {
            surface.put_char(x, top, self.border, self.pair);
            surface.put_char(x, bottom, self.border, self.pair);
        }
        for y in top + 1..bottom {
            surface.put_char(left, y, self.side, self.pair);
            surface.put_char(right, y, self.side, self.pair);
        }
        for (x, y) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            surface.put_char(x, y, self.corner, self.pair);
        }
    }
}

/// Border with a title set into the top edge
#[derive(Debug, Clone)]
pub struct Frame {
    block: Block,
    title: String,
}

impl Frame {
    pub fn new(title: impl Into<String>, x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            block: Block::new(x, y, width, height),
            title: title.into(),
        }
    }

    pub fn color(mut self, pair: ColorPair) -> Self {
        self.block = self.block.color(pair);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl Widget for Frame {
    fn geometry(&self) -> &Geometry {
        self.block.geometry()
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        self.block.geometry_mut()
    }

    fn render(&mut self, surface: &mut Surface<'_>, bounds: Rect) {
        self.block.render(surface, bounds);

        let geometry = self.block.geometry();
        let width = geometry.width.unwrap_or(0);
        if !geometry.visible || self.title.is_empty() || width < 4 {
            return;
        }
        let Some(area) = geometry.clip(bounds) else {
            return;
        };
        let max = (width - 4).min(area.width.saturating_sub(2));
        let title = truncate(&format!(" {} ", self.title), max as usize);
        surface.put_str(area.x + 2, area.y, &title, max, self.block.pair());
    }
}
