use ratatui::layout::Rect;

use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::theme::ColorPair;

/// Single line of text. Without a declared width it runs to the right edge.
#[derive(Debug, Clone)]
pub struct Label {
    geometry: Geometry,
    text: String,
    pair: ColorPair,
}

impl Label {
    pub fn new(text: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            geometry: Geometry::new(x, y, None, Some(1)),
            text: text.into(),
            pair: ColorPair::Default,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.geometry.width = Some(width);
        self
    }

    pub fn color(mut self, pair: ColorPair) -> Self {
        self.pair = pair;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
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
        surface.put_str(area.x, area.y, &self.text, area.width, self.pair);
    }
}
