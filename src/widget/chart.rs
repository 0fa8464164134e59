//! Time-series chart drawn with braille sub-cells.
//!
//! Each cell is 2 dots wide and 4 dots tall. For every sub-column a sample is
//! picked by nearest-neighbour resampling, normalized into the value range
//! and quantized to a sub-row (row 0 at the top). The dots of all series are
//! packed into one [`DotGrid`] and emitted as one glyph per cell over a faint
//! background grid.

use ratatui::layout::Rect;

use super::braille::DotGrid;
use super::{Geometry, Widget};
use crate::backend::Surface;
use crate::theme::{CellStyle, ColorPair};

const GRID_GLYPH: char = '.';

/// One named sequence of samples
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub samples: Vec<f64>,
    pub color: ColorPair,
}

#[derive(Debug, Clone)]
pub struct Chart {
    geometry: Geometry,
    series: Vec<Series>,
    range: Option<(f64, f64)>,
    max_samples: Option<usize>,
}

impl Chart {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            geometry: Geometry::sized(x, y, width, height),
            series: Vec::new(),
            range: None,
            max_samples: None,
        }
    }

    /// Keep only the newest `max` samples per series on `push_sample`
    pub fn max_samples(mut self, max: usize) -> Self {
        self.max_samples = Some(max.max(1));
        self
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Replace a series' samples, adding it when new. New series take the
    /// next color in palette order.
    pub fn set_series(&mut self, label: &str, samples: Vec<f64>) {
        let series = self.series_entry(label);
        series.samples = samples;
    }

    pub fn push_sample(&mut self, label: &str, value: f64) {
        let max = self.max_samples;
        let series = self.series_entry(label);
        series.samples.push(value);
        if let Some(max) = max {
            let excess = series.samples.len().saturating_sub(max);
            series.samples.drain(..excess);
        }
    }

    pub fn set_color(&mut self, label: &str, color: ColorPair) {
        self.series_entry(label).color = color;
    }

    /// Fix the value range instead of deriving it from the samples
    pub fn set_range(&mut self, range: Option<(f64, f64)>) {
        self.range = range;
    }

    fn series_entry(&mut self, label: &str) -> &mut Series {
        let index = match self.series.iter().position(|s| s.label == label) {
            Some(index) => index,
            None => {
                let color = ColorPair::cycle(self.series.len() + 1);
                self.series.push(Series {
                    label: label.to_string(),
                    samples: Vec::new(),
                    color,
                });
                self.series.len() - 1
            }
        };
        &mut self.series[index]
    }

    /// `(min, max)` used for normalization. Never degenerate: equal bounds
    /// are widened by one and a chart without samples uses `(0, 1)`.
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = match self.range {
            Some(range) => range,
            None => self
                .series
                .iter()
                .flat_map(|s| s.samples.iter().copied())
                .filter(|v| v.is_finite())
                .fold(None, |acc, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
                })
                .unwrap_or((0.0, 1.0)),
        };
        if max == min {
            (min, min + 1.0)
        } else {
            (min, max)
        }
    }

    /// Pack every series into a dot grid of `cols x rows` cells
    pub fn plot(&self, cols: u16, rows: u16) -> DotGrid {
        let mut grid = DotGrid::new(cols, rows);
        let sub_cols = grid.sub_cols() as usize;
        let sub_rows = grid.sub_rows() as usize;
        if sub_cols == 0 || sub_rows == 0 {
            return grid;
        }
        let (min, max) = self.value_range();
        let span = max - min;

        for series in &self.series {
            let n = series.samples.len();
            if n == 0 {
                continue;
            }
            for sx in 0..sub_cols {
                let index = sample_index(sx, sub_cols, n);
                let value = series.samples[index];
                if !value.is_finite() {
                    continue;
                }
                let norm = ((value - min) / span).clamp(0.0, 1.0);
                let level = ((norm * (sub_rows - 1) as f64).floor() as usize).min(sub_rows - 1);
                let sy = sub_rows - 1 - level;
                grid.set(sx as u16, sy as u16, series.color);
            }
        }
        grid
    }
}

/// Nearest sample for sub-column `sx` of `sub_cols`, over `n > 0` samples
fn sample_index(sx: usize, sub_cols: usize, n: usize) -> usize {
    if n == 1 || sub_cols == 1 {
        return 0;
    }
    let index = (sx as f64 * (n - 1) as f64 / (sub_cols - 1) as f64).round() as usize;
    index.min(n - 1)
}

impl Widget for Chart {
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
        surface.fill(area, GRID_GLYPH, CellStyle::new(ColorPair::Default).dim());

        let grid = self.plot(area.width, area.height);
        for cy in 0..area.height {
            for cx in 0..area.width {
                let Some(glyph) = grid.glyph(cx, cy) else {
                    continue;
                };
                let pair = grid.color(cx, cy).unwrap_or(ColorPair::Default);
                surface.put_char(area.x + cx, area.y + cy, glyph, pair);
            }
        }
    }
}
