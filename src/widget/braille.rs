//! Sub-cell dot matrix packed into braille glyphs.
//!
//! A cell holds a 2x4 grid of dots. Dot `(col, row)` maps to bit
//! `DOT_BITS[col * 4 + row]`; the bottom dots of each column sit at bits 6
//! and 7. [`GLYPHS`] turns the packed byte into its codepoint.

use crate::theme::ColorPair;

const BRAILLE_BASE: u32 = 0x2800;

const DOT_COLS: u16 = 2;
const DOT_ROWS: u16 = 4;

/// Bit offset for each dot, indexed by `col * 4 + row`
const DOT_BITS: [u8; 8] = [0, 1, 2, 6, 3, 4, 5, 7];

/// Glyph for every dot byte
pub static GLYPHS: [char; 256] = build_glyphs();

const fn build_glyphs() -> [char; 256] {
    let mut glyphs = [' '; 256];
    let mut bits = 0;
    while bits < 256 {
        glyphs[bits] = match char::from_u32(BRAILLE_BASE + bits as u32) {
            Some(glyph) => glyph,
            None => ' ',
        };
        bits += 1;
    }
    glyphs
}

/// Dot grid covering `cols x rows` cells
#[derive(Debug, Clone)]
pub struct DotGrid {
    cols: u16,
    rows: u16,
    cells: Vec<u8>,
    colors: Vec<Option<ColorPair>>,
}

impl DotGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            cells: vec![0; len],
            colors: vec![None; len],
        }
    }

    pub fn sub_cols(&self) -> u16 {
        self.cols * DOT_COLS
    }

    pub fn sub_rows(&self) -> u16 {
        self.rows * DOT_ROWS
    }

    /// Set one dot. The cell takes `color`, so the last writer wins.
    /// Returns false when the dot is outside the grid.
    pub fn set(&mut self, sub_x: u16, sub_y: u16, color: ColorPair) -> bool {
        if sub_x >= self.sub_cols() || sub_y >= self.sub_rows() {
            return false;
        }
        let idx = self.index(sub_x / DOT_COLS, sub_y / DOT_ROWS);
        let dot = (sub_x % DOT_COLS) * DOT_ROWS + sub_y % DOT_ROWS;
        self.cells[idx] |= 1 << DOT_BITS[dot as usize];
        self.colors[idx] = Some(color);
        true
    }

    /// Packed dots of one cell
    pub fn bits(&self, cx: u16, cy: u16) -> u8 {
        if cx >= self.cols || cy >= self.rows {
            return 0;
        }
        self.cells[self.index(cx, cy)]
    }

    /// Glyph for a cell, `None` when no dot is set
    pub fn glyph(&self, cx: u16, cy: u16) -> Option<char> {
        match self.bits(cx, cy) {
            0 => None,
            bits => Some(GLYPHS[bits as usize]),
        }
    }

    pub fn color(&self, cx: u16, cy: u16) -> Option<ColorPair> {
        if cx >= self.cols || cy >= self.rows {
            return None;
        }
        self.colors[self.index(cx, cy)]
    }

    fn index(&self, cx: u16, cy: u16) -> usize {
        cy as usize * self.cols as usize + cx as usize
    }
}
