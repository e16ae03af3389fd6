//! Fixed-size glyph grid with clipped drawing

use serde::{Deserialize, Serialize};

use crate::art::Art;
use crate::color::{self, Rgb};
use crate::consts::{SCREEN_COLS, SCREEN_ROWS};

/// Renderer hint for parallax-style effects; never used for occlusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    Far,
    Mid,
    Near,
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgb,
    pub depth: Depth,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: color::BLACK,
        depth: Depth::Near,
    };

    pub const fn new(glyph: char, color: Rgb, depth: Depth) -> Self {
        Self {
            glyph,
            color,
            depth,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// How blank characters inside art are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blanks {
    /// Leave whatever is underneath
    Skip,
    /// Punch a black hole (solid silhouettes)
    Erase,
}

/// `SCREEN_ROWS` x `SCREEN_COLS` cells; later writes overwrite earlier ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBuffer {
    cells: Vec<Cell>,
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBuffer {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::BLANK; SCREEN_COLS * SCREEN_ROWS],
        }
    }

    #[inline]
    fn index(x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < SCREEN_COLS && y < SCREEN_ROWS).then_some(y * SCREEN_COLS + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        Self::index(x, y).map(|i| &self.cells[i])
    }

    /// Write one cell; coordinates outside the grid are dropped
    pub fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = Self::index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Draw multi-row art with its top-left corner at (x, y)
    ///
    /// `paint` picks the color per (row, column) of the art.
    pub fn draw_art(
        &mut self,
        art: Art,
        x: i32,
        y: i32,
        depth: Depth,
        blanks: Blanks,
        mut paint: impl FnMut(usize, usize) -> Rgb,
    ) {
        for (i, row) in art.iter().enumerate() {
            for (j, glyph) in row.chars().enumerate() {
                let (cx, cy) = (x + j as i32, y + i as i32);
                if glyph == ' ' {
                    if blanks == Blanks::Erase {
                        self.put(cx, cy, Cell::BLANK);
                    }
                    continue;
                }
                self.put(cx, cy, Cell::new(glyph, paint(i, j), depth));
            }
        }
    }

    /// Draw a single line of text starting at (x, y)
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb, depth: Depth) {
        for (j, glyph) in text.chars().enumerate() {
            self.put(x + j as i32, y, Cell::new(glyph, color, depth));
        }
    }

    /// Replace glyphs in place through `map`, keeping color and depth
    pub fn substitute(&mut self, map: impl Fn(char) -> Option<char>) {
        for cell in &mut self.cells {
            if let Some(glyph) = map(cell.glyph) {
                cell.glyph = glyph;
            }
        }
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(SCREEN_COLS)
    }

    /// Glyphs as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((SCREEN_COLS + 1) * SCREEN_ROWS * 2);
        for row in self.rows() {
            text.extend(row.iter().map(|cell| cell.glyph));
            text.push('\n');
        }
        text
    }
}

/// Column at which text of `width` characters is centered
pub fn centered(width: usize) -> i32 {
    (SCREEN_COLS as i32 - width as i32) / 2
}
