//! Screen buffer types
//!
//! Provides a character-based screen buffer for the 240x240 panel driven
//! as a 30x16 grid of 8x15 cells.

use heapless::{String, Vec};

use crate::backend::{DisplayBackend, DisplayError};
use crate::glyph::Glyph;

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 16;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 30;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Maximum glyphs drawn in one frame
pub const MAX_GLYPHS: usize = 8;

/// A glyph placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlacedGlyph {
    pub row: u8,
    pub col: u8,
    pub glyph: Glyph,
}

/// Screen buffer for the text-mode renderer
///
/// Apps redraw it from scratch every frame; [`Screen::present`] pushes it
/// to any `DisplayBackend` implementation.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Selection/highlight state per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Glyph overlays
    glyphs: Vec<PlacedGlyph, MAX_GLYPHS>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            glyphs: Vec::new(),
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        for highlight in &mut self.highlights {
            *highlight = None;
        }
        self.glyphs.clear();
    }

    /// Clear a single row, keeping glyphs placed on it
    pub fn clear_line(&mut self, row: usize) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            self.highlights[row] = None;
        }
    }

    /// Set the content of a specific row
    ///
    /// Text beyond the row width is dropped.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            push_truncated(&mut self.lines[row], text);
        }
    }

    /// Write text starting at a column, padding the row with spaces
    pub fn set_text(&mut self, row: usize, col: usize, text: &str) {
        if row >= SCREEN_ROWS || col >= LINE_LEN {
            return;
        }
        let old = self.lines[row].clone();
        let mut old_chars = old.chars();
        let mut line: String<LINE_LEN> = String::new();
        for _ in 0..col {
            let _ = line.push(old_chars.next().unwrap_or(' '));
        }
        let before = line.len();
        push_truncated(&mut line, text);
        // Keep the tail that lies past the new text
        let written = line.len() - before;
        for ch in old_chars.skip(written) {
            if line.push(ch).is_err() {
                break;
            }
        }
        self.lines[row] = line;
    }

    /// Set a row with the text centred
    pub fn set_centered(&mut self, row: usize, text: &str) {
        let len = text.chars().count().min(LINE_LEN);
        let col = (LINE_LEN - len) / 2;
        self.clear_line(row);
        self.set_text(row, col, text);
    }

    /// Draw a horizontal bar of `width` cells filled to `percent`
    pub fn set_bar(&mut self, row: usize, col: usize, width: usize, percent: u8) {
        let width = width.min(LINE_LEN.saturating_sub(col));
        let filled = (width * percent.min(100) as usize + 50) / 100;
        let mut bar: String<LINE_LEN> = String::new();
        for i in 0..width {
            let _ = bar.push(if i < filled { '#' } else { '-' });
        }
        self.set_text(row, col, &bar);
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight (invert) region for a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS {
            self.highlights[row] = Some((start_col, end_col));
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Place a glyph; silently dropped when the overlay list is full
    pub fn put_glyph(&mut self, row: usize, col: usize, glyph: Glyph) {
        if row < SCREEN_ROWS && col < SCREEN_COLS {
            let _ = self.glyphs.push(PlacedGlyph {
                row: row as u8,
                col: col as u8,
                glyph,
            });
        }
    }

    /// Glyph at a cell, if any
    pub fn glyph_at(&self, row: usize, col: usize) -> Option<Glyph> {
        self.glyphs
            .iter()
            .find(|g| g.row as usize == row && g.col as usize == col)
            .map(|g| g.glyph)
    }

    /// All placed glyphs
    pub fn glyphs(&self) -> &[PlacedGlyph] {
        &self.glyphs
    }

    /// Whether any row contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.as_str().contains(needle))
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Push the buffer to a backend and flush it
    pub fn present(&self, backend: &mut dyn DisplayBackend) -> Result<(), DisplayError> {
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line.as_str())?;
            }
        }
        for (row, highlight) in self.highlights.iter().enumerate() {
            if let Some((start, end)) = highlight {
                backend.invert_region(row as u8, *start, *end)?;
            }
        }
        for placed in &self.glyphs {
            backend.draw_glyph(placed.row, placed.col, placed.glyph)?;
        }
        backend.flush()
    }
}

/// Append `text`, replacing anything outside printable ASCII with '?'
fn push_truncated(line: &mut String<LINE_LEN>, text: &str) {
    for ch in text.chars() {
        let ch = if ch == ' ' || ch.is_ascii_graphic() {
            ch
        } else {
            '?'
        };
        if line.push(ch).is_err() {
            break;
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
