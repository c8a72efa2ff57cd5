//! Character-grid renderer on top of the ST7789
//!
//! Implements `DisplayBackend` for the 30x16 terminal. Draw calls only
//! update a per-row model; `flush` renders each changed row into a
//! one-row pixel band and streams it to the panel.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, Polyline, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use heapless::{String, Vec};
use tinypip_display::screen::MAX_GLYPHS;
use tinypip_display::{DisplayBackend, DisplayError, Glyph, Theme, SCREEN_COLS, SCREEN_ROWS};

use super::st7789::{St7789, PANEL_WIDTH};

/// Character cell width in pixels
const CELL_W: u16 = 8;

/// Character cell height in pixels (13 px font plus spacing)
const CELL_H: u16 = 15;

/// Font offset inside a cell
const TEXT_TOP: i32 = 1;

const BAND_PIXELS: usize = PANEL_WIDTH as usize * CELL_H as usize;

const BACKGROUND: Rgb565 = Rgb565::BLACK;

/// What one text row should look like
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RowState {
    text: String<SCREEN_COLS>,
    highlight: Option<(u8, u8)>,
    glyphs: Vec<(u8, Glyph), MAX_GLYPHS>,
}

/// Pixels of one text row, big-endian RGB565 as the panel expects
struct Band {
    pixels: [u8; BAND_PIXELS * 2],
}

impl Band {
    const fn new() -> Self {
        Self {
            pixels: [0; BAND_PIXELS * 2],
        }
    }

    fn offset(point: Point) -> Option<usize> {
        let x = u16::try_from(point.x).ok()?;
        let y = u16::try_from(point.y).ok()?;
        if x >= PANEL_WIDTH || y >= CELL_H {
            return None;
        }
        Some((usize::from(y) * usize::from(PANEL_WIDTH) + usize::from(x)) * 2)
    }

    /// Swap `fg` and `bg` between columns `start_x..end_x`
    fn invert(&mut self, start_x: u16, end_x: u16, fg: Rgb565, bg: Rgb565) {
        let fg = raw(fg);
        let bg = raw(bg);
        for y in 0..CELL_H {
            for x in start_x..end_x.min(PANEL_WIDTH) {
                let Some(i) = Band::offset(Point::new(i32::from(x), i32::from(y))) else {
                    continue;
                };
                let current = [self.pixels[i], self.pixels[i + 1]];
                let swapped = if current == bg { fg } else { bg };
                self.pixels[i..i + 2].copy_from_slice(&swapped);
            }
        }
    }
}

fn raw(color: Rgb565) -> [u8; 2] {
    RawU16::from(color).into_inner().to_be_bytes()
}

impl OriginDimensions for Band {
    fn size(&self) -> Size {
        Size::new(u32::from(PANEL_WIDTH), u32::from(CELL_H))
    }
}

impl DrawTarget for Band {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = Band::offset(point) {
                self.pixels[i..i + 2].copy_from_slice(&raw(color));
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let bytes = raw(color);
        for pixel in self.pixels.chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }
        Ok(())
    }
}

/// Foreground colour of a theme
fn theme_color(theme: Theme) -> Rgb565 {
    let (r, g, b) = theme.rgb();
    Rgb565::from(Rgb888::new(r, g, b))
}

/// Overwrite `text` into `line` starting at character `col`
fn splice_text(line: &mut String<SCREEN_COLS>, col: usize, text: &str) {
    let mut merged: String<SCREEN_COLS> = String::new();
    let mut old = line.chars();

    for _ in 0..col {
        let ch = old.next().unwrap_or(' ');
        if merged.push(ch).is_err() {
            break;
        }
    }

    let mut written = 0;
    for ch in text.chars() {
        if merged.push(ch).is_err() {
            break;
        }
        written += 1;
    }

    for ch in old.skip(written) {
        if merged.push(ch).is_err() {
            break;
        }
    }

    *line = merged;
}

fn draw_glyph(band: &mut Band, col: u8, glyph: Glyph, fg: Rgb565) {
    let x = i32::from(col) * i32::from(CELL_W);
    let fill = PrimitiveStyle::with_fill(fg);
    let stroke = PrimitiveStyle::with_stroke(fg, 1);

    let _ = match glyph {
        Glyph::PulseOn => Rectangle::new(Point::new(x + 1, 5), Size::new(6, 6))
            .into_styled(fill)
            .draw(band),
        Glyph::PulseOff => Rectangle::new(Point::new(x + 1, 5), Size::new(6, 6))
            .into_styled(stroke)
            .draw(band),
        Glyph::Check => {
            let _ = Rectangle::new(Point::new(x, 3), Size::new(8, 9))
                .into_styled(stroke)
                .draw(band);
            Polyline::new(&[
                Point::new(x + 2, 7),
                Point::new(x + 3, 9),
                Point::new(x + 6, 5),
            ])
            .into_styled(stroke)
            .draw(band)
        }
        Glyph::Cross => {
            let _ = Line::new(Point::new(x + 1, 4), Point::new(x + 6, 10))
                .into_styled(stroke)
                .draw(band);
            Line::new(Point::new(x + 6, 4), Point::new(x + 1, 10))
                .into_styled(stroke)
                .draw(band)
        }
        Glyph::Marker => Circle::new(Point::new(x + 1, 4), 7)
            .into_styled(fill)
            .draw(band),
    };
}

/// The panel as a 30x16 character terminal
pub struct Terminal<SPI, DC, CS, RST> {
    panel: St7789<SPI, DC, CS, RST>,
    /// Rows as the next flush should show them
    pending: [RowState; SCREEN_ROWS],
    /// Rows as the panel shows them now
    shown: [RowState; SCREEN_ROWS],
    band: Band,
    theme: Theme,
    repaint_all: bool,
    ready: bool,
}

impl<SPI, DC, CS, RST> Terminal<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Wrap a panel; `ready` is false when its init failed
    pub fn new(panel: St7789<SPI, DC, CS, RST>, ready: bool) -> Self {
        Self {
            panel,
            pending: Default::default(),
            shown: Default::default(),
            band: Band::new(),
            theme: Theme::default(),
            repaint_all: true,
            ready,
        }
    }

    fn row_mut(&mut self, row: u8) -> Result<&mut RowState, DisplayError> {
        self.pending
            .get_mut(usize::from(row))
            .ok_or(DisplayError::InvalidCoordinates)
    }

    fn render_row(&mut self, row: usize) -> Result<(), DisplayError> {
        let fg = theme_color(self.theme);
        let state = &self.pending[row];

        let _ = self.band.clear(BACKGROUND);
        let style = MonoTextStyle::new(&FONT_8X13, fg);
        let _ = Text::with_baseline(&state.text, Point::new(0, TEXT_TOP), style, Baseline::Top)
            .draw(&mut self.band);

        if let Some((start, end)) = state.highlight {
            self.band.invert(
                u16::from(start) * CELL_W,
                u16::from(end) * CELL_W,
                fg,
                BACKGROUND,
            );
        }

        for &(col, glyph) in &state.glyphs {
            draw_glyph(&mut self.band, col, glyph, fg);
        }

        self.panel
            .write_window(
                0,
                row as u16 * CELL_H,
                PANEL_WIDTH,
                CELL_H,
                &self.band.pixels,
            )
            .map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, DC, CS, RST> DisplayBackend for Terminal<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        for row in self.pending.iter_mut() {
            *row = RowState::default();
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let state = self.row_mut(row)?;
        splice_text(&mut state.text, usize::from(col), text);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        if start_col >= end_col || usize::from(end_col) > SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.row_mut(row)?.highlight = Some((start_col, end_col));
        Ok(())
    }

    fn draw_glyph(&mut self, row: u8, col: u8, glyph: Glyph) -> Result<(), DisplayError> {
        if usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let state = self.row_mut(row)?;
        state.glyphs.retain(|(c, _)| *c != col);
        state
            .glyphs
            .push((col, glyph))
            .map_err(|_| DisplayError::InvalidCoordinates)
    }

    fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            self.theme = theme;
            self.repaint_all = true;
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }

        for row in 0..SCREEN_ROWS {
            if self.repaint_all || self.pending[row] != self.shown[row] {
                self.render_row(row)?;
                self.shown[row] = self.pending[row].clone();
            }
        }
        self.repaint_all = false;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> String<SCREEN_COLS> {
        String::try_from(s).unwrap()
    }

    #[test]
    fn test_splice_into_empty_pads() {
        let mut l = line("");
        splice_text(&mut l, 3, "AB");
        assert_eq!(l.as_str(), "   AB");
    }

    #[test]
    fn test_splice_overwrites_middle() {
        let mut l = line("HELLO WORLD");
        splice_text(&mut l, 6, "THERE");
        assert_eq!(l.as_str(), "HELLO THERE");

        splice_text(&mut l, 0, "J");
        assert_eq!(l.as_str(), "JELLO THERE");
    }

    #[test]
    fn test_splice_truncates_at_width() {
        let mut l = line("");
        splice_text(&mut l, 28, "XYZ");
        assert_eq!(l.len(), SCREEN_COLS);
        assert!(l.ends_with("XY"));
    }
}
