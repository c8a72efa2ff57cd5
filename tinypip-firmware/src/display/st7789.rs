//! ST7789 TFT panel driver
//!
//! Driver for the 240x240 ST7789 panel on a blocking SPI bus. Only what
//! the terminal renderer needs: init and writing a pixel window.

use embassy_time::{block_for, Duration};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel width in pixels
pub const PANEL_WIDTH: u16 = 240;

/// Panel height in pixels
pub const PANEL_HEIGHT: u16 = 240;

/// ST7789 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// Row/column exchange with mirrored X, matching the board's mounting
const MADCTL_ROTATED: u8 = 0x70;

/// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x55;

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// SPI transfer failed
    Bus,
    /// Control pin could not be driven
    Pin,
    /// Window lies outside the panel
    OutOfBounds,
}

/// ST7789 driver
pub struct St7789<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
}

impl<SPI, DC, CS, RST> St7789<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Create a new driver; call [`St7789::init`] before drawing
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Hardware reset and power-up sequence
    pub fn init(&mut self) -> Result<(), PanelError> {
        self.rst.set_low().map_err(|_| PanelError::Pin)?;
        block_for(Duration::from_millis(10));
        self.rst.set_high().map_err(|_| PanelError::Pin)?;
        block_for(Duration::from_millis(120));

        self.command(cmd::SWRESET, &[])?;
        block_for(Duration::from_millis(150));
        self.command(cmd::SLPOUT, &[])?;
        block_for(Duration::from_millis(120));

        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        self.command(cmd::MADCTL, &[MADCTL_ROTATED])?;
        // This panel is wired with inverted colour sense
        self.command(cmd::INVON, &[])?;
        self.command(cmd::NORON, &[])?;
        self.command(cmd::DISPON, &[])?;

        Ok(())
    }

    /// Write big-endian RGB565 `pixels` into a `width` x `height` window
    pub fn write_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixels: &[u8],
    ) -> Result<(), PanelError> {
        if width == 0
            || height == 0
            || x + width > PANEL_WIDTH
            || y + height > PANEL_HEIGHT
            || pixels.len() != usize::from(width) * usize::from(height) * 2
        {
            return Err(PanelError::OutOfBounds);
        }

        let x_end = x + width - 1;
        let y_end = y + height - 1;
        self.command(cmd::CASET, &address_range(x, x_end))?;
        self.command(cmd::RASET, &address_range(y, y_end))?;
        self.command(cmd::RAMWR, pixels)
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        let result = self.transfer(command, params);
        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }

    fn transfer(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Pin)?;
        self.spi.write(&[command]).map_err(|_| PanelError::Bus)?;
        self.spi.flush().map_err(|_| PanelError::Bus)?;

        if !params.is_empty() {
            self.dc.set_high().map_err(|_| PanelError::Pin)?;
            self.spi.write(params).map_err(|_| PanelError::Bus)?;
            self.spi.flush().map_err(|_| PanelError::Bus)?;
        }

        Ok(())
    }
}

/// CASET/RASET parameter bytes
fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}
