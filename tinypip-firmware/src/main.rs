//! TinyPIP - retro terminal shell firmware
//!
//! Main firmware binary for a Raspberry Pi Pico with the 1.3" 240x240
//! ST7789 LCD hat (D-pad plus A/B/X/Y keys). Wires the board peripherals
//! into a `Board` and hands it to the shell, which never returns.
//!
//! Pin map:
//! - LCD: SPI1 SCK=GP10 MOSI=GP11, CS=GP9, DC=GP8, RST=GP12, BL=GP13
//! - D-pad: up=GP2 down=GP18 left=GP16 right=GP20
//! - Keys: A=GP15 (confirm) B=GP17 (back) Y=GP21 (update now)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{self, Blocking, Spi};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tinypip_core::config::{parse_config, DeviceConfig};
use tinypip_core::shell::Shell;
use tinypip_core::traits::Board;

use crate::board::{Buttons, BoardClock, FlashStorage, OfflineNet, OfflineRadio, PwmBacklight};
use crate::display::{St7789, Terminal};

mod board;
mod display;

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// SPI clock for the panel
const LCD_SPI_HZ: u32 = 62_500_000;

/// Wall clock before the first network time sync
const EPOCH_AT_BOOT_S: u64 = 0;

type Lcd = Terminal<Spi<'static, SPI1, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

static LCD: StaticCell<Lcd> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("TinyPIP firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let mut panel = St7789::new(
        spi,
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::High),
        Output::new(p.PIN_12, Level::High),
    );
    let ready = match panel.init() {
        Ok(()) => true,
        Err(e) => {
            error!("LCD init failed: {:?}", e);
            false
        }
    };
    let lcd = LCD.init_with(|| Terminal::new(panel, ready));
    info!("LCD initialized");

    let mut buttons = Buttons::new(
        p.PIN_2, p.PIN_18, p.PIN_16, p.PIN_20, p.PIN_15, p.PIN_17, p.PIN_21,
    );
    let mut backlight = PwmBacklight::new(p.PWM_SLICE6, p.PIN_13);
    let mut storage = FlashStorage::new(p.FLASH, p.DMA_CH0);
    let mut clock = BoardClock::new(EPOCH_AT_BOOT_S);
    let mut radio = OfflineRadio::default();
    let mut net = OfflineNet;

    let board = Board {
        display: lcd,
        input: &mut buttons,
        clock: &mut clock,
        radio: &mut radio,
        storage: &mut storage,
        net: &mut net,
        backlight: &mut backlight,
    };

    info!("Starting shell");
    Shell::new(config, board).run()
}

/// Parse the embedded device.toml, falling back to stock values
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: beacon prefix {}, {} rounds",
                config.beacon.prefix.as_str(),
                config.beacon.rounds
            );
            config
        }
        Err(e) => {
            warn!("device.toml rejected ({:?}), using defaults", e);
            DeviceConfig::default()
        }
    }
}
