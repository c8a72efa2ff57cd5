//! Board-agnostic core of the TinyPIP handheld shell
//!
//! This crate contains everything that does not touch a register:
//!
//! - Platform traits the board implements (clock, radio, storage, network)
//! - Menu catalog, cursor and the cooperative menu controller
//! - The app contract and the fourteen built-in apps
//! - Update status badge and the background update sequence
//! - Beacon signal sampling and path-loss distance estimation
//! - Device configuration, its TOML parser and postcard persistence
//!
//! The [`shell::Shell`] ties it together as a single-threaded loop that
//! alternates between the menu and one active app.

#![no_std]
#![deny(unsafe_code)]

pub(crate) mod log;

pub mod app;
pub mod apps;
pub mod boot;
pub mod config;
pub mod input;
pub mod menu;
pub mod persist;
pub mod shell;
pub mod signal;
pub mod status;
pub mod time;
pub mod traits;
pub mod update;
pub mod weather;

#[cfg(any(test, feature = "testing"))]
extern crate std;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Version string shown by the boot log and the SYSTEM app
pub const OS_VERSION: &str = "v1.8.0";

/// Hardware the firmware targets: a plain RP2040 Pico under the ST7789 LCD hat
pub const DEVICE_MODEL: &str = "Pico + LCD hat";
