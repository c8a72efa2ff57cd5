//! Pico + Pico-LCD-1.3 board bindings
//!
//! Each module implements one of the core's platform traits on top of
//! embassy-rp peripherals. `main` wires them into a `Board`.

pub mod backlight;
pub mod buttons;
pub mod clock;
pub mod flash;
pub mod offline;

pub use backlight::PwmBacklight;
pub use buttons::Buttons;
pub use clock::BoardClock;
pub use flash::FlashStorage;
pub use offline::{OfflineNet, OfflineRadio};
