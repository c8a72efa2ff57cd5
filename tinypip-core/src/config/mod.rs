//! Configuration types and parsing
//!
//! `DeviceConfig` holds compile-time tunables, parsed from the TOML file
//! the firmware embeds. `Settings` holds the user's runtime choices and is
//! stored as postcard binary data.

pub mod settings;
pub mod toml;
pub mod types;

pub use settings::{Settings, DEFAULT_BRIGHTNESS, MIN_BRIGHTNESS};
pub use toml::{parse_config, ParseError};
pub use types::*;
