//! Device configuration types
//!
//! Defaults match the stock handheld: six menu rows, eight scan rounds per
//! tracker frame and a five minute badge lifetime.

use heapless::String;

/// Maximum beacon prefix length
pub const MAX_PREFIX_LEN: usize = 16;

/// Beacon tracking parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconConfig {
    /// Advertised-name prefix identifying the paired beacon
    pub prefix: String<MAX_PREFIX_LEN>,
    /// Discovery scans averaged per estimate
    pub rounds: u8,
    /// Pause between scans
    pub round_pause_ms: u16,
    /// Carrier frequency for the path-loss formula
    pub reference_freq_mhz: f32,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        let mut prefix = String::new();
        let _ = prefix.push_str("BEACON");
        Self {
            prefix,
            rounds: 8,
            round_pause_ms: 30,
            reference_freq_mhz: 2412.0,
        }
    }
}

/// Menu behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuConfig {
    /// Catalog rows drawn at once
    pub visible_rows: u8,
    /// Minimum interval between accepted cursor moves
    pub move_debounce_ms: u16,
    /// Minimum interval between accepted select/back presses
    pub select_debounce_ms: u16,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            visible_rows: 6,
            move_debounce_ms: 150,
            select_debounce_ms: 200,
        }
    }
}

/// Background update timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdateConfig {
    /// Status polls per connection attempt
    pub connect_timeout_rounds: u16,
    /// Sleep between status polls
    pub connect_poll_ms: u16,
    /// Spinner frames shown before the update starts
    pub spinner_cycles: u8,
    /// Duration of one spinner frame
    pub spinner_frame_ms: u16,
    /// How long the result title stays up
    pub result_hold_ms: u16,
    /// Seconds before a settled badge reverts to idle
    pub badge_expiry_s: u32,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            connect_timeout_rounds: 150,
            connect_poll_ms: 100,
            spinner_cycles: 12,
            spinner_frame_ms: 100,
            result_hold_ms: 1500,
            badge_expiry_s: 300,
        }
    }
}

/// Weather location
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherConfig {
    pub latitude: f32,
    pub longitude: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            latitude: 43.0,
            longitude: -83.7,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub beacon: BeaconConfig,
    pub menu: MenuConfig,
    pub update: UpdateConfig,
    pub weather: WeatherConfig,
    /// Default per-frame sleep of app loops
    pub frame_ms: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            beacon: BeaconConfig::default(),
            menu: MenuConfig::default(),
            update: UpdateConfig::default(),
            weather: WeatherConfig::default(),
            frame_ms: 50,
        }
    }
}

impl DeviceConfig {
    /// Create a configuration with stock values
    pub fn new() -> Self {
        Self::default()
    }
}
