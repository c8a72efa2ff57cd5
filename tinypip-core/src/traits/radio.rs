//! Wireless radio trait
//!
//! Covers the two things the shell does with the radio: discovery scans
//! and blocking station-mode connection attempts.

use heapless::{String, Vec};

/// Longest SSID the radio reports
pub const MAX_SSID_LEN: usize = 32;

/// Maximum results kept from one scan
pub const MAX_SCAN_RESULTS: usize = 16;

/// Errors reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Radio is powered down
    Disabled,
    /// Scan could not be started or completed
    ScanFailed,
    /// Driver rejected the connection request
    ConnectFailed,
    /// No radio is fitted or bound on this board
    Unavailable,
}

/// One network seen by a discovery scan
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResult {
    /// Advertised network name (may be empty for hidden networks)
    pub ssid: String<MAX_SSID_LEN>,
    /// Received signal strength in dBm (negative)
    pub rssi: i16,
    /// Channel number
    pub channel: u8,
    /// True when the network needs no credentials
    pub open: bool,
}

impl ScanResult {
    /// Build a result, truncating the name to `MAX_SSID_LEN`
    pub fn new(ssid: &str, rssi: i16, channel: u8, open: bool) -> Self {
        let mut name = String::new();
        for ch in ssid.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self {
            ssid: name,
            rssi,
            channel,
            open,
        }
    }
}

/// Results of one discovery scan
pub type ScanList = Vec<ScanResult, MAX_SCAN_RESULTS>;

/// Trait for the wireless radio
///
/// All calls are synchronous. A scan blocks until the driver returns its
/// result list; connecting is split into a request and a status poll so
/// the caller owns the timeout loop.
pub trait Radio {
    /// Power the radio up or down
    fn set_enabled(&mut self, enabled: bool);

    /// Whether the radio is powered
    fn is_enabled(&self) -> bool;

    /// Run one discovery scan, replacing the contents of `out`
    fn scan(&mut self, out: &mut ScanList) -> Result<(), RadioError>;

    /// Start joining a network; `secret` is empty for open networks
    fn begin_connect(&mut self, ssid: &str, secret: &str) -> Result<(), RadioError>;

    /// Whether the station is associated and has an address
    fn is_connected(&mut self) -> bool;

    /// Leave the current network
    fn disconnect(&mut self);
}
