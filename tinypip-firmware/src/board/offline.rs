//! Radio and network services for boards without a bound Wi-Fi driver
//!
//! The Pico-LCD-1.3 build has no radio driver. Scans and connects report
//! `Unavailable`, so the scanner shows an empty list, the tracker keeps
//! searching and "update now" ends in NO WIFI.

use tinypip_core::traits::{Forecast, NetServices, Radio, RadioError, ScanList};

#[derive(Debug, Default)]
pub struct OfflineRadio {
    enabled: bool,
}

impl Radio for OfflineRadio {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn scan(&mut self, out: &mut ScanList) -> Result<(), RadioError> {
        out.clear();
        if !self.enabled {
            return Err(RadioError::Disabled);
        }
        Err(RadioError::Unavailable)
    }

    fn begin_connect(&mut self, _ssid: &str, _secret: &str) -> Result<(), RadioError> {
        Err(RadioError::Unavailable)
    }

    fn is_connected(&mut self) -> bool {
        false
    }

    fn disconnect(&mut self) {}
}

#[derive(Debug, Default)]
pub struct OfflineNet;

impl NetServices for OfflineNet {
    fn sync_time(&mut self) -> Option<u64> {
        None
    }

    fn fetch_forecast(&mut self, _latitude: f32, _longitude: f32) -> Option<Forecast> {
        None
    }
}
