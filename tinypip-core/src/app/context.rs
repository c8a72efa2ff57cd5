//! Application context
//!
//! Process-wide state every screen may read: configuration, user
//! settings, the update badge and the shared debouncer. It is passed by
//! reference into the menu and every app instead of living in globals.

use tinypip_display::{Button, InputSource};

use crate::config::{DeviceConfig, Settings};
use crate::input::{Debouncer, Press};
use crate::status::UpdateStatus;

/// Shared state of the shell
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: DeviceConfig,
    pub settings: Settings,
    pub status: UpdateStatus,
    pub debouncer: Debouncer,
    /// Tick count when the shell started
    pub boot_ticks_ms: u64,
}

impl AppContext {
    /// Create a context for a shell started at `boot_ticks_ms`
    pub fn new(config: DeviceConfig, settings: Settings, boot_ticks_ms: u64) -> Self {
        let status = UpdateStatus::new(config.update.badge_expiry_s);
        Self {
            config,
            settings,
            status,
            debouncer: Debouncer::new(),
            boot_ticks_ms,
        }
    }

    /// Debounced press of an action key (confirm, back, secondary)
    pub fn pressed(&mut self, input: &mut dyn InputSource, button: Button, now_ms: u64) -> bool {
        let interval = self.config.menu.select_debounce_ms;
        self.debouncer.poll(input, button, now_ms, interval)
    }

    /// Debounced Up/Down press
    pub fn vertical(&mut self, input: &mut dyn InputSource, now_ms: u64) -> Option<Press> {
        let interval = self.config.menu.move_debounce_ms;
        self.debouncer.poll_vertical(input, now_ms, interval)
    }

    /// Debounced press of any direction
    pub fn direction(&mut self, input: &mut dyn InputSource, now_ms: u64) -> Option<Press> {
        let interval = self.config.menu.move_debounce_ms;
        self.debouncer.poll_direction(input, now_ms, interval)
    }

    /// Milliseconds since the shell started
    pub fn uptime_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.boot_ticks_ms)
    }
}
