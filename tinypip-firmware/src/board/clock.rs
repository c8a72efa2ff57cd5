//! Board clock
//!
//! The RP2040 timer gives monotonic ticks; wall time is the tick count
//! plus an offset set by network time sync. Sleeps busy-wait on the
//! timer since the shell is the only thing running.

use embassy_time::{block_for, Duration, Instant};
use tinypip_core::traits::Clock;

pub struct BoardClock {
    /// Epoch seconds at tick zero
    epoch_at_boot_s: u64,
}

impl BoardClock {
    pub fn new(epoch_at_boot_s: u64) -> Self {
        Self { epoch_at_boot_s }
    }
}

impl Clock for BoardClock {
    fn now_epoch_s(&self) -> u64 {
        self.epoch_at_boot_s + Instant::now().as_secs()
    }

    fn now_ticks_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn sleep_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }

    fn set_epoch_s(&mut self, epoch_s: u64) {
        self.epoch_at_boot_s = epoch_s.saturating_sub(Instant::now().as_secs());
    }
}
