//! Wall clock, monotonic ticks and blocking sleep

/// Time source of the board
///
/// The shell is single-threaded; `sleep_ms` blocks the only thread and is
/// the frame limiter of every loop.
pub trait Clock {
    /// Seconds since the Unix epoch
    ///
    /// Before the first time sync this counts from whatever the clock was
    /// reset to.
    fn now_epoch_s(&self) -> u64;

    /// Milliseconds since boot, never goes backwards
    fn now_ticks_ms(&self) -> u64;

    /// Block for `ms` milliseconds
    fn sleep_ms(&mut self, ms: u32);

    /// Set the wall clock (after a network time sync)
    fn set_epoch_s(&mut self, epoch_s: u64);
}
