//! Status badge state machine
//!
//! `Idle -> Trying` when an update starts, `Trying -> Success | Fail` when
//! it completes. A badge that is not idle reverts to `Idle` once its
//! timestamp is older than the expiry. Expiry is evaluated lazily whenever
//! the phase is read; there is no timer.

use tinypip_display::Glyph;

/// Half-period of the "trying" pulse
pub const PULSE_PERIOD_MS: u64 = 300;

/// Phase of the most recent update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdatePhase {
    /// Nothing to report
    #[default]
    Idle,
    /// Update in progress
    Trying,
    /// Last update succeeded
    Success,
    /// Last update failed
    Fail,
}

/// Events that move the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateEvent {
    /// User requested an update
    Started,
    /// Update completed and reached the network
    Succeeded,
    /// Update gave up
    Failed,
}

/// Process-wide update status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdateStatus {
    phase: UpdatePhase,
    since_epoch_s: u64,
    expiry_s: u32,
    /// Outcome of the last completed update, kept after the badge expires
    last_outcome: Option<bool>,
}

impl UpdateStatus {
    /// Create an idle badge that expires after `expiry_s` seconds
    pub const fn new(expiry_s: u32) -> Self {
        Self {
            phase: UpdatePhase::Idle,
            since_epoch_s: 0,
            expiry_s,
            last_outcome: None,
        }
    }

    /// Phase as seen at `now_s`, with expiry applied
    pub fn phase(&self, now_s: u64) -> UpdatePhase {
        if self.phase != UpdatePhase::Idle && self.is_expired(now_s) {
            UpdatePhase::Idle
        } else {
            self.phase
        }
    }

    /// Phase as last written, ignoring expiry
    pub fn stored_phase(&self) -> UpdatePhase {
        self.phase
    }

    /// Epoch second of the last transition
    pub fn since(&self) -> u64 {
        self.since_epoch_s
    }

    /// Result of the last completed update, if any
    pub fn last_outcome(&self) -> Option<bool> {
        self.last_outcome
    }

    fn is_expired(&self, now_s: u64) -> bool {
        now_s.saturating_sub(self.since_epoch_s) >= u64::from(self.expiry_s)
    }

    /// Apply an event at `now_s`
    ///
    /// Returns the phase after the event. Completion events are ignored
    /// unless an update is in progress.
    pub fn apply(&mut self, event: UpdateEvent, now_s: u64) -> UpdatePhase {
        let next = match (self.phase(now_s), event) {
            (_, UpdateEvent::Started) => Some(UpdatePhase::Trying),
            (UpdatePhase::Trying, UpdateEvent::Succeeded) => Some(UpdatePhase::Success),
            (UpdatePhase::Trying, UpdateEvent::Failed) => Some(UpdatePhase::Fail),
            _ => None,
        };

        if let Some(phase) = next {
            self.phase = phase;
            self.since_epoch_s = now_s;
            match phase {
                UpdatePhase::Success => self.last_outcome = Some(true),
                UpdatePhase::Fail => self.last_outcome = Some(false),
                _ => {}
            }
        }

        self.phase(now_s)
    }

    /// Mark an update as started
    pub fn begin(&mut self, now_s: u64) {
        self.apply(UpdateEvent::Started, now_s);
    }

    /// Record the update result
    pub fn finish(&mut self, ok: bool, now_s: u64) {
        let event = if ok {
            UpdateEvent::Succeeded
        } else {
            UpdateEvent::Failed
        };
        self.apply(event, now_s);
    }

    /// Glyph for the status bar this frame
    pub fn glyph(&self, now_s: u64, ticks_ms: u64) -> Option<Glyph> {
        badge_glyph(self.phase(now_s), ticks_ms)
    }
}

/// Glyph for a phase at a tick count
///
/// `Trying` alternates between the filled and hollow pulse every
/// `PULSE_PERIOD_MS`; `Idle` draws nothing.
pub fn badge_glyph(phase: UpdatePhase, ticks_ms: u64) -> Option<Glyph> {
    match phase {
        UpdatePhase::Idle => None,
        UpdatePhase::Trying => {
            if (ticks_ms / PULSE_PERIOD_MS) % 2 == 0 {
                Some(Glyph::PulseOn)
            } else {
                Some(Glyph::PulseOff)
            }
        }
        UpdatePhase::Success => Some(Glyph::Check),
        UpdatePhase::Fail => Some(Glyph::Cross),
    }
}
