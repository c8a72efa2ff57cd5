//! Update status indicator
//!
//! Tracks the outcome of the most recent background update and decides
//! which glyph the status bar shows for it.

pub mod badge;

pub use badge::{badge_glyph, UpdateEvent, UpdatePhase, UpdateStatus, PULSE_PERIOD_MS};
