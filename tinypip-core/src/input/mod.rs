//! Input handling
//!
//! Boards report raw button levels; the core turns them into accepted
//! presses with a per-button minimum interval.

pub mod debounce;

pub use debounce::{Debouncer, Press};
