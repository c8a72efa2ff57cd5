//! Panel output
//!
//! `st7789` talks to the controller; `terminal` turns the shell's text
//! grid and glyphs into pixels on it.

pub mod st7789;
pub mod terminal;

pub use st7789::{PanelError, St7789};
pub use terminal::Terminal;
