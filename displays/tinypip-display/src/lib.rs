//! Display abstraction traits and shared screen buffer for TinyPIP
//!
//! This crate provides:
//! - `DisplayBackend` trait for the physical panel (text grid plus glyphs)
//! - `InputSource` trait and the `Button` set of the handheld
//! - `Screen`, a character buffer every app draws into each frame
//! - `Glyph` and `Theme`, the small vocabulary shared by renderer and panel
//!
//! # Architecture
//!
//! Apps never touch the panel. They fill a `Screen`, and the shell pushes
//! it to whatever `DisplayBackend` the board provides with
//! [`Screen::present`]. The firmware maps text cells and glyphs to pixels;
//! host tests use a recording backend instead.

#![no_std]

pub mod backend;
pub mod glyph;
pub mod input;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use glyph::{Glyph, Theme};
pub use input::{Button, InputSource};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
