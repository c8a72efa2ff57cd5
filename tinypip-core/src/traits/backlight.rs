//! Panel backlight trait

/// Trait for the backlight driver
pub trait Backlight {
    /// Set brightness in percent (0-100)
    fn set_level(&mut self, percent: u8);
}
