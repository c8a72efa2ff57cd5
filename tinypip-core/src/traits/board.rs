//! Bundle of every platform collaborator

use tinypip_display::{DisplayBackend, InputSource};

use super::{Backlight, Clock, NetServices, Radio, Storage};

/// Mutable handles to the board's peripherals
///
/// The shell owns one `Board` for its lifetime and lends it to whichever
/// screen is active. Nothing else holds these references, so an app has
/// exclusive use of the panel and buttons until it exits.
pub struct Board<'a> {
    pub display: &'a mut dyn DisplayBackend,
    pub input: &'a mut dyn InputSource,
    pub clock: &'a mut dyn Clock,
    pub radio: &'a mut dyn Radio,
    pub storage: &'a mut dyn Storage,
    pub net: &'a mut dyn NetServices,
    pub backlight: &'a mut dyn Backlight,
}
