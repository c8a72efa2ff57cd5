//! Menu system
//!
//! - `catalog`: ordered, fixed list of launchable apps
//! - `cursor`: selection and scroll window over the catalog
//! - `controller`: the cooperative menu loop and the "update now" action

pub mod catalog;
pub mod controller;
pub mod cursor;

pub use catalog::{AppId, CatalogEntry, CatalogError, MenuCatalog, MAX_ENTRIES};
pub use controller::{run_menu, MenuController, MenuOutcome, MENU_TITLE, SPINNER};
pub use cursor::MenuCursor;
