//! Hardware abstraction traits
//!
//! These traits define the interface between the shell and the board.
//! Display and input traits live in `tinypip-display`; everything else the
//! core needs from the platform is declared here and bundled in [`Board`].

pub mod backlight;
pub mod board;
pub mod clock;
pub mod network;
pub mod radio;
pub mod storage;

pub use backlight::Backlight;
pub use board::Board;
pub use clock::Clock;
pub use network::{DailyForecast, Forecast, NetServices, FORECAST_DAYS};
pub use radio::{Radio, RadioError, ScanList, ScanResult, MAX_SCAN_RESULTS, MAX_SSID_LEN};
pub use storage::{Storage, StorageError, StorageKey};
