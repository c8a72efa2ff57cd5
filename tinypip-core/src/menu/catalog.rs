//! App catalog
//!
//! Labels map to an `AppId` rather than a function, so dispatch is a
//! `match` the compiler checks for completeness.

use heapless::Vec;

/// Maximum catalog entries
pub const MAX_ENTRIES: usize = 16;

/// Built-in apps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppId {
    Clock,
    Stopwatch,
    Notes,
    WifiScanner,
    Tracker,
    Weather,
    Settings,
    System,
    Snake,
    Status,
    Timer,
    AddWifi,
    SetDate,
    SetTime,
}

impl AppId {
    /// Every app in menu order
    pub const ALL: [AppId; 14] = [
        AppId::Clock,
        AppId::Stopwatch,
        AppId::Notes,
        AppId::WifiScanner,
        AppId::Tracker,
        AppId::Weather,
        AppId::Settings,
        AppId::System,
        AppId::Snake,
        AppId::Status,
        AppId::Timer,
        AppId::AddWifi,
        AppId::SetDate,
        AppId::SetTime,
    ];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            AppId::Clock => "CLOCK",
            AppId::Stopwatch => "STOPWATCH",
            AppId::Notes => "NOTES",
            AppId::WifiScanner => "WIFI SCANNER",
            AppId::Tracker => "TRACKER",
            AppId::Weather => "WEATHER",
            AppId::Settings => "SETTINGS",
            AppId::System => "SYSTEM",
            AppId::Snake => "SNAKE",
            AppId::Status => "STATUS",
            AppId::Timer => "TIMER",
            AppId::AddWifi => "ADD WIFI",
            AppId::SetDate => "SET DATE",
            AppId::SetTime => "SET TIME",
        }
    }
}

/// Catalog construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// Two entries share a label
    DuplicateLabel,
    /// More than `MAX_ENTRIES` entries
    TooManyEntries,
}

/// One menu row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CatalogEntry {
    pub label: &'static str,
    pub app: AppId,
}

impl CatalogEntry {
    /// Entry labelled with the app's own label
    pub const fn new(label: &'static str, app: AppId) -> Self {
        Self { label, app }
    }
}

impl From<AppId> for CatalogEntry {
    fn from(app: AppId) -> Self {
        Self::new(app.label(), app)
    }
}

/// Ordered list of menu entries, fixed after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
    entries: Vec<CatalogEntry, MAX_ENTRIES>,
}

impl MenuCatalog {
    /// Build a catalog; labels must be unique
    pub fn new(entries: &[CatalogEntry]) -> Result<Self, CatalogError> {
        let mut list: Vec<CatalogEntry, MAX_ENTRIES> = Vec::new();
        for entry in entries {
            if list.iter().any(|e| e.label == entry.label) {
                return Err(CatalogError::DuplicateLabel);
            }
            list.push(*entry).map_err(|_| CatalogError::TooManyEntries)?;
        }
        Ok(Self { entries: list })
    }

    /// Catalog of every built-in app
    pub fn standard() -> Self {
        let mut entries = Vec::new();
        for app in AppId::ALL {
            // ALL is shorter than MAX_ENTRIES and its labels are distinct
            let _ = entries.push(CatalogEntry::from(app));
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Index of the entry with `label`
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }
}
