//! Persistent key/value storage trait

/// Storage keys for persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// User settings (brightness, theme)
    Settings = 0,
    /// Saved Wi-Fi network and password
    WifiCredentials = 1,
    /// Note list
    Notes = 2,
    /// Cached weather report
    Weather = 3,
}

impl StorageKey {
    /// Every key, in discriminant order
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Settings,
        StorageKey::WifiCredentials,
        StorageKey::Notes,
        StorageKey::Weather,
    ];

    /// Raw key byte used by flash maps
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Key for a raw byte, if it names one
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_u8() == value)
    }
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let Some(first) = buffer.first_mut() else {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        };
        *first = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let Some(&raw) = buffer.first() else {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        };
        StorageKey::from_u8(raw)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

/// Storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No record stored under the key
    NotFound,
    /// Caller's buffer cannot hold the record
    BufferTooSmall,
    /// No space left for the record
    Full,
    /// Flash read/write/erase failure
    Io,
}

/// Trait for the board's persistent storage
///
/// Records are opaque byte strings. Encoding lives in `crate::persist`.
pub trait Storage {
    /// Read the record under `key` into `buf`, returning its length
    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace the record under `key`
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;
}
