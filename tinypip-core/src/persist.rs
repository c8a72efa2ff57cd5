//! Best-effort record persistence
//!
//! Records are postcard-encoded into a fixed stack buffer. Anything that
//! cannot be read back (missing, truncated, from an older layout) is
//! treated as absent; failed writes are logged and otherwise ignored.

use serde::{de::DeserializeOwned, Serialize};

use crate::log::{debug, warn};
use crate::traits::{Storage, StorageKey};

/// Largest encoded record
pub const MAX_RECORD_LEN: usize = 512;

/// Load and decode the record under `key`
pub fn load<T: DeserializeOwned>(storage: &mut dyn Storage, key: StorageKey) -> Option<T> {
    let mut buf = [0u8; MAX_RECORD_LEN];
    let len = match storage.read(key, &mut buf) {
        Ok(len) => len,
        Err(e) => {
            debug!("persist: no record for {:?}: {:?}", key, e);
            return None;
        }
    };

    match postcard::from_bytes(&buf[..len]) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("persist: discarding unreadable record for {:?}", key);
            None
        }
    }
}

/// Encode and store `value` under `key`; returns whether it was written
pub fn save<T: Serialize>(storage: &mut dyn Storage, key: StorageKey, value: &T) -> bool {
    let mut buf = [0u8; MAX_RECORD_LEN];
    let bytes = match postcard::to_slice(value, &mut buf) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!("persist: record for {:?} does not fit", key);
            return false;
        }
    };

    match storage.write(key, bytes) {
        Ok(()) => true,
        Err(e) => {
            warn!("persist: write for {:?} failed: {:?}", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::testing::MemStorage;
    use tinypip_display::Theme;

    #[test]
    fn test_save_then_load() {
        let mut storage = MemStorage::new();
        let settings = Settings {
            brightness: 70,
            theme: Theme::Amber,
        };
        assert!(save(&mut storage, StorageKey::Settings, &settings));
        assert_eq!(
            load::<Settings>(&mut storage, StorageKey::Settings),
            Some(settings)
        );
    }

    #[test]
    fn test_missing_record_is_none() {
        let mut storage = MemStorage::new();
        assert_eq!(load::<Settings>(&mut storage, StorageKey::Settings), None);
    }

    #[test]
    fn test_garbage_is_none() {
        let mut storage = MemStorage::new();
        storage.insert_raw(StorageKey::Settings, &[0xff]);
        assert_eq!(load::<Settings>(&mut storage, StorageKey::Settings), None);
    }

    #[test]
    fn test_failed_write_reports_false() {
        let mut storage = MemStorage::new();
        storage.fail_writes(true);
        assert!(!save(&mut storage, StorageKey::Settings, &Settings::default()));
        assert_eq!(storage.raw(StorageKey::Settings), None);
    }

    #[test]
    fn test_full_length_records_fit_the_stack_buffer() {
        use crate::traits::MAX_SSID_LEN;
        use crate::update::{WifiCredentials, MAX_SECRET_LEN};

        let mut creds = WifiCredentials::default();
        for _ in 0..MAX_SSID_LEN {
            creds.ssid.push('S').unwrap();
        }
        for _ in 0..MAX_SECRET_LEN {
            creds.password.push('p').unwrap();
        }

        let mut storage = MemStorage::new();
        assert!(save(&mut storage, StorageKey::WifiCredentials, &creds));
        let stored = storage.raw(StorageKey::WifiCredentials).unwrap();
        assert!(stored.len() <= MAX_RECORD_LEN);
        assert_eq!(
            load::<WifiCredentials>(&mut storage, StorageKey::WifiCredentials),
            Some(creds)
        );
    }
}
