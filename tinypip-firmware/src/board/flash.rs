//! Flash-backed record storage
//!
//! Uses sequential-storage for wear-leveled key-value storage in the
//! last 64KB of flash. The map API is async; the shell is synchronous,
//! so each call is driven to completion with `block_on`.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;
use tinypip_core::persist::MAX_RECORD_LEN;
use tinypip_core::traits::{Storage, StorageError, StorageKey};

/// 2MB flash on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Storage partition size, kept out of the image by memory.x
pub const STORAGE_PARTITION_SIZE: usize = 64 * 1024;

pub const STORAGE_PARTITION_START: usize = FLASH_SIZE - STORAGE_PARTITION_SIZE;

/// Flash range for the storage partition
pub const STORAGE_RANGE: core::ops::Range<u32> =
    (STORAGE_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map item: key, record and item header
const DATA_BUFFER_LEN: usize = MAX_RECORD_LEN + 32;

pub struct FlashStorage {
    flash: Flash<'static, FLASH, Async, FLASH_SIZE>,
}

impl FlashStorage {
    pub fn new(flash: Peri<'static, FLASH>, dma: Peri<'static, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

fn storage_error<E>(e: sequential_storage::Error<E>) -> StorageError {
    match e {
        sequential_storage::Error::FullStorage => StorageError::Full,
        sequential_storage::Error::BufferTooSmall(_) => StorageError::BufferTooSmall,
        _ => StorageError::Io,
    }
}

impl Storage for FlashStorage {
    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<usize, StorageError> {
        let mut data_buffer = [0u8; DATA_BUFFER_LEN];

        let result = block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            STORAGE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        ));

        match result {
            Ok(Some(data)) => {
                let len = data.len();
                let dest = buf.get_mut(..len).ok_or(StorageError::BufferTooSmall)?;
                dest.copy_from_slice(data);
                Ok(len)
            }
            Ok(None) => Err(StorageError::NotFound),
            Err(e) => Err(storage_error(e)),
        }
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        let mut data_buffer = [0u8; DATA_BUFFER_LEN];

        block_on(map::store_item(
            &mut self.flash,
            STORAGE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        ))
        .map_err(storage_error)
    }
}
