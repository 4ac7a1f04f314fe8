// src/storage/memory.rs
//! RAM-backed settings store.
//!
//! Used by boards with no durable medium (the record lives until reset) and
//! by tests.

use alloc::vec::Vec;

use super::{SettingsStore, StorageError};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    record: Option<Vec<u8>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `bytes`.
    pub fn with_record(bytes: &[u8]) -> Self {
        Self {
            record: Some(bytes.to_vec()),
            fail_writes: false,
        }
    }

    /// Make every subsequent save fail with [`StorageError::Io`].
    pub fn fail_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn record(&self) -> Option<&[u8]> {
        self.record.as_deref()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let record = self.record.as_ref().ok_or(StorageError::NotFound)?;
        let dest = buf
            .get_mut(..record.len())
            .ok_or(StorageError::BufferTooSmall)?;
        dest.copy_from_slice(record);
        Ok(record.len())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io);
        }
        self.record = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_overwrites_wholesale() {
        let mut store = MemoryStore::with_record(&[1, 2, 3, 4]);
        store.save(&[9]).unwrap();
        assert_eq!(store.record(), Some(&[9u8][..]), "old bytes are gone");
    }

    #[test]
    fn test_small_buffer_is_reported() {
        let mut store = MemoryStore::with_record(&[1, 2, 3, 4]);
        let mut buf = [0u8; 2];
        assert_eq!(store.load(&mut buf), Err(StorageError::BufferTooSmall));
    }

    #[test]
    fn test_failing_writes_keep_previous_record() {
        let mut store = MemoryStore::with_record(&[7]).fail_writes();
        assert_eq!(store.save(&[8]), Err(StorageError::Io));
        assert_eq!(store.record(), Some(&[7u8][..]));
    }
}
