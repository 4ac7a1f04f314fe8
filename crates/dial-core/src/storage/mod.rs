// src/storage/mod.rs
//! Durable settings: a single named record overwritten wholesale.
//!
//! The record is the postcard encoding of [`Theme`]. Loading is fail-soft:
//! an absent, unreadable, corrupt or out-of-range record yields the default
//! theme. Saving reports errors so the caller can log them, but never panics.

pub mod memory;

pub use memory::MemoryStore;

use log::{info, warn};
use thiserror_no_std::Error;

use crate::config::SETTINGS_RECORD_MAX_LEN;
use crate::theme::Theme;

/// Errors from the settings medium.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    #[error("settings record not found")]
    NotFound,
    #[error("settings medium I/O failure")]
    Io,
    #[error("settings record could not be decoded")]
    Corrupt,
    #[error("buffer too small for settings record")]
    BufferTooSmall,
}

/// A medium holding the single settings record.
///
/// Implementations read or replace the whole record; there is no partial
/// update.
pub trait SettingsStore {
    /// Copy the record into `buf`, returning its length.
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace the record with `bytes`.
    fn save(&mut self, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        (**self).load(buf)
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).save(bytes)
    }
}

/// Encode a theme into `buf`, returning the used prefix.
pub fn encode_theme<'a>(theme: &Theme, buf: &'a mut [u8]) -> Result<&'a mut [u8], StorageError> {
    postcard::to_slice(theme, buf).map_err(|e| match e {
        postcard::Error::SerializeBufferFull => StorageError::BufferTooSmall,
        _ => StorageError::Corrupt,
    })
}

/// Decode and validate a theme record.
pub fn decode_theme(bytes: &[u8]) -> Result<Theme, StorageError> {
    let theme: Theme = postcard::from_bytes(bytes).map_err(|_| StorageError::Corrupt)?;
    if theme.is_valid() {
        Ok(theme)
    } else {
        Err(StorageError::Corrupt)
    }
}

/// Load the persisted theme, falling back to defaults on any failure.
pub fn load_theme<S: SettingsStore>(store: &mut S) -> Theme {
    let mut buf = [0u8; SETTINGS_RECORD_MAX_LEN];
    let result = store
        .load(&mut buf)
        .and_then(|len| decode_theme(&buf[..len]));

    match result {
        Ok(theme) => {
            info!("Loaded theme {:?}", theme);
            theme
        }
        Err(StorageError::NotFound) => {
            info!("No saved theme, using defaults");
            Theme::default()
        }
        Err(e) => {
            warn!("Failed to load theme ({}), using defaults", e);
            Theme::default()
        }
    }
}

/// Persist the theme. The in-memory theme is authoritative either way.
pub fn save_theme<S: SettingsStore>(store: &mut S, theme: &Theme) -> Result<(), StorageError> {
    let mut buf = [0u8; SETTINGS_RECORD_MAX_LEN];
    let bytes = encode_theme(theme, &mut buf)?;
    store.save(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn load(&mut self, _buf: &mut [u8]) -> Result<usize, StorageError> {
            Err(StorageError::Io)
        }

        fn save(&mut self, _bytes: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Io)
        }
    }

    #[test]
    fn test_theme_round_trip_through_fresh_store() {
        let theme = Theme {
            text_index: 4,
            outline_index: 7,
            brightness: 0.75,
        };
        let mut store = MemoryStore::new();
        save_theme(&mut store, &theme).unwrap();

        let mut reopened = MemoryStore::with_record(store.record().unwrap());
        assert_eq!(load_theme(&mut reopened), theme, "theme survives a reload");
    }

    #[test]
    fn test_missing_record_yields_defaults() {
        let mut store = MemoryStore::new();
        assert_eq!(load_theme(&mut store), Theme::default());
    }

    #[test]
    fn test_corrupt_record_yields_defaults() {
        let mut store = MemoryStore::with_record(&[0xFF, 0xFF]);
        assert_eq!(load_theme(&mut store), Theme::default());
    }

    #[test]
    fn test_out_of_range_record_yields_defaults() {
        let bogus = Theme {
            text_index: 40,
            outline_index: 1,
            brightness: 0.5,
        };
        let mut buf = [0u8; SETTINGS_RECORD_MAX_LEN];
        let bytes = encode_theme(&bogus, &mut buf).unwrap();
        let mut store = MemoryStore::with_record(bytes);
        assert_eq!(
            load_theme(&mut store),
            Theme::default(),
            "palette index 40 is rejected"
        );
    }

    #[test]
    fn test_unreadable_store_yields_defaults_and_save_reports() {
        let mut store = BrokenStore;
        assert_eq!(load_theme(&mut store), Theme::default());
        assert_eq!(
            save_theme(&mut store, &Theme::default()),
            Err(StorageError::Io)
        );
    }

    #[test]
    fn test_encoded_record_fits_budget() {
        let theme = Theme {
            text_index: 11,
            outline_index: 11,
            brightness: 1.0,
        };
        let mut buf = [0u8; SETTINGS_RECORD_MAX_LEN];
        let len = encode_theme(&theme, &mut buf).unwrap().len();
        assert!(len <= SETTINGS_RECORD_MAX_LEN, "encoded {} bytes", len);
    }
}
