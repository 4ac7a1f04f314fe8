//! Settings record on the microSD card.
//!
//! The record is a single file in the root directory of the first FAT
//! volume, rewritten in full on every save.

use embedded_sdmmc::{Mode, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx, VolumeManager};
use log::{debug, warn};

use dial_core::config::SETTINGS_RECORD_NAME;
use dial_core::storage::{SettingsStore, StorageError};

type SdResult<T> = Result<T, embedded_sdmmc::Error<SdCardError>>;

/// File timestamps are not meaningful on the watch; every write is stamped
/// with the same instant.
#[derive(Default, Clone, Copy)]
pub struct FixedTime;

impl TimeSource for FixedTime {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 54,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// Blocking access to the settings file on its own SPI bus.
pub struct SdSettingsStore<S, D, T>
where
    S: embedded_hal::spi::SpiDevice<u8>,
    D: embedded_hal::delay::DelayNs,
    T: TimeSource,
{
    volume_mgr: VolumeManager<SdCard<S, D>, T, 4, 4, 1>,
}

impl<S, D, T> SdSettingsStore<S, D, T>
where
    S: embedded_hal::spi::SpiDevice<u8>,
    D: embedded_hal::delay::DelayNs,
    T: TimeSource,
{
    pub fn new(sd_card: SdCard<S, D>, ts: T) -> Self {
        let volume_mgr = VolumeManager::new(sd_card, ts);

        Self { volume_mgr }
    }

    /// Returns `None` when the file does not fit in `buf`.
    fn read_record(&self, buf: &mut [u8]) -> SdResult<Option<usize>> {
        let volume0 = self.volume_mgr.open_volume(VolumeIdx(0))?;
        let root_dir = volume0.open_root_dir()?;
        let file = root_dir.open_file_in_dir(SETTINGS_RECORD_NAME, Mode::ReadOnly)?;

        if file.length() as usize > buf.len() {
            file.close()?;
            root_dir.close()?;
            volume0.close()?;
            return Ok(None);
        }

        let mut total = 0;
        while total < buf.len() {
            let bytes_read = file.read(&mut buf[total..])?;
            if bytes_read == 0 {
                break;
            }
            total += bytes_read;
        }

        file.close()?;
        root_dir.close()?;
        volume0.close()?;

        Ok(Some(total))
    }

    fn write_record(&self, bytes: &[u8]) -> SdResult<()> {
        let volume0 = self.volume_mgr.open_volume(VolumeIdx(0))?;
        let root_dir = volume0.open_root_dir()?;
        let file =
            root_dir.open_file_in_dir(SETTINGS_RECORD_NAME, Mode::ReadWriteCreateOrTruncate)?;

        file.write(bytes)?;

        file.close()?;
        root_dir.close()?;
        volume0.close()?;

        Ok(())
    }
}

fn storage_error(e: embedded_sdmmc::Error<SdCardError>) -> StorageError {
    match e {
        embedded_sdmmc::Error::NotFound => StorageError::NotFound,
        other => {
            warn!("SD card error: {:?}", other);
            StorageError::Io
        }
    }
}

impl<S, D, T> SettingsStore for SdSettingsStore<S, D, T>
where
    S: embedded_hal::spi::SpiDevice<u8>,
    D: embedded_hal::delay::DelayNs,
    T: TimeSource,
{
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let len = self
            .read_record(buf)
            .map_err(storage_error)?
            .ok_or(StorageError::BufferTooSmall)?;
        debug!("Read {} byte settings record", len);
        Ok(len)
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        self.write_record(bytes).map_err(storage_error)?;
        debug!("Wrote {} byte settings record", bytes.len());
        Ok(())
    }
}
