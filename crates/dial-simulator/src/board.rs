//! Host implementations of the watch's capability traits.
//!
//! Mouse input stands in for the touch panel, the system clock plus an offset
//! stands in for the RTC, and the settings record lives in a file in the
//! working directory.

use std::fs;
use std::hash::{BuildHasher, RandomState};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::debug;

use dial_core::datetime::DateTime;
use dial_core::hal::{
    Backlight, BatterySource, Board, ClockSource, HardwareError, RandomSource, TouchSource,
};
use dial_core::storage::{SettingsStore, StorageError};
use dial_core::ui::TouchPoint;

/// Mouse-driven touch panel. A held left button is a held contact.
///
/// A press is latched until one poll has reported it, so a click whose press
/// and release arrive in the same event batch still produces a down-edge.
#[derive(Default)]
pub struct MouseTouch {
    contact: Option<TouchPoint>,
    unseen_press: Option<TouchPoint>,
}

impl MouseTouch {
    pub fn press(&mut self, point: TouchPoint) {
        self.contact = Some(point);
        self.unseen_press = Some(point);
    }

    /// Follow the pointer while the button is held.
    pub fn drag(&mut self, point: TouchPoint) {
        if self.contact.is_some() {
            self.contact = Some(point);
        }
    }

    pub fn release(&mut self) {
        self.contact = None;
    }
}

impl TouchSource for MouseTouch {
    async fn poll(&mut self) -> Result<Option<TouchPoint>, HardwareError> {
        Ok(self.contact.or(self.unseen_press.take()))
    }
}

/// Wall clock derived from the host's UTC time.
///
/// Setting the clock stores an offset instead of touching the host.
#[derive(Default)]
pub struct HostClock {
    offset_secs: i64,
}

impl HostClock {
    fn host_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default()
    }
}

impl ClockSource for HostClock {
    async fn now(&mut self) -> Result<DateTime, HardwareError> {
        Ok(datetime_from_unix(Self::host_secs() + self.offset_secs))
    }

    async fn set(&mut self, value: DateTime) -> Result<(), HardwareError> {
        self.offset_secs = unix_from_datetime(&value) - Self::host_secs();
        debug!("Clock offset now {} s", self.offset_secs);
        Ok(())
    }
}

/// Battery that loses one percent per minute and wraps back to full.
pub struct DrainingBattery {
    started: Instant,
}

impl Default for DrainingBattery {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl BatterySource for DrainingBattery {
    async fn read_percent(&mut self) -> Result<u8, HardwareError> {
        let minutes = self.started.elapsed().as_secs() / 60;
        Ok(100 - (minutes % 100) as u8)
    }
}

/// Brightness applied when the frame is presented.
pub struct WindowBacklight {
    pub level: f32,
}

impl Backlight for WindowBacklight {
    fn set_brightness(&mut self, level: f32) {
        debug!("Backlight {:.2}", level);
        self.level = level;
    }
}

/// Randomness from std's per-process hasher keys.
pub struct HostRandom {
    state: RandomState,
    counter: u64,
}

impl Default for HostRandom {
    fn default() -> Self {
        Self {
            state: RandomState::new(),
            counter: 0,
        }
    }
}

impl RandomSource for HostRandom {
    fn next_u32(&mut self) -> u32 {
        self.counter += 1;
        self.state.hash_one(self.counter) as u32
    }
}

/// Settings record stored as a plain file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for FileStore {
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound,
            _ => StorageError::Io,
        })?;
        let dest = buf
            .get_mut(..bytes.len())
            .ok_or(StorageError::BufferTooSmall)?;
        dest.copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        fs::write(&self.path, bytes).map_err(|_| StorageError::Io)
    }
}

pub struct SimBoard {
    pub touch: MouseTouch,
    pub clock: HostClock,
    pub battery: DrainingBattery,
    pub backlight: WindowBacklight,
    pub random: HostRandom,
    pub store: FileStore,
}

impl SimBoard {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            touch: MouseTouch::default(),
            clock: HostClock::default(),
            battery: DrainingBattery::default(),
            backlight: WindowBacklight { level: 1.0 },
            random: HostRandom::default(),
            store: FileStore::new(settings_path),
        }
    }
}

impl Board for SimBoard {
    type Touch = MouseTouch;
    type Clock = HostClock;
    type Battery = DrainingBattery;
    type Backlight = WindowBacklight;
    type Random = HostRandom;
    type Store = FileStore;

    fn touch(&mut self) -> &mut MouseTouch {
        &mut self.touch
    }

    fn clock(&mut self) -> &mut HostClock {
        &mut self.clock
    }

    fn battery(&mut self) -> &mut DrainingBattery {
        &mut self.battery
    }

    fn backlight(&mut self) -> &mut WindowBacklight {
        &mut self.backlight
    }

    fn random(&mut self) -> &mut HostRandom {
        &mut self.random
    }

    fn store(&mut self) -> &mut FileStore {
        &mut self.store
    }
}

// ---------------------------------------------------------------------------
// Unix time conversion (proleptic Gregorian, UTC)
// ---------------------------------------------------------------------------

fn datetime_from_unix(secs: i64) -> DateTime {
    let days = secs.div_euclid(86_400);
    let rem = secs.rem_euclid(86_400);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    DateTime::new(
        year as u16,
        month as u8,
        day as u8,
        (rem / 3_600) as u8,
        (rem % 3_600 / 60) as u8,
        (rem % 60) as u8,
    )
}

fn unix_from_datetime(value: &DateTime) -> i64 {
    let month = i64::from(value.month);
    let year = i64::from(value.year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(value.day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    let days = era * 146_097 + doe - 719_468;

    days * 86_400
        + i64::from(value.hour) * 3_600
        + i64::from(value.minute) * 60
        + i64::from(value.second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_quick_click_still_reaches_a_poll() {
        let mut touch = MouseTouch::default();
        let point = TouchPoint::new(120, 60);
        touch.press(point);
        touch.release();
        assert_eq!(block_on(touch.poll()), Ok(Some(point)), "press seen once");
        assert_eq!(block_on(touch.poll()), Ok(None), "then released");
    }

    #[test]
    fn test_held_button_follows_drag() {
        let mut touch = MouseTouch::default();
        touch.press(TouchPoint::new(10, 10));
        assert_eq!(block_on(touch.poll()), Ok(Some(TouchPoint::new(10, 10))));
        touch.drag(TouchPoint::new(20, 30));
        assert_eq!(block_on(touch.poll()), Ok(Some(TouchPoint::new(20, 30))));
        touch.release();
        touch.drag(TouchPoint::new(50, 50));
        assert_eq!(block_on(touch.poll()), Ok(None), "moves without a button are ignored");
    }

    #[test]
    fn test_unix_epoch_and_leap_day() {
        assert_eq!(datetime_from_unix(0), DateTime::new(1970, 1, 1, 0, 0, 0));
        let leap = DateTime::new(2024, 2, 29, 23, 59, 30);
        assert_eq!(datetime_from_unix(unix_from_datetime(&leap)), leap);
        assert_eq!(unix_from_datetime(&DateTime::new(2000, 1, 1, 0, 0, 0)), 946_684_800);
    }

    #[test]
    fn test_file_store_missing_record() {
        let mut store = FileStore::new("/nonexistent-dir/settings.bin");
        let mut buf = [0u8; 32];
        assert_eq!(store.load(&mut buf), Err(StorageError::NotFound));
    }
}
