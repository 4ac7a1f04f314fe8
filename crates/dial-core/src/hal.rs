// src/hal.rs
//! Capability traits for the hardware the watch talks to.
//!
//! The core never touches a bus directly. The firmware implements these over
//! esp-hal peripherals and the simulator implements them over SDL input and
//! the host clock. Every fallible call returns [`HardwareError`] and the
//! caller picks the fail-soft default.

use core::future::Future;

use thiserror_no_std::Error;

use crate::datetime::DateTime;
use crate::ui::TouchPoint;

pub use crate::storage::SettingsStore;

/// Errors reported by hardware collaborators.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    #[error("bus transaction failed")]
    Bus,
    #[error("device did not respond")]
    NotPresent,
    #[error("device returned data out of range")]
    InvalidData,
}

/// Capacitive touch controller.
pub trait TouchSource {
    /// Current contact, if any. Only the first reported point is returned.
    fn poll(&mut self) -> impl Future<Output = Result<Option<TouchPoint>, HardwareError>>;
}

/// Battery-backed real-time clock.
pub trait ClockSource {
    fn now(&mut self) -> impl Future<Output = Result<DateTime, HardwareError>>;

    fn set(&mut self, value: DateTime) -> impl Future<Output = Result<(), HardwareError>>;
}

/// Fuel gauge reporting state of charge.
pub trait BatterySource {
    /// Raw percentage as reported by the gauge; may exceed 100.
    fn read_percent(&mut self) -> impl Future<Output = Result<u8, HardwareError>>;
}

/// Global display brightness.
pub trait Backlight {
    /// `level` is in `0.0..=1.0`; `0.0` blanks the panel.
    fn set_brightness(&mut self, level: f32);
}

/// Source of randomness for the toy pages.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

/// Everything the main loop needs from a board.
pub trait Board {
    type Touch: TouchSource;
    type Clock: ClockSource;
    type Battery: BatterySource;
    type Backlight: Backlight;
    type Random: RandomSource;
    type Store: SettingsStore;

    fn touch(&mut self) -> &mut Self::Touch;
    fn clock(&mut self) -> &mut Self::Clock;
    fn battery(&mut self) -> &mut Self::Battery;
    fn backlight(&mut self) -> &mut Self::Backlight;
    fn random(&mut self) -> &mut Self::Random;
    fn store(&mut self) -> &mut Self::Store;
}
