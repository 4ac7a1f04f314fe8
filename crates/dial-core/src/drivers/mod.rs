//! Drivers for the watch's peripherals.
//!
//! Each driver implements one [`hal`](crate::hal) capability trait over an
//! embedded-hal interface, so the firmware plugs in esp-hal peripherals and
//! the tests plug in fakes.

pub mod axp2101;
pub mod backlight;
pub mod ft6336u;
pub mod pcf85063;

pub use axp2101::Axp2101Gauge;
pub use backlight::PwmBacklight;
pub use ft6336u::Ft6336u;
pub use pcf85063::Pcf85063;

/// Decode one packed BCD byte.
pub(crate) fn bcd_decode(value: u8) -> u8 {
    (value & 0x0F) + (value >> 4) * 10
}

/// Encode a value below 100 as packed BCD.
pub(crate) fn bcd_encode(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
