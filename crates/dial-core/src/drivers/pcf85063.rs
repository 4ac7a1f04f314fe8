//! PCF85063 real-time clock.
//!
//! Time registers start at 0x04: seconds, minutes, hours, days, weekdays,
//! months, years, all packed BCD. Bit 7 of the seconds register is the
//! oscillator-stop flag, set after the backup supply was lost.

use embedded_hal_async::i2c::I2c;
use log::warn;

use super::{bcd_decode, bcd_encode};
use crate::async_i2c_bus::RegisterDevice;
use crate::datetime::DateTime;
use crate::hal::{ClockSource, HardwareError};

/// PCF85063 I2C address
pub const I2C_ADDR: u8 = 0x51;

/// First time register (seconds)
pub const ADDR_SECONDS: u8 = 0x04;

const OSCILLATOR_STOPPED: u8 = 0x80;

pub struct Pcf85063<I> {
    device: RegisterDevice<I>,
}

impl<I: I2c> Pcf85063<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            device: RegisterDevice::new(i2c, I2C_ADDR),
        }
    }
}

impl<I: I2c> ClockSource for Pcf85063<I> {
    async fn now(&mut self) -> Result<DateTime, HardwareError> {
        let mut buf = [0u8; 7];
        self.device.read(ADDR_SECONDS, &mut buf).await?;
        if buf[0] & OSCILLATOR_STOPPED != 0 {
            warn!("RTC oscillator stopped; time is unreliable");
        }

        let reading = DateTime {
            year: 2000 + bcd_decode(buf[6]) as u16,
            month: bcd_decode(buf[5] & 0x1F),
            day: bcd_decode(buf[3] & 0x3F),
            hour: bcd_decode(buf[2] & 0x3F),
            minute: bcd_decode(buf[1] & 0x7F),
            second: bcd_decode(buf[0] & 0x7F),
        };
        if reading.is_valid() {
            Ok(reading)
        } else {
            Err(HardwareError::InvalidData)
        }
    }

    async fn set(&mut self, value: DateTime) -> Result<(), HardwareError> {
        if !value.is_valid() {
            return Err(HardwareError::InvalidData);
        }
        // Writing the seconds register also clears the oscillator-stop flag.
        let data = [
            bcd_encode(value.second),
            bcd_encode(value.minute),
            bcd_encode(value.hour),
            bcd_encode(value.day),
            // The chip counts weekdays from Sunday
            (value.weekday() + 1) % 7,
            bcd_encode(value.month),
            bcd_encode((value.year % 100) as u8),
        ];
        self.device.write(ADDR_SECONDS, &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::async_i2c_bus::fake::FakeI2c;
    use embassy_futures::block_on;

    #[test]
    fn test_decodes_bcd_registers() {
        let mut i2c = FakeI2c::new(I2C_ADDR);
        i2c.registers[0x04..0x0B].copy_from_slice(&[0x45, 0x30, 0x23, 0x29, 0x04, 0x02, 0x24]);
        let mut rtc = Pcf85063::new(i2c);
        assert_eq!(
            block_on(rtc.now()),
            Ok(DateTime::new(2024, 2, 29, 23, 30, 45))
        );
    }

    #[test]
    fn test_set_then_read_back() {
        let mut rtc = Pcf85063::new(FakeI2c::new(I2C_ADDR));
        let value = DateTime::new(2031, 12, 5, 8, 9, 0);
        block_on(rtc.set(value)).unwrap();
        assert_eq!(block_on(rtc.now()), Ok(value));
    }

    #[test]
    fn test_invalid_registers_rejected() {
        let mut i2c = FakeI2c::new(I2C_ADDR);
        // Month 0 never comes from a running clock
        i2c.registers[0x04..0x0B].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x24]);
        let mut rtc = Pcf85063::new(i2c);
        assert_eq!(block_on(rtc.now()), Err(HardwareError::InvalidData));
    }
}
