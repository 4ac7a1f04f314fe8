//! Async I2C bus sharing and register access
//!
//! The RTC and the power management chip sit on one I2C bus. [`SharedI2c`]
//! hands each driver its own handle to that bus, serialising transactions
//! through an embassy async mutex, and [`RegisterDevice`] adds the
//! register-pointer framing the watch's chips share.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};

use crate::hal::HardwareError;

/// A bus shared between several device drivers.
pub type I2cBus<T> = Mutex<CriticalSectionRawMutex, T>;

/// Per-driver handle onto a shared async I2C bus.
///
/// The lock is held for the whole transaction and released between them, so
/// drivers interleave at transaction granularity and yield to the executor
/// while the bus is busy.
pub struct SharedI2c<'a, T> {
    bus: &'a I2cBus<T>,
}

impl<'a, T> SharedI2c<'a, T> {
    #[inline]
    pub const fn new(bus: &'a I2cBus<T>) -> Self {
        Self { bus }
    }
}

impl<T> ErrorType for SharedI2c<'_, T>
where
    T: ErrorType,
{
    type Error = T::Error;
}

impl<T> I2c for SharedI2c<'_, T>
where
    T: I2c,
{
    #[inline]
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.transaction(address, operations).await
    }
}

/// A chip at a fixed address with an auto-incrementing register pointer.
pub struct RegisterDevice<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> RegisterDevice<I> {
    pub const fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read consecutive registers starting at `register`.
    pub async fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), HardwareError> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .await
            .map_err(|_| HardwareError::Bus)
    }

    pub async fn read_u8(&mut self, register: u8) -> Result<u8, HardwareError> {
        let mut buf = [0u8; 1];
        self.read(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Write consecutive registers starting at `register`.
    ///
    /// `data` is limited to 15 bytes so the frame fits a stack buffer.
    pub async fn write(&mut self, register: u8, data: &[u8]) -> Result<(), HardwareError> {
        let mut frame = [0u8; 16];
        let len = data.len() + 1;
        let dest = frame.get_mut(1..len).ok_or(HardwareError::InvalidData)?;
        dest.copy_from_slice(data);
        frame[0] = register;
        self.i2c
            .write(self.address, &frame[..len])
            .await
            .map_err(|_| HardwareError::Bus)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Register-map I2C fake shared by the driver tests.

    use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation};

    pub struct FakeI2c {
        pub address: u8,
        pub registers: [u8; 256],
        pub fail: bool,
        pointer: usize,
    }

    impl FakeI2c {
        pub fn new(address: u8) -> Self {
            Self {
                address,
                registers: [0; 256],
                fail: false,
                pointer: 0,
            }
        }
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail || address != self.address {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((register, data)) = bytes.split_first() {
                            self.pointer = *register as usize;
                            for byte in data {
                                self.registers[self.pointer % 256] = *byte;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for byte in buf.iter_mut() {
                            *byte = self.registers[self.pointer % 256];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeI2c;
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_register_round_trip() {
        let mut device = RegisterDevice::new(FakeI2c::new(0x51), 0x51);
        block_on(device.write(0x04, &[0x12, 0x34])).unwrap();
        let mut buf = [0u8; 2];
        block_on(device.read(0x04, &mut buf)).unwrap();
        assert_eq!(buf, [0x12, 0x34]);
        assert_eq!(block_on(device.read_u8(0x05)), Ok(0x34));
    }

    #[test]
    fn test_bus_errors_map_to_hardware_error() {
        let mut device = RegisterDevice::new(FakeI2c::new(0x51), 0x34);
        assert_eq!(block_on(device.read_u8(0xA4)), Err(HardwareError::Bus), "wrong address");
    }

    #[test]
    fn test_oversized_write_rejected() {
        let mut device = RegisterDevice::new(FakeI2c::new(0x51), 0x51);
        assert_eq!(
            block_on(device.write(0x00, &[0u8; 16])),
            Err(HardwareError::InvalidData)
        );
    }

    #[test]
    fn test_shared_handles_reach_one_bus() {
        let bus: I2cBus<FakeI2c> = Mutex::new(FakeI2c::new(0x38));
        let mut first = RegisterDevice::new(SharedI2c::new(&bus), 0x38);
        let mut second = RegisterDevice::new(SharedI2c::new(&bus), 0x38);
        block_on(first.write(0x80, &[0x22])).unwrap();
        assert_eq!(block_on(second.read_u8(0x80)), Ok(0x22));
    }
}
