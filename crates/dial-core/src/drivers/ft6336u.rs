//! FT6336U capacitive touch controller.
//!
//! Only the first touch point is read. The controller reports up to two
//! contacts but the watch acts on one.

use embedded_hal_async::i2c::I2c;

use crate::async_i2c_bus::RegisterDevice;
use crate::hal::{HardwareError, TouchSource};
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchPoint};

/// FT6336U I2C address
pub const I2C_ADDR: u8 = 0x38;

/// Touch detection status; low nibble is the number of contacts
pub const ADDR_TD_STATUS: u8 = 0x02;

/// First register of touch point 1 (XH, XL, YH, YL)
pub const ADDR_TOUCH1_X: u8 = 0x03;

pub struct Ft6336u<I> {
    device: RegisterDevice<I>,
}

impl<I: I2c> Ft6336u<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            device: RegisterDevice::new(i2c, I2C_ADDR),
        }
    }
}

impl<I: I2c> TouchSource for Ft6336u<I> {
    async fn poll(&mut self) -> Result<Option<TouchPoint>, HardwareError> {
        let mut buf = [0u8; 5];
        self.device.read(ADDR_TD_STATUS, &mut buf).await?;

        let contacts = buf[0] & 0x0F;
        if contacts == 0 {
            return Ok(None);
        }
        // Values above 2 show up while the controller is still booting.
        if contacts > 2 {
            return Err(HardwareError::InvalidData);
        }

        let x = (((buf[1] & 0x0F) as u16) << 8) | buf[2] as u16;
        let y = (((buf[3] & 0x0F) as u16) << 8) | buf[4] as u16;
        if x >= DISPLAY_WIDTH_PX as u16 || y >= DISPLAY_HEIGHT_PX as u16 {
            return Err(HardwareError::InvalidData);
        }
        Ok(Some(TouchPoint::new(x, y)))
    }
}
