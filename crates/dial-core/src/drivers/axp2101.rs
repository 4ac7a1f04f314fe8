//! AXP2101 power management chip.
//!
//! Bring-up goes through `axp2101-embedded`. The state-of-charge register is
//! read directly on a second handle to the same bus, since the watch needs
//! nothing else from the chip at runtime.

use axp2101_embedded::AsyncAxp2101;
use embedded_hal_async::i2c::I2c;
use log::{info, warn};

use crate::async_i2c_bus::RegisterDevice;
use crate::hal::{BatterySource, HardwareError};

/// AXP2101 I2C address
pub const I2C_ADDR: u8 = 0x34;

/// Battery percentage register
pub const ADDR_BATTERY_PERCENT: u8 = 0xA4;

pub struct Axp2101Gauge<I> {
    pmic: AsyncAxp2101<I>,
    gauge: RegisterDevice<I>,
}

impl<I: I2c> Axp2101Gauge<I> {
    /// `pmic_i2c` and `gauge_i2c` are two handles onto the bus the chip sits on.
    pub fn new(pmic_i2c: I, gauge_i2c: I) -> Self {
        Self {
            pmic: AsyncAxp2101::new(pmic_i2c),
            gauge: RegisterDevice::new(gauge_i2c, I2C_ADDR),
        }
    }

    /// Initialise the chip once at boot. The gauge keeps working off the
    /// bootloader's configuration if this fails.
    pub async fn init(&mut self) -> Result<(), HardwareError> {
        match self.pmic.init().await {
            Ok(_) => {
                info!("Power management ready");
                Ok(())
            }
            Err(e) => {
                warn!("Power management init failed: {:?}", e);
                Err(HardwareError::Bus)
            }
        }
    }
}

impl<I: I2c> BatterySource for Axp2101Gauge<I> {
    async fn read_percent(&mut self) -> Result<u8, HardwareError> {
        self.gauge.read_u8(ADDR_BATTERY_PERCENT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::async_i2c_bus::fake::FakeI2c;
    use embassy_futures::block_on;

    fn gauge_with(percent: u8, fail: bool) -> Axp2101Gauge<FakeI2c> {
        let mut pmic = FakeI2c::new(I2C_ADDR);
        let mut gauge = FakeI2c::new(I2C_ADDR);
        gauge.registers[ADDR_BATTERY_PERCENT as usize] = percent;
        pmic.fail = fail;
        gauge.fail = fail;
        Axp2101Gauge::new(pmic, gauge)
    }

    #[test]
    fn test_reads_percent_register() {
        let mut gauge = gauge_with(64, false);
        assert_eq!(block_on(gauge.read_percent()), Ok(64));
    }

    #[test]
    fn test_bus_failure_surfaces() {
        let mut gauge = gauge_with(64, true);
        assert_eq!(block_on(gauge.read_percent()), Err(HardwareError::Bus));
    }

    #[test]
    fn test_init_on_dead_bus_is_reported_not_fatal() {
        let mut gauge = gauge_with(64, true);
        assert_eq!(
            block_on(gauge.init()),
            Err(HardwareError::Bus),
            "init failure maps to a bus error"
        );
    }
}
