//! The watch's board: esp-hal peripherals behind the core capability traits.
//!
//! Touch has an I2C controller to itself. The RTC and the power management
//! chip share the second controller through [`SharedI2c`].

use embedded_hal::pwm::SetDutyCycle;
use esp_hal::Async;
use esp_hal::i2c::master::I2c;
use esp_hal::rng::Rng;

use dial_core::async_i2c_bus::SharedI2c;
use dial_core::drivers::{Axp2101Gauge, Ft6336u, Pcf85063, PwmBacklight};
use dial_core::hal::{Board, RandomSource};
use dial_core::storage::SettingsStore;

pub type I2cDriver = I2c<'static, Async>;
pub type SensorBus = SharedI2c<'static, I2cDriver>;

/// Hardware random number generator.
pub struct HardwareRng(Rng);

impl HardwareRng {
    pub fn new() -> Self {
        Self(Rng::new())
    }
}

impl Default for HardwareRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for HardwareRng {
    fn next_u32(&mut self) -> u32 {
        self.0.random()
    }
}

/// Generic over the backlight PWM channel and the settings medium so the
/// long LEDC and SD card types stay out of this module.
pub struct WatchBoard<P, S> {
    pub touch: Ft6336u<I2cDriver>,
    pub clock: Pcf85063<SensorBus>,
    pub battery: Axp2101Gauge<SensorBus>,
    pub backlight: PwmBacklight<P>,
    pub random: HardwareRng,
    pub store: S,
}

impl<P, S> Board for WatchBoard<P, S>
where
    P: SetDutyCycle,
    S: SettingsStore,
{
    type Touch = Ft6336u<I2cDriver>;
    type Clock = Pcf85063<SensorBus>;
    type Battery = Axp2101Gauge<SensorBus>;
    type Backlight = PwmBacklight<P>;
    type Random = HardwareRng;
    type Store = S;

    fn touch(&mut self) -> &mut Self::Touch {
        &mut self.touch
    }

    fn clock(&mut self) -> &mut Self::Clock {
        &mut self.clock
    }

    fn battery(&mut self) -> &mut Self::Battery {
        &mut self.battery
    }

    fn backlight(&mut self) -> &mut Self::Backlight {
        &mut self.backlight
    }

    fn random(&mut self) -> &mut Self::Random {
        &mut self.random
    }

    fn store(&mut self) -> &mut Self::Store {
        &mut self.store
    }
}
