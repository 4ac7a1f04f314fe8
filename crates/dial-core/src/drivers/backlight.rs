//! PWM-driven panel backlight.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::hal::Backlight;

/// Backlight on any PWM channel; `0.0..=1.0` maps linearly onto the duty cycle.
pub struct PwmBacklight<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn set_brightness(&mut self, level: f32) {
        let max = self.pwm.max_duty_cycle();
        let duty = (level.clamp(0.0, 1.0) * max as f32) as u16;
        if let Err(e) = self.pwm.set_duty_cycle(duty) {
            warn!("Backlight PWM update failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    struct FakePwm {
        duty: u16,
    }

    impl ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_level_maps_to_duty() {
        let mut backlight = PwmBacklight::new(FakePwm { duty: 7 });
        backlight.set_brightness(0.0);
        assert_eq!(backlight.pwm.duty, 0, "zero blanks the panel");
        backlight.set_brightness(1.0);
        assert_eq!(backlight.pwm.duty, 255);
        backlight.set_brightness(0.25);
        assert_eq!(backlight.pwm.duty, 63);
        backlight.set_brightness(3.0);
        assert_eq!(backlight.into_inner().duty, 255, "clamped");
    }
}
