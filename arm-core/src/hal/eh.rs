//! Adapters from `embedded-hal` traits to capabilities.

use embedded_hal::pwm::SetDutyCycle;

use super::PwmOutput;
use crate::error::HalError;

/// Pulse-width capability over any `embedded-hal` PWM channel.
///
/// The 8-bit duty is scaled onto the channel's own resolution, so a
/// backend's counter top does not leak into the drivers.
#[derive(Debug)]
pub struct DutyCyclePwm<P> {
    channel: P,
}

impl<P: SetDutyCycle> DutyCyclePwm<P> {
    /// Wrap a channel. The channel is not touched until `setup()`.
    #[must_use]
    pub fn new(channel: P) -> Self {
        Self { channel }
    }

    /// Release the wrapped channel.
    pub fn into_inner(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> PwmOutput for DutyCyclePwm<P> {
    fn setup(&mut self) -> Result<(), HalError> {
        self.channel
            .set_duty_cycle_fully_off()
            .map_err(|_| HalError::Setup)
    }

    fn write(&mut self, duty: u8) -> Result<(), HalError> {
        self.channel
            .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))
            .map_err(|_| HalError::Io)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::{ErrorKind, ErrorType};
    use std::vec::Vec;

    struct RecordingChannel {
        max: u16,
        duties: Vec<u16>,
    }

    impl ErrorType for RecordingChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for RecordingChannel {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duties.push(duty);
            Ok(())
        }
    }

    struct BrokenChannel;

    impl ErrorType for BrokenChannel {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for BrokenChannel {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_setup_turns_channel_off() {
        let mut pwm = DutyCyclePwm::new(RecordingChannel {
            max: 1000,
            duties: Vec::new(),
        });
        pwm.setup().unwrap();
        pwm.setup().unwrap();
        assert_eq!(pwm.into_inner().duties, [0, 0]);
    }

    #[test]
    fn test_duty_scaled_to_channel_resolution() {
        let mut pwm = DutyCyclePwm::new(RecordingChannel {
            max: 1000,
            duties: Vec::new(),
        });
        pwm.write(255).unwrap();
        pwm.write(0).unwrap();
        pwm.write(128).unwrap();
        assert_eq!(pwm.into_inner().duties, [1000, 0, 501]);
    }

    #[test]
    fn test_channel_errors_map_to_hal_errors() {
        let mut pwm = DutyCyclePwm::new(BrokenChannel);
        assert_eq!(pwm.setup(), Err(HalError::Setup));
        assert_eq!(pwm.write(10), Err(HalError::Io));
    }
}
