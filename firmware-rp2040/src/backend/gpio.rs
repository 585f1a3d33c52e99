//! Digital pins on the SIO block.

use arm_core::{DigitalIo, HalError, Level, PinMode};
use embassy_rp::gpio::{AnyPin, Flex, Level as RpLevel, Pull};
use embassy_rp::Peri;

/// A GPIO line configured as an output or an input on `setup()`.
pub struct RpGpio {
    pending: Option<Peri<'static, AnyPin>>,
    flex: Option<Flex<'static>>,
    mode: PinMode,
}

impl RpGpio {
    #[must_use]
    pub fn new(pin: Peri<'static, AnyPin>, mode: PinMode) -> Self {
        Self {
            pending: Some(pin),
            flex: None,
            mode,
        }
    }

    fn flex(&mut self) -> Result<&mut Flex<'static>, HalError> {
        self.flex.as_mut().ok_or(HalError::Setup)
    }
}

impl DigitalIo for RpGpio {
    fn setup(&mut self) -> Result<(), HalError> {
        if let Some(pin) = self.pending.take() {
            self.flex = Some(Flex::new(pin));
        }
        let mode = self.mode;
        let flex = self.flex()?;
        match mode {
            PinMode::Output => flex.set_as_output(),
            PinMode::Input => {
                flex.set_pull(Pull::None);
                flex.set_as_input();
            }
            PinMode::InputPullUp => {
                flex.set_pull(Pull::Up);
                flex.set_as_input();
            }
        }
        Ok(())
    }

    fn write(&mut self, level: Level) -> Result<(), HalError> {
        let level = match level {
            Level::Low => RpLevel::Low,
            Level::High => RpLevel::High,
        };
        self.flex()?.set_level(level);
        Ok(())
    }

    fn read(&mut self) -> Result<Level, HalError> {
        Ok(Level::from(self.flex()?.is_high()))
    }
}
