//! EMG input on the RP2040's 12-bit ADC.

use arm_core::{AnalogInput, HalError};
use embassy_rp::adc::{Adc, Blocking, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{ADC, PIN_26};
use embassy_rp::Peri;

/// ADC channel 0 (GPIO 26), read with blocking conversions.
///
/// The converter itself is enabled on the first `setup()`.
pub struct RpAdc {
    pending: Option<(Peri<'static, ADC>, Peri<'static, PIN_26>)>,
    adc: Option<(Adc<'static, Blocking>, Channel<'static>)>,
}

impl RpAdc {
    #[must_use]
    pub fn new(adc: Peri<'static, ADC>, pin: Peri<'static, PIN_26>) -> Self {
        Self {
            pending: Some((adc, pin)),
            adc: None,
        }
    }
}

impl AnalogInput for RpAdc {
    fn setup(&mut self) -> Result<(), HalError> {
        if let Some((adc, pin)) = self.pending.take() {
            let adc = Adc::new_blocking(adc, Config::default());
            let channel = Channel::new_pin(pin, Pull::None);
            self.adc = Some((adc, channel));
        }
        if self.adc.is_some() {
            Ok(())
        } else {
            Err(HalError::Setup)
        }
    }

    fn read(&mut self) -> Result<u16, HalError> {
        let (adc, channel) = self.adc.as_mut().ok_or(HalError::Setup)?;
        adc.blocking_read(channel).map_err(|e| {
            defmt::warn!("adc conversion failed: {:?}", e);
            HalError::Io
        })
    }
}
