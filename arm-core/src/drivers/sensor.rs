//! EMG analog sampler.

use crate::error::{Component, HalError, SetupReport};
use crate::hal::AnalogInput;

/// Muscle-activity sensor on one analog channel.
///
/// One blocking conversion per read; no filtering or oversampling.
#[derive(Debug)]
pub struct EmgSensor<A> {
    adc: A,
}

impl<A: AnalogInput> EmgSensor<A> {
    #[must_use]
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    pub fn setup(&mut self) -> Result<(), SetupReport> {
        let mut report = SetupReport::new();
        report.record(Component::Sensor, self.adc.setup());
        report.into_result()
    }

    /// Take one sample.
    #[inline]
    pub fn read(&mut self) -> Result<u16, HalError> {
        self.adc.read()
    }
}
