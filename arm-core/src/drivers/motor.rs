//! Dual-channel (H-bridge) motor driver.

use crate::error::{Component, HalError, MotorChannel, SetupReport};
use crate::gesture::Action;
use crate::hal::PwmOutput;

/// Which channel(s) of a drive command failed.
///
/// A fault leaves the motor in an unknown state; re-issue
/// [`stop`](MotorDriver::stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorFault {
    pub forward: Option<HalError>,
    pub backward: Option<HalError>,
}

impl MotorFault {
    fn into_result(self) -> Result<(), MotorFault> {
        if self.forward.is_none() && self.backward.is_none() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// A motor driven through two PWM legs.
///
/// The legs are never driven above zero at the same time: a drive command
/// first releases the opposite leg and only drives the requested one if the
/// release succeeded.
#[derive(Debug)]
pub struct MotorDriver<P> {
    index: u8,
    forward: P,
    backward: P,
}

impl<P: PwmOutput> MotorDriver<P> {
    /// Create a driver from its two legs. `index` names the motor in reports.
    #[must_use]
    pub fn new(index: u8, forward: P, backward: P) -> Self {
        Self {
            index,
            forward,
            backward,
        }
    }

    /// Position of this motor in the hand, thumb first.
    #[inline]
    #[must_use]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Set up both legs. Fails if either leg fails.
    pub fn setup(&mut self) -> Result<(), SetupReport> {
        let mut report = SetupReport::new();
        report.record(
            self.component(MotorChannel::Forward),
            self.forward.setup(),
        );
        report.record(
            self.component(MotorChannel::Backward),
            self.backward.setup(),
        );
        report.into_result()
    }

    /// Drive the forward leg at `speed`, backward leg at zero.
    pub fn forward(&mut self, speed: u8) -> Result<(), MotorFault> {
        let mut fault = MotorFault::default();
        match self.backward.write(0) {
            Ok(()) => fault.forward = self.forward.write(speed).err(),
            Err(e) => fault.backward = Some(e),
        }
        fault.into_result()
    }

    /// Drive the backward leg at `speed`, forward leg at zero.
    pub fn backward(&mut self, speed: u8) -> Result<(), MotorFault> {
        let mut fault = MotorFault::default();
        match self.forward.write(0) {
            Ok(()) => fault.backward = self.backward.write(speed).err(),
            Err(e) => fault.forward = Some(e),
        }
        fault.into_result()
    }

    /// Both legs to zero. Both writes are attempted.
    pub fn stop(&mut self) -> Result<(), MotorFault> {
        MotorFault {
            forward: self.forward.write(0).err(),
            backward: self.backward.write(0).err(),
        }
        .into_result()
    }

    /// Execute one entry of a gesture pattern.
    pub fn apply(&mut self, action: Action) -> Result<(), MotorFault> {
        match action {
            Action::Forward(speed) => self.forward(speed),
            Action::Backward(speed) => self.backward(speed),
            Action::Stop => self.stop(),
        }
    }

    fn component(&self, channel: MotorChannel) -> Component {
        Component::Motor {
            index: self.index,
            channel,
        }
    }
}
