//! Hardware capability traits.
//!
//! Every piece of hardware the controller touches is reached through one of
//! four small contracts. Backends implement them per chip; drivers only ever
//! see the traits.
//!
//! All operations are blocking and return `Result`: outputs are only valid
//! on `Ok`. `setup()` must be idempotent, calling it twice must leave the
//! hardware in the same state as calling it once. Constructing a handle
//! performs no I/O; I/O starts at `setup()`.

mod eh;
mod platform;

pub use eh::DutyCyclePwm;
pub use platform::{PinId, Platform, TransportKind, Unavailable, Unconfigured};

use crate::error::HalError;

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Electrical configuration requested for a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Push-pull output.
    Output,
    /// Floating input.
    Input,
    /// Input with the internal pull-up enabled.
    InputPullUp,
}

/// A single digital I/O pin.
pub trait DigitalIo {
    /// Apply the pin mode.
    fn setup(&mut self) -> Result<(), HalError>;

    /// Drive the pin to `level`.
    fn write(&mut self, level: Level) -> Result<(), HalError>;

    /// Sample the pin level.
    fn read(&mut self) -> Result<Level, HalError>;
}

/// A single analog input channel.
pub trait AnalogInput {
    /// Configure the converter and channel.
    fn setup(&mut self) -> Result<(), HalError>;

    /// Take one conversion (12-bit on the supported chips).
    fn read(&mut self) -> Result<u16, HalError>;
}

/// A single pulse-width output channel.
pub trait PwmOutput {
    /// Configure the channel. Implementations start at zero duty.
    fn setup(&mut self) -> Result<(), HalError>;

    /// Set the duty cycle, `0` is off and `255` fully on.
    fn write(&mut self, duty: u8) -> Result<(), HalError>;
}

/// A byte-stream link (UART, radio).
pub trait ByteTransport {
    /// Open the link.
    fn setup(&mut self) -> Result<(), HalError>;

    /// Write `data`, returning how many bytes the backend accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, HalError>;

    /// Read up to `buf.len()` bytes, returning how many were received.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, HalError>;
}
