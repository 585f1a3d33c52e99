//! Backend families and their factories.
//!
//! A [`Platform`] is the single configuration point that decides which
//! concrete backend implements each capability. Exactly one platform is
//! compiled into a firmware image; the firmware crate selects it with Cargo
//! features, and the core only ever sees the associated types.

use super::{AnalogInput, ByteTransport, DigitalIo, Level, PinMode, PwmOutput};
use crate::error::HalError;

/// Logical pin number as printed on the board.
pub type PinId = u8;

/// Which byte-stream backend carries reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportKind {
    /// Wired UART at the given baud rate.
    Serial { baudrate: u32 },
    /// On-board radio link.
    Wireless,
}

/// Factories for one backend family.
///
/// Each factory hands out a single owned handle or `None` when the family
/// has no backend for the request (unknown pin, capability not fitted, or a
/// pin that was already handed out). `None` is permanent for the build.
///
/// Factories must not touch hardware: I/O starts at the handle's `setup()`.
/// A family may configure a peripheral shared by several handles (such as
/// a PWM slice with two outputs) when the family itself is constructed,
/// provided every output it configures starts inactive. `setup()` still
/// forces the handle's initial state.
pub trait Platform {
    type Gpio: DigitalIo;
    type Adc: AnalogInput;
    type Pwm: PwmOutput;
    type Link: ByteTransport;

    /// Create a digital pin handle.
    fn gpio(&mut self, pin: PinId, mode: PinMode) -> Option<Self::Gpio>;

    /// Create an analog input handle.
    fn adc(&mut self, pin: PinId) -> Option<Self::Adc>;

    /// Create a pulse-width output handle.
    fn pwm(&mut self, pin: PinId) -> Option<Self::Pwm>;

    /// Create the report link.
    fn link(&mut self, kind: TransportKind) -> Option<Self::Link>;
}

/// Handle type of [`Unconfigured`]; it has no values.
#[derive(Debug)]
pub enum Unavailable {}

impl DigitalIo for Unavailable {
    fn setup(&mut self) -> Result<(), HalError> {
        match *self {}
    }

    fn write(&mut self, _level: Level) -> Result<(), HalError> {
        match *self {}
    }

    fn read(&mut self) -> Result<Level, HalError> {
        match *self {}
    }
}

impl AnalogInput for Unavailable {
    fn setup(&mut self) -> Result<(), HalError> {
        match *self {}
    }

    fn read(&mut self) -> Result<u16, HalError> {
        match *self {}
    }
}

impl PwmOutput for Unavailable {
    fn setup(&mut self) -> Result<(), HalError> {
        match *self {}
    }

    fn write(&mut self, _duty: u8) -> Result<(), HalError> {
        match *self {}
    }
}

impl ByteTransport for Unavailable {
    fn setup(&mut self) -> Result<(), HalError> {
        match *self {}
    }

    fn write(&mut self, _data: &[u8]) -> Result<usize, HalError> {
        match *self {}
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, HalError> {
        match *self {}
    }
}

/// Backend family for builds with no board selected.
///
/// Every factory returns `None`, so composition fails with
/// [`BuildError::Unavailable`](crate::BuildError::Unavailable).
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl Platform for Unconfigured {
    type Gpio = Unavailable;
    type Adc = Unavailable;
    type Pwm = Unavailable;
    type Link = Unavailable;

    fn gpio(&mut self, _pin: PinId, _mode: PinMode) -> Option<Unavailable> {
        None
    }

    fn adc(&mut self, _pin: PinId) -> Option<Unavailable> {
        None
    }

    fn pwm(&mut self, _pin: PinId) -> Option<Unavailable> {
        None
    }

    fn link(&mut self, _kind: TransportKind) -> Option<Unavailable> {
        None
    }
}
