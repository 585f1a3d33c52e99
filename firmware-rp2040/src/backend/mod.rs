//! RP2040 implementations of the capability traits.
//!
//! Handles hold their pins as unconfigured peripherals until `setup()`, so
//! building one through [`Rp2040Platform`](crate::Rp2040Platform) never
//! touches registers.

pub mod adc;
pub mod gpio;
pub mod uart;

pub use adc::RpAdc;
pub use gpio::RpGpio;
pub use uart::{Irqs, RpUart, UartParts};

/// Pulse-width output: one half of a PWM slice behind the embedded-hal
/// adapter.
pub type RpPwm = arm_core::DutyCyclePwm<embassy_rp::pwm::PwmOutput<'static>>;
