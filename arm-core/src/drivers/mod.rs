//! Drivers built on the capability traits.

mod matrix;
mod motor;
mod sensor;

pub use matrix::{ButtonMatrix, KeyPress};
pub use motor::{MotorDriver, MotorFault};
pub use sensor::EmgSensor;
