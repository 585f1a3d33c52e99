//! Platform-agnostic control logic for the bionic arm.
//!
//! This crate holds everything above the register level: the hardware
//! capability traits, the compile-time backend family ([`Platform`]), the
//! motor / button-matrix / EMG drivers, the report transport, the gesture
//! engine, and the dataset capture session. It has no chip dependencies and
//! is tested on the host against mock capabilities.
//!
//! # Overview
//!
//! - [`hal`]: Capability traits ([`DigitalIo`], [`AnalogInput`], [`PwmOutput`],
//!   [`ByteTransport`]) and the [`Platform`] factory trait
//! - [`drivers`]: [`MotorDriver`], [`ButtonMatrix`], [`EmgSensor`]
//! - [`transport`]: [`Transport`], the uniform report link
//! - [`gesture`]: Gesture codes and the actuation table
//! - [`engine`]: [`GestureEngine`], one sense/decide/act/report pass per tick
//! - [`capture`]: [`CaptureSession`], framed EMG batches for datasets
//! - [`config`]: Compile-time constants and the [`PinMap`]
//! - [`error`]: Error types and the aggregated [`SetupReport`]
//!
//! # Control Tick
//!
//! ```text
//! Idle -> Sampling -> Rejected -----------------------------> Idle
//!                  \-> Gated -> (no press) -----------------> Idle
//!                            \-> Acting -> Reporting -------> Idle
//! ```
//!
//! The engine has no timer of its own; the firmware calls
//! [`GestureEngine::tick`] from its main loop.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and log events (for embedded builds)
//! - **`wireless-transport`**: Select the wireless link for reports
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod capture;
pub mod config;
pub mod drivers;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod hal;
pub mod transport;

#[cfg(test)]
mod mock;

// Re-export main types at crate root
pub use capture::{CaptureError, CaptureSession};
pub use config::PinMap;
pub use drivers::{ButtonMatrix, EmgSensor, KeyPress, MotorDriver, MotorFault};
pub use engine::{ActuationFault, GestureEngine, TickError, TickOutcome};
pub use error::{BuildError, Component, HalError, MotorChannel, SetupFailure, SetupReport};
pub use gesture::{Action, Gesture, GestureCode, GesturePattern};
pub use hal::{
    AnalogInput, ByteTransport, DigitalIo, DutyCyclePwm, Level, PinId, PinMode, Platform, PwmOutput,
    TransportKind, Unconfigured,
};
pub use transport::Transport;
