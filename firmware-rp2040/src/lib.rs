//! Bionic arm firmware for RP2040.
//!
//! Binds the chip-agnostic controller in [`arm_core`] to the Raspberry Pi
//! Pico: GPIO, ADC, PWM and UART backends, the board pin map, and the
//! `Rp2040Platform` that hands them out.
//!
//! # Applications
//!
//! One application is compiled into each image:
//!
//! - **`app-full-arm`** (default): ticks the [`GestureEngine`] every
//!   [`TICK_PERIOD_MS`]. An EMG contraction plus a held matrix key selects
//!   a gesture, the fingers move, and `[code, sample_hi, sample_lo]` goes
//!   out on UART1.
//! - **`app-dataset`**: runs a [`CaptureSession`] every
//!   [`CAPTURE_PERIOD_MS`], sending 100 EMG samples per checksummed packet.
//!
//! # Hardware Configuration
//!
//! See [`BOARD_PINS`]. Reports leave on UART1 (GPIO 8 TX, GPIO 9 RX) at
//! 115200 baud, 8N1.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`app-full-arm`** (default) / **`app-dataset`**: Application selection
//! - **`board-pico`** (default): Build the `Rp2040Platform` backends.
//!   Without it the image uses [`arm_core::Unconfigured`] and composition
//!   fails with `BuildError::Unavailable`.
//! - **`wireless-transport`**: Report over the radio link. The Pico has none,
//!   so composition fails with `BuildError::Unavailable(Transport)`.

#![no_std]

#[cfg(all(feature = "app-full-arm", feature = "app-dataset"))]
compile_error!("Cannot enable both `app-full-arm` and `app-dataset` - exactly one application per image");

#[cfg(not(any(feature = "app-full-arm", feature = "app-dataset")))]
compile_error!("Enable one of `app-full-arm` or `app-dataset`");

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use arm_core::{
    BuildError, CaptureError, CaptureSession, GestureEngine, SetupReport, TickError, TickOutcome,
};

#[cfg(feature = "board-pico")]
pub mod backend;
pub mod board;
#[cfg(feature = "board-pico")]
pub mod platform;

pub use board::{BOARD_PINS, CAPTURE_PERIOD_MS, TICK_PERIOD_MS};
#[cfg(feature = "board-pico")]
pub use platform::Rp2040Platform;

/// Backend family compiled into this image.
#[cfg(feature = "board-pico")]
pub type ActivePlatform = Rp2040Platform;

/// Backend family compiled into this image.
#[cfg(not(feature = "board-pico"))]
pub type ActivePlatform = arm_core::Unconfigured;

/// Build the active backend family from the chip's peripherals.
#[cfg(feature = "board-pico")]
#[must_use]
pub fn active_platform(p: embassy_rp::Peripherals) -> ActivePlatform {
    Rp2040Platform::new(p)
}

/// Build the active backend family from the chip's peripherals.
#[cfg(not(feature = "board-pico"))]
#[must_use]
pub fn active_platform(_p: embassy_rp::Peripherals) -> ActivePlatform {
    arm_core::Unconfigured
}

/// Gesture engine on the active platform.
pub type ArmEngine = GestureEngine<
    <ActivePlatform as arm_core::Platform>::Adc,
    <ActivePlatform as arm_core::Platform>::Gpio,
    <ActivePlatform as arm_core::Platform>::Pwm,
    <ActivePlatform as arm_core::Platform>::Link,
>;

/// Capture session on the active platform.
pub type ArmCapture = CaptureSession<
    <ActivePlatform as arm_core::Platform>::Adc,
    <ActivePlatform as arm_core::Platform>::Link,
>;
