//! Compile-time configuration.
//!
//! Everything the controller can be tuned with lives here as a constant.
//! There is no persisted or runtime configuration.

use arm_proto::packet_len;

use crate::error::BuildError;
use crate::hal::{PinId, TransportKind};

/// EMG level a contraction must exceed before the matrix is scanned.
///
/// Strict: a sample equal to the threshold is rejected.
pub const EMG_THRESHOLD: u16 = 2048;

/// Button matrix rows.
pub const MATRIX_ROWS: usize = 3;

/// Button matrix columns.
pub const MATRIX_COLS: usize = 3;

/// Finger motors, thumb first.
pub const NUM_MOTORS: usize = 5;

/// Duty used by the gesture table for a fully driven finger.
pub const FULL_SPEED: u8 = 255;

/// Samples per capture packet.
pub const SAMPLE_COUNT: usize = 100;

/// Length of one capture packet (`2 * SAMPLE_COUNT + 5`).
pub const CAPTURE_PACKET_LEN: usize = packet_len(SAMPLE_COUNT);

/// Label stamped on capture packets.
pub const CAPTURE_LABEL: u8 = 1;

/// Pause between consecutive capture samples.
pub const SAMPLE_INTERVAL_MS: u32 = 10;

/// UART rate for the serial report link.
pub const SERIAL_BAUDRATE: u32 = 115_200;

/// Link used for gesture reports and capture packets.
#[cfg(not(feature = "wireless-transport"))]
pub const TRANSPORT: TransportKind = TransportKind::Serial {
    baudrate: SERIAL_BAUDRATE,
};

/// Link used for gesture reports and capture packets.
#[cfg(feature = "wireless-transport")]
pub const TRANSPORT: TransportKind = TransportKind::Wireless;

/// Number of pins a [`PinMap`] assigns.
const MAPPED_PINS: usize = 1 + NUM_MOTORS * 2 + MATRIX_ROWS + MATRIX_COLS;

/// Board wiring: which logical pin feeds each capability.
///
/// Boards provide theirs as a `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// EMG analog input.
    pub emg: PinId,
    /// `[forward, backward]` PWM pins per motor, thumb first.
    pub motors: [[PinId; 2]; NUM_MOTORS],
    /// Matrix row outputs, scanned in this order.
    pub rows: [PinId; MATRIX_ROWS],
    /// Matrix column inputs, scanned in this order.
    pub cols: [PinId; MATRIX_COLS],
}

impl PinMap {
    /// Every assigned pin, EMG first.
    #[must_use]
    pub fn pins(&self) -> [PinId; MAPPED_PINS] {
        let mut pins = [0; MAPPED_PINS];
        let mut n = 0;

        pins[n] = self.emg;
        n += 1;
        for pair in &self.motors {
            for &pin in pair {
                pins[n] = pin;
                n += 1;
            }
        }
        for &pin in self.rows.iter().chain(self.cols.iter()) {
            pins[n] = pin;
            n += 1;
        }

        pins
    }

    /// Reject maps that put two handles on one physical pin.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::PinConflict`] with the first repeated pin.
    pub fn validate(&self) -> Result<(), BuildError> {
        let pins = self.pins();
        for (i, &pin) in pins.iter().enumerate() {
            if pins[..i].contains(&pin) {
                return Err(BuildError::PinConflict(pin));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) const TEST_PINS: PinMap = PinMap {
    emg: 26,
    motors: [[2, 3], [4, 5], [10, 11], [12, 13], [14, 15]],
    rows: [16, 17, 18],
    cols: [19, 20, 21],
};
