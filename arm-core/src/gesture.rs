//! Gesture codes and the actuation table.
//!
//! A gesture code is the index of a matrix cell, `row * MATRIX_COLS + col`.
//! Each code maps to a [`GesturePattern`]: one [`Action`] per finger motor.
//! Codes without a gesture map to [`STOP_ALL`].

use crate::config::{FULL_SPEED, MATRIX_COLS, MATRIX_ROWS, NUM_MOTORS};
use crate::drivers::KeyPress;

/// What one motor does for a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Forward(u8),
    Backward(u8),
    Stop,
}

/// Actions for thumb, index, middle, ring, pinky.
pub type GesturePattern = [Action; NUM_MOTORS];

/// Every motor stopped.
pub const STOP_ALL: GesturePattern = [Action::Stop; NUM_MOTORS];

/// Index of a matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureCode(pub u8);

impl GestureCode {
    /// Number of codes the matrix can produce.
    pub const COUNT: usize = MATRIX_ROWS * MATRIX_COLS;

    /// Code of a key press on the configured matrix.
    #[inline]
    #[must_use]
    pub const fn from_press(press: KeyPress) -> Self {
        Self(press.row * MATRIX_COLS as u8 + press.col)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Gestures with a defined pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// All fingers closed.
    Fist,
    /// Index and middle extended, ring and pinky closed, thumb held.
    Peace,
}

impl Gesture {
    /// Gesture bound to `code`, if any.
    #[must_use]
    pub const fn from_code(code: GestureCode) -> Option<Self> {
        match code.0 {
            0 => Some(Self::Fist),
            1 => Some(Self::Peace),
            _ => None,
        }
    }

    /// Motor actions for this gesture.
    #[must_use]
    pub const fn pattern(self) -> GesturePattern {
        match self {
            Self::Fist => [Action::Forward(FULL_SPEED); NUM_MOTORS],
            Self::Peace => [
                Action::Stop,
                Action::Backward(FULL_SPEED),
                Action::Backward(FULL_SPEED),
                Action::Forward(FULL_SPEED),
                Action::Forward(FULL_SPEED),
            ],
        }
    }
}

/// Pattern for any code; total over `u8`.
#[must_use]
pub const fn pattern_for(code: GestureCode) -> GesturePattern {
    match Gesture::from_code(code) {
        Some(gesture) => gesture.pattern(),
        None => STOP_ALL,
    }
}
