//! Raspberry Pi Pico wiring and firmware timing.

use arm_core::PinMap;

/// Pin map of the arm board.
///
/// | Function            | GPIO           |
/// |---------------------|----------------|
/// | EMG (ADC0)          | 26             |
/// | Thumb fwd/back      | 2 / 3 (PWM1)   |
/// | Index fwd/back      | 4 / 5 (PWM2)   |
/// | Middle fwd/back     | 6 / 7 (PWM3)   |
/// | Ring fwd/back       | 10 / 11 (PWM5) |
/// | Pinky fwd/back      | 12 / 13 (PWM6) |
/// | Matrix rows         | 16, 17, 18     |
/// | Matrix columns      | 19, 20, 21     |
/// | UART1 TX / RX       | 8 / 9          |
pub const BOARD_PINS: PinMap = PinMap {
    emg: 26,
    motors: [[2, 3], [4, 5], [6, 7], [10, 11], [12, 13]],
    rows: [16, 17, 18],
    cols: [19, 20, 21],
};

/// Control loop period of the full-arm application.
pub const TICK_PERIOD_MS: u64 = 20;

/// Pause between capture packets of the dataset application.
pub const CAPTURE_PERIOD_MS: u64 = 1000;
