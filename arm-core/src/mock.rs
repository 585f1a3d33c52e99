//! Host-side capability doubles shared by the unit tests.
//!
//! Every double is a cheap `Clone` over shared state: hand one clone to the
//! driver under test and keep the other to steer and inspect it.

extern crate std;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::config::{PinMap, NUM_MOTORS, TEST_PINS};
use crate::drivers::{ButtonMatrix, EmgSensor, MotorDriver};
use crate::engine::GestureEngine;
use crate::error::HalError;
use crate::hal::{
    AnalogInput, ByteTransport, DigitalIo, Level, PinId, PinMode, Platform, PwmOutput,
    TransportKind,
};
use crate::transport::Transport;

std::thread_local! {
    static WRITE_SEQ: Cell<u64> = const { Cell::new(0) };
}

fn next_seq() -> u64 {
    WRITE_SEQ.with(|seq| {
        let n = seq.get();
        seq.set(n + 1);
        n
    })
}

// --- PWM ---

#[derive(Debug, Default)]
struct PwmState {
    duty: Option<u8>,
    log: Vec<(u64, u8)>,
    fail_writes: bool,
    fail_setup: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockPwm(Rc<RefCell<PwmState>>);

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duty written, `None` if never written.
    pub fn duty(&self) -> Option<u8> {
        self.0.borrow().duty
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn fail_setup(&self, fail: bool) {
        self.0.borrow_mut().fail_setup = fail;
    }

    /// Successful writes of both legs in the order they happened,
    /// `(is_forward, duty)`.
    pub fn interleaved(forward: &MockPwm, backward: &MockPwm) -> Vec<(bool, u8)> {
        let mut log: Vec<(u64, bool, u8)> = forward
            .0
            .borrow()
            .log
            .iter()
            .map(|&(seq, duty)| (seq, true, duty))
            .chain(
                backward
                    .0
                    .borrow()
                    .log
                    .iter()
                    .map(|&(seq, duty)| (seq, false, duty)),
            )
            .collect();
        log.sort_by_key(|&(seq, _, _)| seq);
        log.into_iter().map(|(_, fwd, duty)| (fwd, duty)).collect()
    }
}

impl PwmOutput for MockPwm {
    fn setup(&mut self) -> Result<(), HalError> {
        let mut state = self.0.borrow_mut();
        if state.fail_setup {
            return Err(HalError::Setup);
        }
        state.duty = Some(0);
        Ok(())
    }

    fn write(&mut self, duty: u8) -> Result<(), HalError> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(HalError::Io);
        }
        state.duty = Some(duty);
        state.log.push((next_seq(), duty));
        Ok(())
    }
}

// --- ADC ---

#[derive(Debug, Default)]
struct AdcState {
    samples: VecDeque<u16>,
    fail_setup: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockAdc(Rc<RefCell<AdcState>>);

impl MockAdc {
    /// Yields `samples` in order, then fails every read with `Io`.
    pub fn with_samples(samples: &[u16]) -> Self {
        let adc = Self::default();
        adc.0.borrow_mut().samples.extend(samples);
        adc
    }

    pub fn fail_setup(&self, fail: bool) {
        self.0.borrow_mut().fail_setup = fail;
    }
}

impl AnalogInput for MockAdc {
    fn setup(&mut self) -> Result<(), HalError> {
        if self.0.borrow().fail_setup {
            Err(HalError::Setup)
        } else {
            Ok(())
        }
    }

    fn read(&mut self) -> Result<u16, HalError> {
        self.0.borrow_mut().samples.pop_front().ok_or(HalError::Io)
    }
}

// --- Button matrix ---

#[derive(Debug)]
struct KeyState {
    pressed: Vec<Vec<bool>>,
    row_levels: Vec<Level>,
    row_log: Vec<(u8, Level)>,
    failing_cols: Vec<bool>,
    failing_col_setup: Vec<bool>,
    stuck_high_rows: Vec<bool>,
}

/// Simulated key grid wired to row and column pins.
#[derive(Debug, Clone)]
pub struct KeySim(Rc<RefCell<KeyState>>);

impl KeySim {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self(Rc::new(RefCell::new(KeyState {
            pressed: std::vec![std::vec![false; cols]; rows],
            row_levels: std::vec![Level::High; rows],
            row_log: Vec::new(),
            failing_cols: std::vec![false; cols],
            failing_col_setup: std::vec![false; cols],
            stuck_high_rows: std::vec![false; rows],
        })))
    }

    pub fn row_pin(&self, row: u8) -> MockPin {
        MockPin {
            sim: self.clone(),
            role: Role::Row(row),
        }
    }

    pub fn col_pin(&self, col: u8) -> MockPin {
        MockPin {
            sim: self.clone(),
            role: Role::Column(col),
        }
    }

    pub fn pins<const R: usize, const C: usize>(&self) -> ([MockPin; R], [MockPin; C]) {
        (
            core::array::from_fn(|r| self.row_pin(r as u8)),
            core::array::from_fn(|c| self.col_pin(c as u8)),
        )
    }

    pub fn press(&self, row: u8, col: u8) {
        self.0.borrow_mut().pressed[usize::from(row)][usize::from(col)] = true;
    }

    pub fn release_all(&self) {
        for row in &mut self.0.borrow_mut().pressed {
            row.fill(false);
        }
    }

    pub fn all_rows_high(&self) -> bool {
        self.0.borrow().row_levels.iter().all(|&l| l == Level::High)
    }

    /// Row writes since creation or the last [`clear_log`](Self::clear_log).
    pub fn row_writes(&self) -> Vec<(u8, Level)> {
        self.0.borrow().row_log.clone()
    }

    pub fn clear_log(&self) {
        self.0.borrow_mut().row_log.clear();
    }

    pub fn fail_column(&self, col: u8) {
        self.0.borrow_mut().failing_cols[usize::from(col)] = true;
    }

    pub fn fail_column_setup(&self, col: u8) {
        self.0.borrow_mut().failing_col_setup[usize::from(col)] = true;
    }

    /// Writes of `Low` to `row` fail with `Io`; `High` still succeeds.
    pub fn stick_row_high(&self, row: u8) {
        self.0.borrow_mut().stuck_high_rows[usize::from(row)] = true;
    }

    fn column_level(&self, col: usize) -> Level {
        let state = self.0.borrow();
        let pulled_low = state
            .row_levels
            .iter()
            .zip(&state.pressed)
            .any(|(&level, keys)| level == Level::Low && keys[col]);
        Level::from(!pulled_low)
    }
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Row(u8),
    Column(u8),
}

/// One row or column line of a [`KeySim`].
#[derive(Debug, Clone)]
pub struct MockPin {
    sim: KeySim,
    role: Role,
}

impl DigitalIo for MockPin {
    fn setup(&mut self) -> Result<(), HalError> {
        match self.role {
            Role::Column(c) if self.sim.0.borrow().failing_col_setup[usize::from(c)] => {
                Err(HalError::Setup)
            }
            _ => Ok(()),
        }
    }

    fn write(&mut self, level: Level) -> Result<(), HalError> {
        match self.role {
            Role::Row(r) => {
                let mut state = self.sim.0.borrow_mut();
                if level == Level::Low && state.stuck_high_rows[usize::from(r)] {
                    return Err(HalError::Io);
                }
                state.row_levels[usize::from(r)] = level;
                state.row_log.push((r, level));
                Ok(())
            }
            Role::Column(_) => Err(HalError::Io),
        }
    }

    fn read(&mut self) -> Result<Level, HalError> {
        match self.role {
            Role::Row(r) => Ok(self.sim.0.borrow().row_levels[usize::from(r)]),
            Role::Column(c) => {
                if self.sim.0.borrow().failing_cols[usize::from(c)] {
                    return Err(HalError::Io);
                }
                Ok(self.sim.column_level(usize::from(c)))
            }
        }
    }
}

// --- Link ---

#[derive(Debug, Default)]
struct LinkState {
    sent: Vec<Vec<u8>>,
    accept_at_most: Option<usize>,
    fail_writes: bool,
    fail_setup: bool,
    rx: VecDeque<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct MockLink(Rc<RefCell<LinkState>>);

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every accepted write, as accepted.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.0.borrow().sent.clone()
    }

    /// Truncate later writes to `n` bytes.
    pub fn accept_at_most(&self, n: usize) {
        self.0.borrow_mut().accept_at_most = Some(n);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn fail_setup(&self, fail: bool) {
        self.0.borrow_mut().fail_setup = fail;
    }

    pub fn queue_rx(&self, data: &[u8]) {
        self.0.borrow_mut().rx.extend(data);
    }
}

impl ByteTransport for MockLink {
    fn setup(&mut self) -> Result<(), HalError> {
        if self.0.borrow().fail_setup {
            Err(HalError::Setup)
        } else {
            Ok(())
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, HalError> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(HalError::Io);
        }
        let n = state.accept_at_most.map_or(data.len(), |max| data.len().min(max));
        state.sent.push(data[..n].to_vec());
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, HalError> {
        let mut state = self.0.borrow_mut();
        let n = buf.len().min(state.rx.len());
        for (slot, byte) in buf.iter_mut().zip(state.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

// --- Delay ---

/// Records requested pauses instead of waiting.
#[derive(Debug, Default)]
pub struct CountingDelay {
    calls: usize,
    total_ns: u64,
}

impl CountingDelay {
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// --- Platform ---

/// Board wired as [`TEST_PINS`], backed by the doubles above.
pub struct MockPlatform {
    pub adc: MockAdc,
    pub keys: KeySim,
    pub link: MockLink,
    pins: PinMap,
    removed: Vec<PinId>,
    claimed: Vec<PinId>,
    link_taken: bool,
}

impl MockPlatform {
    pub fn new(samples: &[u16]) -> Self {
        Self {
            adc: MockAdc::with_samples(samples),
            keys: KeySim::new(TEST_PINS.rows.len(), TEST_PINS.cols.len()),
            link: MockLink::new(),
            pins: TEST_PINS,
            removed: Vec::new(),
            claimed: Vec::new(),
            link_taken: false,
        }
    }

    /// Make `pin` unavailable, as if the board did not route it.
    pub fn remove_pin(&mut self, pin: PinId) {
        self.removed.push(pin);
    }

    /// Pins handed out so far, in order.
    pub fn claimed(&self) -> &[PinId] {
        &self.claimed
    }

    fn claim(&mut self, pin: PinId) -> bool {
        if self.removed.contains(&pin) || self.claimed.contains(&pin) {
            return false;
        }
        self.claimed.push(pin);
        true
    }
}

impl Platform for MockPlatform {
    type Gpio = MockPin;
    type Adc = MockAdc;
    type Pwm = MockPwm;
    type Link = MockLink;

    fn gpio(&mut self, pin: PinId, mode: PinMode) -> Option<MockPin> {
        let row = self.pins.rows.iter().position(|&p| p == pin);
        let col = self.pins.cols.iter().position(|&p| p == pin);
        let handle = match (mode, row, col) {
            (PinMode::Output, Some(r), _) => self.keys.row_pin(r as u8),
            (PinMode::InputPullUp, _, Some(c)) => self.keys.col_pin(c as u8),
            _ => return None,
        };
        self.claim(pin).then_some(handle)
    }

    fn adc(&mut self, pin: PinId) -> Option<MockAdc> {
        (pin == self.pins.emg && self.claim(pin)).then(|| self.adc.clone())
    }

    fn pwm(&mut self, pin: PinId) -> Option<MockPwm> {
        let routed = self.pins.motors.iter().flatten().any(|&p| p == pin);
        (routed && self.claim(pin)).then(MockPwm::new)
    }

    fn link(&mut self, _kind: TransportKind) -> Option<MockLink> {
        if self.link_taken {
            return None;
        }
        self.link_taken = true;
        Some(self.link.clone())
    }
}

// --- Engine rig ---

/// A [`GestureEngine`] built directly from doubles, with handles to each.
pub struct MockRig {
    pub engine: GestureEngine<MockAdc, MockPin, MockPwm, MockLink>,
    pub adc: MockAdc,
    pub keys: KeySim,
    /// `(forward, backward)` legs, thumb first.
    pub motors: [(MockPwm, MockPwm); NUM_MOTORS],
    pub link: MockLink,
}

impl MockRig {
    pub fn new(samples: &[u16]) -> Self {
        let adc = MockAdc::with_samples(samples);
        let keys = KeySim::new(3, 3);
        let link = MockLink::new();
        let motors: [(MockPwm, MockPwm); NUM_MOTORS] =
            core::array::from_fn(|_| (MockPwm::new(), MockPwm::new()));

        let (rows, cols) = keys.pins();
        let drivers = core::array::from_fn(|i| {
            let (fwd, bwd) = &motors[i];
            MotorDriver::new(i as u8, fwd.clone(), bwd.clone())
        });
        let engine = GestureEngine::new(
            EmgSensor::new(adc.clone()),
            ButtonMatrix::new(rows, cols),
            drivers,
            Transport::new(link.clone()),
        );

        Self {
            engine,
            adc,
            keys,
            motors,
            link,
        }
    }

    /// No motor leg has been written.
    pub fn motors_untouched(&self) -> bool {
        self.motors
            .iter()
            .all(|(fwd, bwd)| fwd.duty().is_none() && bwd.duty().is_none())
    }
}
