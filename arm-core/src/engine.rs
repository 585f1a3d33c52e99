//! Gesture engine: one sense/decide/act/report pass per tick.

use arm_proto::GestureReport;
use heapless::Vec;

use crate::config::{PinMap, EMG_THRESHOLD, MATRIX_COLS, MATRIX_ROWS, NUM_MOTORS, TRANSPORT};
use crate::drivers::{ButtonMatrix, EmgSensor, MotorDriver, MotorFault};
use crate::error::{BuildError, Component, HalError, MotorChannel, SetupReport};
use crate::gesture::{pattern_for, GestureCode, GesturePattern};
use crate::hal::{AnalogInput, ByteTransport, DigitalIo, PinMode, Platform, PwmOutput};
use crate::transport::Transport;

/// What a successful tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Sample at or below the threshold; matrix and motors untouched.
    Rejected { sample: u16 },
    /// Sample above the threshold but no key held.
    NoPress { sample: u16 },
    /// Gesture executed and reported.
    Executed(GestureReport),
}

/// Motors that failed while executing a gesture or stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationFault {
    /// Gesture being executed; `None` for [`GestureEngine::stop_all`].
    pub code: Option<GestureCode>,
    faults: [Option<MotorFault>; NUM_MOTORS],
}

impl ActuationFault {
    /// Fault of the motor at `index`, if it failed.
    #[must_use]
    pub fn motor(&self, index: usize) -> Option<MotorFault> {
        self.faults.get(index).copied().flatten()
    }

    /// `(index, fault)` for every failed motor.
    pub fn failed_motors(&self) -> impl Iterator<Item = (usize, MotorFault)> + '_ {
        self.faults
            .iter()
            .enumerate()
            .filter_map(|(i, fault)| fault.map(|f| (i, f)))
    }
}

/// Why a tick failed. The engine is idle again either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// The EMG read failed; nothing else was touched.
    Sensor(HalError),
    /// One or more motors failed; no report was sent.
    Actuation(ActuationFault),
    /// Gesture executed but the report did not go out.
    Report { report: GestureReport, error: HalError },
}

/// Engine states. Every tick starts at `Sampling` and ends back at `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sampling,
    Rejected(u16),
    Gated(u16),
    Acting(GestureReport),
    Reporting(GestureReport),
}

enum Step {
    Next(Phase),
    Idle(Result<TickOutcome, TickError>),
}

/// The arm controller.
///
/// Owns the EMG sensor, the button matrix, the finger motors and the report
/// transport. It has no timer: call [`tick`](Self::tick) at the control
/// rate.
#[derive(Debug)]
pub struct GestureEngine<A, G, W, T> {
    sensor: EmgSensor<A>,
    matrix: ButtonMatrix<G, MATRIX_ROWS, MATRIX_COLS>,
    motors: [MotorDriver<W>; NUM_MOTORS],
    transport: Transport<T>,
}

impl<A, G, W, T> GestureEngine<A, G, W, T>
where
    A: AnalogInput,
    G: DigitalIo,
    W: PwmOutput,
    T: ByteTransport,
{
    /// Assemble an engine from already-built drivers.
    #[must_use]
    pub fn new(
        sensor: EmgSensor<A>,
        matrix: ButtonMatrix<G, MATRIX_ROWS, MATRIX_COLS>,
        motors: [MotorDriver<W>; NUM_MOTORS],
        transport: Transport<T>,
    ) -> Self {
        Self {
            sensor,
            matrix,
            motors,
            transport,
        }
    }

    /// Build every driver through `platform`'s factories.
    ///
    /// # Errors
    ///
    /// - [`BuildError::PinConflict`] if `pins` reuses a pin
    /// - [`BuildError::Unavailable`] naming the first component the
    ///   platform could not provide
    pub fn from_platform<P>(platform: &mut P, pins: &PinMap) -> Result<Self, BuildError>
    where
        P: Platform<Adc = A, Gpio = G, Pwm = W, Link = T>,
    {
        pins.validate()?;

        let adc = platform
            .adc(pins.emg)
            .ok_or(BuildError::Unavailable(Component::Sensor))?;

        let motors = build_array(|index| {
            let [fwd, bwd] = pins.motors[usize::from(index)];
            let forward = platform.pwm(fwd).ok_or(BuildError::Unavailable(Component::Motor {
                index,
                channel: MotorChannel::Forward,
            }))?;
            let backward = platform.pwm(bwd).ok_or(BuildError::Unavailable(Component::Motor {
                index,
                channel: MotorChannel::Backward,
            }))?;
            Ok(MotorDriver::new(index, forward, backward))
        }, |index| Component::Motor {
            index,
            channel: MotorChannel::Forward,
        })?;

        let rows = build_array(|r| {
            platform
                .gpio(pins.rows[usize::from(r)], PinMode::Output)
                .ok_or(BuildError::Unavailable(Component::MatrixRow(r)))
        }, Component::MatrixRow)?;
        let cols = build_array(|c| {
            platform
                .gpio(pins.cols[usize::from(c)], PinMode::InputPullUp)
                .ok_or(BuildError::Unavailable(Component::MatrixColumn(c)))
        }, Component::MatrixColumn)?;

        let link = platform
            .link(TRANSPORT)
            .ok_or(BuildError::Unavailable(Component::Transport))?;

        Ok(Self::new(
            EmgSensor::new(adc),
            ButtonMatrix::new(rows, cols),
            motors,
            Transport::new(link),
        ))
    }

    /// Set up every component. All are attempted; the report names each
    /// one that failed.
    pub fn setup(&mut self) -> Result<(), SetupReport> {
        let mut report = SetupReport::new();
        report.merge(self.sensor.setup());
        for motor in &mut self.motors {
            report.merge(motor.setup());
        }
        report.merge(self.matrix.setup());
        report.merge(self.transport.setup());
        report.into_result()
    }

    /// Run one control cycle.
    ///
    /// Failures never leave the engine stuck: the next call starts a fresh
    /// cycle. Actuation is not undone when only the report fails.
    pub fn tick(&mut self) -> Result<TickOutcome, TickError> {
        let mut phase = Phase::Sampling;
        loop {
            match self.step(phase) {
                Step::Next(next) => phase = next,
                Step::Idle(result) => {
                    match &result {
                        Ok(outcome) => trace!("tick: {:?}", outcome),
                        Err(e) => warn!("tick failed: {:?}", e),
                    }
                    return result;
                }
            }
        }
    }

    /// Stop every motor, e.g. after an actuation fault.
    ///
    /// # Errors
    ///
    /// Returns the motors that failed to stop.
    pub fn stop_all(&mut self) -> Result<(), ActuationFault> {
        self.actuate(None, crate::gesture::STOP_ALL)
    }

    /// Release the drivers.
    pub fn into_parts(
        self,
    ) -> (
        EmgSensor<A>,
        ButtonMatrix<G, MATRIX_ROWS, MATRIX_COLS>,
        [MotorDriver<W>; NUM_MOTORS],
        Transport<T>,
    ) {
        (self.sensor, self.matrix, self.motors, self.transport)
    }

    fn step(&mut self, phase: Phase) -> Step {
        match phase {
            Phase::Sampling => match self.sensor.read() {
                Ok(sample) if sample > EMG_THRESHOLD => Step::Next(Phase::Gated(sample)),
                Ok(sample) => Step::Next(Phase::Rejected(sample)),
                Err(e) => Step::Idle(Err(TickError::Sensor(e))),
            },
            Phase::Rejected(sample) => Step::Idle(Ok(TickOutcome::Rejected { sample })),
            Phase::Gated(sample) => match self.matrix.read() {
                Some(press) => {
                    let code = GestureCode::from_press(press);
                    debug!("gesture {} selected at sample {}", code.raw(), sample);
                    Step::Next(Phase::Acting(GestureReport::new(code.raw(), sample)))
                }
                None => Step::Idle(Ok(TickOutcome::NoPress { sample })),
            },
            Phase::Acting(report) => {
                let code = GestureCode(report.code);
                match self.actuate(Some(code), pattern_for(code)) {
                    Ok(()) => Step::Next(Phase::Reporting(report)),
                    Err(fault) => Step::Idle(Err(TickError::Actuation(fault))),
                }
            }
            Phase::Reporting(report) => match self.transport.write(&report.to_bytes()) {
                Ok(_) => Step::Idle(Ok(TickOutcome::Executed(report))),
                Err(error) => Step::Idle(Err(TickError::Report { report, error })),
            },
        }
    }

    /// Apply `pattern` to every motor, continuing past failures.
    fn actuate(
        &mut self,
        code: Option<GestureCode>,
        pattern: GesturePattern,
    ) -> Result<(), ActuationFault> {
        let mut faults = [None; NUM_MOTORS];
        let mut failed = false;
        for ((motor, action), fault) in self.motors.iter_mut().zip(pattern).zip(&mut faults) {
            if let Err(f) = motor.apply(action) {
                *fault = Some(f);
                failed = true;
            }
        }

        if failed {
            Err(ActuationFault { code, faults })
        } else {
            Ok(())
        }
    }
}

/// Build `N` items in order, stopping at the first error.
///
/// `missing` names the component at an index `make` never produced.
fn build_array<T, const N: usize>(
    mut make: impl FnMut(u8) -> Result<T, BuildError>,
    missing: impl Fn(u8) -> Component,
) -> Result<[T; N], BuildError> {
    let mut items: Vec<T, N> = Vec::new();
    for index in 0..N as u8 {
        if items.push(make(index)?).is_err() {
            break;
        }
    }
    items
        .into_array()
        .map_err(|partial| BuildError::Unavailable(missing(partial.len() as u8)))
}
