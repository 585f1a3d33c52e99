//! Error types shared across the crate.

use heapless::Vec;

use crate::hal::PinId;

/// Error type for a single capability operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// The backend refused its configuration.
    Setup,
    /// A read or write failed at the peripheral.
    Io,
    /// Zero-length read or write request.
    Empty,
    /// A read found nothing pending.
    NoData,
    /// The backend accepted only part of a write.
    ShortWrite { written: usize },
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Setup => write!(f, "setup failed"),
            Self::Io => write!(f, "I/O error"),
            Self::Empty => write!(f, "empty request"),
            Self::NoData => write!(f, "no data available"),
            Self::ShortWrite { written } => write!(f, "short write ({written} bytes)"),
        }
    }
}

/// One leg of a motor's H-bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorChannel {
    Forward,
    Backward,
}

/// Physical role of a capability handle, used to say which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Component {
    /// The EMG analog input.
    Sensor,
    /// One channel of a motor.
    Motor { index: u8, channel: MotorChannel },
    /// A button matrix row output.
    MatrixRow(u8),
    /// A button matrix column input.
    MatrixColumn(u8),
    /// The report link.
    Transport,
}

/// A component whose `setup()` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupFailure {
    pub component: Component,
    pub error: HalError,
}

/// Most failures kept by a [`SetupReport`]; further ones are only counted.
pub const MAX_REPORTED_FAILURES: usize = 24;

/// Aggregated outcome of setting up several handles.
///
/// Every handle is set up even after an earlier one fails, so the report
/// names all failing components. Callers that only need pass/fail use
/// [`is_ok`](Self::is_ok).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    failures: Vec<SetupFailure, MAX_REPORTED_FAILURES>,
    dropped: usize,
}

impl SetupReport {
    /// Create an empty (successful) report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            failures: Vec::new(),
            dropped: 0,
        }
    }

    /// Record the outcome of one component's setup.
    pub fn record(&mut self, component: Component, result: Result<(), HalError>) {
        if let Err(error) = result {
            warn!("setup failed: {:?} ({:?})", component, error);
            if self.failures.push(SetupFailure { component, error }).is_err() {
                self.dropped += 1;
            }
        }
    }

    /// Fold in the report of a sub-component.
    pub fn merge(&mut self, result: Result<(), SetupReport>) {
        if let Err(other) = result {
            for failure in other.failures {
                if self.failures.push(failure).is_err() {
                    self.dropped += 1;
                }
            }
            self.dropped += other.dropped;
        }
    }

    /// `true` when every recorded setup succeeded.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty() && self.dropped == 0
    }

    /// Failed components, in setup order.
    #[inline]
    #[must_use]
    pub fn failures(&self) -> &[SetupFailure] {
        &self.failures
    }

    /// Failures that did not fit in the report.
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// `Ok(())` if nothing failed, otherwise the report itself.
    pub fn into_result(self) -> Result<(), SetupReport> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SetupReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SetupReport(failures: {}, dropped: {})",
            self.failures.as_slice(),
            self.dropped
        );
    }
}

/// Error type for composing drivers from a [`Platform`](crate::Platform).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuildError {
    /// The platform has no backend for this component.
    Unavailable(Component),
    /// The pin map assigns one physical pin to two handles.
    PinConflict(PinId),
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable(component) => write!(f, "no backend for {component:?}"),
            Self::PinConflict(pin) => write!(f, "pin {pin} assigned twice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_ok() {
        let report = SetupReport::new();
        assert!(report.is_ok());
        assert_eq!(report.into_result(), Ok(()));
    }

    #[test]
    fn test_report_keeps_every_failure() {
        let mut report = SetupReport::new();
        report.record(Component::Sensor, Ok(()));
        report.record(Component::MatrixRow(1), Err(HalError::Setup));
        report.record(Component::Transport, Err(HalError::Io));

        assert!(!report.is_ok());
        assert_eq!(
            report.failures(),
            &[
                SetupFailure {
                    component: Component::MatrixRow(1),
                    error: HalError::Setup,
                },
                SetupFailure {
                    component: Component::Transport,
                    error: HalError::Io,
                },
            ]
        );
    }

    #[test]
    fn test_merge_sub_reports() {
        let mut inner = SetupReport::new();
        inner.record(
            Component::Motor {
                index: 2,
                channel: MotorChannel::Backward,
            },
            Err(HalError::Setup),
        );

        let mut outer = SetupReport::new();
        outer.merge(Ok(()));
        outer.merge(inner.into_result());

        assert_eq!(outer.failures().len(), 1);
        assert_eq!(
            outer.failures()[0].component,
            Component::Motor {
                index: 2,
                channel: MotorChannel::Backward
            }
        );
    }

    #[test]
    fn test_overflowing_failures_are_counted() {
        let mut report = SetupReport::new();
        for i in 0..(MAX_REPORTED_FAILURES as u8 + 3) {
            report.record(Component::MatrixColumn(i), Err(HalError::Setup));
        }
        assert_eq!(report.failures().len(), MAX_REPORTED_FAILURES);
        assert_eq!(report.dropped(), 3);
        assert!(!report.is_ok());
    }
}
