//! Dataset capture: fixed batches of EMG samples, framed and sent.

use arm_proto::{CaptureFrame, Serialize, SerializeError};
use embedded_hal::delay::DelayNs;

use crate::config::{CAPTURE_PACKET_LEN, SAMPLE_COUNT, SAMPLE_INTERVAL_MS, TRANSPORT};
use crate::drivers::EmgSensor;
use crate::error::{BuildError, Component, HalError, SetupReport};
use crate::hal::{AnalogInput, ByteTransport, PinId, Platform};
use crate::transport::Transport;

/// Why a capture produced no packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Sample `index` could not be read; the batch was dropped.
    Sensor { index: usize, error: HalError },
    /// The batch could not be framed.
    Frame(SerializeError),
    /// The framed packet did not go out whole.
    Transport(HalError),
}

impl From<SerializeError> for CaptureError {
    fn from(e: SerializeError) -> Self {
        Self::Frame(e)
    }
}

/// Samples the EMG sensor at a fixed rate and sends each batch as one
/// checksummed packet.
///
/// Sample and packet buffers live inside the session, so a capture
/// allocates nothing.
#[derive(Debug)]
pub struct CaptureSession<A, T> {
    sensor: EmgSensor<A>,
    transport: Transport<T>,
    samples: [u16; SAMPLE_COUNT],
    packet: [u8; CAPTURE_PACKET_LEN],
}

impl<A: AnalogInput, T: ByteTransport> CaptureSession<A, T> {
    #[must_use]
    pub fn new(sensor: EmgSensor<A>, transport: Transport<T>) -> Self {
        Self {
            sensor,
            transport,
            samples: [0; SAMPLE_COUNT],
            packet: [0; CAPTURE_PACKET_LEN],
        }
    }

    /// Build the sensor on `emg` and the configured link.
    pub fn from_platform<P>(platform: &mut P, emg: PinId) -> Result<Self, BuildError>
    where
        P: Platform<Adc = A, Link = T>,
    {
        let adc = platform
            .adc(emg)
            .ok_or(BuildError::Unavailable(Component::Sensor))?;
        let link = platform
            .link(TRANSPORT)
            .ok_or(BuildError::Unavailable(Component::Transport))?;
        Ok(Self::new(EmgSensor::new(adc), Transport::new(link)))
    }

    /// Set up the sensor and the link.
    pub fn setup(&mut self) -> Result<(), SetupReport> {
        let mut report = SetupReport::new();
        report.merge(self.sensor.setup());
        report.merge(self.transport.setup());
        report.into_result()
    }

    /// Fill the sample buffer, pausing [`SAMPLE_INTERVAL_MS`] after each
    /// read.
    ///
    /// # Errors
    ///
    /// Stops at the first failed read; samples already taken are discarded.
    pub fn collect<D: DelayNs>(&mut self, delay: &mut D) -> Result<&[u16], CaptureError> {
        for (index, slot) in self.samples.iter_mut().enumerate() {
            *slot = self
                .sensor
                .read()
                .map_err(|error| CaptureError::Sensor { index, error })?;
            delay.delay_ms(SAMPLE_INTERVAL_MS);
        }
        Ok(&self.samples)
    }

    /// Collect one batch and send it as a packet stamped with `label`.
    ///
    /// Returns the number of bytes sent.
    pub fn capture<D: DelayNs>(&mut self, delay: &mut D, label: u8) -> Result<usize, CaptureError> {
        self.collect(delay)?;

        let len = CaptureFrame::new(label, &self.samples).serialize(&mut self.packet)?;
        let sent = self
            .transport
            .write(&self.packet[..len])
            .map_err(CaptureError::Transport)?;

        debug!("capture sent: label {}, {} bytes", label, sent);
        Ok(sent)
    }

    /// Packet built by the last [`capture`](Self::capture) that got as far
    /// as framing.
    #[must_use]
    pub fn packet(&self) -> &[u8; CAPTURE_PACKET_LEN] {
        &self.packet
    }

    /// Release the sensor and link.
    pub fn into_parts(self) -> (EmgSensor<A>, Transport<T>) {
        (self.sensor, self.transport)
    }
}
