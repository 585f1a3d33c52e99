//! Gesture report sent after every executed gesture.

use crate::parser::ParseError;
use crate::serialize::{Serialize, SerializeError};

/// Length of a serialized gesture report.
pub const REPORT_LEN: usize = 3;

/// Gesture event telemetry: `[code][sample_hi][sample_lo]`.
///
/// Unlike capture packets, the sample is split in binary (big-endian) and
/// there is no framing; receivers read fixed three-byte records.
///
/// # Example
///
/// ```
/// use arm_proto::GestureReport;
///
/// let report = GestureReport::new(5, 3000);
/// assert_eq!(report.to_bytes(), [5, 0x0B, 0xB8]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureReport {
    /// Gesture code selected on the button matrix.
    pub code: u8,
    /// EMG sample that gated the gesture.
    pub sample: u16,
}

impl GestureReport {
    /// Create a report.
    #[inline]
    #[must_use]
    pub const fn new(code: u8, sample: u16) -> Self {
        Self { code, sample }
    }

    /// Encode the report into its wire bytes.
    #[inline]
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let [hi, lo] = self.sample.to_be_bytes();
        [self.code, hi, lo]
    }

    /// Decode a report from exactly three bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Length`] if `bytes` is not [`REPORT_LEN`] long.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        match *bytes {
            [code, hi, lo] => Ok(Self::new(code, u16::from_be_bytes([hi, lo]))),
            _ => Err(ParseError::Length),
        }
    }
}

impl Serialize for GestureReport {
    fn serialized_len(&self) -> usize {
        REPORT_LEN
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let out = buf
            .get_mut(..REPORT_LEN)
            .ok_or(SerializeError::BufferTooSmall)?;
        out.copy_from_slice(&self.to_bytes());
        Ok(REPORT_LEN)
    }

    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<usize, SerializeError> {
        writer
            .write_all(&self.to_bytes())
            .map_err(|_| SerializeError::WriteError)?;
        Ok(REPORT_LEN)
    }
}
