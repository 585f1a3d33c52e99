//! Capture packet serialization.

use crate::checksum::{DecimalChecksum, CHECKSUM_LEN};
use crate::sample::{encode_sample, SAMPLE_BYTES};
use crate::serialize::{Serialize, SerializeError};

/// Bytes in a capture packet that are not sample data: label plus checksum.
pub const PACKET_OVERHEAD: usize = 1 + CHECKSUM_LEN;

/// Length of a capture packet carrying `samples` samples (`2N + 5`).
#[inline]
#[must_use]
pub const fn packet_len(samples: usize) -> usize {
    samples * SAMPLE_BYTES + PACKET_OVERHEAD
}

/// Writes packet bytes while accumulating the checksum, so no intermediate
/// payload buffer is needed.
struct PacketBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
    checksum: DecimalChecksum,
}

impl<'a> PacketBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            checksum: DecimalChecksum::new(),
        }
    }

    /// Write a byte and add it to the checksum.
    #[inline]
    fn write(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.checksum.update(byte);
        self.pos += 1;
    }

    /// Append the checksum groups (not summed themselves).
    #[inline]
    fn finalize(self) -> usize {
        let groups = self.checksum.finalize();
        let end = self.pos + CHECKSUM_LEN;
        self.buf[self.pos..end].copy_from_slice(&groups);
        end
    }
}

/// A labelled batch of EMG samples ready to be framed.
///
/// The frame borrows its samples; nothing is copied until
/// [`serialize`](Serialize::serialize) writes the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFrame<'a> {
    label: u8,
    samples: &'a [u16],
}

impl<'a> CaptureFrame<'a> {
    /// Create a frame for the given label and samples.
    #[inline]
    #[must_use]
    pub const fn new(label: u8, samples: &'a [u16]) -> Self {
        Self { label, samples }
    }

    /// Dataset label.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> u8 {
        self.label
    }

    /// Samples carried by this frame.
    #[inline]
    #[must_use]
    pub const fn samples(&self) -> &'a [u16] {
        self.samples
    }
}

impl Serialize for CaptureFrame<'_> {
    fn serialized_len(&self) -> usize {
        packet_len(self.samples.len())
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if self.samples.is_empty() {
            return Err(SerializeError::EmptyCapture);
        }
        if buf.len() < self.serialized_len() {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut pb = PacketBuf::new(buf);
        pb.write(self.label);
        for &sample in self.samples {
            let [hi, lo] = encode_sample(sample);
            pb.write(hi);
            pb.write(lo);
        }

        Ok(pb.finalize())
    }

    /// Streams the packet without a packet-sized buffer.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<usize, SerializeError> {
        if self.samples.is_empty() {
            return Err(SerializeError::EmptyCapture);
        }

        let mut checksum = DecimalChecksum::new();
        let mut put = |bytes: &[u8], checksum: &mut DecimalChecksum| {
            checksum.update_slice(bytes);
            writer.write_all(bytes).map_err(|_| SerializeError::WriteError)
        };

        put(&[self.label], &mut checksum)?;
        for &sample in self.samples {
            put(&encode_sample(sample), &mut checksum)?;
        }
        writer
            .write_all(&checksum.finalize())
            .map_err(|_| SerializeError::WriteError)?;

        Ok(self.serialized_len())
    }
}
