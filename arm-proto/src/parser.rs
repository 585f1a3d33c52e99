//! Receiver-side validation of capture packets.
//!
//! The controller only emits packets; this is the reverse decomposition a
//! dataset collector applies before trusting the samples.

use crate::capture::PACKET_OVERHEAD;
use crate::checksum::{calculate_checksum, CHECKSUM_LEN};
use crate::sample::{decode_sample, SAMPLE_BYTES};

/// Error type for parsing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Input length does not match any valid message.
    Length,
    /// Checksum groups do not match the recomputed sum.
    Checksum,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Length => write!(f, "invalid length"),
            Self::Checksum => write!(f, "checksum mismatch"),
        }
    }
}

/// A validated capture packet borrowed from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturePacket<'a> {
    label: u8,
    payload: &'a [u8],
    checksum: [u8; CHECKSUM_LEN],
}

impl<'a> CapturePacket<'a> {
    /// Dataset label.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> u8 {
        self.label
    }

    /// Number of samples in the packet.
    #[inline]
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.payload.len() / SAMPLE_BYTES
    }

    /// Raw base-100 sample bytes.
    #[inline]
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Transmitted checksum groups.
    #[inline]
    #[must_use]
    pub const fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        self.checksum
    }

    /// Decoded samples in transmission order.
    pub fn samples(&self) -> impl Iterator<Item = u16> + 'a {
        self.payload
            .chunks_exact(SAMPLE_BYTES)
            .map(|pair| decode_sample([pair[0], pair[1]]))
    }
}

/// Validate a capture packet and borrow its contents.
///
/// # Errors
///
/// - [`ParseError::Length`] unless the packet is `2N + 5` bytes with `N >= 1`
/// - [`ParseError::Checksum`] if the trailing groups do not match
pub fn parse_capture(packet: &[u8]) -> Result<CapturePacket<'_>, ParseError> {
    if packet.len() < PACKET_OVERHEAD + SAMPLE_BYTES
        || (packet.len() - PACKET_OVERHEAD) % SAMPLE_BYTES != 0
    {
        return Err(ParseError::Length);
    }

    let (body, trailer) = packet.split_at(packet.len() - CHECKSUM_LEN);
    if calculate_checksum(body) != trailer {
        return Err(ParseError::Checksum);
    }

    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(trailer);

    Ok(CapturePacket {
        label: body[0],
        payload: &body[1..],
        checksum,
    })
}
