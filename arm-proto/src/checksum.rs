//! Decimal checksum for capture packets.
//!
//! The checksum is the plain unsigned sum of every byte before it (label and
//! sample bytes), transmitted as four base-100 digit groups:
//!
//! ```text
//! c0 = sum / 1_000_000
//! c1 = (sum % 1_000_000) / 10_000
//! c2 = (sum % 10_000) / 100
//! c3 = sum % 100
//! ```
//!
//! `c0` is truncated to a byte. Receivers recompute the sum and compare the
//! groups; there is no binary CRC.

/// Number of checksum bytes at the end of a capture packet.
pub const CHECKSUM_LEN: usize = 4;

/// Split a byte sum into the four transmitted digit groups.
#[inline]
#[must_use]
pub const fn digit_groups(sum: u32) -> [u8; CHECKSUM_LEN] {
    [
        (sum / 1_000_000) as u8,
        ((sum % 1_000_000) / 10_000) as u8,
        ((sum % 10_000) / 100) as u8,
        (sum % 100) as u8,
    ]
}

/// Calculate the checksum groups of a byte slice.
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut digest = DecimalChecksum::new();
    digest.update_slice(data);
    digest.finalize()
}

/// Running byte sum for incremental checksum calculation.
///
/// Use this when building a packet byte-by-byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalChecksum {
    sum: u32,
}

impl DecimalChecksum {
    /// Create an empty digest.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { sum: 0 }
    }

    /// Add a single byte.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.sum = self.sum.wrapping_add(u32::from(byte));
    }

    /// Add a byte slice.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        for &b in data {
            self.update(b);
        }
    }

    /// Raw sum accumulated so far.
    #[inline]
    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.sum
    }

    /// Finalize into the four digit groups.
    #[inline]
    #[must_use]
    pub const fn finalize(self) -> [u8; CHECKSUM_LEN] {
        digit_groups(self.sum)
    }
}
