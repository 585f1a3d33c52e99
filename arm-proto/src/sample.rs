//! Base-100 sample encoding.
//!
//! Each sample travels as two bytes: the hundreds and the remainder.
//! `1234` becomes `[12, 34]`. The split only stays inside two-digit groups
//! while the sample is below 10000; larger values are not rejected and the
//! high group leaves its range (and wraps once `sample / 100` exceeds 255).

/// Bytes used by one encoded sample.
pub const SAMPLE_BYTES: usize = 2;

/// Largest sample whose encoding keeps both groups within `0..100`.
pub const MAX_ENCODABLE_SAMPLE: u16 = 9999;

/// Split a sample into its base-100 high and low groups.
#[inline]
#[must_use]
pub const fn encode_sample(sample: u16) -> [u8; SAMPLE_BYTES] {
    [(sample / 100) as u8, (sample % 100) as u8]
}

/// Recombine two base-100 groups into a sample.
#[inline]
#[must_use]
pub const fn decode_sample(bytes: [u8; SAMPLE_BYTES]) -> u16 {
    bytes[0] as u16 * 100 + bytes[1] as u16
}
