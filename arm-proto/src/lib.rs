//! Wire formats for the bionic arm controller.
//!
//! Two payloads leave the controller:
//!
//! - **Gesture report** ([`GestureReport`]): three raw bytes sent after every
//!   executed gesture, no framing or checksum.
//! - **Capture packet** ([`CaptureFrame`]): a labelled batch of EMG samples
//!   with a decimal checksum, used to collect training datasets.
//!
//! # Capture Packet Format
//!
//! ```text
//! [label][hi0][lo0][hi1][lo1]...[hiN-1][loN-1][c0][c1][c2][c3]
//! ```
//!
//! - `label` - Dataset label byte
//! - `hiK,loK` - Sample K split in base 100 (`sample / 100`, `sample % 100`)
//! - `c0..c3` - Base-100 digit groups of the byte sum (see [`checksum`])
//!
//! A packet carrying `N` samples is always `2N + 5` bytes long.
//!
//! # Examples
//!
//! ## Building a capture packet
//!
//! ```
//! use arm_proto::{CaptureFrame, Serialize, packet_len};
//!
//! let samples = [1234u16, 42, 9999];
//! let frame = CaptureFrame::new(1, &samples);
//!
//! let mut buf = [0u8; 64];
//! let len = frame.serialize(&mut buf).unwrap();
//! assert_eq!(len, packet_len(samples.len()));
//! assert_eq!(&buf[..3], &[1, 12, 34]);
//! ```
//!
//! ## Validating on the receiver side
//!
//! ```
//! use arm_proto::{parse_capture, CaptureFrame, Serialize};
//!
//! let samples = [100u16, 2048];
//! let mut buf = [0u8; 16];
//! let len = CaptureFrame::new(7, &samples).serialize(&mut buf).unwrap();
//!
//! let packet = parse_capture(&buf[..len]).unwrap();
//! assert_eq!(packet.label(), 7);
//! assert!(packet.samples().eq(samples.iter().copied()));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable [`Serialize::serialize_vec`] into `heapless::Vec`
//! - **`embedded-io`**: Enable [`Serialize::serialize_io`] to any `embedded_io::Write`
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and never allocates.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod capture;
pub mod checksum;
pub mod parser;
pub mod report;
pub mod sample;
pub mod serialize;

pub use capture::{packet_len, CaptureFrame, PACKET_OVERHEAD};
pub use checksum::{calculate_checksum, digit_groups, DecimalChecksum, CHECKSUM_LEN};
pub use parser::{parse_capture, CapturePacket, ParseError};
pub use report::{GestureReport, REPORT_LEN};
pub use sample::{decode_sample, encode_sample, MAX_ENCODABLE_SAMPLE, SAMPLE_BYTES};
pub use serialize::{Serialize, SerializeError};
