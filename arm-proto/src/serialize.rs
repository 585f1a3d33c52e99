//! Serialization trait shared by every outbound message.

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized message.
    BufferTooSmall,
    /// A capture frame must carry at least one sample.
    EmptyCapture,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::EmptyCapture => write!(f, "capture has no samples"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Extension trait for serializing protocol messages into a byte buffer.
///
/// # Example
///
/// ```
/// use arm_proto::{GestureReport, Serialize};
///
/// let mut buf = [0u8; 8];
/// let len = GestureReport::new(1, 2500).serialize(&mut buf).unwrap();
/// assert_eq!(&buf[..len], &[1, 0x09, 0xC4]);
/// ```
pub trait Serialize {
    /// Exact number of bytes [`serialize`](Self::serialize) will write.
    fn serialized_len(&self) -> usize;

    /// Serialize to the start of the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize into a fresh `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is below
    /// [`serialized_len`](Self::serialized_len).
    #[cfg(feature = "heapless")]
    fn serialize_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(self.serialized_len(), 0)
            .map_err(|()| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// This can be used with UART or other I/O peripherals. Returns the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<usize, SerializeError>;
}
