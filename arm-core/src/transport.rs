//! Report link shared by the gesture engine and the capture session.

use crate::error::{Component, HalError, SetupReport};
use crate::hal::ByteTransport;

/// Uniform write/read front for whichever link the build selected.
///
/// Rejects empty requests before they reach the backend and treats a write
/// the backend only partly accepted as a failure.
#[derive(Debug)]
pub struct Transport<T> {
    link: T,
}

impl<T: ByteTransport> Transport<T> {
    #[must_use]
    pub fn new(link: T) -> Self {
        Self { link }
    }

    pub fn setup(&mut self) -> Result<(), SetupReport> {
        let mut report = SetupReport::new();
        report.record(Component::Transport, self.link.setup());
        report.into_result()
    }

    /// Send all of `data`.
    ///
    /// # Errors
    ///
    /// - [`HalError::Empty`] if `data` is empty
    /// - [`HalError::ShortWrite`] if the backend accepted fewer bytes
    /// - the backend's own error otherwise
    pub fn write(&mut self, data: &[u8]) -> Result<usize, HalError> {
        if data.is_empty() {
            return Err(HalError::Empty);
        }
        let written = self.link.write(data)?;
        if written != data.len() {
            return Err(HalError::ShortWrite { written });
        }
        Ok(written)
    }

    /// Receive up to `buf.len()` bytes.
    ///
    /// # Errors
    ///
    /// - [`HalError::Empty`] if `buf` is empty
    /// - [`HalError::NoData`] if nothing was pending
    /// - the backend's own error otherwise
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, HalError> {
        if buf.is_empty() {
            return Err(HalError::Empty);
        }
        match self.link.read(buf)? {
            0 => Err(HalError::NoData),
            n => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLink;

    #[test]
    fn test_write_passes_whole_payload() {
        let link = MockLink::new();
        let mut transport = Transport::new(link.clone());
        assert_eq!(transport.write(&[5, 0x0B, 0xB8]), Ok(3));
        assert_eq!(link.sent(), [[5u8, 0x0B, 0xB8].to_vec()]);
    }

    #[test]
    fn test_empty_write_rejected_before_backend() {
        let link = MockLink::new();
        let mut transport = Transport::new(link.clone());
        assert_eq!(transport.write(&[]), Err(HalError::Empty));
        assert!(link.sent().is_empty());
    }

    #[test]
    fn test_short_write_is_failure() {
        let link = MockLink::new();
        link.accept_at_most(2);
        let mut transport = Transport::new(link);
        assert_eq!(
            transport.write(&[1, 2, 3]),
            Err(HalError::ShortWrite { written: 2 })
        );
    }

    #[test]
    fn test_backend_error_propagates() {
        let link = MockLink::new();
        link.fail_writes(true);
        let mut transport = Transport::new(link);
        assert_eq!(transport.write(&[1]), Err(HalError::Io));
    }

    #[test]
    fn test_read_returns_pending_bytes() {
        let link = MockLink::new();
        link.queue_rx(&[9, 8, 7]);
        let mut transport = Transport::new(link);

        let mut buf = [0u8; 2];
        assert_eq!(transport.read(&mut buf), Ok(2));
        assert_eq!(buf, [9, 8]);
        assert_eq!(transport.read(&mut buf), Ok(1));
        assert_eq!(buf[0], 7);
        assert_eq!(transport.read(&mut buf), Err(HalError::NoData));
    }

    #[test]
    fn test_empty_read_rejected() {
        let mut transport = Transport::new(MockLink::new());
        assert_eq!(transport.read(&mut []), Err(HalError::Empty));
    }
}
