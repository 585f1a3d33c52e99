//! Serial report link on UART1.
//!
//! # Pins
//!
//! - GPIO 8: TX
//! - GPIO 9: RX

use arm_core::{ByteTransport, HalError};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIN_8, PIN_9, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config};
use embassy_rp::Peri;
use embedded_io::{Read, Write};
// The buffered UART only reports pending bytes through the async trait;
// `read_ready` itself does not block.
use embedded_io_async::ReadReady;
use static_cell::StaticCell;

bind_interrupts!(pub struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

const TX_BUFFER_LEN: usize = 256;
const RX_BUFFER_LEN: usize = 64;

static TX_BUFFER: StaticCell<[u8; TX_BUFFER_LEN]> = StaticCell::new();
static RX_BUFFER: StaticCell<[u8; RX_BUFFER_LEN]> = StaticCell::new();

/// UART1 peripheral and its pins, before the link is opened.
pub struct UartParts {
    pub uart: Peri<'static, UART1>,
    pub tx: Peri<'static, PIN_8>,
    pub rx: Peri<'static, PIN_9>,
}

/// Interrupt-buffered UART, 8N1.
pub struct RpUart {
    pending: Option<UartParts>,
    baudrate: u32,
    uart: Option<BufferedUart>,
}

impl RpUart {
    #[must_use]
    pub fn new(parts: UartParts, baudrate: u32) -> Self {
        Self {
            pending: Some(parts),
            baudrate,
            uart: None,
        }
    }

    fn uart(&mut self) -> Result<&mut BufferedUart, HalError> {
        self.uart.as_mut().ok_or(HalError::Setup)
    }
}

impl ByteTransport for RpUart {
    fn setup(&mut self) -> Result<(), HalError> {
        if let Some(UartParts { uart, tx, rx }) = self.pending.take() {
            // Only one link exists per image, so the buffers are taken once.
            let (Some(tx_buffer), Some(rx_buffer)) = (
                TX_BUFFER.try_init([0; TX_BUFFER_LEN]),
                RX_BUFFER.try_init([0; RX_BUFFER_LEN]),
            ) else {
                return Err(HalError::Setup);
            };

            let mut config = Config::default();
            config.baudrate = self.baudrate;
            self.uart = Some(BufferedUart::new(
                uart, tx, rx, Irqs, tx_buffer, rx_buffer, config,
            ));
            defmt::debug!("uart1 open at {} baud", self.baudrate);
        }
        self.uart().map(|_| ())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, HalError> {
        let uart = self.uart()?;
        uart.write_all(data).map_err(|_| HalError::Io)?;
        uart.flush().map_err(|_| HalError::Io)?;
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, HalError> {
        let uart = self.uart()?;
        if !uart.read_ready().map_err(|_| HalError::Io)? {
            return Ok(0);
        }
        uart.read(buf).map_err(|_| HalError::Io)
    }
}
