//! The RP2040 backend family.

use arm_core::{PinId, PinMode, Platform, TransportKind};
use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{ADC, PIN_26};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::{Peri, Peripherals};

use crate::backend::{RpAdc, RpGpio, RpPwm, RpUart, UartParts};

/// Matrix lines routed on the board.
const GPIO_PINS: usize = 6;

/// PWM legs routed on the board.
const PWM_PINS: usize = 10;

/// Hands out the board's peripherals as capability handles.
///
/// Every pin can be handed out once; later requests for it return `None`.
/// PWM slices are configured here at zero duty, everything else on the
/// handle's `setup()`.
pub struct Rp2040Platform {
    gpio: [(PinId, Option<Peri<'static, AnyPin>>); GPIO_PINS],
    adc: Option<(Peri<'static, ADC>, Peri<'static, PIN_26>)>,
    pwm: [(PinId, Option<embassy_rp::pwm::PwmOutput<'static>>); PWM_PINS],
    uart: Option<UartParts>,
}

impl Rp2040Platform {
    #[must_use]
    pub fn new(p: Peripherals) -> Self {
        // Compare levels default to zero, so every leg starts off.
        let (pwm2, pwm3) =
            Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, PwmConfig::default()).split();
        let (pwm4, pwm5) =
            Pwm::new_output_ab(p.PWM_SLICE2, p.PIN_4, p.PIN_5, PwmConfig::default()).split();
        let (pwm6, pwm7) =
            Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, PwmConfig::default()).split();
        let (pwm10, pwm11) =
            Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, PwmConfig::default()).split();
        let (pwm12, pwm13) =
            Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, PwmConfig::default()).split();

        Self {
            gpio: [
                (16, Some(p.PIN_16.into())),
                (17, Some(p.PIN_17.into())),
                (18, Some(p.PIN_18.into())),
                (19, Some(p.PIN_19.into())),
                (20, Some(p.PIN_20.into())),
                (21, Some(p.PIN_21.into())),
            ],
            adc: Some((p.ADC, p.PIN_26)),
            pwm: [
                (2, pwm2),
                (3, pwm3),
                (4, pwm4),
                (5, pwm5),
                (6, pwm6),
                (7, pwm7),
                (10, pwm10),
                (11, pwm11),
                (12, pwm12),
                (13, pwm13),
            ],
            uart: Some(UartParts {
                uart: p.UART1,
                tx: p.PIN_8,
                rx: p.PIN_9,
            }),
        }
    }
}

/// Take the entry for `pin` out of a pool.
fn take<T>(pool: &mut [(PinId, Option<T>)], pin: PinId) -> Option<T> {
    pool.iter_mut()
        .find(|(id, _)| *id == pin)
        .and_then(|(_, slot)| slot.take())
}

impl Platform for Rp2040Platform {
    type Gpio = RpGpio;
    type Adc = RpAdc;
    type Pwm = RpPwm;
    type Link = RpUart;

    fn gpio(&mut self, pin: PinId, mode: PinMode) -> Option<RpGpio> {
        take(&mut self.gpio, pin).map(|peri| RpGpio::new(peri, mode))
    }

    fn adc(&mut self, pin: PinId) -> Option<RpAdc> {
        if pin != 26 {
            return None;
        }
        self.adc.take().map(|(adc, pin)| RpAdc::new(adc, pin))
    }

    fn pwm(&mut self, pin: PinId) -> Option<RpPwm> {
        take(&mut self.pwm, pin).map(RpPwm::new)
    }

    fn link(&mut self, kind: TransportKind) -> Option<RpUart> {
        match kind {
            TransportKind::Serial { baudrate } => {
                self.uart.take().map(|parts| RpUart::new(parts, baudrate))
            }
            // The Pico has no radio.
            TransportKind::Wireless => None,
        }
    }
}
