#![no_std]
#![no_main]

use bionic_arm_rp2040::{active_platform, ActivePlatform, BOARD_PINS};
use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::Timer;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Bionic arm starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());
    let mut platform = active_platform(p);

    if let Err(e) = BOARD_PINS.validate() {
        error!("Board pin map invalid: {:?}", e);
        halt().await;
    }

    #[cfg(feature = "app-full-arm")]
    full_arm::run(&mut platform).await;

    #[cfg(feature = "app-dataset")]
    dataset::run(&mut platform).await;
}

/// Park forever after an unrecoverable composition error.
async fn halt() -> ! {
    loop {
        Timer::after_secs(1).await;
    }
}

#[cfg(feature = "app-full-arm")]
mod full_arm {
    use super::*;
    use bionic_arm_rp2040::{ArmEngine, TickError, TICK_PERIOD_MS};
    use embassy_time::{Duration, Ticker};

    pub async fn run(platform: &mut ActivePlatform) -> ! {
        let mut engine = match ArmEngine::from_platform(platform, &BOARD_PINS) {
            Ok(engine) => engine,
            Err(e) => {
                error!("Cannot build engine: {:?}", e);
                halt().await
            }
        };

        // Keep running on partial hardware; the failed parts report per tick.
        if let Err(report) = engine.setup() {
            warn!("Setup incomplete: {:?}", report);
        }
        info!("Gesture engine running every {} ms", TICK_PERIOD_MS);

        let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
        loop {
            match engine.tick() {
                Ok(_) => {}
                Err(TickError::Actuation(fault)) => {
                    error!("Actuation fault: {:?}", fault);
                    if let Err(fault) = engine.stop_all() {
                        error!("Stop failed: {:?}", fault);
                    }
                }
                Err(e) => warn!("Tick error: {:?}", e),
            }
            ticker.next().await;
        }
    }
}

#[cfg(feature = "app-dataset")]
mod dataset {
    use super::*;
    use arm_core::config::CAPTURE_LABEL;
    use bionic_arm_rp2040::{ArmCapture, CAPTURE_PERIOD_MS};
    use embassy_time::Delay;

    pub async fn run(platform: &mut ActivePlatform) -> ! {
        let mut session = match ArmCapture::from_platform(platform, BOARD_PINS.emg) {
            Ok(session) => session,
            Err(e) => {
                error!("Cannot build capture session: {:?}", e);
                halt().await
            }
        };

        if let Err(report) = session.setup() {
            warn!("Setup incomplete: {:?}", report);
        }
        info!("Capturing every {} ms", CAPTURE_PERIOD_MS);

        let mut delay = Delay;
        loop {
            match session.capture(&mut delay, CAPTURE_LABEL) {
                Ok(len) => info!("Capture sent ({} bytes)", len),
                Err(e) => warn!("Capture failed: {:?}", e),
            }
            Timer::after_millis(CAPTURE_PERIOD_MS).await;
        }
    }
}
