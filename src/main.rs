//! Sprout firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                              TickDelay        │
//! │  (Sensor · Actuator · Display · Serial ·      (DelayNs)        │
//! │   Clock · Button ports)                                        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Boot handshake · Scheduler · Climate · Schedules · UI │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use log::{error, info};

use sprout::adapters::hardware::HardwareAdapter;
use sprout::adapters::time::TickDelay;
use sprout::app::service::Controller;
use sprout::config::SystemConfig;
use sprout::drivers::hw_init;

const HALT_POLL_MS: u32 = 1_000;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Sprout v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let settings = SystemConfig::default();

    // ── 2. Peripherals ────────────────────────────────────────
    let mut delay = TickDelay;
    if let Err(e) = hw_init::init_peripherals(settings.serial_baud) {
        // Without outputs the effectors cannot be held safe; park the task
        // but keep yielding so the idle task still runs.
        error!("HAL init failed: {} - halting", e);
        loop {
            delay.delay_ms(HALT_POLL_MS);
        }
    }

    // ── 3. Controller ─────────────────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut controller = Controller::new(settings)?;

    info!("System ready. Waiting for host.");
    controller.run(&mut hw, &mut delay)
}
