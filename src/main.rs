//! Door rig firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogEventSink      RigRandom        │
//! │  (Pedal+Servo+Lamp+Clock)   (EventSink)       (RandomPort)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              RigService (pure logic)                   │    │
//! │  │  Boot · FSM (manual + demo) · DoorPair · LampPulser    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Pedal ISR ──▶ PEDAL_LATCH (one atomic flag)                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use door_rig::adapters::hardware::HardwareAdapter;
use door_rig::adapters::log_sink::LogEventSink;
use door_rig::adapters::random::RigRandom;
use door_rig::adapters::time::Esp32Clock;
use door_rig::app::service::RigService;
use door_rig::config::RigConfig;
use door_rig::drivers::hw_init;
use door_rig::drivers::lamp::LampOutput;
use door_rig::drivers::pedal::PedalInput;
use door_rig::drivers::servo::ServoDriver;
use door_rig::drivers::watchdog::Watchdog;
use door_rig::latch::PEDAL_LATCH;
use door_rig::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DoorRig v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = RigConfig::with_calibration(option_env!("DOOR_RIG_CALIBRATION"));

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        halt();
    }
    // Without the pedal ISR a demo could never be cancelled.
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {}, halting", e);
        halt();
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        ServoDriver::new(),
        PedalInput::new(pins::PEDAL_GPIO),
        LampOutput::new(pins::LAMP_GPIO),
        Esp32Clock::new(),
    );
    let mut rng = RigRandom::from_platform();
    let mut sink = LogEventSink::new();

    // ── 5. Boot: park doors, pick mode ────────────────────────
    let (mut service, decision) =
        match RigService::boot(config.clone(), &mut hw, &mut rng, &PEDAL_LATCH, &mut sink) {
            Ok(booted) => booted,
            Err(e) => {
                error!("Boot failed: {}, halting", e);
                halt();
            }
        };
    info!("System ready in {:?} mode. Entering control loop.", decision.mode);

    // The boot hold and the deferred delay above are unbounded, so the
    // task subscribes only now.
    let watchdog = Watchdog::subscribe(&config);

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        if let Err(e) = service.step(&mut hw, &mut rng, &PEDAL_LATCH, &mut sink) {
            error!(
                "Hardware fault in {:?} ({:?} mode): {}, halting",
                service.state(),
                service.mode(),
                e
            );
            halt();
        }
        watchdog.feed();
    }
}

/// Stop the foreground for good. Once subscribed, the task watchdog
/// resets the chip.
fn halt() -> ! {
    loop {
        esp_idf_hal::delay::FreeRtos::delay_ms(1_000);
    }
}
