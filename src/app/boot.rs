//! Boot-time mode selection.
//!
//! The pedal is sampled exactly once right after the doors are parked.
//! Held → demo mode; the rig then waits for release and stays silent for
//! `boot_hold_multiplier` (default 4) times as long as the pedal was held,
//! so the operator can walk away before anything moves. Not held → manual
//! mode, no delay.

use embedded_hal::delay::DelayNs;
use log::info;

use super::doors::DoorPair;
use super::ports::{ClockPort, PedalPort, RigPort};
use crate::config::RigConfig;
use crate::error::Result;
use crate::fsm::context::Mode;
use crate::latch::CancelLatch;

/// Outcome of the boot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootDecision {
    pub mode: Mode,
    /// How long the pedal was held at power-on (0 in manual mode).
    pub held_ms: u64,
    /// Silent delay served before the first demo phase.
    pub deferred_ms: u64,
}

/// Park the doors, sample the pedal, and serve the deferred delay.
///
/// Always ends with the latch cleared, so edges from the boot-time press
/// and release never reach the controllers.
pub fn select_mode(
    hw: &mut impl RigPort,
    doors: &mut DoorPair,
    latch: &CancelLatch,
    config: &RigConfig,
) -> Result<BootDecision> {
    doors.park_closed(hw)?;

    let t0 = hw.now_ms();
    let decision = if hw.pedal_pressed()? {
        while hw.pedal_pressed()? {
            hw.delay_ms(config.pedal_poll_ms);
        }
        let held_ms = hw.now_ms().saturating_sub(t0);
        let deferred_ms = held_ms.saturating_mul(u64::from(config.boot_hold_multiplier));
        info!(
            "BOOT: pedal held {} ms, demo starts in {} ms",
            held_ms, deferred_ms
        );
        delay_long_ms(hw, deferred_ms);
        BootDecision {
            mode: Mode::Demo,
            held_ms,
            deferred_ms,
        }
    } else {
        info!("BOOT: pedal released, manual mode");
        BootDecision {
            mode: Mode::Manual,
            held_ms: 0,
            deferred_ms: 0,
        }
    };

    latch.clear();
    Ok(decision)
}

fn delay_long_ms(hw: &mut impl RigPort, mut ms: u64) {
    while ms > 0 {
        let chunk = ms.min(u64::from(u32::MAX)) as u32;
        hw.delay_ms(chunk);
        ms -= u64::from(chunk);
    }
}
