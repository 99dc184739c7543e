//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the servo, pedal and lamp drivers plus the clock, exposing them
//! through [`PedalPort`], [`ServoPort`], [`LampPort`] and [`ClockPort`]
//! so one value satisfies [`RigPort`](crate::app::ports::RigPort). This
//! is the only module in the system that touches actual hardware. On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use embedded_hal::delay::DelayNs;

use crate::adapters::time::Esp32Clock;
use crate::app::ports::{ClockPort, LampPort, PedalPort, ServoChannel, ServoPort};
use crate::drivers::lamp::LampOutput;
use crate::drivers::pedal::PedalInput;
use crate::drivers::servo::ServoDriver;
use crate::error::Result;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    servos: ServoDriver,
    pedal: PedalInput,
    lamp: LampOutput,
    clock: Esp32Clock,
}

impl HardwareAdapter {
    pub fn new(servos: ServoDriver, pedal: PedalInput, lamp: LampOutput, clock: Esp32Clock) -> Self {
        Self {
            servos,
            pedal,
            lamp,
            clock,
        }
    }
}

// ── PedalPort implementation ──────────────────────────────────

impl PedalPort for HardwareAdapter {
    fn pedal_pressed(&mut self) -> Result<bool> {
        Ok(self.pedal.is_pressed())
    }
}

// ── ServoPort implementation ──────────────────────────────────

impl ServoPort for HardwareAdapter {
    fn write_pulse_us(&mut self, servo: ServoChannel, pulse_us: u16) -> Result<()> {
        self.servos.write_us(servo, pulse_us)
    }
}

// ── LampPort implementation ───────────────────────────────────

impl LampPort for HardwareAdapter {
    fn set_lamp_line(&mut self, high: bool) -> Result<()> {
        self.lamp.set(high)
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl ClockPort for HardwareAdapter {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl DelayNs for HardwareAdapter {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}
