//! Port traits: the hexagonal boundary between the control logic and the rig.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RigService (domain)
//! ```
//!
//! The hardware adapter implements the pin/servo/lamp ports, the clock
//! adapter implements [`ClockPort`], and the random adapter implements
//! [`RandomPort`]. Tests swap all of them for a simulated rig with a
//! virtual clock.

use embedded_hal::delay::DelayNs;

use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Pedal port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the foot pedal.
pub trait PedalPort {
    /// `true` while the pedal is held down. Adapters own the active-low
    /// inversion; the domain only ever sees logical pressed/released.
    fn pedal_pressed(&mut self) -> Result<bool>;
}

// ───────────────────────────────────────────────────────────────
// Servo port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The two linked door servos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoChannel {
    /// Driven with the logical door position.
    A,
    /// Driven with the mirrored position.
    B,
}

/// Write-side port for the door servos.
pub trait ServoPort {
    /// Command one servo to the given pulse width in microseconds.
    fn write_pulse_us(&mut self, servo: ServoChannel, pulse_us: u16) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Lamp port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the lamp controller's button line.
pub trait LampPort {
    /// Drive the line high (`true`, button "pressed") or low.
    fn set_lamp_line(&mut self, high: bool) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus blocking delays.
///
/// Delays come from [`DelayNs`], so any embedded-hal delay provider can
/// back an adapter.
pub trait ClockPort: DelayNs {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Random port
// ───────────────────────────────────────────────────────────────

/// Source of demo wait durations.
pub trait RandomPort {
    /// A value drawn uniformly from `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`RigEvent`](super::events::RigEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::RigEvent);
}

// ───────────────────────────────────────────────────────────────
// Umbrella
// ───────────────────────────────────────────────────────────────

/// Everything the controllers touch on the rig, as one bound.
///
/// Taking `&mut impl RigPort` avoids juggling several mutable borrows of
/// the same adapter at each call site.
pub trait RigPort: PedalPort + ServoPort + LampPort + ClockPort {}

impl<T: PedalPort + ServoPort + LampPort + ClockPort> RigPort for T {}
