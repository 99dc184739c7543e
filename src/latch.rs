//! Pedal-edge cancel latch.
//!
//! The only state shared between the pedal ISR and the foreground loop.
//! The ISR sets it on every falling edge; the demo wait phases read it
//! after each slice and consume it when they give up.
//!
//! ```text
//!  pedal ISR ──signal()──▶ [ AtomicBool ] ◀──is_set()/consume()── foreground
//! ```
//!
//! A single boolean needs no lock. `Release` on the ISR side and
//! `Acquire` on the reader side guarantee the foreground eventually
//! sees a set flag.

use core::sync::atomic::{AtomicBool, Ordering};

/// Latched by the pedal ISR, cleared by the foreground.
pub static PEDAL_LATCH: CancelLatch = CancelLatch::new();

/// Single-writer (ISR) / single-reader (foreground) boolean latch.
#[derive(Debug)]
pub struct CancelLatch {
    set: AtomicBool,
}

impl CancelLatch {
    pub const fn new() -> Self {
        Self {
            set: AtomicBool::new(false),
        }
    }

    /// Set the latch. Safe to call from interrupt context.
    pub fn signal(&self) {
        self.set.store(true, Ordering::Release);
    }

    /// Whether an edge has been latched since the last clear.
    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    /// Discard any latched edge.
    pub fn clear(&self) {
        self.set.store(false, Ordering::Release);
    }

    /// Clear the latch, returning whether it was set.
    pub fn consume(&self) -> bool {
        self.set.swap(false, Ordering::AcqRel)
    }
}

impl Default for CancelLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// ISR handler. Register this on the pedal GPIO falling edge.
/// One atomic store; no logging, no allocation.
pub fn pedal_isr_handler() {
    PEDAL_LATCH.signal();
}
