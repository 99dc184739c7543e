//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the blackboard the state handlers read from and write
//! to. The service fills [`InputSnapshot`] before each tick and carries
//! out [`Commands`] after it, so the handlers themselves stay pure.

use crate::app::doors::Motion;
use crate::config::RigConfig;

// ---------------------------------------------------------------------------
// Operating mode
// ---------------------------------------------------------------------------

/// Which controller is driving the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pedal-driven open/close cycle.
    Manual,
    /// Unattended randomized open/close cycle.
    Demo,
}

// ---------------------------------------------------------------------------
// Input snapshot (read-only to state handlers)
// ---------------------------------------------------------------------------

/// Inputs sampled right before a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Pedal is held down.
    pub pedal_pressed: bool,
    /// The pedal ISR has latched an edge that nobody consumed yet.
    pub cancel_pending: bool,
}

// ---------------------------------------------------------------------------
// Commands (written by state handlers; carried out by the service)
// ---------------------------------------------------------------------------

/// Work requested by a tick, applied in field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commands {
    /// Draw a new wait budget from `[0, bound)` ms.
    pub draw_wait_below_ms: Option<u32>,
    /// Run a complete door motion.
    pub motion: Option<Motion>,
    /// Lamp clicks to issue.
    pub lamp_clicks: u8,
    /// Clear the cancel latch.
    pub consume_cancel: bool,
    /// Sleep before the next tick.
    pub sleep_ms: u32,
}

// ---------------------------------------------------------------------------
// Demo wait budget
// ---------------------------------------------------------------------------

/// A demo wait in progress, served in fixed slices.
///
/// Every slice is slept in full, even the last partial one, and is
/// followed by exactly one cancel check. A draw of `r` ms therefore
/// costs `ceil(r / slice)` slices and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBudget {
    remaining_ms: u32,
    slice_ms: u32,
    polls: u32,
}

impl WaitBudget {
    pub fn new(total_ms: u32, slice_ms: u32) -> Self {
        Self {
            remaining_ms: total_ms,
            slice_ms,
            polls: 0,
        }
    }

    /// Hand out the next slice to sleep, or `None` once the wait is spent.
    pub fn take_slice(&mut self) -> Option<u32> {
        if self.remaining_ms == 0 {
            return None;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(self.slice_ms);
        self.polls += 1;
        Some(self.slice_ms)
    }

    /// Slices handed out so far.
    pub fn polls(&self) -> u32 {
        self.polls
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- I/O --
    pub inputs: InputSnapshot,
    pub commands: Commands,

    // -- Configuration --
    pub config: RigConfig,

    // -- Controller state --
    /// Current operating mode. Only ever moves Demo → Manual.
    pub mode: Mode,
    /// Budget of the demo wait phase in progress.
    pub wait: WaitBudget,
}

impl FsmContext {
    pub fn new(config: RigConfig, mode: Mode) -> Self {
        let wait = WaitBudget::new(0, config.demo_slice_ms);
        Self {
            inputs: InputSnapshot::default(),
            commands: Commands::default(),
            config,
            mode,
            wait,
        }
    }

    /// Hand the pending commands to the caller and reset them.
    pub fn take_commands(&mut self) -> Commands {
        core::mem::take(&mut self.commands)
    }
}
