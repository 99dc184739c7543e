//! Outbound application events.
//!
//! The [`RigService`](super::service::RigService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Per-poll activity is never
//! reported; only decisions and completed actions are.

use super::boot::BootDecision;
use super::doors::Motion;
use crate::fsm::StateId;
use crate::fsm::context::Mode;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigEvent {
    /// Boot-time mode selection finished (carries the decision).
    Booted(BootDecision),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The operating mode changed. Only ever Demo → Manual.
    ModeChanged { from: Mode, to: Mode },

    /// A full door motion completed.
    DoorsMoved(Motion),

    /// Lamp clicks were issued.
    LampClicked { clicks: u8 },

    /// A demo wait phase drew its duration.
    WaitDrawn { state: StateId, ms: u32 },
}
