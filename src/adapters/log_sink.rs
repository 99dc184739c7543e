//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured rig events to the
//! ESP-IDF logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::RigEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`RigEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RigEvent) {
        match event {
            RigEvent::Booted(d) => {
                info!(
                    "BOOT  | mode={:?} held={}ms deferred={}ms",
                    d.mode, d.held_ms, d.deferred_ms
                );
            }
            RigEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            RigEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            RigEvent::DoorsMoved(motion) => {
                info!("DOORS | {:?} complete", motion);
            }
            RigEvent::LampClicked { clicks } => {
                info!("LAMP  | {} click(s)", clicks);
            }
            RigEvent::WaitDrawn { state, ms } => {
                info!("WAIT  | {:?} for {}ms", state, ms);
            }
        }
    }
}
