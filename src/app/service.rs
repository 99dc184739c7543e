//! Application service: the hexagonal core.
//!
//! [`RigService`] owns the FSM, its context, the door pair and the lamp
//! pulser. Every I/O call goes through port traits injected at call
//! sites, so the whole control loop runs against a simulated rig in tests.
//!
//! ```text
//!  PedalPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!  CancelLatch ─▶│        RigService        │
//!  RandomPort ──▶│  FSM · DoorPair · Lamp   │──▶ ServoPort / LampPort
//!                └─────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::RigConfig;
use crate::error::Result;
use crate::fsm::context::{FsmContext, InputSnapshot, Mode, WaitBudget};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::latch::CancelLatch;

use super::boot::{BootDecision, select_mode};
use super::doors::DoorPair;
use super::events::RigEvent;
use super::lamp::LampPulser;
use super::ports::{EventSink, RandomPort, RigPort};

// ───────────────────────────────────────────────────────────────
// RigService
// ───────────────────────────────────────────────────────────────

/// Runs the manual and demo controllers on one rig.
pub struct RigService {
    fsm: Fsm,
    ctx: FsmContext,
    doors: DoorPair,
    lamp: LampPulser,
}

impl RigService {
    /// Construct the service for a known mode.
    ///
    /// Does **not** start the FSM. Call [`start`](Self::start) next, or
    /// use [`boot`](Self::boot) to pick the mode from the pedal.
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if `config`
    /// fails validation; nothing is driven in that case.
    pub fn new(config: RigConfig, mode: Mode) -> Result<Self> {
        config.validate()?;
        let doors = DoorPair::new(&config);
        let lamp = LampPulser::new(config.lamp_pulse_ms);
        let fsm = Fsm::new(build_state_table(), StateId::entry_for(mode));
        let ctx = FsmContext::new(config, mode);

        Ok(Self {
            fsm,
            ctx,
            doors,
            lamp,
        })
    }

    /// Power-on sequence: park the doors, choose the mode from the pedal,
    /// serve the deferred delay, and start the chosen controller.
    pub fn boot(
        config: RigConfig,
        hw: &mut impl RigPort,
        rng: &mut impl RandomPort,
        latch: &CancelLatch,
        sink: &mut impl EventSink,
    ) -> Result<(Self, BootDecision)> {
        config.validate()?;
        let mut doors = DoorPair::new(&config);
        let decision = select_mode(hw, &mut doors, latch, &config)?;
        sink.emit(&RigEvent::Booted(decision));

        let mut service = Self::new(config, decision.mode)?;
        service.doors = doors;
        service.start(hw, rng, latch, sink)?;
        Ok((service, decision))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the initial state's entry action.
    pub fn start(
        &mut self,
        hw: &mut impl RigPort,
        rng: &mut impl RandomPort,
        latch: &CancelLatch,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.fsm.start(&mut self.ctx);
        info!(
            "RigService started in {:?} ({:?} mode)",
            self.fsm.current_state(),
            self.ctx.mode
        );
        self.apply_commands(hw, rng, latch, sink)
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One foreground iteration: sample inputs → FSM tick → carry out
    /// the resulting commands.
    pub fn step(
        &mut self,
        hw: &mut impl RigPort,
        rng: &mut impl RandomPort,
        latch: &CancelLatch,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let prev_state = self.fsm.current_state();
        let prev_mode = self.ctx.mode;

        // 1. Sample inputs
        self.ctx.inputs = InputSnapshot {
            pedal_pressed: hw.pedal_pressed()?,
            cancel_pending: latch.is_set(),
        };

        // 2. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);

        // 3. Report transitions
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&RigEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
        if self.ctx.mode != prev_mode {
            sink.emit(&RigEvent::ModeChanged {
                from: prev_mode,
                to: self.ctx.mode,
            });
        }

        // 4. Act
        self.apply_commands(hw, rng, latch, sink)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn mode(&self) -> Mode {
        self.ctx.mode
    }

    /// Logical door position (servo A), in µs.
    pub fn door_position_us(&self) -> u16 {
        self.doors.position_us()
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_commands(
        &mut self,
        hw: &mut impl RigPort,
        rng: &mut impl RandomPort,
        latch: &CancelLatch,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let cmds = self.ctx.take_commands();

        if let Some(bound) = cmds.draw_wait_below_ms {
            let ms = rng.below(bound).min(bound.saturating_sub(1));
            self.ctx.wait = WaitBudget::new(ms, self.ctx.config.demo_slice_ms);
            sink.emit(&RigEvent::WaitDrawn {
                state: self.fsm.current_state(),
                ms,
            });
        }

        if let Some(motion) = cmds.motion {
            self.doors.ramp(hw, motion)?;
            sink.emit(&RigEvent::DoorsMoved(motion));
        }

        if cmds.lamp_clicks > 0 {
            self.lamp.click(hw, cmds.lamp_clicks)?;
            sink.emit(&RigEvent::LampClicked {
                clicks: cmds.lamp_clicks,
            });
        }

        if cmds.consume_cancel {
            latch.consume();
        }

        if cmds.sleep_ms > 0 {
            hw.delay_ms(cmds.sleep_ms);
        }

        Ok(())
    }
}
