//! Simulated rig for integration tests.
//!
//! A virtual clock advances only through the `DelayNs` calls the firmware
//! makes, so every run is deterministic and instant. The pedal follows a
//! scripted timeline; each press start that the clock passes signals the
//! rig's latch, the way the falling-edge ISR does on the device. Every
//! servo and lamp write is recorded with its timestamp.

use std::collections::VecDeque;

use door_rig::app::events::RigEvent;
use door_rig::app::ports::{
    ClockPort, EventSink, LampPort, PedalPort, RandomPort, ServoChannel, ServoPort,
};
use door_rig::app::service::RigService;
use door_rig::error::{Error, Result};
use door_rig::fsm::StateId;
use door_rig::latch::CancelLatch;
use embedded_hal::delay::DelayNs;

pub const NS_PER_MS: u64 = 1_000_000;

// ── Records ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoWrite {
    pub at_ns: u64,
    pub servo: ServoChannel,
    pub pulse_us: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampEdge {
    pub at_ns: u64,
    pub high: bool,
}

// ── SimRig ────────────────────────────────────────────────────

pub struct SimRig {
    now_ns: u64,
    /// Pedal held during each `[down_ms, up_ms)`.
    presses: Vec<(u64, u64)>,
    latch: &'static CancelLatch,
    pub servo_writes: Vec<ServoWrite>,
    pub lamp_edges: Vec<LampEdge>,
    fail_servo_write: Option<usize>,
}

#[allow(dead_code)]
impl SimRig {
    pub fn new(presses: &[(u64, u64)]) -> Self {
        Self {
            now_ns: 0,
            presses: presses.to_vec(),
            latch: new_latch(),
            servo_writes: Vec::new(),
            lamp_edges: Vec::new(),
            fail_servo_write: None,
        }
    }

    /// Make the servo write with this index fail with a PWM error.
    pub fn failing_servo_write(mut self, index: usize) -> Self {
        self.fail_servo_write = Some(index);
        self
    }

    pub fn latch(&self) -> &'static CancelLatch {
        self.latch
    }

    pub fn now_ns(&self) -> u64 {
        self.now_ns
    }

    /// Servo A pulse widths in write order.
    pub fn servo_a(&self) -> Vec<u16> {
        self.writes_to(ServoChannel::A)
    }

    pub fn servo_b(&self) -> Vec<u16> {
        self.writes_to(ServoChannel::B)
    }

    /// Timestamps of rising lamp edges (one per click).
    pub fn lamp_clicks(&self) -> Vec<u64> {
        self.lamp_edges
            .iter()
            .filter(|e| e.high)
            .map(|e| e.at_ns)
            .collect()
    }

    fn writes_to(&self, servo: ServoChannel) -> Vec<u16> {
        self.servo_writes
            .iter()
            .filter(|w| w.servo == servo)
            .map(|w| w.pulse_us)
            .collect()
    }

    fn advance(&mut self, ns: u64) {
        let before = self.now_ns;
        self.now_ns += ns;
        for &(down_ms, _) in &self.presses {
            let edge_ns = down_ms * NS_PER_MS;
            if before < edge_ns && edge_ns <= self.now_ns {
                self.latch.signal();
            }
        }
    }
}

impl PedalPort for SimRig {
    fn pedal_pressed(&mut self) -> Result<bool> {
        let now = self.now_ns;
        Ok(self
            .presses
            .iter()
            .any(|&(down, up)| down * NS_PER_MS <= now && now < up * NS_PER_MS))
    }
}

impl ServoPort for SimRig {
    fn write_pulse_us(&mut self, servo: ServoChannel, pulse_us: u16) -> Result<()> {
        if self.fail_servo_write == Some(self.servo_writes.len()) {
            return Err(Error::Pwm(-1));
        }
        self.servo_writes.push(ServoWrite {
            at_ns: self.now_ns,
            servo,
            pulse_us,
        });
        Ok(())
    }
}

impl LampPort for SimRig {
    fn set_lamp_line(&mut self, high: bool) -> Result<()> {
        self.lamp_edges.push(LampEdge {
            at_ns: self.now_ns,
            high,
        });
        Ok(())
    }
}

impl ClockPort for SimRig {
    fn now_ms(&self) -> u64 {
        self.now_ns / NS_PER_MS
    }
}

impl DelayNs for SimRig {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.advance(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms) * NS_PER_MS);
    }
}

/// Each test gets its own latch so parallel tests never share edges.
pub fn new_latch() -> &'static CancelLatch {
    Box::leak(Box::new(CancelLatch::new()))
}

// ── ScriptedRandom ────────────────────────────────────────────

/// Hands out pre-scripted wait draws and records the bounds asked for.
pub struct ScriptedRandom {
    draws: VecDeque<u32>,
    pub bounds: Vec<u32>,
}

impl ScriptedRandom {
    pub fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            bounds: Vec::new(),
        }
    }
}

impl RandomPort for ScriptedRandom {
    fn below(&mut self, bound: u32) -> u32 {
        self.bounds.push(bound);
        self.draws.pop_front().expect("no scripted draw left")
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<RigEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every state entered, in order.
    pub fn states_entered(&self) -> Vec<StateId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RigEvent::StateChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &RigEvent) {
        self.events.push(event.clone());
    }
}

// ── Driving helpers ───────────────────────────────────────────

/// True for the six states of the manual controller.
#[allow(dead_code)]
pub fn is_manual_state(state: StateId) -> bool {
    matches!(
        state,
        StateId::WaitPress
            | StateId::Opening
            | StateId::LampOn
            | StateId::WaitRelease
            | StateId::Closing
            | StateId::LampOff
    )
}

/// Step until `done` holds, panicking after `max_steps`.
#[allow(dead_code)]
pub fn step_until(
    service: &mut RigService,
    rig: &mut SimRig,
    rng: &mut ScriptedRandom,
    sink: &mut RecordingSink,
    max_steps: usize,
    mut done: impl FnMut(&RigService, &SimRig) -> bool,
) {
    for _ in 0..max_steps {
        if done(service, rig) {
            return;
        }
        let latch = rig.latch();
        service
            .step(rig, rng, latch, sink)
            .expect("simulated hardware never fails here");
    }
    assert!(done(service, rig), "condition not reached in {max_steps} steps");
}
