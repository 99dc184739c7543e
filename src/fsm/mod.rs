//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌──────────────┬───────────┬───────────────────┐            │
//! │  │ StateId      │ on_enter  │ on_update         │            │
//! │  ├──────────────┼───────────┼───────────────────┤            │
//! │  │ WaitPress    │ -         │ fn(ctx)->Option<> │            │
//! │  │ Opening      │ fn(ctx)   │ fn(ctx)->Option<> │            │
//! │  │ …            │           │                   │            │
//! │  │ DemoClosing  │ fn(ctx)   │ fn(ctx)->Option<> │            │
//! │  └──────────────┴───────────┴───────────────────┘            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine updates the current index
//! and runs `on_enter` for the next state. Handlers only touch
//! [`FsmContext`]; the service turns the commands they leave there into
//! servo, lamp and sleep calls.

pub mod context;
pub mod states;

use context::{FsmContext, Mode};
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every state of both controllers.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    // Manual controller
    WaitPress = 0,
    Opening = 1,
    LampOn = 2,
    WaitRelease = 3,
    Closing = 4,
    LampOff = 5,
    // Demo controller
    PreWait = 6,
    DemoOpening = 7,
    PostWait = 8,
    DemoClosing = 9,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 10;

    /// Convert an index back to `StateId`. Panics on out-of-range in debug
    /// builds; falls back to `WaitPress` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::WaitPress,
            1 => Self::Opening,
            2 => Self::LampOn,
            3 => Self::WaitRelease,
            4 => Self::Closing,
            5 => Self::LampOff,
            6 => Self::PreWait,
            7 => Self::DemoOpening,
            8 => Self::PostWait,
            9 => Self::DemoClosing,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::WaitPress
            }
        }
    }

    /// Where each controller begins.
    pub fn entry_for(mode: Mode) -> Self {
        match mode {
            Mode::Manual => Self::WaitPress,
            Mode::Demo => Self::PreWait,
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
