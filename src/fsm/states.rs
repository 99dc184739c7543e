//! Concrete state handler functions and table builder.
//!
//! ```text
//!  Manual (runs until power-off)
//!
//!  WAIT_PRESS ──[pressed]──▶ OPENING ──▶ LAMP_ON (3 clicks)
//!      ▲                                      │
//!      │                                      ▼
//!  LAMP_OFF (1 click) ◀── CLOSING ◀──[released]── WAIT_RELEASE
//!
//!  Demo
//!
//!  PRE_WAIT ──[spent]──▶ DEMO_OPENING ──▶ POST_WAIT ──[spent]──▶ DEMO_CLOSING
//!     ▲  │                                    │                      │
//!     │  └──────────[pedal edge]──────────────┴──▶ WAIT_PRESS        │
//!     └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no edge from a manual state back into demo: once the pedal
//! cancels the demo the rig stays manual until power-off.

use super::context::{FsmContext, Mode};
use super::{StateDescriptor, StateId};
use crate::app::doors::Motion;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::WaitPress,
            name: "WaitPress",
            on_enter: None,
            on_update: wait_press_update,
        },
        StateDescriptor {
            id: StateId::Opening,
            name: "Opening",
            on_enter: Some(open_doors),
            on_update: opening_update,
        },
        StateDescriptor {
            id: StateId::LampOn,
            name: "LampOn",
            on_enter: Some(lamp_on_enter),
            on_update: lamp_on_update,
        },
        StateDescriptor {
            id: StateId::WaitRelease,
            name: "WaitRelease",
            on_enter: None,
            on_update: wait_release_update,
        },
        StateDescriptor {
            id: StateId::Closing,
            name: "Closing",
            on_enter: Some(close_doors),
            on_update: closing_update,
        },
        StateDescriptor {
            id: StateId::LampOff,
            name: "LampOff",
            on_enter: Some(lamp_off_enter),
            on_update: lamp_off_update,
        },
        StateDescriptor {
            id: StateId::PreWait,
            name: "PreWait",
            on_enter: Some(pre_wait_enter),
            on_update: pre_wait_update,
        },
        StateDescriptor {
            id: StateId::DemoOpening,
            name: "DemoOpening",
            on_enter: Some(open_doors),
            on_update: demo_opening_update,
        },
        StateDescriptor {
            id: StateId::PostWait,
            name: "PostWait",
            on_enter: Some(post_wait_enter),
            on_update: post_wait_update,
        },
        StateDescriptor {
            id: StateId::DemoClosing,
            name: "DemoClosing",
            on_enter: Some(close_doors),
            on_update: demo_closing_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared actions
// ═══════════════════════════════════════════════════════════════════════════

// Motions always run to completion inside one command; the following tick
// only moves on.

fn open_doors(ctx: &mut FsmContext) {
    ctx.commands.motion = Some(Motion::Open);
}

fn close_doors(ctx: &mut FsmContext) {
    ctx.commands.motion = Some(Motion::Close);
}

// ═══════════════════════════════════════════════════════════════════════════
//  Manual controller
// ═══════════════════════════════════════════════════════════════════════════

fn wait_press_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.inputs.pedal_pressed {
        return Some(StateId::Opening);
    }
    ctx.commands.sleep_ms = ctx.config.pedal_poll_ms;
    None
}

fn opening_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::LampOn)
}

fn lamp_on_enter(ctx: &mut FsmContext) {
    ctx.commands.lamp_clicks = ctx.config.lamp_on_clicks;
}

fn lamp_on_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::WaitRelease)
}

fn wait_release_update(ctx: &mut FsmContext) -> Option<StateId> {
    if !ctx.inputs.pedal_pressed {
        return Some(StateId::Closing);
    }
    ctx.commands.sleep_ms = ctx.config.pedal_poll_ms;
    None
}

fn closing_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::LampOff)
}

fn lamp_off_enter(ctx: &mut FsmContext) {
    ctx.commands.lamp_clicks = ctx.config.lamp_off_clicks;
}

fn lamp_off_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::WaitPress)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Demo controller
// ═══════════════════════════════════════════════════════════════════════════

fn pre_wait_enter(ctx: &mut FsmContext) {
    ctx.commands.draw_wait_below_ms = Some(ctx.config.demo_pre_wait_max_ms);
}

fn pre_wait_update(ctx: &mut FsmContext) -> Option<StateId> {
    sliced_wait(ctx, StateId::DemoOpening)
}

fn demo_opening_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::PostWait)
}

fn post_wait_enter(ctx: &mut FsmContext) {
    ctx.commands.draw_wait_below_ms = Some(ctx.config.demo_post_wait_max_ms);
}

fn post_wait_update(ctx: &mut FsmContext) -> Option<StateId> {
    sliced_wait(ctx, StateId::DemoClosing)
}

fn demo_closing_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::PreWait)
}

/// One tick of a demo wait phase.
///
/// Every tick after the first follows a slept slice, so that is where the
/// latch is checked. Only then is the next slice handed out.
///
/// The exit leaves the doors where they are. After a post-wait cancel they
/// stay open, and the next manual `Opening` still ramps from the closed end,
/// so servo A snaps to closed on its first step.
fn sliced_wait(ctx: &mut FsmContext, when_spent: StateId) -> Option<StateId> {
    if ctx.wait.polls() > 0 && ctx.inputs.cancel_pending {
        info!(
            "DEMO: pedal edge at poll {}, switching to manual",
            ctx.wait.polls()
        );
        ctx.commands.consume_cancel = true;
        ctx.mode = Mode::Manual;
        return Some(StateId::WaitPress);
    }

    match ctx.wait.take_slice() {
        Some(slice_ms) => {
            ctx.commands.sleep_ms = slice_ms;
            None
        }
        None => Some(when_spent),
    }
}
