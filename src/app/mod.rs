//! Application core: pure domain logic, zero I/O.
//!
//! Boot-time mode selection, the door pair and lamp pulser, and the
//! service that drives the FSM. All interaction with the rig happens
//! through **port traits** defined in [`ports`], so this layer runs
//! against a simulated rig in tests.

pub mod boot;
pub mod doors;
pub mod events;
pub mod lamp;
pub mod ports;
pub mod service;
