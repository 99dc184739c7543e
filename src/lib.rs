//! Door rig firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! firmware binary. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod latch;
pub mod pins;

// Hardware-facing modules compile on the host too; the register access
// inside is replaced by simulation stubs there.
pub mod adapters;
pub mod drivers;
