//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod lamp;
pub mod pedal;
pub mod servo;
pub mod watchdog;
