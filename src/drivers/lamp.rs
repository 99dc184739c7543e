//! Lamp controller button line.
//!
//! A single push-pull output wired into the lamp's own button input.
//! The lamp steps through its modes on each high pulse; this driver only
//! sets the level.

use crate::drivers::hw_init;
use crate::error::Result;

pub struct LampOutput {
    gpio: i32,
}

impl LampOutput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn set(&mut self, high: bool) -> Result<()> {
        hw_init::gpio_write(self.gpio, high)
    }
}
