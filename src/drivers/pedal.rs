//! Foot pedal input (active-low momentary switch, internal pull-up).
//!
//! Level reads only. Edge detection lives in the pedal ISR registered by
//! [`hw_init::init_isr_service`], which sets the
//! [`PEDAL_LATCH`](crate::latch::PEDAL_LATCH).

use crate::drivers::hw_init;

pub struct PedalInput {
    gpio: i32,
}

impl PedalInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// LOW = pressed.
    pub fn is_pressed(&self) -> bool {
        !hw_init::gpio_read(self.gpio)
    }
}
