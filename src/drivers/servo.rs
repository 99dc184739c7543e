//! Door servo driver (two hobby servos on LEDC CH0/CH1).
//!
//! Converts pulse widths in microseconds into 14-bit duty values for
//! the 50 Hz servo timer.
//!
//! On ESP-IDF the duty goes to the LEDC registers via hw_init helpers;
//! on host the write is a no-op.

use crate::app::ports::ServoChannel;
use crate::drivers::hw_init;
use crate::error::Result;
use crate::pins;

/// Full-scale duty for the servo timer resolution.
const DUTY_FULL_SCALE: u32 = 1 << pins::SERVO_PWM_RESOLUTION_BITS;

/// Duty count for a pulse of `pulse_us` within one 20 ms frame.
/// Pulses longer than the frame saturate at full scale.
pub fn pulse_to_duty(pulse_us: u16) -> u32 {
    let us = u32::from(pulse_us).min(pins::SERVO_PERIOD_US);
    us * DUTY_FULL_SCALE / pins::SERVO_PERIOD_US
}

#[derive(Debug, Default)]
pub struct ServoDriver;

impl ServoDriver {
    pub fn new() -> Self {
        Self
    }

    pub fn write_us(&mut self, servo: ServoChannel, pulse_us: u16) -> Result<()> {
        hw_init::ledc_set_duty(Self::ledc_channel(servo), pulse_to_duty(pulse_us))
    }

    fn ledc_channel(servo: ServoChannel) -> u32 {
        match servo {
            ServoChannel::A => hw_init::LEDC_CH_SERVO_A,
            ServoChannel::B => hw_init::LEDC_CH_SERVO_B,
        }
    }
}
