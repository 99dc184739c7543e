//! Head lamp click driver.
//!
//! The lamp has its own latching controller that advances one mode per
//! button press and wraps after four (bright → dim → flashing → off).
//! We only simulate presses; there is no feedback, so the lamp's actual
//! mode is never known here.

use embedded_hal::delay::DelayNs;

use super::ports::LampPort;
use crate::error::Result;

/// Open-loop pulse generator on the lamp's button line.
pub struct LampPulser {
    pulse_ms: u32,
}

impl LampPulser {
    pub fn new(pulse_ms: u32) -> Self {
        Self { pulse_ms }
    }

    /// One click: line high for `pulse_ms`, then low for `pulse_ms`.
    pub fn pulse(&self, hw: &mut (impl LampPort + DelayNs)) -> Result<()> {
        hw.set_lamp_line(true)?;
        hw.delay_ms(self.pulse_ms);
        hw.set_lamp_line(false)?;
        hw.delay_ms(self.pulse_ms);
        Ok(())
    }

    /// `count` consecutive clicks.
    pub fn click(&self, hw: &mut (impl LampPort + DelayNs), count: u8) -> Result<()> {
        for _ in 0..count {
            self.pulse(hw)?;
        }
        Ok(())
    }
}
