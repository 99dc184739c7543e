//! Mirrored door servo pair.
//!
//! Both doors are hinged on opposite sides, so servo B must turn the
//! other way. Rather than keeping two ramps in step, the pair tracks one
//! logical position and derives servo B from it on every write:
//!
//! ```text
//!   pos_b = closed + (open - pos_a)
//! ```
//!
//! Motions are single-unit linear ramps with a fixed hold per step. They
//! are never cut short; cancellation is only observed between motions.

use core::iter::Rev;
use core::ops::RangeInclusive;

use embedded_hal::delay::DelayNs;

use super::ports::{ServoChannel, ServoPort};
use crate::config::RigConfig;
use crate::error::Result;

/// Closed travel range of the door servos, in pulse-width microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorTravel {
    closed_us: u16,
    open_us: u16,
}

impl DoorTravel {
    /// `closed_us` must be below `open_us`; [`RigConfig::validate`]
    /// enforces this for configured travel.
    pub const fn new(closed_us: u16, open_us: u16) -> Self {
        Self { closed_us, open_us }
    }

    pub fn from_config(config: &RigConfig) -> Self {
        Self::new(config.door_closed_us, config.door_open_us)
    }

    pub const fn closed_us(&self) -> u16 {
        self.closed_us
    }

    /// Servo B's position for a servo A position inside the travel.
    pub const fn mirror(&self, pos_us: u16) -> u16 {
        self.closed_us + (self.open_us - pos_us)
    }

    pub fn contains(&self, pos_us: u16) -> bool {
        (self.closed_us..=self.open_us).contains(&pos_us)
    }

    /// Every position from closed to open, one unit apart.
    pub fn opening(&self) -> RangeInclusive<u16> {
        self.closed_us..=self.open_us
    }

    /// Every position from open to closed, one unit apart.
    pub fn closing(&self) -> Rev<RangeInclusive<u16>> {
        self.opening().rev()
    }
}

/// Direction of a full door motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Open,
    Close,
}

/// The two door servos driven from one logical position.
pub struct DoorPair {
    travel: DoorTravel,
    step_delay_us: u32,
    position_us: u16,
}

impl DoorPair {
    pub fn new(config: &RigConfig) -> Self {
        let travel = DoorTravel::from_config(config);
        Self {
            travel,
            step_delay_us: config.ramp_step_delay_us,
            position_us: travel.closed_us(),
        }
    }

    /// Last commanded logical position (servo A).
    pub fn position_us(&self) -> u16 {
        self.position_us
    }

    /// Command both servos to the closed position without ramping.
    /// Used once at boot, when the real servo position is unknown.
    pub fn park_closed(&mut self, hw: &mut impl ServoPort) -> Result<()> {
        self.command(hw, self.travel.closed_us())
    }

    /// Run one complete motion. Each step writes both servos, then holds.
    pub fn ramp(&mut self, hw: &mut (impl ServoPort + DelayNs), motion: Motion) -> Result<()> {
        match motion {
            Motion::Open => {
                for pos in self.travel.opening() {
                    self.command(hw, pos)?;
                    hw.delay_us(self.step_delay_us);
                }
            }
            Motion::Close => {
                for pos in self.travel.closing() {
                    self.command(hw, pos)?;
                    hw.delay_us(self.step_delay_us);
                }
            }
        }
        Ok(())
    }

    fn command(&mut self, hw: &mut impl ServoPort, pos_us: u16) -> Result<()> {
        debug_assert!(self.travel.contains(pos_us));
        hw.write_pulse_us(ServoChannel::A, pos_us)?;
        hw.write_pulse_us(ServoChannel::B, self.travel.mirror(pos_us))?;
        self.position_us = pos_us;
        Ok(())
    }
}
