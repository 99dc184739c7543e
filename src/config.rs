//! Rig configuration parameters
//!
//! Servo calibration and every timing constant of the control loop.
//! Defaults match the reference rig; a calibration override can be baked
//! in at build time (see [`RigConfig::from_json`]).

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core rig configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    // --- Servo calibration ---
    /// Pulse width (µs) of servo A with the doors fully closed
    pub door_closed_us: u16,
    /// Pulse width (µs) of servo A with the doors fully open
    pub door_open_us: u16,
    /// Hold time between single-unit ramp steps (µs)
    pub ramp_step_delay_us: u32,

    // --- Head lamp ---
    /// High time, and following low time, of one lamp click (ms)
    pub lamp_pulse_ms: u32,
    /// Clicks issued after the doors open
    pub lamp_on_clicks: u8,
    /// Clicks issued after the doors close
    pub lamp_off_clicks: u8,

    // --- Polling ---
    /// Pedal state poll interval while waiting for press/release (ms)
    pub pedal_poll_ms: u32,
    /// Demo wait slice; the cancel latch is checked after each one (ms)
    pub demo_slice_ms: u32,

    // --- Demo ---
    /// Exclusive upper bound of the wait before the doors open (ms)
    pub demo_pre_wait_max_ms: u32,
    /// Exclusive upper bound of the wait before the doors close (ms)
    pub demo_post_wait_max_ms: u32,
    /// Boot hold duration is multiplied by this to get the demo start delay
    pub boot_hold_multiplier: u32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            // Servo calibration
            door_closed_us: 1055,
            door_open_us: 1695,
            ramp_step_delay_us: 300,

            // Head lamp
            lamp_pulse_ms: 10,
            lamp_on_clicks: 3,
            lamp_off_clicks: 1,

            // Polling
            pedal_poll_ms: 1,
            demo_slice_ms: 100,

            // Demo
            demo_pre_wait_max_ms: 15_000,
            demo_post_wait_max_ms: 5_000,
            boot_hold_multiplier: 4,
        }
    }
}

impl RigConfig {
    /// Range-check every field.
    ///
    /// Invalid values are rejected, never clamped: a bad calibration would
    /// otherwise drive the servos against their end stops.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.door_closed_us >= self.door_open_us {
            return Err(ConfigError::ValidationFailed(
                "door_closed_us must be below door_open_us",
            ));
        }
        if self.lamp_pulse_ms == 0 {
            return Err(ConfigError::ValidationFailed("lamp_pulse_ms must be non-zero"));
        }
        if self.pedal_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed("pedal_poll_ms must be non-zero"));
        }
        if self.demo_slice_ms == 0 {
            return Err(ConfigError::ValidationFailed("demo_slice_ms must be non-zero"));
        }
        if self.demo_pre_wait_max_ms == 0 || self.demo_post_wait_max_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "demo wait bounds must be non-zero",
            ));
        }
        if self.boot_hold_multiplier == 0 {
            return Err(ConfigError::ValidationFailed(
                "boot_hold_multiplier must be non-zero",
            ));
        }
        Ok(())
    }

    /// Parse a JSON calibration override and validate it.
    ///
    /// Missing fields keep their defaults, so a calibration only needs to
    /// name what differs, e.g. `{"door_closed_us":1040,"door_open_us":1710}`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration from an optional baked-in calibration.
    ///
    /// A calibration that fails to parse or validate is logged and
    /// ignored; the rig then runs on defaults.
    pub fn with_calibration(calibration: Option<&str>) -> Self {
        let Some(json) = calibration else {
            info!("Config: no calibration override, using defaults");
            return Self::default();
        };
        match Self::from_json(json.as_bytes()) {
            Ok(config) => {
                info!(
                    "Config: calibration loaded (closed={}us open={}us)",
                    config.door_closed_us, config.door_open_us
                );
                config
            }
            Err(e) => {
                warn!("Config: calibration rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
