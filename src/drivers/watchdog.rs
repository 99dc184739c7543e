//! Task watchdog (TWDT) for the control loop.
//!
//! One [`RigService::step`](crate::app::service::RigService::step) never
//! runs longer than one door ramp, the lamp clicks and one sleep, so the
//! timeout is sized from the [`RigConfig`] rather than fixed. The main
//! loop feeds once per step.
//!
//! Only subscribe after boot-time mode selection: the pedal hold and the
//! deferred demo delay have no upper bound.

use log::{info, warn};

use crate::config::RigConfig;

/// Lower bound on the timeout, whatever the config says.
const MIN_TIMEOUT_MS: u32 = 1_000;

/// Longest step the config allows, doubled, and at least [`MIN_TIMEOUT_MS`].
fn timeout_for(config: &RigConfig) -> u32 {
    let ramp_steps = u64::from(config.door_open_us.saturating_sub(config.door_closed_us)) + 1;
    let ramp_ms = (ramp_steps * u64::from(config.ramp_step_delay_us)).div_ceil(1_000);
    let clicks = u64::from(config.lamp_on_clicks.max(config.lamp_off_clicks));
    let lamp_ms = clicks * 2 * u64::from(config.lamp_pulse_ms);
    let sleep_ms = u64::from(config.demo_slice_ms.max(config.pedal_poll_ms));

    let worst_step_ms = ramp_ms + lamp_ms + sleep_ms;
    u32::try_from(worst_step_ms * 2)
        .unwrap_or(u32::MAX)
        .max(MIN_TIMEOUT_MS)
}

pub struct Watchdog {
    subscribed: bool,
}

impl Watchdog {
    /// Subscribe the calling task with a timeout sized for `config`.
    ///
    /// A failed subscription is logged and the loop runs unguarded.
    pub fn subscribe(config: &RigConfig) -> Self {
        let timeout_ms = timeout_for(config);
        let subscribed = match subscribe_current_task(timeout_ms) {
            Ok(()) => {
                info!("Watchdog: {} ms per step, panic on trigger", timeout_ms);
                true
            }
            Err(rc) => {
                warn!("Watchdog: subscribe failed (rc={}), loop unguarded", rc);
                false
            }
        };
        Self { subscribed }
    }

    /// Call once per completed step.
    pub fn feed(&self) {
        if self.subscribed {
            reset_current_task();
        }
    }
}

#[cfg(target_os = "espidf")]
fn subscribe_current_task(timeout_ms: u32) -> Result<(), i32> {
    use esp_idf_svc::sys::{
        ESP_OK, esp_task_wdt_add, esp_task_wdt_config_t, esp_task_wdt_reconfigure,
    };

    let cfg = esp_task_wdt_config_t {
        timeout_ms,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    // SAFETY: plain FFI calls with a valid config; a null handle means the
    // calling task.
    unsafe {
        let rc = esp_task_wdt_reconfigure(&cfg);
        if rc != ESP_OK as i32 {
            warn!("Watchdog: reconfigure rc={} (keeping sdkconfig timeout)", rc);
        }
        let rc = esp_task_wdt_add(core::ptr::null_mut());
        if rc == ESP_OK as i32 { Ok(()) } else { Err(rc) }
    }
}

#[cfg(target_os = "espidf")]
fn reset_current_task() {
    // SAFETY: only reached once the task is subscribed.
    unsafe {
        esp_idf_svc::sys::esp_task_wdt_reset();
    }
}

#[cfg(not(target_os = "espidf"))]
fn subscribe_current_task(_timeout_ms: u32) -> Result<(), i32> {
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn reset_current_task() {
    log::trace!("Watchdog(sim): feed");
}
