//! GPIO / peripheral pin assignments for the door rig controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Door servos (hobby servos, 50 Hz PPM)
// ---------------------------------------------------------------------------

/// Servo A: driven with the logical door position.
pub const SERVO_A_GPIO: i32 = 4;
/// Servo B: mechanically mirrored, driven with the complementary position.
pub const SERVO_B_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Foot pedal (active-low momentary switch, internal pull-up)
// ---------------------------------------------------------------------------

/// Pedal input. LOW = pressed, HIGH = released. Falling edge raises the ISR.
pub const PEDAL_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Head lamp controller (simulated button press)
// ---------------------------------------------------------------------------

/// Digital output into the lamp's button line. Idle LOW, pulsed HIGH.
pub const LAMP_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo timer.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// One servo frame in microseconds.
pub const SERVO_PERIOD_US: u32 = 1_000_000 / SERVO_PWM_FREQ_HZ;
