//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                 |
//! |------------|--------------|-----------------------------|
//! | `hardware` | PedalPort    | ESP32 GPIO (pedal)          |
//! |            | ServoPort    | ESP32 LEDC (servo A/B)      |
//! |            | LampPort     | ESP32 GPIO (lamp line)      |
//! |            | ClockPort    | via `time`                  |
//! | `log_sink` | EventSink    | Serial log output           |
//! | `random`   | RandomPort   | SmallRng, hardware-seeded   |
//! | `time`     | ClockPort    | ESP32 system timer, delays  |

pub mod hardware;
pub mod log_sink;
pub mod random;
pub mod time;
