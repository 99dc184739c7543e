//! Random wait-duration adapter.
//!
//! Implements [`RandomPort`] with rand's [`SmallRng`]. On the device the
//! seed comes from the hardware RNG (`esp_random`); on the host from the
//! system clock. Demo timing only needs to look irregular, so a small
//! non-cryptographic generator is enough.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::RandomPort;

pub struct RigRandom {
    rng: SmallRng,
}

impl RigRandom {
    /// Seed from the platform entropy source.
    pub fn from_platform() -> Self {
        Self::from_seed(platform_seed())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomPort for RigRandom {
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

#[cfg(target_os = "espidf")]
fn platform_seed() -> u64 {
    // SAFETY: esp_random reads the hardware RNG register.
    let hi = u64::from(unsafe { esp_idf_svc::sys::esp_random() });
    let lo = u64::from(unsafe { esp_idf_svc::sys::esp_random() });
    (hi << 32) | lo
}

#[cfg(not(target_os = "espidf"))]
fn platform_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
