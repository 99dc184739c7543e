//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific part of the
//! control loop against the simulated rig in [`mock_rig`]. All tests run
//! on the host (x86_64) with no real hardware required.

mod boot_tests;
mod manual_tests;
mod mock_rig;
