//! Fuzz target: calibration override parsing
//!
//! Feeds arbitrary bytes to `RigConfig::from_json` and verifies:
//! - No panics under arbitrary input
//! - Every accepted config passes `validate()`
//! - Accepted travel keeps the mirror formula inside the range
//!
//! cargo fuzz run fuzz_calibration

#![no_main]

use door_rig::app::doors::DoorTravel;
use door_rig::config::RigConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = RigConfig::from_json(data) else {
        return;
    };
    assert_eq!(config.validate(), Ok(()));

    let travel = DoorTravel::from_config(&config);
    for pos in [travel.closed_us(), travel.open_us()] {
        assert!(travel.contains(travel.mirror(pos)));
    }
});
