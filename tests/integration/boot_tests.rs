//! Boot-time mode selection against the simulated rig.

use door_rig::app::events::RigEvent;
use door_rig::app::service::RigService;
use door_rig::config::RigConfig;
use door_rig::error::Error;
use door_rig::fsm::StateId;
use door_rig::fsm::context::Mode;

use super::mock_rig::{NS_PER_MS, RecordingSink, ScriptedRandom, SimRig};

#[test]
fn untouched_pedal_boots_manual_without_delay() {
    let mut rig = SimRig::new(&[]);
    let mut rng = ScriptedRandom::new(&[]);
    let mut sink = RecordingSink::new();
    let latch = rig.latch();

    let (service, decision) =
        RigService::boot(RigConfig::default(), &mut rig, &mut rng, latch, &mut sink).unwrap();

    assert_eq!(decision.mode, Mode::Manual);
    assert_eq!((decision.held_ms, decision.deferred_ms), (0, 0));
    assert_eq!(service.state(), StateId::WaitPress);
    assert_eq!(rig.now_ns(), 0);
    assert!(rng.bounds.is_empty());
    assert_eq!(sink.events.first(), Some(&RigEvent::Booted(decision)));
}

#[test]
fn boot_parks_both_doors_closed_and_mirrored() {
    let mut rig = SimRig::new(&[]);
    let mut rng = ScriptedRandom::new(&[]);
    let mut sink = RecordingSink::new();
    let latch = rig.latch();

    let (service, _) =
        RigService::boot(RigConfig::default(), &mut rig, &mut rng, latch, &mut sink).unwrap();

    assert_eq!(rig.servo_a(), vec![1055]);
    assert_eq!(rig.servo_b(), vec![1695]);
    assert_eq!(service.door_position_us(), 1055);
}

#[test]
fn held_pedal_boots_demo_after_four_times_the_hold() {
    let mut rig = SimRig::new(&[(0, 2_000)]);
    let mut rng = ScriptedRandom::new(&[0, 0]);
    let mut sink = RecordingSink::new();
    let latch = rig.latch();

    let (mut service, decision) =
        RigService::boot(RigConfig::default(), &mut rig, &mut rng, latch, &mut sink).unwrap();

    assert_eq!(decision.mode, Mode::Demo);
    assert_eq!(decision.held_ms, 2_000);
    assert_eq!(decision.deferred_ms, 8_000);
    assert_eq!(service.state(), StateId::PreWait);
    assert_eq!(rig.now_ns(), 10_000 * NS_PER_MS);

    // A zero pre-wait opens the doors on the first step.
    service.step(&mut rig, &mut rng, latch, &mut sink).unwrap();
    assert_eq!(service.state(), StateId::DemoOpening);

    let first_motion = rig.servo_writes[2];
    assert!(first_motion.at_ns >= 10_000 * NS_PER_MS);
    assert!(rig.servo_writes[..2].iter().all(|w| w.at_ns == 0));
}

#[test]
fn edges_from_setup_are_discarded() {
    let mut rig = SimRig::new(&[(0, 300), (100, 300)]);
    let mut rng = ScriptedRandom::new(&[1_000]);
    let mut sink = RecordingSink::new();
    let latch = rig.latch();
    latch.signal();

    let (mut service, decision) =
        RigService::boot(RigConfig::default(), &mut rig, &mut rng, latch, &mut sink).unwrap();

    assert_eq!(decision.mode, Mode::Demo);
    assert!(!latch.is_set());

    // The pre-wait runs its slices without seeing a cancel.
    for _ in 0..3 {
        service.step(&mut rig, &mut rng, latch, &mut sink).unwrap();
    }
    assert_eq!(service.mode(), Mode::Demo);
    assert_eq!(service.state(), StateId::PreWait);
}

#[test]
fn inverted_travel_is_rejected_before_any_servo_write() {
    let mut rig = SimRig::new(&[]);
    let mut rng = ScriptedRandom::new(&[]);
    let mut sink = RecordingSink::new();
    let latch = rig.latch();
    let config = RigConfig {
        door_closed_us: 1700,
        door_open_us: 1100,
        ..RigConfig::default()
    };

    let err = RigService::boot(config.clone(), &mut rig, &mut rng, latch, &mut sink).err();
    assert_eq!(
        err,
        Some(Error::Config("door_closed_us must be below door_open_us"))
    );
    assert!(rig.servo_writes.is_empty());
    assert!(sink.events.is_empty());

    assert!(matches!(
        RigService::new(config, Mode::Manual),
        Err(Error::Config(_))
    ));
}
