//! Manual controller: pedal-driven open/lamp/close cycles.

use door_rig::app::service::RigService;
use door_rig::config::RigConfig;
use door_rig::error::Error;
use door_rig::fsm::StateId;
use door_rig::fsm::context::Mode;

use super::mock_rig::{
    NS_PER_MS, RecordingSink, ScriptedRandom, SimRig, is_manual_state, step_until,
};

const CLOSED: u16 = 1055;
const OPEN: u16 = 1695;
const WRITES_PER_RAMP: usize = (OPEN - CLOSED + 1) as usize * 2;

fn manual(presses: &[(u64, u64)]) -> (RigService, SimRig, ScriptedRandom, RecordingSink) {
    let mut rig = SimRig::new(presses);
    let mut rng = ScriptedRandom::new(&[]);
    let mut sink = RecordingSink::new();
    let mut service = RigService::new(RigConfig::default(), Mode::Manual).unwrap();
    let latch = rig.latch();
    service.start(&mut rig, &mut rng, latch, &mut sink).unwrap();
    (service, rig, rng, sink)
}

fn run_cycles(
    service: &mut RigService,
    rig: &mut SimRig,
    rng: &mut ScriptedRandom,
    sink: &mut RecordingSink,
    cycles: usize,
) {
    step_until(service, rig, rng, sink, 10_000, |s, r| {
        r.lamp_clicks().len() == 4 * cycles && s.state() == StateId::WaitPress
    });
}

#[test]
fn one_press_runs_a_full_cycle_in_order() {
    let (mut service, mut rig, mut rng, mut sink) = manual(&[(5, 1_000)]);
    run_cycles(&mut service, &mut rig, &mut rng, &mut sink, 1);

    assert_eq!(
        sink.states_entered(),
        vec![
            StateId::Opening,
            StateId::LampOn,
            StateId::WaitRelease,
            StateId::Closing,
            StateId::LampOff,
            StateId::WaitPress,
        ]
    );
    assert_eq!(service.door_position_us(), CLOSED);
}

#[test]
fn doors_ramp_one_unit_per_step_and_stay_mirrored() {
    let (mut service, mut rig, mut rng, mut sink) = manual(&[(5, 1_000)]);
    run_cycles(&mut service, &mut rig, &mut rng, &mut sink, 1);

    let expected: Vec<u16> = (CLOSED..=OPEN).chain((CLOSED..=OPEN).rev()).collect();
    assert_eq!(rig.servo_a(), expected);
    for (a, b) in rig.servo_a().iter().zip(rig.servo_b()) {
        assert_eq!(b, CLOSED + (OPEN - a));
    }
}

#[test]
fn lamp_gets_three_clicks_after_opening_and_one_after_closing() {
    let (mut service, mut rig, mut rng, mut sink) = manual(&[(5, 1_000)]);
    run_cycles(&mut service, &mut rig, &mut rng, &mut sink, 1);

    let open_done = rig.servo_writes[WRITES_PER_RAMP - 1].at_ns;
    let close_start = rig.servo_writes[WRITES_PER_RAMP].at_ns;
    let close_done = rig.servo_writes.last().unwrap().at_ns;

    let clicks = rig.lamp_clicks();
    assert_eq!(clicks.len(), 4);
    assert!(clicks[..3].iter().all(|&t| open_done < t && t < close_start));
    assert!(clicks[3] > close_done);
}

#[test]
fn each_click_is_high_then_low_for_the_pulse_width() {
    let (mut service, mut rig, mut rng, mut sink) = manual(&[(5, 1_000)]);
    run_cycles(&mut service, &mut rig, &mut rng, &mut sink, 1);

    for pair in rig.lamp_edges.chunks(2) {
        assert!(pair[0].high && !pair[1].high);
        assert_eq!(pair[1].at_ns - pair[0].at_ns, 10 * NS_PER_MS);
    }
    // Back-to-back clicks keep the line low for a full pulse width too.
    assert_eq!(
        rig.lamp_edges[2].at_ns - rig.lamp_edges[1].at_ns,
        10 * NS_PER_MS
    );
}

#[test]
fn doors_close_only_after_release() {
    let (mut service, mut rig, mut rng, mut sink) = manual(&[(5, 1_000)]);
    run_cycles(&mut service, &mut rig, &mut rng, &mut sink, 1);

    assert!(rig.servo_writes[0].at_ns >= 5 * NS_PER_MS);
    assert!(rig.servo_writes[WRITES_PER_RAMP].at_ns >= 1_000 * NS_PER_MS);
}

#[test]
fn held_pedal_keeps_doors_open() {
    let (mut service, mut rig, mut rng, mut sink) = manual(&[(0, u64::MAX / NS_PER_MS)]);
    step_until(&mut service, &mut rig, &mut rng, &mut sink, 5_000, |_, r| {
        r.now_ns() > 3_000 * NS_PER_MS
    });

    assert_eq!(service.state(), StateId::WaitRelease);
    assert_eq!(service.door_position_us(), OPEN);
    assert_eq!(rig.servo_writes.len(), WRITES_PER_RAMP);
}

#[test]
fn repeated_cycles_never_touch_demo() {
    let (mut service, mut rig, mut rng, mut sink) =
        manual(&[(5, 400), (1_000, 1_300), (2_000, 2_050)]);
    run_cycles(&mut service, &mut rig, &mut rng, &mut sink, 3);

    assert_eq!(service.mode(), Mode::Manual);
    assert!(sink.states_entered().iter().all(|s| is_manual_state(*s)));
    assert!(rng.bounds.is_empty());
    assert_eq!(rig.servo_writes.len(), 6 * WRITES_PER_RAMP);
}

#[test]
fn servo_fault_propagates_out_of_step() {
    let mut rig = SimRig::new(&[(0, 100)]).failing_servo_write(10);
    let mut rng = ScriptedRandom::new(&[]);
    let mut sink = RecordingSink::new();
    let mut service = RigService::new(RigConfig::default(), Mode::Manual).unwrap();
    let latch = rig.latch();
    service.start(&mut rig, &mut rng, latch, &mut sink).unwrap();

    let err = service.step(&mut rig, &mut rng, latch, &mut sink).unwrap_err();
    assert_eq!(err, Error::Pwm(-1));
    assert_eq!(rig.servo_writes.len(), 10);
}
