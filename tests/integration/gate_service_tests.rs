//! Integration tests for the GateService → FSM → outputs pipeline.
//!
//! These drive the service tick by tick against scripted inputs and check
//! the frames handed to the output port and the events emitted.

use super::mock_hw::{MockHardware, RecordingSink};

use gatectl::app::events::AppEvent;
use gatectl::app::service::{GateService, TickOutcome};
use gatectl::config::{GateConfig, TIME_MAX};
use gatectl::{ErrorCode, GateState};

fn make_app() -> (GateService, RecordingSink) {
    let config = GateConfig {
        telemetry_interval_ticks: 0,
        ..GateConfig::default()
    };
    let mut app = GateService::new(config);
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, sink)
}

/// Closed gate, button pressed for one tick: leaves the app in Opening.
fn start_opening(app: &mut GateService, hw: &mut MockHardware, sink: &mut RecordingSink) {
    app.tick(hw, sink);
    assert_eq!(app.state(), GateState::Closed);
    hw.inputs.activation_button = true;
    app.tick(hw, sink);
    assert_eq!(app.state(), GateState::Opening);
    hw.inputs.activation_button = false;
    hw.inputs.sensor_closed = false;
}

#[test]
fn closed_gate_opens_on_button_and_stops_at_limit() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::closed();
    start_opening(&mut app, &mut hw, &mut sink);

    let frame = hw.last_frame().copied().unwrap();
    assert!(frame.motor_open && !frame.motor_close);
    assert!(frame.led_close, "closed LED stays on until the gate is open");

    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.io().time_counter, 5);

    hw.inputs.sensor_open = true;
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);
    assert!(!hw.motor_running());
    let frame = hw.last_frame().copied().unwrap();
    assert!(frame.led_open && !frame.led_close);

    assert_eq!(
        sink.transitions(),
        vec![
            (GateState::Init, GateState::Closed),
            (GateState::Closed, GateState::Opening),
            (GateState::Opening, GateState::Open),
        ]
    );
}

#[test]
fn motion_timeout_parks_in_error_without_exiting() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::closed();
    start_opening(&mut app, &mut hw, &mut sink);

    for _ in 0..TIME_MAX - 1 {
        assert_eq!(app.tick(&mut hw, &mut sink), TickOutcome::Continue);
    }
    assert_eq!(app.state(), GateState::Opening);

    assert_eq!(app.tick(&mut hw, &mut sink), TickOutcome::Continue);
    assert_eq!(app.state(), GateState::Error);
    assert_eq!(app.io().error_code, ErrorCode::TimeoutFault);
    assert!(!hw.motor_running());
    assert!(sink.events.contains(&AppEvent::FaultRaised(ErrorCode::TimeoutFault)));

    let record = app.fault_log().last().copied().unwrap();
    assert_eq!(record.from, GateState::Opening);
    assert_eq!(record.code, ErrorCode::TimeoutFault);

    // The button no longer does anything.
    hw.inputs.activation_button = true;
    for _ in 0..10 {
        assert_eq!(app.tick(&mut hw, &mut sink), TickOutcome::Continue);
    }
    assert_eq!(app.state(), GateState::Error);
    assert!(!hw.motor_running());
}

#[test]
fn closing_from_open_gate() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::open();
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);

    hw.inputs.activation_button = true;
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Closing);
    let frame = hw.last_frame().copied().unwrap();
    assert!(frame.motor_close && !frame.motor_open);

    hw.inputs.activation_button = false;
    hw.inputs.sensor_open = false;
    hw.inputs.sensor_closed = true;
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Closed);
}

#[test]
fn start_fault_requests_exit_on_first_tick() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::unready();

    let ran = app.run_until_exit(&mut hw, &mut sink, Some(100), || {});
    assert_eq!(ran, 1);
    assert!(app.exit_requested());
    assert_eq!(app.io().error_code, ErrorCode::StartFault);
    assert_eq!(sink.events.last(), Some(&AppEvent::ExitRequested));

    // Once latched, the loop refuses to run again.
    assert_eq!(app.tick(&mut hw, &mut sink), TickOutcome::Exit);
    assert_eq!(hw.reads, 1);
}

#[test]
fn blink_runs_in_every_state() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::closed();

    app.run_until_exit(&mut hw, &mut sink, Some(100), || {});
    assert_eq!(app.state(), GateState::Closed);

    let toggles = hw
        .frames
        .windows(2)
        .filter(|w| w[0].led_error != w[1].led_error)
        .count();
    // 100 ticks at a 20-tick period: toggles at 20, 40, 60, 80, 100.
    assert_eq!(toggles + usize::from(hw.frames[0].led_error), 5);
}

#[test]
fn telemetry_reflects_live_state() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::closed();
    start_opening(&mut app, &mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    let t = app.telemetry();
    assert_eq!(t.state, GateState::Opening);
    assert_eq!(t.total_ticks, 3);
    assert_eq!(t.ticks_in_state, 1);
    assert_eq!(t.time_counter, 1);
    assert!(t.outputs.motor_open);
    assert_eq!(t.faults_total, 0);
}
