//! End-to-end runs against the simulated gate plant.

use super::mock_hw::RecordingSink;

use gatectl::adapters::sim::SimulatedGate;
use gatectl::app::service::GateService;
use gatectl::config::GateConfig;
use gatectl::{ErrorCode, GateState};

fn quiet(config: GateConfig) -> GateConfig {
    GateConfig {
        telemetry_interval_ticks: 0,
        ..config
    }
}

#[test]
fn open_then_close_round_trip() {
    let mut app = GateService::new(quiet(GateConfig::default()));
    let mut sink = RecordingSink::new();
    let mut hw = SimulatedGate::new(5).press_at(3).press_at(12);

    app.run_until_exit(&mut hw, &mut sink, Some(10), || {});
    assert_eq!(app.state(), GateState::Open);
    assert!(hw.is_open());

    app.run_until_exit(&mut hw, &mut sink, Some(10), || {});
    assert_eq!(app.state(), GateState::Closed);
    assert!(hw.is_closed());

    assert_eq!(
        sink.transitions(),
        vec![
            (GateState::Init, GateState::Closed),
            (GateState::Closed, GateState::Opening),
            (GateState::Opening, GateState::Open),
            (GateState::Open, GateState::Closing),
            (GateState::Closing, GateState::Closed),
        ]
    );
    assert_eq!(hw.motor_conflicts(), 0);
}

#[test]
fn stalled_motor_times_out() {
    let config = quiet(GateConfig {
        time_max_ticks: 10,
        ..GateConfig::default()
    });
    let mut app = GateService::new(config);
    let mut sink = RecordingSink::new();
    let mut hw = SimulatedGate::new(5).stalled().press_at(2);

    let ran = app.run_until_exit(&mut hw, &mut sink, Some(50), || {});
    assert_eq!(ran, 50, "timeout is not fatal, the loop keeps running");
    assert_eq!(app.state(), GateState::Error);
    assert_eq!(app.io().error_code, ErrorCode::TimeoutFault);
    assert!(!app.exit_requested());
    assert!(!hw.outputs().motor_running());

    let record = app.fault_log().last().copied().unwrap();
    assert_eq!(record.tick, 12);
    assert_eq!(record.from, GateState::Opening);

    // Blink timer kept running through every state: 50 ticks / 20.
    assert_eq!(hw.led_error_toggles(), 2);
}

#[test]
fn missing_start_data_halts_immediately() {
    let mut app = GateService::new(quiet(GateConfig::default()));
    let mut sink = RecordingSink::new();
    let mut hw = SimulatedGate::new(5).without_data().press_at(1);

    let ran = app.run_until_exit(&mut hw, &mut sink, Some(50), || {});
    assert_eq!(ran, 1);
    assert_eq!(app.io().error_code, ErrorCode::StartFault);
    assert!(hw.is_closed());
}

#[test]
fn midway_start_is_treated_as_open() {
    let mut app = GateService::new(quiet(GateConfig::default()));
    let mut sink = RecordingSink::new();
    let mut hw = SimulatedGate::new(6).starting_midway().press_at(2);

    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);

    app.run_until_exit(&mut hw, &mut sink, Some(10), || {});
    assert_eq!(app.state(), GateState::Closed);
    assert!(hw.is_closed());
}

#[test]
fn conflicting_limits_fault_when_enabled() {
    let config = quiet(GateConfig {
        detect_limit_conflict: true,
        ..GateConfig::default()
    });
    let mut app = GateService::new(config);
    let mut sink = RecordingSink::new();
    // A zero-length stroke reports both stops at once.
    let mut hw = SimulatedGate::new(0);
    assert!(hw.is_closed() && hw.is_open());

    app.run_until_exit(&mut hw, &mut sink, Some(5), || {});
    assert_eq!(app.state(), GateState::Error);
    assert_eq!(app.io().error_code, ErrorCode::LimitFault);
    assert!(!app.exit_requested());
}
