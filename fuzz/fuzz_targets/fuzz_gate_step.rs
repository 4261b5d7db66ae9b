//! Fuzz target: gate state machine
//!
//! The first byte picks a motion budget; every following byte is one
//! tick of raw inputs (bit 0 closed stop, bit 1 open stop, bit 2 button,
//! bit 3 data ready).  Checks after every step:
//! - No panics
//! - Both motor relays are never on together
//! - `error_code` is set exactly when the machine sits in Error
//! - The exit latch only ever goes up, and only for a fatal code
//!
//! cargo fuzz run fuzz_gate_step

#![no_main]

use gatectl::drivers::blink::BlinkTimer;
use gatectl::fsm::context::GateInputs;
use gatectl::{ErrorCode, GateConfig, GateState, IoSnapshot, step_with};
use libfuzzer_sys::fuzz_target;

fn decode(byte: u8) -> GateInputs {
    GateInputs {
        sensor_closed: byte & 0b0001 != 0,
        sensor_open: byte & 0b0010 != 0,
        activation_button: byte & 0b0100 != 0,
        data_ready: byte & 0b1000 != 0,
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&head, ticks)) = data.split_first() else {
        return;
    };

    let config = GateConfig {
        time_max_ticks: u32::from(head & 0x1F) + 1,
        detect_limit_conflict: head & 0x80 != 0,
        ..GateConfig::default()
    };

    let mut io = IoSnapshot::new();
    let mut blink = BlinkTimer::with_period(config.blink_period_ticks);
    let mut state = GateState::Init;
    let mut exited = false;

    for &byte in ticks {
        io.load_inputs(decode(byte));
        blink.tick(&mut io);
        state = step_with(&config, state, &mut io);

        assert!(!(io.motor_open && io.motor_close));
        assert_eq!(state == GateState::Error, io.error_code != ErrorCode::None);
        if state.is_motion() {
            assert!(io.time_counter < config.time_max_ticks);
        }

        assert!(!exited || io.exit_requested);
        if io.exit_requested {
            assert!(io.error_code.is_fatal());
        }
        exited = io.exit_requested;
    }
});
