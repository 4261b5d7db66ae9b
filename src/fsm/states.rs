//! Concrete state handler functions and the static state table.
//!
//! Each state is three plain `fn` pointers with no captured state and no
//! dynamic dispatch.
//!
//! ```text
//!  INIT ──[!data_ready]───▶ ERROR (StartFault, exit requested)
//!    ├───[sensor_closed]──▶ CLOSED
//!    └───[otherwise]──────▶ OPEN
//!
//!  CLOSED ──[button]──▶ OPENING ──[sensor_open]───▶ OPEN
//!  OPEN ────[button]──▶ CLOSING ──[sensor_closed]─▶ CLOSED
//!
//!  OPENING / CLOSING ──[time_max_ticks elapsed]──▶ ERROR (TimeoutFault)
//! ```
//!
//! `ERROR` has no way out.  Motion states advance the counter by exactly
//! one unit per update; there is no internal wait loop.

use super::context::IoSnapshot;
use super::{GateState, StateDescriptor};
use crate::config::GateConfig;
use crate::error::ErrorCode;

// ═══════════════════════════════════════════════════════════════════════════
//  Table
// ═══════════════════════════════════════════════════════════════════════════

/// The state table, indexed by `GateState as usize`.
pub static STATE_TABLE: [StateDescriptor; GateState::COUNT] = [
    // Index 0 — Init
    StateDescriptor {
        id: GateState::Init,
        name: "Init",
        on_enter: None,
        on_exit: None,
        on_update: init_update,
    },
    // Index 1 — Closed
    StateDescriptor {
        id: GateState::Closed,
        name: "Closed",
        on_enter: Some(closed_enter),
        on_exit: None,
        on_update: closed_update,
    },
    // Index 2 — Open
    StateDescriptor {
        id: GateState::Open,
        name: "Open",
        on_enter: Some(open_enter),
        on_exit: None,
        on_update: open_update,
    },
    // Index 3 — Opening
    StateDescriptor {
        id: GateState::Opening,
        name: "Opening",
        on_enter: Some(opening_enter),
        on_exit: Some(motion_exit),
        on_update: opening_update,
    },
    // Index 4 — Closing
    StateDescriptor {
        id: GateState::Closing,
        name: "Closing",
        on_enter: Some(closing_enter),
        on_exit: Some(motion_exit),
        on_update: closing_update,
    },
    // Index 5 — Error
    StateDescriptor {
        id: GateState::Error,
        name: "Error",
        on_enter: Some(error_enter),
        on_exit: None,
        on_update: error_update,
    },
];

// ═══════════════════════════════════════════════════════════════════════════
//  INIT state
// ═══════════════════════════════════════════════════════════════════════════

fn init_update(io: &mut IoSnapshot, config: &GateConfig) -> Option<GateState> {
    if !io.data_ready {
        io.error_code = ErrorCode::StartFault;
        return Some(GateState::Error);
    }

    if config.detect_limit_conflict && io.sensor_closed && io.sensor_open {
        io.error_code = ErrorCode::LimitFault;
        return Some(GateState::Error);
    }

    // sensor_open is not consulted: anything not closed is treated as open.
    if io.sensor_closed {
        Some(GateState::Closed)
    } else {
        Some(GateState::Open)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED / OPEN — stable end positions
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(io: &mut IoSnapshot, _config: &GateConfig) {
    io.stop_motor();
    io.led_open = false;
    io.led_close = true;
}

fn closed_update(io: &mut IoSnapshot, config: &GateConfig) -> Option<GateState> {
    closed_enter(io, config);
    io.activation_button.then_some(GateState::Opening)
}

fn open_enter(io: &mut IoSnapshot, _config: &GateConfig) {
    io.stop_motor();
    io.led_open = true;
    io.led_close = false;
}

fn open_update(io: &mut IoSnapshot, config: &GateConfig) -> Option<GateState> {
    open_enter(io, config);
    io.activation_button.then_some(GateState::Closing)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPENING / CLOSING — bounded motion
// ═══════════════════════════════════════════════════════════════════════════

fn opening_enter(io: &mut IoSnapshot, _config: &GateConfig) {
    io.motor_open = true;
    io.motor_close = false;
    io.time_counter = 0;
}

fn opening_update(io: &mut IoSnapshot, config: &GateConfig) -> Option<GateState> {
    io.motor_open = true;
    io.motor_close = false;
    let end_stop = io.sensor_open;
    advance_motion(io, end_stop, GateState::Open, config)
}

fn closing_enter(io: &mut IoSnapshot, _config: &GateConfig) {
    io.motor_open = false;
    io.motor_close = true;
    io.time_counter = 0;
}

fn closing_update(io: &mut IoSnapshot, config: &GateConfig) -> Option<GateState> {
    io.motor_open = false;
    io.motor_close = true;
    let end_stop = io.sensor_closed;
    advance_motion(io, end_stop, GateState::Closed, config)
}

fn motion_exit(io: &mut IoSnapshot, _config: &GateConfig) {
    io.stop_motor();
}

/// One tick of a motion: arrive if the end stop is reached, otherwise
/// spend one tick of the budget and fault once it is exhausted.
fn advance_motion(
    io: &mut IoSnapshot,
    end_stop: bool,
    arrived: GateState,
    config: &GateConfig,
) -> Option<GateState> {
    if end_stop {
        return Some(arrived);
    }

    io.time_counter = io.time_counter.saturating_add(1);
    if io.time_counter >= config.time_max_ticks {
        io.error_code = ErrorCode::TimeoutFault;
        return Some(GateState::Error);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ERROR state — motor stopped, indicator owned by the blink timer
// ═══════════════════════════════════════════════════════════════════════════

fn error_enter(io: &mut IoSnapshot, _config: &GateConfig) {
    io.stop_motor();
    if io.error_code.is_fatal() {
        io.request_exit();
    }
}

fn error_update(io: &mut IoSnapshot, config: &GateConfig) -> Option<GateState> {
    error_enter(io, config);
    None
}
