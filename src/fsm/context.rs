//! The I/O snapshot threaded through every state handler.
//!
//! `IoSnapshot` is the single record the controller reads from and writes
//! to.  It holds the latest debounced inputs, the output commands for the
//! motor and indicators, and the controller's own bookkeeping (motion
//! counter, fault code, exit latch).  The collaborator layer refreshes the
//! inputs before each tick and applies the outputs after it.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// ---------------------------------------------------------------------------
// Inputs (read-only to state handlers; written by the input port)
// ---------------------------------------------------------------------------

/// A point-in-time reading of every input signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateInputs {
    /// Limit switch at the fully-closed end stop.
    pub sensor_closed: bool,
    /// Limit switch at the fully-open end stop.
    pub sensor_open: bool,
    /// Pulse-pulse activation button.
    pub activation_button: bool,
    /// Collaborator confirms the initial reading is valid.
    pub data_ready: bool,
}

// ---------------------------------------------------------------------------
// Outputs (written by state handlers; applied by the output port)
// ---------------------------------------------------------------------------

/// Motor and indicator commands produced by a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOutputs {
    pub motor_open: bool,
    pub motor_close: bool,
    pub led_open: bool,
    pub led_close: bool,
    pub led_error: bool,
}

impl GateOutputs {
    /// True when the motor is driven in either direction.
    pub fn motor_running(&self) -> bool {
        self.motor_open || self.motor_close
    }
}

// ---------------------------------------------------------------------------
// IoSnapshot
// ---------------------------------------------------------------------------

/// The boundary record exchanged with the physical-I/O collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoSnapshot {
    // -- Inputs --
    pub sensor_closed: bool,
    pub sensor_open: bool,
    pub activation_button: bool,
    pub data_ready: bool,

    // -- Outputs --
    pub motor_open: bool,
    pub motor_close: bool,
    pub led_open: bool,
    pub led_close: bool,
    pub led_error: bool,

    // -- Controller-owned --
    /// Ticks elapsed in the current motion.
    pub time_counter: u32,
    /// Active fault; `None` outside the `Error` state.
    pub error_code: ErrorCode,
    /// Latched request for the driving loop to stop.
    pub exit_requested: bool,
}

impl IoSnapshot {
    /// All fields cleared, as at controller start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the input fields with a fresh reading.
    pub fn load_inputs(&mut self, inputs: GateInputs) {
        self.sensor_closed = inputs.sensor_closed;
        self.sensor_open = inputs.sensor_open;
        self.activation_button = inputs.activation_button;
        self.data_ready = inputs.data_ready;
    }

    pub fn inputs(&self) -> GateInputs {
        GateInputs {
            sensor_closed: self.sensor_closed,
            sensor_open: self.sensor_open,
            activation_button: self.activation_button,
            data_ready: self.data_ready,
        }
    }

    pub fn outputs(&self) -> GateOutputs {
        GateOutputs {
            motor_open: self.motor_open,
            motor_close: self.motor_close,
            led_open: self.led_open,
            led_close: self.led_close,
            led_error: self.led_error,
        }
    }

    /// Both motor directions off.
    pub fn stop_motor(&mut self) {
        self.motor_open = false;
        self.motor_close = false;
    }

    /// Set the exit latch.  Nothing clears it.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}
