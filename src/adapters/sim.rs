//! Simulated gate plant for host runs.
//!
//! Models the leaf as a position between `0` (closed stop) and
//! `travel_ticks` (open stop).  Each applied tick moves it one step in the
//! direction of the energised motor relay; the limit sensors are derived
//! from the position.  Button presses are scripted by tick number.
//!
//! Fault injection:
//! - [`SimulatedGate::stalled`]: the motor never moves the leaf, so any
//!   motion runs into the timeout.
//! - [`SimulatedGate::without_data`]: the start-up reading is never
//!   confirmed, which is fatal for the controller.

use heapless::Vec;
use log::debug;

use crate::app::ports::{InputPort, OutputPort};
use crate::fsm::context::{GateInputs, GateOutputs};

/// Maximum number of scripted button presses.
pub const MAX_PRESSES: usize = 16;

#[derive(Debug, Clone)]
pub struct SimulatedGate {
    position: u32,
    travel_ticks: u32,
    presses: Vec<u64, MAX_PRESSES>,
    tick: u64,
    stalled: bool,
    data_ready: bool,
    outputs: GateOutputs,
    led_error_toggles: u64,
    motor_conflicts: u64,
}

impl SimulatedGate {
    /// Gate resting on its closed stop.  `travel_ticks` is the number of
    /// motor ticks needed for a full stroke.
    pub fn new(travel_ticks: u32) -> Self {
        Self {
            position: 0,
            travel_ticks,
            presses: Vec::new(),
            tick: 0,
            stalled: false,
            data_ready: true,
            outputs: GateOutputs::default(),
            led_error_toggles: 0,
            motor_conflicts: 0,
        }
    }

    /// Start on the open stop instead.
    #[must_use]
    pub fn starting_open(mut self) -> Self {
        self.position = self.travel_ticks;
        self
    }

    /// Start half-way between the stops.
    #[must_use]
    pub fn starting_midway(mut self) -> Self {
        self.position = self.travel_ticks / 2;
        self
    }

    /// Hold the button down during input read number `tick` (1-based).
    /// Presses beyond [`MAX_PRESSES`] are dropped.
    #[must_use]
    pub fn press_at(mut self, tick: u64) -> Self {
        if self.presses.push(tick).is_err() {
            debug!("sim: press script full, dropping press at tick {}", tick);
        }
        self
    }

    #[must_use]
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    #[must_use]
    pub fn without_data(mut self) -> Self {
        self.data_ready = false;
        self
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.position == 0
    }

    pub fn is_open(&self) -> bool {
        self.position >= self.travel_ticks
    }

    /// Outputs from the most recent `apply`.
    pub fn outputs(&self) -> GateOutputs {
        self.outputs
    }

    pub fn led_error_toggles(&self) -> u64 {
        self.led_error_toggles
    }

    /// Ticks on which both motor relays were commanded on.
    pub fn motor_conflicts(&self) -> u64 {
        self.motor_conflicts
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for SimulatedGate {
    fn read_inputs(&mut self) -> GateInputs {
        self.tick += 1;
        GateInputs {
            sensor_closed: self.is_closed(),
            sensor_open: self.is_open(),
            activation_button: self.presses.contains(&self.tick),
            data_ready: self.data_ready,
        }
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for SimulatedGate {
    fn apply(&mut self, outputs: &GateOutputs) {
        if outputs.led_error != self.outputs.led_error {
            self.led_error_toggles += 1;
        }
        if outputs.motor_open && outputs.motor_close {
            self.motor_conflicts += 1;
        } else if !self.stalled {
            if outputs.motor_open {
                self.position = (self.position + 1).min(self.travel_ticks);
            } else if outputs.motor_close {
                self.position = self.position.saturating_sub(1);
            }
        }
        self.outputs = *outputs;
    }
}
