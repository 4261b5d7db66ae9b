//! GPIO adapter — binds the gate's boundary signals to `embedded-hal` pins.
//!
//! Three inputs (closed limit, open limit, activation button) and five
//! outputs (two motor relays, three LEDs).  Pins of each direction share a
//! type, which is what type-erased HAL pins (`AnyInputPin`-style drivers)
//! provide.
//!
//! `data_ready` is not wired to a pin: it reports whether every input could
//! be read.  A failed read keeps the last good level for that pin; once one
//! full read has succeeded the adapter stays ready.
//!
//! Motor relays are written in two passes, de-asserting before asserting,
//! so a direction change never drives both relays at once.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::warn;

use crate::app::ports::{InputPort, OutputPort};
use crate::error::PinFault;
use crate::fsm::context::{GateInputs, GateOutputs};

const IN_SENSOR_CLOSED: usize = 0;
const IN_SENSOR_OPEN: usize = 1;
const IN_BUTTON: usize = 2;
const INPUT_NAMES: [&str; 3] = ["sensor_closed", "sensor_open", "activation_button"];

const OUT_MOTOR_OPEN: usize = 0;
const OUT_MOTOR_CLOSE: usize = 1;
const OUT_LED_OPEN: usize = 2;
const OUT_LED_CLOSE: usize = 3;
const OUT_LED_ERROR: usize = 4;
const OUTPUT_NAMES: [&str; 5] = ["motor_open", "motor_close", "led_open", "led_close", "led_error"];

/// Input pins in wiring order.
pub struct InputPins<I> {
    pub sensor_closed: I,
    pub sensor_open: I,
    pub activation_button: I,
}

/// Output pins in wiring order.
pub struct OutputPins<O> {
    pub motor_open: O,
    pub motor_close: O,
    pub led_open: O,
    pub led_close: O,
    pub led_error: O,
}

/// Concrete adapter that puts the gate's pins behind the port traits.
pub struct GpioGate<I, O> {
    inputs: [I; 3],
    outputs: [O; 5],
    /// Switches pull the line low when active (pull-up wiring).
    active_low: bool,
    last_levels: [bool; 3],
    primed: bool,
    last_fault: Option<PinFault>,
    fault_count: u32,
}

impl<I: InputPin, O: OutputPin> GpioGate<I, O> {
    pub fn new(inputs: InputPins<I>, outputs: OutputPins<O>, active_low: bool) -> Self {
        Self {
            inputs: [inputs.sensor_closed, inputs.sensor_open, inputs.activation_button],
            outputs: [
                outputs.motor_open,
                outputs.motor_close,
                outputs.led_open,
                outputs.led_close,
                outputs.led_error,
            ],
            active_low,
            last_levels: [false; 3],
            primed: false,
            last_fault: None,
            fault_count: 0,
        }
    }

    /// Most recent pin failure, if any.
    pub fn last_fault(&self) -> Option<PinFault> {
        self.last_fault
    }

    pub fn fault_count(&self) -> u32 {
        self.fault_count
    }

    fn note_fault(&mut self, fault: PinFault) {
        self.last_fault = Some(fault);
        self.fault_count = self.fault_count.saturating_add(1);
    }

    fn write(&mut self, idx: usize, level: bool) {
        if let Err(e) = self.outputs[idx].set_state(PinState::from(level)) {
            let fault = PinFault::Write(OUTPUT_NAMES[idx]);
            warn!("gpio: {} ({:?})", fault, e);
            self.note_fault(fault);
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<I: InputPin, O: OutputPin> InputPort for GpioGate<I, O> {
    fn read_inputs(&mut self) -> GateInputs {
        let mut all_ok = true;

        for idx in 0..self.inputs.len() {
            match self.inputs[idx].is_high() {
                Ok(high) => self.last_levels[idx] = high != self.active_low,
                Err(e) => {
                    let fault = PinFault::Read(INPUT_NAMES[idx]);
                    warn!("gpio: {} ({:?}), holding last level", fault, e);
                    self.note_fault(fault);
                    all_ok = false;
                }
            }
        }

        if all_ok {
            self.primed = true;
        }

        GateInputs {
            sensor_closed: self.last_levels[IN_SENSOR_CLOSED],
            sensor_open: self.last_levels[IN_SENSOR_OPEN],
            activation_button: self.last_levels[IN_BUTTON],
            data_ready: self.primed,
        }
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> OutputPort for GpioGate<I, O> {
    fn apply(&mut self, outputs: &GateOutputs) {
        let motors = [
            (OUT_MOTOR_OPEN, outputs.motor_open),
            (OUT_MOTOR_CLOSE, outputs.motor_close),
        ];
        for (idx, level) in motors.into_iter().filter(|(_, on)| !on) {
            self.write(idx, level);
        }
        for (idx, level) in motors.into_iter().filter(|(_, on)| *on) {
            self.write(idx, level);
        }

        self.write(OUT_LED_OPEN, outputs.led_open);
        self.write(OUT_LED_CLOSE, outputs.led_close);
        self.write(OUT_LED_ERROR, outputs.led_error);
    }
}
