//! Mock hardware adapter for integration tests.
//!
//! Feeds inputs set by the test and records every output frame so tests
//! can assert on the full command history without touching real pins.

use gatectl::app::events::AppEvent;
use gatectl::app::ports::{EventSink, InputPort, OutputPort};
use gatectl::fsm::context::{GateInputs, GateOutputs};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub inputs: GateInputs,
    pub frames: Vec<GateOutputs>,
    pub reads: u64,
}

#[allow(dead_code)]
impl MockHardware {
    /// Ready controller, gate on the closed stop.
    pub fn closed() -> Self {
        Self {
            inputs: GateInputs {
                sensor_closed: true,
                data_ready: true,
                ..GateInputs::default()
            },
            frames: Vec::new(),
            reads: 0,
        }
    }

    /// Ready controller, gate on the open stop.
    pub fn open() -> Self {
        let mut hw = Self::closed();
        hw.inputs.sensor_closed = false;
        hw.inputs.sensor_open = true;
        hw
    }

    pub fn unready() -> Self {
        let mut hw = Self::closed();
        hw.inputs.data_ready = false;
        hw
    }

    pub fn last_frame(&self) -> Option<&GateOutputs> {
        self.frames.last()
    }

    pub fn motor_running(&self) -> bool {
        self.last_frame().is_some_and(GateOutputs::motor_running)
    }
}

impl InputPort for MockHardware {
    fn read_inputs(&mut self) -> GateInputs {
        self.reads += 1;
        self.inputs
    }
}

impl OutputPort for MockHardware {
    fn apply(&mut self, outputs: &GateOutputs) {
        self.frames.push(*outputs);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn transitions(&self) -> Vec<(gatectl::GateState, gatectl::GateState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
