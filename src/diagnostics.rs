//! Fault history and runtime telemetry.
//!
//! Keeps the last [`FAULT_LOG_SLOTS`] faults in a fixed-capacity ring
//! (oldest entry dropped on overflow) and builds a serialisable telemetry
//! snapshot for logging.

use heapless::Deque;
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::fsm::GateState;
use crate::fsm::context::{GateOutputs, IoSnapshot};

pub const FAULT_LOG_SLOTS: usize = 8;

/// One fault, as seen by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRecord {
    /// Control tick at which the fault was raised.
    pub tick: u64,
    /// State the controller was in when it faulted.
    pub from: GateState,
    pub code: ErrorCode,
}

/// Fixed-capacity ring buffer of fault records.
#[derive(Debug, Default)]
pub struct FaultLog {
    entries: Deque<FaultRecord, FAULT_LOG_SLOTS>,
    total: u64,
}

impl FaultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: FaultRecord) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail: a slot was freed above if needed.
        let _ = self.entries.push_back(record);
        self.total += 1;
    }

    /// Most recent fault, if any.
    pub fn last(&self) -> Option<&FaultRecord> {
        self.entries.back()
    }

    /// Records oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &FaultRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Faults recorded since start, including evicted ones.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telemetry {
    pub state: GateState,
    pub total_ticks: u64,
    pub ticks_in_state: u64,
    pub time_counter: u32,
    pub error_code: ErrorCode,
    pub outputs: GateOutputs,
    pub exit_requested: bool,
    pub faults_total: u64,
}

impl Telemetry {
    pub fn capture(
        state: GateState,
        total_ticks: u64,
        ticks_in_state: u64,
        io: &IoSnapshot,
        faults: &FaultLog,
    ) -> Self {
        Self {
            state,
            total_ticks,
            ticks_in_state,
            time_counter: io.time_counter,
            error_code: io.error_code,
            outputs: io.outputs(),
            exit_requested: io.exit_requested,
            faults_total: faults.total(),
        }
    }
}
