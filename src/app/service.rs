//! Application service — the hexagonal core.
//!
//! [`GateService`] owns the controller, the blink timer, the I/O snapshot
//! and the fault log.  It exposes a hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      GateService       │
//!  OutputPort ◀── │  Blink · FSM · Faults  │
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::GateConfig;
use crate::diagnostics::{FaultLog, FaultRecord, Telemetry};
use crate::drivers::blink::BlinkTimer;
use crate::fsm::context::IoSnapshot;
use crate::fsm::{GateController, GateState};

use super::events::AppEvent;
use super::ports::{EventSink, InputPort, OutputPort};

/// What the driving loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The exit latch is set; stop calling `tick`.
    Exit,
}

// ───────────────────────────────────────────────────────────────
// GateService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct GateService {
    controller: GateController,
    blink: BlinkTimer,
    io: IoSnapshot,
    faults: FaultLog,
    telemetry_interval_ticks: u64,
    exit_reported: bool,
}

impl GateService {
    /// Construct the service from configuration.
    pub fn new(config: GateConfig) -> Self {
        let blink = BlinkTimer::with_period(config.blink_period_ticks);
        let telemetry_interval_ticks = u64::from(config.telemetry_interval_ticks);
        Self {
            controller: GateController::new(config),
            blink,
            io: IoSnapshot::new(),
            faults: FaultLog::new(),
            telemetry_interval_ticks,
            exit_reported: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let state = self.controller.current_state();
        sink.emit(&AppEvent::Started(state));
        let config = self.controller.config();
        info!(
            "GateService started in {:?} (time_max={} ticks = {} ms, blink={} ticks)",
            state,
            config.time_max_ticks,
            config.motion_budget_ms(),
            self.blink.period()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read inputs → blink → FSM → outputs.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`OutputPort`], so one `&mut` covers the whole cycle.
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + OutputPort),
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        if self.io.exit_requested {
            return TickOutcome::Exit;
        }

        // 1. Refresh inputs via InputPort
        self.io.load_inputs(hw.read_inputs());

        // 2. Blink timer runs first, in every state
        self.blink.tick(&mut self.io);

        // 3. FSM step
        let prev = self.controller.current_state();
        let next = self.controller.tick(&mut self.io);

        // 4. Apply outputs via OutputPort
        hw.apply(&self.io.outputs());

        // 5. Events
        if next != prev {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: next,
            });
            if next == GateState::Error {
                self.record_fault(prev, sink);
            }
        }

        let ticks = self.controller.total_ticks();
        if self.telemetry_interval_ticks > 0 && ticks % self.telemetry_interval_ticks == 0 {
            sink.emit(&AppEvent::Telemetry(self.telemetry()));
        }

        if self.io.exit_requested {
            if !self.exit_reported {
                self.exit_reported = true;
                sink.emit(&AppEvent::ExitRequested);
            }
            return TickOutcome::Exit;
        }
        TickOutcome::Continue
    }

    /// Tick until the exit latch is set or `max_ticks` have run.
    ///
    /// `pace` is called between ticks; the host binary sleeps there for
    /// the configured tick interval.  Returns the number of ticks run.
    pub fn run_until_exit(
        &mut self,
        hw: &mut (impl InputPort + OutputPort),
        sink: &mut impl EventSink,
        max_ticks: Option<u64>,
        mut pace: impl FnMut(),
    ) -> u64 {
        let mut ran = 0;
        while max_ticks.is_none_or(|max| ran < max) {
            let outcome = self.tick(hw, sink);
            ran += 1;
            if outcome == TickOutcome::Exit {
                break;
            }
            pace();
        }
        ran
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> GateState {
        self.controller.current_state()
    }

    pub fn io(&self) -> &IoSnapshot {
        &self.io
    }

    pub fn fault_log(&self) -> &FaultLog {
        &self.faults
    }

    pub fn exit_requested(&self) -> bool {
        self.io.exit_requested
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry::capture(
            self.controller.current_state(),
            self.controller.total_ticks(),
            self.controller.ticks_in_current_state(),
            &self.io,
            &self.faults,
        )
    }

    // ── Internal ──────────────────────────────────────────────

    fn record_fault(&mut self, from: GateState, sink: &mut impl EventSink) {
        let code = self.io.error_code;
        warn!("Gate fault: {} (from {:?})", code, from);
        self.faults.record(FaultRecord {
            tick: self.controller.total_ticks(),
            from,
            code,
        });
        sink.emit(&AppEvent::FaultRaised(code));
    }
}
