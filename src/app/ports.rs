//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GateService (domain)
//! ```
//!
//! Driven adapters (GPIO, simulation, event sinks) implement these traits.
//! The [`GateService`](super::service::GateService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::fsm::context::{GateInputs, GateOutputs};

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick, before stepping.
///
/// Values are expected to be debounced already.
pub trait InputPort {
    fn read_inputs(&mut self) -> GateInputs;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this once per tick, after stepping.
pub trait OutputPort {
    /// Drive the motor and indicators to match `outputs`.
    fn apply(&mut self, outputs: &GateOutputs);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
