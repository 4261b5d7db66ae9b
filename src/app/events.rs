//! Outbound application events.
//!
//! The [`GateService`](super::service::GateService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::diagnostics::Telemetry;
use crate::error::ErrorCode;
use crate::fsm::GateState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(GateState),

    /// The FSM transitioned between states.
    StateChanged { from: GateState, to: GateState },

    /// A fault drove the FSM into `Error`.
    FaultRaised(ErrorCode),

    /// The controller latched its exit request; the loop must stop.
    ExitRequested,

    /// Periodic telemetry snapshot.
    Telemetry(Telemetry),
}
