//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::FaultRaised(code) if code.is_fatal() => {
                error!("FAULT | {} (fatal)", code);
            }
            AppEvent::FaultRaised(code) => {
                warn!("FAULT | {}", code);
            }
            AppEvent::ExitRequested => {
                warn!("EXIT  | controller requested shutdown");
            }
            AppEvent::Telemetry(t) => match serde_json::to_string(t) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
        }
    }
}
