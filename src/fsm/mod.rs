//! Function-pointer finite state machine for the gate.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  STATE_TABLE                                             │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ State   │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Init    │ —         │ —        │ fn(io)->Option<>  │  │
//! │  │ Closed  │ fn(io)    │ —        │ fn(io)->Option<>  │  │
//! │  │ Open    │ fn(io)    │ —        │ fn(io)->Option<>  │  │
//! │  │ Opening │ fn(io)    │ fn(io)   │ fn(io)->Option<>  │  │
//! │  │ Closing │ fn(io)    │ fn(io)   │ fn(io)->Option<>  │  │
//! │  │ Error   │ fn(io)    │ —        │ fn(io)->Option<>  │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! [`step`] calls `on_update` for the given state.  If it returns
//! `Some(next)` with a different state, `on_exit` of the old state and
//! `on_enter` of the new one run within the same step, so the snapshot
//! already carries the new state's outputs when `step` returns.
//!
//! `step` touches nothing but the snapshot.  [`GateController`] wraps it
//! with tick bookkeeping and transition logging.

pub mod context;
pub mod states;

use context::IoSnapshot;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::GateConfig;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all gate states.
/// Must stay in sync with [`states::STATE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum GateState {
    #[default]
    Init = 0,
    Closed = 1,
    Open = 2,
    Opening = 3,
    Closing = 4,
    Error = 5,
}

impl GateState {
    /// Number of states; sizes the table array.
    pub const COUNT: usize = 6;

    pub fn name(self) -> &'static str {
        states::STATE_TABLE[self as usize].name
    }

    /// Opening or Closing: the motor runs and the timeout applies.
    pub fn is_motion(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut IoSnapshot, &GateConfig);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut IoSnapshot, &GateConfig) -> Option<GateState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: GateState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Pure step
// ---------------------------------------------------------------------------

/// Evaluate one tick of the state machine with the default limits.
pub fn step(state: GateState, io: &mut IoSnapshot) -> GateState {
    step_with(&GateConfig::default(), state, io)
}

/// Evaluate one tick of the state machine.
///
/// Runs `on_update` for `state`; on a transition runs `on_exit(state)`
/// then `on_enter(next)`.  Returns the state for the next tick.
pub fn step_with(config: &GateConfig, state: GateState, io: &mut IoSnapshot) -> GateState {
    let current = &states::STATE_TABLE[state as usize];

    match (current.on_update)(io, config) {
        Some(next) if next != state => {
            if let Some(exit) = current.on_exit {
                exit(io, config);
            }
            if let Some(enter) = states::STATE_TABLE[next as usize].on_enter {
                enter(io, config);
            }
            next
        }
        _ => state,
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Stateful wrapper around [`step_with`].
///
/// Holds the current state, the configuration, and tick bookkeeping.
pub struct GateController {
    config: GateConfig,
    current: GateState,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl GateController {
    /// Construct a controller in `Init`.
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            current: GateState::Init,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Advance the machine by one tick and return the new state.
    pub fn tick(&mut self, io: &mut IoSnapshot) -> GateState {
        self.tick_count += 1;

        let prev = self.current;
        let next = step_with(&self.config, prev, io);

        if next != prev {
            self.on_transition(prev, next, io);
        }
        next
    }

    /// The current state's identity.
    pub fn current_state(&self) -> GateState {
        self.current
    }

    /// How many ticks the machine has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    pub fn total_ticks(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn on_transition(&mut self, prev: GateState, next: GateState, io: &IoSnapshot) {
        match next {
            GateState::Error if io.error_code.is_fatal() => {
                error!(
                    "FSM transition: {} -> {} ({}), exit requested",
                    prev.name(),
                    next.name(),
                    io.error_code
                );
            }
            GateState::Error => {
                warn!(
                    "FSM transition: {} -> {} ({} after {} ticks)",
                    prev.name(),
                    next.name(),
                    io.error_code,
                    io.time_counter
                );
            }
            _ => info!("FSM transition: {} -> {}", prev.name(), next.name()),
        }

        self.current = next;
        self.state_entry_tick = self.tick_count;
    }
}
