//! Electric gate controller library.
//!
//! A tick-driven state machine that opens and closes a motorised gate,
//! bounds every motion by a tick budget, and blinks a fault indicator.
//! The pure logic lives in [`fsm`] and [`drivers::blink`]; [`app`]
//! orchestrates one tick through port traits, and [`adapters`] binds those
//! ports to GPIO pins, a simulated plant, or the log.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod fsm;

pub use config::GateConfig;
pub use error::ErrorCode;
pub use fsm::context::IoSnapshot;
pub use fsm::{GateController, GateState, step, step_with};
