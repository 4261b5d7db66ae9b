//! Application core — pure domain logic, zero I/O.
//!
//! This module drives the gate state machine and the blink timer once per
//! tick.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
