//! Tick-driven helpers that run alongside the state machine.

pub mod blink;
