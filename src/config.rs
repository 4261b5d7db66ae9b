//! System configuration parameters
//!
//! All tunable parameters for the gate controller.  Motion and blink
//! bounds are expressed in ticks, so the control logic is independent of
//! the wall-clock tick period.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum ticks a motion may run before a timeout fault.
pub const TIME_MAX: u32 = 180;
/// Ticks between error-indicator toggles.
pub const BLINK_PERIOD: u32 = 20;
/// Nominal control loop period.
pub const TICK_INTERVAL_MS: u32 = 50;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    // --- Motion ---
    /// Ticks allowed for an Opening/Closing motion to reach its end stop
    pub time_max_ticks: u32,

    // --- Indicator ---
    /// Ticks between toggles of the error LED
    pub blink_period_ticks: u32,

    // --- Safety ---
    /// Fault the gate into `LimitFault` when both limit switches are
    /// active at start-up.  Off by default.
    pub detect_limit_conflict: bool,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Ticks between telemetry events (0 = disabled)
    pub telemetry_interval_ticks: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            time_max_ticks: TIME_MAX,
            blink_period_ticks: BLINK_PERIOD,
            detect_limit_conflict: false,
            tick_interval_ms: TICK_INTERVAL_MS, // 20 Hz
            telemetry_interval_ticks: 200,      // every 10 s
        }
    }
}

impl GateConfig {
    /// Reject values that would make the controller misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.time_max_ticks == 0 {
            return Err(Error::Config("time_max_ticks must be non-zero"));
        }
        if self.blink_period_ticks == 0 {
            return Err(Error::Config("blink_period_ticks must be non-zero"));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Wall-clock budget of one motion, in milliseconds.
    pub fn motion_budget_ms(&self) -> u64 {
        u64::from(self.time_max_ticks) * u64::from(self.tick_interval_ms)
    }
}
