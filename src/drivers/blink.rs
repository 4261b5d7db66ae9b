//! Error-indicator blink timer.
//!
//! A free-running square wave on `led_error`.  The control loop calls
//! [`BlinkTimer::tick`] once per tick, before the state machine, in every
//! state.  Every `period` calls the LED is toggled and the counter starts
//! over, so after `N` ticks the LED has toggled `N / period` times.
//!
//! ```text
//!  tick:    1 … 19  20  21 … 39  40
//!  led:     off     ON  ON       off
//! ```
//!
//! The wave runs whether or not a fault is active; the indicator may blink
//! before any error has occurred.

use crate::config::BLINK_PERIOD;
use crate::fsm::context::IoSnapshot;

/// Blink timer.  Owns its counter; one instance per control loop.
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    counter: u32,
    period: u32,
    toggles: u64,
}

impl BlinkTimer {
    /// Timer with the default period of [`BLINK_PERIOD`] ticks.
    pub fn new() -> Self {
        Self::with_period(BLINK_PERIOD)
    }

    /// Timer with a custom period.  A zero period is treated as one.
    pub fn with_period(period: u32) -> Self {
        Self {
            counter: 0,
            period: period.max(1),
            toggles: 0,
        }
    }

    /// Advance one tick; toggles `io.led_error` on the period boundary.
    pub fn tick(&mut self, io: &mut IoSnapshot) {
        self.counter += 1;
        if self.counter >= self.period {
            io.led_error = !io.led_error;
            self.counter = 0;
            self.toggles += 1;
        }
    }

    /// Number of toggles since construction.
    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}

impl Default for BlinkTimer {
    fn default() -> Self {
        Self::new()
    }
}
