//! Error types for the gate controller.
//!
//! Two families live here:
//!
//! - [`ErrorCode`] is the *domain* fault carried inside the I/O snapshot.
//!   The state machine never returns it as a `Result`; a fault is expressed
//!   by moving to `Error` and recording the code.
//! - [`Error`] covers infrastructure failures around the core (invalid
//!   configuration, a GPIO pin that refused a read or write).  All variants
//!   are `Copy` so they can be logged and passed around without allocation.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain fault codes
// ---------------------------------------------------------------------------

/// Why the controller is (or is not) in the `Error` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    /// No fault.  The only legal value outside the `Error` state.
    #[default]
    None = 0,
    /// Limit switches disagree (both report the gate at an end stop).
    /// Only raised when `GateConfig::detect_limit_conflict` is enabled.
    LimitFault = 1,
    /// A motion did not reach its end stop within `time_max_ticks`.
    TimeoutFault = 2,
    /// The controller started without valid initial data.
    StartFault = 3,
}

impl ErrorCode {
    /// Fatal faults ask the driving loop to stop the process.
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::StartFault)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "no fault"),
            Self::LimitFault => write!(f, "limit switch conflict"),
            Self::TimeoutFault => write!(f, "motion timed out"),
            Self::StartFault => write!(f, "start without valid data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pin faults (GPIO adapter)
// ---------------------------------------------------------------------------

/// Which boundary signal a GPIO operation failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFault {
    Read(&'static str),
    Write(&'static str),
}

impl fmt::Display for PinFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(pin) => write!(f, "read failed on {pin}"),
            Self::Write(pin) => write!(f, "write failed on {pin}"),
        }
    }
}

impl From<PinFault> for Error {
    fn from(e: PinFault) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the state machine funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
    /// A GPIO pin operation failed.
    Pin(PinFault),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Pin(e) => write!(f, "pin: {e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
