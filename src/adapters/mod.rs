//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                     |
//! |------------|--------------|---------------------------------|
//! | `gpio`     | InputPort    | `embedded-hal` input pins       |
//! |            | OutputPort   | `embedded-hal` output pins      |
//! | `log_sink` | EventSink    | `log` facade                    |
//! | `sim`      | InputPort    | Simulated gate leaf (host runs) |
//! |            | OutputPort   |                                 |

pub mod gpio;
pub mod log_sink;
pub mod sim;
