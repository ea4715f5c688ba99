//! Scheduled log generation subsystem.
//!
//! # Data Flow
//! ```text
//! tokio task (fixed delay, per-profile interval)
//!     → generator.rs (new root span + fresh request id per tick)
//!     → message.rs (event, entity id, amount, level drawn from the catalogue)
//!     → one log line inside the tick's log context
//! ```

pub mod generator;
pub mod message;

pub use generator::{RandomLogGenerator, TickReport};
pub use message::{generate, GeneratedLog, LogLevel};
