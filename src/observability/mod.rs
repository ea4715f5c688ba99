//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request-id filter / scheduler tick
//!     → tracing.rs (server span or new root span, trace/span ids)
//!     → context.rs (requestId, traceId, spanId for the unit of work)
//!     → logging.rs (every log line carries the context fields)
//!     → metrics.rs (ping and generated-event counters)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Context is task-scoped and dropped with the unit of work
//! - Metrics are cheap (atomic increments) and exported only when enabled

#[cfg(test)]
pub(crate) mod capture;
pub mod context;
pub mod logging;
pub mod metrics;
pub mod tracing;

pub use context::LogContext;
pub use self::tracing::{current_span, ActiveSpan, SpanTracer, TraceIds};
