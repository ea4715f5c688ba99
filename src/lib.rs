//! Order and payment service skeletons.
//!
//! Both services expose `GET /api/v1/ping`, propagate an `X-Request-Id`
//! through a per-request logging context correlated with trace/span ids,
//! and run a background task that emits fabricated log lines on a fixed
//! delay. Which service runs is chosen by [`ServiceProfile`].

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod scheduler;
pub mod service;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::{LogContext, SpanTracer};
pub use service::ServiceProfile;
