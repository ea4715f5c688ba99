//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → request.rs (request id, server span, log context)
//!     → TraceLayer (access lines, tagged with the context)
//!     → TimeoutLayer
//!     → ping.rs (simulated step, five-key JSON response)
//!     → X-Request-Id echoed on the way out
//! ```

pub mod ping;
pub mod request;
pub mod server;

pub use ping::{HealthResponse, PingResponse, NOT_AVAILABLE};
pub use request::{resolve_request_id, RequestId, X_REQUEST_ID};
pub use server::{bind, AppState, HttpServer, ServerError, HEALTH_PATH, PING_PATH};
