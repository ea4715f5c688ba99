//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request id, access tracing, timeout)
//! - Bind server to listener
//! - Graceful shutdown on the shared shutdown signal
//!
//! # Design Decisions
//! - The request-id filter is outermost, so the `tower_http` access lines
//!   are emitted inside the request's log context and carry its ids

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::ping::{health, ping};
use crate::http::request::request_id_filter;
use crate::lifecycle::Shutdown;
use crate::observability::SpanTracer;
use crate::service::ServiceProfile;

/// Path of the ping endpoint.
pub const PING_PATH: &str = "/api/v1/ping";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Error type for server operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    /// The server loop failed.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Application state injected into handlers and the request-id filter.
#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub profile: ServiceProfile,
    pub ping_delay: Duration,
    pub tracer: Arc<SpanTracer>,
    pub shutdown: Shutdown,
}

/// HTTP server for one service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, tracer: Arc<SpanTracer>, shutdown: Shutdown) -> Self {
        let state = AppState {
            service_name: Arc::from(config.service_name()),
            profile: config.profile(),
            ping_delay: config.ping.delay(),
            tracer,
            shutdown,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(PING_PATH, get(ping))
            .route(HEALTH_PATH, get(health))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn_with_state(state.clone(), request_id_filter))
            .with_state(state)
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!(
            address = %addr,
            service = %self.config.service_name(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Bind a TCP listener on `address`.
pub async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })
}
