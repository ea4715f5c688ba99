//! Request-id filter.
//!
//! # Responsibilities
//! - Reuse the caller's `X-Request-Id`, or generate a UUID v4
//! - Start the server span (continuing an inbound W3C trace when present)
//! - Install requestId / traceId / spanId in the log context for the rest
//!   of the chain
//! - Echo the request id on the response
//!
//! # Design Decisions
//! - The context is scoped to the downstream future, so it is gone once the
//!   response is produced, including on timeout or cancellation
//! - A header that is empty or not visible ASCII counts as absent

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::http::server::AppState;
use crate::observability::context::LogContext;

/// Header carrying the request id, in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id of the current request, available as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The caller's request id, or a new UUID v4 when none usable was sent.
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn request_id_filter(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = resolve_request_id(request.headers());

    let span_name = format!("{} {}", request.method(), request.uri().path());
    let server_span = state.tracer.start_server_span(request.headers(), span_name);
    let ids = server_span.ids();

    let ctx = LogContext::for_request(request_id.as_str(), Some(&ids));
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = server_span
        .scope(LogContext::scope(ctx, next.run(request)))
        .await;
    server_span.end();

    match HeaderValue::from_str(&request_id) {
        Ok(value) => {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
        Err(e) => tracing::warn!(request_id = %request_id, error = %e, "Request id not echoed"),
    }

    response
}
