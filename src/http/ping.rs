//! Ping and health handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tokio::time;

use crate::http::server::AppState;
use crate::observability::context::{LogContext, REQUEST_ID_KEY};
use crate::observability::{current_span, metrics};

/// Placeholder for ids that are not available.
pub const NOT_AVAILABLE: &str = "N/A";

/// Body of `GET /api/v1/ping`. Always exactly these five keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub service: String,
    pub status: String,
    pub request_id: String,
    pub trace_id: String,
    pub span_id: String,
}

/// Simulate a short business step and report the correlation ids.
///
/// A shutdown arriving during the delay cuts it short; the interruption is
/// logged and the response is still sent.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let request_id =
        LogContext::get(REQUEST_ID_KEY).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    tracing::info!("Received ping request");
    metrics::record_ping(&state.service_name);

    let mut shutdown = state.shutdown.subscribe();
    tokio::select! {
        _ = time::sleep(state.ping_delay) => {
            tracing::info!("Business step simulated - {}", state.profile.business_step());
        }
        _ = shutdown.recv() => {
            metrics::record_ping_interrupted(&state.service_name);
            tracing::error!(delay_ms = state.ping_delay.as_millis() as u64, "Interrupted during processing");
        }
    }

    let (trace_id, span_id) = match current_span() {
        Some(ids) => (ids.trace_id, ids.span_id),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    tracing::info!("Sending response");

    Json(PingResponse {
        service: state.service_name.to_string(),
        status: "ok".to_string(),
        request_id,
        trace_id,
        span_id,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: state.service_name.to_string(),
    })
}
