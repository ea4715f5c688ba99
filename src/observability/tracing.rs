//! Distributed tracing support.
//!
//! # Responsibilities
//! - Own the tracer handle shared by the HTTP filter and the scheduler
//! - Extract W3C Trace Context from incoming requests
//! - Start server spans (per request) and root spans (per scheduled tick)
//! - Expose the span active in the current task
//!
//! # Design Decisions
//! - OpenTelemetry SDK provider with always-on sampling and no exporter;
//!   the ids are what matters, they end up in the log context
//! - The active span travels in a task-local, like the log context, so it
//!   survives `.await` points on a multi-threaded runtime

use std::future::Future;

use axum::http::HeaderMap;
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry::trace::{SpanKind, TraceContextExt, Tracer, TracerProvider};
use opentelemetry::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use serde::Serialize;

/// Tracer type produced by the SDK provider.
type SdkTracer = <SdkTracerProvider as TracerProvider>::Tracer;

/// Span name used for scheduled log generation.
pub const SCHEDULED_SPAN_NAME: &str = "scheduled-log-generation";

tokio::task_local! {
    static CURRENT_SPAN: Context;
}

/// Correlation ids of one span, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceIds {
    /// 32 hex characters.
    pub trace_id: String,
    /// 16 hex characters.
    pub span_id: String,
}

/// Shared tracer handle.
pub struct SpanTracer {
    provider: SdkTracerProvider,
    tracer: SdkTracer,
    propagator: TraceContextPropagator,
}

impl SpanTracer {
    /// Build a tracer named after the service.
    pub fn new(service_name: impl Into<String>) -> Self {
        let provider = SdkTracerProvider::builder().build();
        let tracer = provider.tracer(service_name.into());
        Self {
            provider,
            tracer,
            propagator: TraceContextPropagator::new(),
        }
    }

    /// Start a server span for an incoming request.
    ///
    /// Continues the caller's trace when a valid `traceparent` header is
    /// present; otherwise the span is the root of a new trace.
    pub fn start_server_span(&self, headers: &HeaderMap, name: impl Into<String>) -> ActiveSpan {
        let parent = self.propagator.extract(&HeaderExtractor(headers));
        let span = self
            .tracer
            .span_builder(name.into())
            .with_kind(SpanKind::Server)
            .start_with_context(&self.tracer, &parent);
        ActiveSpan {
            cx: Context::new().with_span(span),
        }
    }

    /// Start a new root span, unrelated to whatever is running.
    pub fn next_span(&self, name: &'static str) -> ActiveSpan {
        let span = self
            .tracer
            .span_builder(name)
            .with_kind(SpanKind::Internal)
            .start_with_context(&self.tracer, &Context::new());
        ActiveSpan {
            cx: Context::new().with_span(span),
        }
    }

    /// Shut the provider down, ending span processing.
    pub fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
}

impl std::fmt::Debug for SpanTracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanTracer").finish_non_exhaustive()
    }
}

/// A started span; ends when [`ActiveSpan::end`] is called or the last
/// clone is dropped.
#[derive(Clone, Debug)]
pub struct ActiveSpan {
    cx: Context,
}

impl ActiveSpan {
    pub fn ids(&self) -> TraceIds {
        ids_of(&self.cx)
    }

    /// Run `fut` with this span as the current span.
    pub async fn scope<F>(&self, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_SPAN.scope(self.cx.clone(), fut).await
    }

    pub fn end(&self) {
        self.cx.span().end();
    }
}

/// Ids of the span active in the current task, if any.
pub fn current_span() -> Option<TraceIds> {
    CURRENT_SPAN
        .try_with(|cx| cx.span().span_context().is_valid().then(|| ids_of(cx)))
        .ok()
        .flatten()
}

fn ids_of(cx: &Context) -> TraceIds {
    let span = cx.span();
    let sc = span.span_context();
    TraceIds {
        trace_id: sc.trace_id().to_string(),
        span_id: sc.span_id().to_string(),
    }
}

/// Read-only view of request headers for the propagator.
struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}
