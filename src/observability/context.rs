//! Request-scoped logging context.
//!
//! Holds the `requestId`, `traceId` and `spanId` of the request or scheduled
//! tick currently executing. The map lives in a tokio task-local, so it
//! follows the future across `.await` points and disappears when the scope
//! ends. Two concurrently running requests never see each other's values.
//!
//! [`LogContext::scope`] also enters a `log_context` span whose `request_id`,
//! `trace_id` and `span_id` fields mirror the map, so the fmt layer renders
//! them on every event inside the scope. [`LogContext::put`] re-records the
//! span field. [`LogContext::remove`] only affects the map: a span field
//! cannot be unset once recorded, so log lines keep the last value.
//!
//! The JSON format replaces a re-recorded field; the pretty format appends
//! it, so the last occurrence on a line is the current value.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;

use tracing::Instrument;

use crate::observability::tracing::TraceIds;

pub const REQUEST_ID_KEY: &str = "requestId";
pub const TRACE_ID_KEY: &str = "traceId";
pub const SPAN_ID_KEY: &str = "spanId";

tokio::task_local! {
    static LOG_CONTEXT: RefCell<Scoped>;
}

/// The installed context and the span mirroring it.
struct Scoped {
    ctx: LogContext,
    span: tracing::Span,
}

/// Span field mirroring `key`, for the keys that have one.
fn span_field(key: &str) -> Option<&'static str> {
    match key {
        REQUEST_ID_KEY => Some("request_id"),
        TRACE_ID_KEY => Some("trace_id"),
        SPAN_ID_KEY => Some("span_id"),
        _ => None,
    }
}

/// Key/value diagnostic context for one unit of work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    fields: BTreeMap<String, String>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying a request id and the ids of the span serving it.
    pub fn for_request(request_id: impl Into<String>, ids: Option<&TraceIds>) -> Self {
        let mut ctx = Self::new().with(REQUEST_ID_KEY, request_id);
        if let Some(ids) = ids {
            ctx.insert(TRACE_ID_KEY, ids.trace_id.clone());
            ctx.insert(SPAN_ID_KEY, ids.span_id.clone());
        }
        ctx
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Span whose fields mirror this context.
    ///
    /// Keys that are not set are recorded as empty and omitted from output.
    pub fn tracing_span(&self) -> tracing::Span {
        let span = tracing::info_span!(
            "log_context",
            request_id = tracing::field::Empty,
            trace_id = tracing::field::Empty,
            span_id = tracing::field::Empty,
        );
        for (key, value) in &self.fields {
            if let Some(field) = span_field(key) {
                span.record(field, value.as_str());
            }
        }
        span
    }

    /// Run `fut` with `ctx` installed as the current context, inside the
    /// span mirroring it.
    ///
    /// The context is removed once `fut` completes or is dropped.
    pub async fn scope<F>(ctx: LogContext, fut: F) -> F::Output
    where
        F: Future,
    {
        let span = ctx.tracing_span();
        let scoped = Scoped {
            ctx,
            span: span.clone(),
        };
        LOG_CONTEXT
            .scope(RefCell::new(scoped), fut.instrument(span))
            .await
    }

    /// Synchronous counterpart of [`LogContext::scope`].
    pub fn sync_scope<F, R>(ctx: LogContext, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let span = ctx.tracing_span();
        let _entered = span.enter();
        let scoped = Scoped {
            ctx,
            span: span.clone(),
        };
        LOG_CONTEXT.sync_scope(RefCell::new(scoped), f)
    }

    /// Value of `key` in the current context; `None` outside any scope.
    pub fn get(key: &str) -> Option<String> {
        LOG_CONTEXT
            .try_with(|scoped| scoped.borrow().ctx.value(key).map(str::to_owned))
            .ok()
            .flatten()
    }

    /// Set `key` in the current context and on the span mirroring it.
    /// No-op outside a scope.
    pub fn put(key: &str, value: impl Into<String>) {
        let value = value.into();
        let _ = LOG_CONTEXT.try_with(|scoped| {
            let mut scoped = scoped.borrow_mut();
            if let Some(field) = span_field(key) {
                scoped.span.record(field, value.as_str());
            }
            scoped.ctx.insert(key, value);
        });
    }

    /// Remove `key` from the current context. No-op outside a scope.
    ///
    /// The span keeps the last value recorded for the key.
    pub fn remove(key: &str) {
        let _ = LOG_CONTEXT.try_with(|scoped| scoped.borrow_mut().ctx.fields.remove(key));
    }

    /// Copy of the current context, empty outside any scope.
    pub fn snapshot() -> LogContext {
        LOG_CONTEXT
            .try_with(|scoped| scoped.borrow().ctx.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::capture::CapturedLogs;
    use std::time::Duration;

    #[test]
    fn test_get_outside_scope_is_none() {
        assert_eq!(LogContext::get(REQUEST_ID_KEY), None);
        assert!(LogContext::snapshot().is_empty());
        // Mutations outside a scope are silently ignored.
        LogContext::put(REQUEST_ID_KEY, "ignored");
        assert_eq!(LogContext::get(REQUEST_ID_KEY), None);
    }

    #[tokio::test]
    async fn test_scope_exposes_and_clears_values() {
        let ctx = LogContext::new().with(REQUEST_ID_KEY, "req-1");
        let seen = LogContext::scope(ctx, async {
            tokio::task::yield_now().await;
            LogContext::get(REQUEST_ID_KEY)
        })
        .await;

        assert_eq!(seen.as_deref(), Some("req-1"));
        assert_eq!(LogContext::get(REQUEST_ID_KEY), None);
    }

    #[tokio::test]
    async fn test_put_and_remove_within_scope() {
        LogContext::scope(LogContext::new(), async {
            LogContext::put(TRACE_ID_KEY, "abc");
            assert_eq!(LogContext::get(TRACE_ID_KEY).as_deref(), Some("abc"));
            LogContext::remove(TRACE_ID_KEY);
            assert_eq!(LogContext::get(TRACE_ID_KEY), None);
        })
        .await;
    }

    #[tokio::test]
    async fn test_concurrent_scopes_are_isolated() {
        let a = tokio::spawn(LogContext::scope(
            LogContext::new().with(REQUEST_ID_KEY, "a"),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                LogContext::get(REQUEST_ID_KEY)
            },
        ));
        let b = tokio::spawn(LogContext::scope(
            LogContext::new().with(REQUEST_ID_KEY, "b"),
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                LogContext::get(REQUEST_ID_KEY)
            },
        ));

        assert_eq!(a.await.unwrap().as_deref(), Some("a"));
        assert_eq!(b.await.unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_for_request_copies_trace_ids() {
        let ids = TraceIds {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            span_id: "00f067aa0ba902b7".to_string(),
        };
        let ctx = LogContext::for_request("req-9", Some(&ids));
        assert_eq!(ctx.value(REQUEST_ID_KEY), Some("req-9"));
        assert_eq!(ctx.value(TRACE_ID_KEY), Some(ids.trace_id.as_str()));
        assert_eq!(ctx.value(SPAN_ID_KEY), Some(ids.span_id.as_str()));

        let bare = LogContext::for_request("req-10", None);
        assert_eq!(bare.value(TRACE_ID_KEY), None);
    }

    #[tokio::test]
    async fn test_scope_tags_log_lines() {
        let (logs, _guard) = CapturedLogs::install();
        let ids = TraceIds {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            span_id: "00f067aa0ba902b7".to_string(),
        };

        LogContext::scope(LogContext::for_request("req-7", Some(&ids)), async {
            tokio::task::yield_now().await;
            tracing::info!("inside scope");
        })
        .await;
        tracing::info!("outside scope");

        let inside = logs.line_containing("inside scope").unwrap();
        assert!(inside.contains("request_id=\"req-7\""), "{inside}");
        assert!(inside.contains("trace_id=\"4bf92f3577b34da6a3ce929d0e0e4736\""), "{inside}");
        assert!(inside.contains("span_id=\"00f067aa0ba902b7\""), "{inside}");

        let outside = logs.line_containing("outside scope").unwrap();
        assert!(!outside.contains("request_id"), "{outside}");
    }

    #[tokio::test]
    async fn test_put_updates_log_lines() {
        let (logs, _guard) = CapturedLogs::install();

        LogContext::scope(LogContext::new().with(REQUEST_ID_KEY, "old-id"), async {
            LogContext::put(REQUEST_ID_KEY, "new-id");
            tracing::info!("after put");
        })
        .await;

        let line = logs.line_containing("after put").unwrap();
        let last = line.rfind("request_id=").unwrap();
        assert!(line[last..].starts_with("request_id=\"new-id\""), "{line}");
    }

    #[tokio::test]
    async fn test_put_replaces_json_span_field() {
        let (logs, _guard) = CapturedLogs::install_json();

        LogContext::scope(LogContext::new().with(REQUEST_ID_KEY, "old-id"), async {
            LogContext::put(REQUEST_ID_KEY, "new-id");
            LogContext::put(TRACE_ID_KEY, "abc");
            tracing::info!("after put");
        })
        .await;

        let line = logs.line_containing("after put").unwrap();
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["span"]["request_id"], "new-id");
        assert_eq!(json["span"]["trace_id"], "abc");
    }

    #[test]
    fn test_sync_scope() {
        let value = LogContext::sync_scope(LogContext::new().with(SPAN_ID_KEY, "s1"), || {
            LogContext::get(SPAN_ID_KEY)
        });
        assert_eq!(value.as_deref(), Some("s1"));
    }
}
