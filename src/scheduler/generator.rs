//! Fixed-delay random log generator.
//!
//! # Responsibilities
//! - Emit one fabricated log line per tick
//! - Give every tick its own root span and request id
//! - Stop when shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;
use tokio::time;
use uuid::Uuid;

use crate::observability::context::LogContext;
use crate::observability::metrics;
use crate::observability::tracing::{SpanTracer, SCHEDULED_SPAN_NAME};
use crate::scheduler::message::{generate, GeneratedLog, LogLevel};
use crate::service::EventCatalog;

/// What a tick produced, returned for callers that want to inspect it.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub request_id: String,
    pub trace_id: String,
    pub span_id: String,
    pub log: GeneratedLog,
}

pub struct RandomLogGenerator {
    service_name: String,
    catalog: &'static EventCatalog,
    interval: Duration,
    tracer: Arc<SpanTracer>,
    rng: StdRng,
}

impl RandomLogGenerator {
    pub fn new(
        service_name: impl Into<String>,
        catalog: &'static EventCatalog,
        interval: Duration,
        tracer: Arc<SpanTracer>,
    ) -> Self {
        Self::with_rng(service_name, catalog, interval, tracer, StdRng::from_entropy())
    }

    /// Same as [`RandomLogGenerator::new`] with a caller-supplied RNG.
    pub fn with_rng(
        service_name: impl Into<String>,
        catalog: &'static EventCatalog,
        interval: Duration,
        tracer: Arc<SpanTracer>,
        rng: StdRng,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            catalog,
            interval,
            tracer,
            rng,
        }
    }

    /// Tick, then wait the fixed delay, until shutdown.
    ///
    /// The delay starts after a tick completes, so ticks never overlap.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            service = %self.service_name,
            interval_ms = self.interval.as_millis() as u64,
            "Random log generator starting"
        );

        loop {
            self.tick().await;

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Random log generator received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Generate and emit one log line inside a fresh span and log context.
    pub async fn tick(&mut self) -> TickReport {
        let span = self.tracer.next_span(SCHEDULED_SPAN_NAME);
        let ids = span.ids();
        let request_id = Uuid::new_v4().to_string();

        let log = generate(self.catalog, &mut self.rng);

        let ctx = LogContext::for_request(request_id.clone(), Some(&ids));
        span.scope(LogContext::scope(ctx, async { emit(&log) })).await;
        span.end();

        metrics::record_generated_event(&self.service_name, log.level.as_str());

        TickReport {
            request_id,
            trace_id: ids.trace_id,
            span_id: ids.span_id,
            log,
        }
    }
}

fn emit(log: &GeneratedLog) {
    match log.level {
        LogLevel::Info => {
            tracing::info!(event = log.event, entity_id = %log.entity_id, "{}", log.message)
        }
        LogLevel::Warn => {
            tracing::warn!(event = log.event, entity_id = %log.entity_id, "{}", log.message)
        }
        LogLevel::Error => {
            tracing::error!(event = log.event, entity_id = %log.entity_id, "{}", log.message)
        }
    }
}
