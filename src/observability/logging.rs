//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick pretty or JSON output from configuration
//! - Resolve the log filter (`RUST_LOG` first, configured level otherwise)

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &ObservabilityConfig) -> String {
    format!("{level},tower_http=debug", level = config.log_level)
}

/// Install the global subscriber.
///
/// Span fields (`request_id`, `trace_id`, `span_id`) are rendered on every
/// event, so log lines emitted inside a log context are tagged with them.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_current_span(true)))
        .with((!json).then(|| fmt::layer()))
        .try_init()
}
