//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use crate::config::schema::ServiceConfig;

/// Upper bound for the simulated ping delay.
pub const MAX_PING_DELAY_MS: u64 = 10_000;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("service.name must not be empty")]
    EmptyServiceName,

    #[error("ping.delay_ms {0} exceeds the maximum of {max}", max = MAX_PING_DELAY_MS)]
    PingDelayTooLong(u64),

    #[error("ping.delay_ms {delay_ms} does not fit in timeouts.request_secs {request_secs}")]
    PingDelayExceedsTimeout { delay_ms: u64, request_secs: u64 },

    #[error("scheduler.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if matches!(config.service.name.as_deref(), Some(name) if name.trim().is_empty()) {
        errors.push(ValidationError::EmptyServiceName);
    }

    let delay_ms = config.ping.delay_ms;
    if delay_ms > MAX_PING_DELAY_MS {
        errors.push(ValidationError::PingDelayTooLong(delay_ms));
    }

    let request_secs = config.timeouts.request_secs;
    if request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if delay_ms >= request_secs.saturating_mul(1000) {
        errors.push(ValidationError::PingDelayExceedsTimeout {
            delay_ms,
            request_secs,
        });
    }

    if config.scheduler.interval_secs == Some(0) {
        errors.push(ValidationError::ZeroInterval);
    }

    if tracing::Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
