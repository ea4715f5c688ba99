//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a service.
//! All types derive Serde traits for deserialization from config files.
//! Values that depend on the service profile are optional and fall back to
//! the profile defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::service::ServiceProfile;

/// Root configuration for a service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Which service runs and under what name.
    pub service: ServiceSection,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ping handler settings.
    pub ping: PingConfig,

    /// Random log generator settings.
    pub scheduler: SchedulerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Defaults for the given profile.
    pub fn for_profile(profile: ServiceProfile) -> Self {
        let mut config = Self::default();
        config.service.profile = profile;
        config
    }

    pub fn profile(&self) -> ServiceProfile {
        self.service.profile
    }

    /// Configured name, or the profile's default name.
    pub fn service_name(&self) -> &str {
        self.service
            .name
            .as_deref()
            .unwrap_or_else(|| self.service.profile.default_name())
    }

    /// Configured fixed delay, or the profile's default interval.
    pub fn scheduler_interval(&self) -> Duration {
        self.scheduler
            .interval_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.service.profile.default_interval())
    }
}

/// Service identity.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceSection {
    /// Order or payment.
    pub profile: ServiceProfile,

    /// Service name reported by the ping endpoint.
    pub name: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Ping handler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PingConfig {
    /// Simulated processing delay in milliseconds.
    pub delay_ms: u64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self { delay_ms: 50 }
    }
}

impl PingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Random log generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Run the generator.
    pub enabled: bool,

    /// Fixed delay between ticks in seconds (profile default when unset).
    pub interval_secs: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one line per event.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
