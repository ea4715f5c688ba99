//! Service profiles.
//!
//! One binary hosts either the order service or the payment service. The
//! profile picks everything that differs between the two:
//!
//! ```text
//! ServiceProfile
//!     → default service name (order-service / payment-service)
//!     → scheduler interval (3s / 4s)
//!     → event catalogue (catalog.rs)
//!     → business step logged by the ping handler
//! ```

pub mod catalog;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use catalog::{EventCatalog, ORDER_CATALOG, PAYMENT_CATALOG};

/// Which of the two services this process runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServiceProfile {
    #[default]
    Order,
    Payment,
}

impl ServiceProfile {
    /// Name reported in ping responses and used for the tracer.
    pub fn default_name(self) -> &'static str {
        match self {
            ServiceProfile::Order => "order-service",
            ServiceProfile::Payment => "payment-service",
        }
    }

    /// Fixed delay between two scheduled log generations.
    pub fn default_interval(self) -> Duration {
        match self {
            ServiceProfile::Order => Duration::from_secs(3),
            ServiceProfile::Payment => Duration::from_secs(4),
        }
    }

    pub fn catalog(self) -> &'static EventCatalog {
        match self {
            ServiceProfile::Order => &ORDER_CATALOG,
            ServiceProfile::Payment => &PAYMENT_CATALOG,
        }
    }

    /// Suffix of the "Business step simulated" log line.
    pub fn business_step(self) -> &'static str {
        match self {
            ServiceProfile::Order => "processing order validation",
            ServiceProfile::Payment => "processing payment authorization",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceProfile::Order => "order",
            ServiceProfile::Payment => "payment",
        }
    }
}

impl fmt::Display for ServiceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a profile name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service profile '{0}' (expected 'order' or 'payment')")]
pub struct UnknownProfile(pub String);

impl FromStr for ServiceProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "order" | "order-service" => Ok(ServiceProfile::Order),
            "payment" | "payment-service" => Ok(ServiceProfile::Payment),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}
