//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply profile override)
//!     → command line overrides (bind address, log format, scheduler)
//!     → validation.rs (semantic checks, once, on the final values)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Profile-dependent values stay unset until read, so the profile can be
//!   chosen after parsing
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, PingConfig, SchedulerConfig, ServiceConfig,
    ServiceSection, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
