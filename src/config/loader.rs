//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::service::ServiceProfile;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
///
/// `profile` overrides the profile named in the document, as the command
/// line does.
pub fn parse_config(
    content: &str,
    profile: Option<ServiceProfile>,
) -> Result<ServiceConfig, ConfigError> {
    let config = parse_unvalidated(content, profile)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(
    path: &Path,
    profile: Option<ServiceProfile>,
) -> Result<ServiceConfig, ConfigError> {
    let config = read_config(path, profile)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read configuration from a TOML file without validating it.
///
/// For callers that apply further overrides and validate the result.
pub fn read_config(
    path: &Path,
    profile: Option<ServiceProfile>,
) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_unvalidated(&content, profile)
}

fn parse_unvalidated(
    content: &str,
    profile: Option<ServiceProfile>,
) -> Result<ServiceConfig, ConfigError> {
    let mut config: ServiceConfig = toml::from_str(content)?;
    if let Some(profile) = profile {
        config.service.profile = profile;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_profile_override_wins() {
        let config = parse_config(
            "[service]\nprofile = \"order\"\n",
            Some(ServiceProfile::Payment),
        )
        .unwrap();
        assert_eq!(config.profile(), ServiceProfile::Payment);
        assert_eq!(config.scheduler_interval(), Duration::from_secs(4));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config("[listener\nbind_address = 1", None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config(
            "[timeouts]\nrequest_secs = 0\n[scheduler]\ninterval_secs = 0\n",
            None,
        )
        .unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("request_secs"));
        assert!(msg.contains("interval_secs"));
    }

    #[test]
    fn test_bundled_payment_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/payment-service.toml");
        let config = load_config(&path, None).unwrap();
        assert_eq!(config.profile(), ServiceProfile::Payment);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
        assert_eq!(config.scheduler_interval(), Duration::from_secs(4));
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_read_config_skips_validation() {
        let path = std::env::temp_dir().join(format!("scaffold-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[listener]\nbind_address = \"localhost\"\n").unwrap();

        let config = read_config(&path, None).unwrap();
        assert_eq!(config.listener.bind_address, "localhost");
        assert!(matches!(
            load_config(&path, None).unwrap_err(),
            ConfigError::Validation(_)
        ));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/service.toml"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
