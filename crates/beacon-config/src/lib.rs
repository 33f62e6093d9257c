//! Configuration parsing and validation for beacond
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Agent cadence, batching, and cache sizing
//! - Collection endpoint and telemetry adapter selection
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    // Check version
    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    // Validate
    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    // Convert to settings
    Ok(Settings::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net"
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.api.base_url, "https://collect.example.net");
        assert_eq!(settings.agent.batch_size, 10);
        assert_eq!(settings.agent.max_cache_size, 100);
        assert_eq!(settings.agent.collect_interval, Duration::from_secs(120));
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99

            [api]
            base_url = "https://collect.example.net"
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_batch_larger_than_cache() {
        let config = r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net"

            [agent]
            batch_size = 50
            max_cache_size = 20
        "#;

        let result = parse_config(config);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed { .. })
        ));
    }
}
