//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("api.base_url: {0}")]
    InvalidBaseUrl(String),

    #[error("agent.{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("agent.batch_size ({batch_size}) exceeds agent.max_cache_size ({max_cache_size})")]
    BatchExceedsCache {
        batch_size: usize,
        max_cache_size: usize,
    },

    #[error("telemetry.{field}: {message}")]
    TelemetryError {
        field: &'static str,
        message: String,
    },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_base_url(&config.api.base_url, &mut errors);

    if config.agent.collect_interval_secs == Some(0) {
        errors.push(ValidationError::ZeroValue {
            field: "collect_interval_secs",
        });
    }
    if config.agent.batch_size == Some(0) {
        errors.push(ValidationError::ZeroValue {
            field: "batch_size",
        });
    }
    if config.agent.max_cache_size == Some(0) {
        errors.push(ValidationError::ZeroValue {
            field: "max_cache_size",
        });
    }

    let batch_size = config.agent.batch_size.unwrap_or(crate::DEFAULT_BATCH_SIZE);
    let max_cache_size = config
        .agent
        .max_cache_size
        .unwrap_or(crate::DEFAULT_MAX_CACHE_SIZE);
    if batch_size > 0 && max_cache_size > 0 && batch_size > max_cache_size {
        errors.push(ValidationError::BatchExceedsCache {
            batch_size,
            max_cache_size,
        });
    }

    if let Some(url) = &config.telemetry.probe_url {
        if !is_http_url(url) {
            errors.push(ValidationError::TelemetryError {
                field: "probe_url",
                message: format!("'{url}' is not an absolute http(s) URL"),
            });
        }
    }
    if let Some(url) = &config.telemetry.geo_url {
        if !is_http_url(url) {
            errors.push(ValidationError::TelemetryError {
                field: "geo_url",
                message: format!("'{url}' is not an absolute http(s) URL"),
            });
        }
    }
    if config.telemetry.probe_timeout_secs == Some(0) {
        errors.push(ValidationError::TelemetryError {
            field: "probe_timeout_secs",
            message: "must be greater than zero".into(),
        });
    }
    if config.telemetry.geo_timeout_secs == Some(0) {
        errors.push(ValidationError::TelemetryError {
            field: "geo_timeout_secs",
            message: "must be greater than zero".into(),
        });
    }

    errors
}

fn validate_base_url(url: &str, errors: &mut Vec<ValidationError>) {
    if url.is_empty() {
        errors.push(ValidationError::InvalidBaseUrl("cannot be empty".into()));
    } else if !is_http_url(url) {
        errors.push(ValidationError::InvalidBaseUrl(format!(
            "'{url}' is not an absolute http(s) URL"
        )));
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(content: &str) -> RawConfig {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn valid_config_has_no_errors() {
        let config = raw(r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net"
        "#);

        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn empty_base_url_rejected() {
        let config = raw(r#"
            config_version = 1

            [api]
            base_url = ""
        "#);

        let errors = validate_config(&config);
        assert!(matches!(errors[0], ValidationError::InvalidBaseUrl(_)));
    }

    #[test]
    fn relative_base_url_rejected() {
        let config = raw(r#"
            config_version = 1

            [api]
            base_url = "collect.example.net"
        "#);

        let errors = validate_config(&config);
        assert!(matches!(errors[0], ValidationError::InvalidBaseUrl(_)));
    }

    #[test]
    fn zero_values_rejected() {
        let config = raw(r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net"

            [agent]
            collect_interval_secs = 0
            batch_size = 0
            max_cache_size = 0
        "#);

        let errors = validate_config(&config);
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::ZeroValue { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn batch_size_bounded_by_cache() {
        let config = raw(r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net"

            [agent]
            batch_size = 200
        "#);

        let errors = validate_config(&config);
        assert!(matches!(
            errors[0],
            ValidationError::BatchExceedsCache {
                batch_size: 200,
                max_cache_size: 100
            }
        ));
    }

    #[test]
    fn bad_probe_url_rejected() {
        let config = raw(r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net"

            [telemetry]
            probe_url = "not a url"
        "#);

        let errors = validate_config(&config);
        assert!(matches!(
            errors[0],
            ValidationError::TelemetryError { field: "probe_url", .. }
        ));
    }
}
