//! Validated settings structures

use crate::schema::{RawAgentConfig, RawApiConfig, RawConfig, RawTelemetryAdapter};
use std::path::PathBuf;
use std::time::Duration;

/// Default seconds between collection ticks
pub const DEFAULT_COLLECT_INTERVAL_SECS: u64 = 120;

/// Default samples per sync request
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default cache cap before drop-oldest kicks in
pub const DEFAULT_MAX_CACHE_SIZE: usize = 100;

/// Default register/submit request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default reachability probe target
pub const DEFAULT_PROBE_URL: &str = "http://www.google.com";

/// Default reachability probe timeout
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Default IP geolocation endpoint
pub const DEFAULT_GEO_URL: &str = "http://ip-api.com/json/";

/// Default geolocation lookup timeout
pub const DEFAULT_GEO_TIMEOUT_SECS: u64 = 5;

/// Validated settings ready for use by the daemon
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub agent: AgentSettings,
    pub telemetry: TelemetrySettings,
    pub daemon: DaemonSettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            api: ApiSettings::from_raw(raw.api),
            agent: AgentSettings::from_raw(raw.agent),
            telemetry: TelemetrySettings::from_raw(raw.telemetry),
            daemon: DaemonSettings {
                data_dir: raw
                    .daemon
                    .data_dir
                    .unwrap_or_else(beacon_util::default_data_dir),
            },
        }
    }
}

/// Collection endpoint settings
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl ApiSettings {
    fn from_raw(raw: RawApiConfig) -> Self {
        Self {
            base_url: raw.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(
                raw.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        }
    }
}

/// Agent cadence and cache sizing
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub collect_interval: Duration,
    pub batch_size: usize,
    pub max_cache_size: usize,
    pub username: Option<String>,
}

impl AgentSettings {
    fn from_raw(raw: RawAgentConfig) -> Self {
        Self {
            collect_interval: Duration::from_secs(
                raw.collect_interval_secs
                    .unwrap_or(DEFAULT_COLLECT_INTERVAL_SECS),
            ),
            batch_size: raw.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            max_cache_size: raw.max_cache_size.unwrap_or(DEFAULT_MAX_CACHE_SIZE),
            username: raw.username,
        }
    }
}

/// Telemetry adapter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryAdapter {
    Linux,
    IpGeo,
    Static,
}

/// Telemetry adapter selection and probe targets
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub adapter: TelemetryAdapter,
    pub probe_url: String,
    pub probe_timeout: Duration,
    pub geo_url: String,
    pub geo_timeout: Duration,
}

impl TelemetrySettings {
    fn from_raw(raw: crate::schema::RawTelemetryConfig) -> Self {
        let adapter = match raw.adapter {
            Some(RawTelemetryAdapter::Linux) | None => TelemetryAdapter::Linux,
            Some(RawTelemetryAdapter::IpGeo) => TelemetryAdapter::IpGeo,
            Some(RawTelemetryAdapter::Static) => TelemetryAdapter::Static,
        };

        Self {
            adapter,
            probe_url: raw
                .probe_url
                .unwrap_or_else(|| DEFAULT_PROBE_URL.to_string()),
            probe_timeout: Duration::from_secs(
                raw.probe_timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS),
            ),
            geo_url: raw.geo_url.unwrap_or_else(|| DEFAULT_GEO_URL.to_string()),
            geo_timeout: Duration::from_secs(
                raw.geo_timeout_secs.unwrap_or(DEFAULT_GEO_TIMEOUT_SECS),
            ),
        }
    }
}

/// Daemon-level settings
#[derive(Debug, Clone)]
pub struct DaemonSettings {
    pub data_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let raw: RawConfig = toml::from_str(
            r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net/"
        "#,
        )
        .unwrap();

        let settings = Settings::from_raw(raw);
        assert_eq!(settings.agent.collect_interval, Duration::from_secs(120));
        assert_eq!(settings.agent.batch_size, 10);
        assert_eq!(settings.agent.max_cache_size, 100);
        assert_eq!(settings.api.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.telemetry.probe_timeout, Duration::from_secs(2));
        assert_eq!(settings.telemetry.geo_timeout, Duration::from_secs(5));
        assert_eq!(settings.telemetry.adapter, TelemetryAdapter::Linux);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let raw: RawConfig = toml::from_str(
            r#"
            config_version = 1

            [api]
            base_url = "https://collect.example.net/"
        "#,
        )
        .unwrap();

        let settings = Settings::from_raw(raw);
        assert_eq!(settings.api.base_url, "https://collect.example.net");
    }
}
