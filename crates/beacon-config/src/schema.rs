//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Collection endpoint settings
    pub api: RawApiConfig,

    /// Agent cadence and cache sizing
    #[serde(default)]
    pub agent: RawAgentConfig,

    /// Telemetry adapter selection
    #[serde(default)]
    pub telemetry: RawTelemetryConfig,

    /// Daemon-level settings
    #[serde(default)]
    pub daemon: RawDaemonConfig,
}

/// Collection endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawApiConfig {
    /// Base URL of the collection endpoint
    pub base_url: String,

    /// Timeout for register/submit requests, in seconds
    pub request_timeout_secs: Option<u64>,
}

/// Agent cadence and cache sizing
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAgentConfig {
    /// Seconds between collection ticks
    pub collect_interval_secs: Option<u64>,

    /// Samples submitted per sync request
    pub batch_size: Option<usize>,

    /// Maximum cached samples before drop-oldest kicks in
    pub max_cache_size: Option<usize>,

    /// Username submitted at registration (CLI can override)
    pub username: Option<String>,
}

/// Telemetry adapter selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTelemetryConfig {
    /// Adapter kind: "linux", "ip-geo", or "static"
    pub adapter: Option<RawTelemetryAdapter>,

    /// URL probed to decide online/offline
    pub probe_url: Option<String>,

    /// Reachability probe timeout, in seconds
    pub probe_timeout_secs: Option<u64>,

    /// IP geolocation endpoint used when no native fix is available
    pub geo_url: Option<String>,

    /// Geolocation lookup timeout, in seconds
    pub geo_timeout_secs: Option<u64>,
}

/// Telemetry adapter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawTelemetryAdapter {
    /// Native Linux adapter: sysfs battery, IP-geolocation location
    Linux,
    /// IP-geolocation only (no native sensors)
    IpGeo,
    /// Fixed fallback values (testing / headless hosts)
    Static,
}

/// Daemon-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDaemonConfig {
    /// Data directory for the persistent store
    pub data_dir: Option<PathBuf>,
}
