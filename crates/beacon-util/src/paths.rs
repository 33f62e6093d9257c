//! Default paths for beacond components
//!
//! Paths are user-writable by default (no root required):
//! - Data: `$XDG_DATA_HOME/beacond` or `~/.local/share/beacond`
//! - Logs: `$XDG_STATE_HOME/beacond` or `~/.local/state/beacond`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const BEACON_DATA_DIR_ENV: &str = "BEACON_DATA_DIR";

/// Application subdirectory name
const APP_DIR: &str = "beacond";

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$BEACON_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/beacond` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/beacond` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(BEACON_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking BEACON_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Get the default log directory.
///
/// Order of precedence:
/// 1. `$XDG_STATE_HOME/beacond` (if XDG_STATE_HOME is set)
/// 2. `~/.local/state/beacond` (fallback)
pub fn default_log_dir() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(state_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("logs")
}

/// Default config file path: `~/.config/beacond/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join("config.toml");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml");
    }

    PathBuf::from("/etc").join(APP_DIR).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_contains_beacond() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("beacond"));
    }

    #[test]
    fn log_dir_contains_beacond() {
        let path = default_log_dir();
        assert!(path.to_string_lossy().contains("beacond"));
    }

    #[test]
    fn config_path_is_toml() {
        let path = default_config_path();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
