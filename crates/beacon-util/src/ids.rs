//! Device identity for beacond

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix for generated device identifiers
const DEVICE_ID_PREFIX: &str = "dev";

/// Number of hex characters taken from the generated UUID
const DEVICE_ID_HEX_LEN: usize = 8;

/// Opaque, installation-stable device identifier.
///
/// Generated once per installation (`dev` followed by 8 hex characters of a
/// random UUID) and persisted; every instance created against the same store
/// sees the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", DEVICE_ID_PREFIX, &hex[..DEVICE_ID_HEX_LEN]))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
