//! Store trait definitions

use beacon_api::Sample;
use beacon_util::DeviceId;

use crate::StoreResult;

/// Main store trait
pub trait Store: Send + Sync {
    // Device identity

    /// Load the persisted device identifier, if one exists
    fn load_device_id(&self) -> StoreResult<Option<DeviceId>>;

    /// Persist the device identifier
    fn save_device_id(&self, id: &DeviceId) -> StoreResult<()>;

    // Username

    /// Load the persisted username, if one exists
    fn load_username(&self) -> StoreResult<Option<String>>;

    /// Persist the username
    fn save_username(&self, username: &str) -> StoreResult<()>;

    // Sample cache

    /// Load the pending-sample cache.
    ///
    /// A missing or unreadable cache file is not an error: implementations
    /// return an empty cache so a corrupt file never blocks startup.
    fn load_cache(&self) -> StoreResult<Vec<Sample>>;

    /// Persist the pending-sample cache, replacing the previous contents
    fn save_cache(&self, samples: &[Sample]) -> StoreResult<()>;

    // Health

    /// Check if the store is writable
    fn is_healthy(&self) -> bool;
}
