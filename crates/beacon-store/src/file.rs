//! File-based store implementation

use beacon_api::Sample;
use beacon_util::DeviceId;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Store, StoreResult};

/// File name holding the raw device identifier
const DEVICE_ID_FILE: &str = "device_id.txt";

/// File name holding the raw username
const USERNAME_FILE: &str = "username.txt";

/// File name holding the pending-sample cache (JSON array)
const CACHE_FILE: &str = "location_cache.json";

/// File-based store rooted at a data directory
pub struct FileStore {
    device_id_path: PathBuf,
    username_path: PathBuf,
    cache_path: PathBuf,
}

impl FileStore {
    /// Open or create a store rooted at the given directory
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;

        debug!(data_dir = %data_dir.display(), "Store opened");

        Ok(Self {
            device_id_path: data_dir.join(DEVICE_ID_FILE),
            username_path: data_dir.join(USERNAME_FILE),
            cache_path: data_dir.join(CACHE_FILE),
        })
    }

    /// Path of the cache file (for diagnostics)
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn read_trimmed(path: &Path) -> StoreResult<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

impl Store for FileStore {
    fn load_device_id(&self) -> StoreResult<Option<DeviceId>> {
        Ok(Self::read_trimmed(&self.device_id_path)?.map(DeviceId::from))
    }

    fn save_device_id(&self, id: &DeviceId) -> StoreResult<()> {
        std::fs::write(&self.device_id_path, id.as_str())?;
        debug!(device_id = %id, "Device identifier persisted");
        Ok(())
    }

    fn load_username(&self) -> StoreResult<Option<String>> {
        Self::read_trimmed(&self.username_path)
    }

    fn save_username(&self, username: &str) -> StoreResult<()> {
        std::fs::write(&self.username_path, username)?;
        Ok(())
    }

    fn load_cache(&self) -> StoreResult<Vec<Sample>> {
        if !self.cache_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.cache_path)?;
        match serde_json::from_str(&content) {
            Ok(samples) => Ok(samples),
            Err(e) => {
                // Corrupt cache is degraded to empty, never fatal
                warn!(
                    path = %self.cache_path.display(),
                    error = %e,
                    "Cache file unreadable, starting with an empty cache"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_cache(&self, samples: &[Sample]) -> StoreResult<()> {
        let json = serde_json::to_string(samples)?;
        std::fs::write(&self.cache_path, json)?;
        debug!(count = samples.len(), "Cache persisted");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        self.cache_path
            .parent()
            .is_some_and(|dir| dir.exists() && std::fs::metadata(dir).is_ok())
    }
}
