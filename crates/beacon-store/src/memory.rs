//! In-memory store (for testing)

use beacon_api::Sample;
use beacon_util::DeviceId;
use std::sync::Mutex;

use crate::{Store, StoreResult};

#[derive(Default)]
struct Inner {
    device_id: Option<DeviceId>,
    username: Option<String>,
    cache: Vec<Sample>,
}

/// In-memory store, used by unit tests that don't care about the file layout
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_device_id(&self) -> StoreResult<Option<DeviceId>> {
        Ok(self.inner.lock().unwrap().device_id.clone())
    }

    fn save_device_id(&self, id: &DeviceId) -> StoreResult<()> {
        self.inner.lock().unwrap().device_id = Some(id.clone());
        Ok(())
    }

    fn load_username(&self) -> StoreResult<Option<String>> {
        Ok(self.inner.lock().unwrap().username.clone())
    }

    fn save_username(&self, username: &str) -> StoreResult<()> {
        self.inner.lock().unwrap().username = Some(username.to_string());
        Ok(())
    }

    fn load_cache(&self) -> StoreResult<Vec<Sample>> {
        Ok(self.inner.lock().unwrap().cache.clone())
    }

    fn save_cache(&self, samples: &[Sample]) -> StoreResult<()> {
        self.inner.lock().unwrap().cache = samples.to_vec();
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load_device_id().unwrap().is_none());

        let id = DeviceId::generate();
        store.save_device_id(&id).unwrap();
        assert_eq!(store.load_device_id().unwrap(), Some(id));

        store.save_username("bob").unwrap();
        assert_eq!(store.load_username().unwrap(), Some("bob".to_string()));
    }
}
