//! Mock telemetry source for testing

use async_trait::async_trait;
use beacon_api::{Coordinates, NetworkStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::{TelemetryError, TelemetryResult, TelemetrySource};

/// Mock telemetry source for unit/integration testing
pub struct MockTelemetry {
    location: Mutex<Coordinates>,
    battery: Mutex<u8>,
    network: Mutex<NetworkStatus>,
    samples_taken: AtomicU64,

    /// Configure location reads to fail
    pub fail_location: Arc<Mutex<bool>>,

    /// Configure battery reads to fail
    pub fail_battery: Arc<Mutex<bool>>,
}

impl MockTelemetry {
    pub fn new(location: Coordinates, battery: u8, network: NetworkStatus) -> Self {
        Self {
            location: Mutex::new(location),
            battery: Mutex::new(battery),
            network: Mutex::new(network),
            samples_taken: AtomicU64::new(0),
            fail_location: Arc::new(Mutex::new(false)),
            fail_battery: Arc::new(Mutex::new(false)),
        }
    }

    /// Change the reported battery level
    pub fn set_battery(&self, pct: u8) {
        *self.battery.lock().unwrap() = pct;
    }

    /// Change the reported network status
    pub fn set_network(&self, status: NetworkStatus) {
        *self.network.lock().unwrap() = status;
    }

    /// Number of samples collected so far
    pub fn samples_taken(&self) -> u64 {
        self.samples_taken.load(Ordering::SeqCst)
    }
}

impl Default for MockTelemetry {
    fn default() -> Self {
        Self::new(Coordinates::new(48.8566, 2.3522), 75, NetworkStatus::Online)
    }
}

#[async_trait]
impl TelemetrySource for MockTelemetry {
    async fn location(&self) -> TelemetryResult<Coordinates> {
        self.samples_taken.fetch_add(1, Ordering::SeqCst);

        if *self.fail_location.lock().unwrap() {
            return Err(TelemetryError::Unavailable("Mock location failure".into()));
        }
        Ok(*self.location.lock().unwrap())
    }

    async fn battery_percent(&self) -> TelemetryResult<u8> {
        if *self.fail_battery.lock().unwrap() {
            return Err(TelemetryError::Unavailable("Mock battery failure".into()));
        }
        Ok(*self.battery.lock().unwrap())
    }

    async fn network_status(&self) -> NetworkStatus {
        *self.network.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FALLBACK_BATTERY_PERCENT, FALLBACK_COORDINATES};

    #[tokio::test]
    async fn mock_reports_configured_values() {
        let mock = MockTelemetry::default();
        let sample = mock.sample().await;

        assert_eq!(sample.battery, 75);
        assert_eq!(sample.network, NetworkStatus::Online);
        assert_eq!(mock.samples_taken(), 1);
    }

    #[tokio::test]
    async fn mock_failures_fall_back() {
        let mock = MockTelemetry::default();
        *mock.fail_location.lock().unwrap() = true;
        *mock.fail_battery.lock().unwrap() = true;

        let sample = mock.sample().await;
        assert_eq!(sample.location(), FALLBACK_COORDINATES);
        assert_eq!(sample.battery, FALLBACK_BATTERY_PERCENT);
    }
}
