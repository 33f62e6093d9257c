//! Static stub adapter
//!
//! Reports fixed values. Used on headless hosts and in examples where no
//! real sensors (or network) exist.

use async_trait::async_trait;
use beacon_api::{Coordinates, NetworkStatus};

use crate::{FALLBACK_BATTERY_PERCENT, FALLBACK_COORDINATES, TelemetryResult, TelemetrySource};

/// Telemetry adapter with fixed readings
#[derive(Debug, Clone)]
pub struct StaticTelemetry {
    location: Coordinates,
    battery: u8,
    network: NetworkStatus,
}

impl StaticTelemetry {
    pub fn new(location: Coordinates, battery: u8, network: NetworkStatus) -> Self {
        Self {
            location,
            battery,
            network,
        }
    }
}

impl Default for StaticTelemetry {
    fn default() -> Self {
        Self::new(
            FALLBACK_COORDINATES,
            FALLBACK_BATTERY_PERCENT,
            NetworkStatus::Online,
        )
    }
}

#[async_trait]
impl TelemetrySource for StaticTelemetry {
    async fn location(&self) -> TelemetryResult<Coordinates> {
        Ok(self.location)
    }

    async fn battery_percent(&self) -> TelemetryResult<u8> {
        Ok(self.battery)
    }

    async fn network_status(&self) -> NetworkStatus {
        self.network
    }
}
