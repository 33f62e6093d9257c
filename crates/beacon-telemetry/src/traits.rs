//! Telemetry source trait

use async_trait::async_trait;
use beacon_api::{Coordinates, NetworkStatus, Sample};
use tracing::warn;

use crate::{FALLBACK_BATTERY_PERCENT, FALLBACK_COORDINATES, TelemetryResult};

/// Telemetry source trait - implemented by platform-specific adapters
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Get the current location fix
    async fn location(&self) -> TelemetryResult<Coordinates>;

    /// Get the current battery percentage (0-100)
    async fn battery_percent(&self) -> TelemetryResult<u8>;

    /// Get the current network reachability.
    ///
    /// This is infallible: an adapter that cannot probe reports `Offline`.
    async fn network_status(&self) -> NetworkStatus;

    /// Collect one timestamped sample.
    ///
    /// Sensor failures are absorbed here: a failed location falls back to
    /// [`FALLBACK_COORDINATES`], a failed battery read to
    /// [`FALLBACK_BATTERY_PERCENT`]. This call never fails outward.
    async fn sample(&self) -> Sample {
        let location = match self.location().await {
            Ok(location) => location,
            Err(e) => {
                warn!(error = %e, "Location unavailable, using fallback coordinate");
                FALLBACK_COORDINATES
            }
        };

        let battery = match self.battery_percent().await {
            Ok(pct) => pct.min(100),
            Err(e) => {
                warn!(error = %e, "Battery level unavailable, using fallback");
                FALLBACK_BATTERY_PERCENT
            }
        };

        let network = self.network_status().await;

        Sample::new(beacon_util::now(), location, battery, network)
    }
}
