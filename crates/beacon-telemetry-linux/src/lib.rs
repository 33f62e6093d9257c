//! Native Linux telemetry adapter
//!
//! Battery percentage comes from the kernel's power-supply class under
//! `/sys/class/power_supply`; the location fix is delegated to the
//! IP-geolocation fallback, which is the best a machine without location
//! hardware can do.

mod battery;

pub use battery::*;

use async_trait::async_trait;
use beacon_api::{Coordinates, NetworkStatus};
use beacon_telemetry::{IpGeoTelemetry, TelemetryResult, TelemetrySource};

/// Telemetry adapter for Linux hosts
pub struct LinuxTelemetry {
    battery: BatteryReader,
    geo: IpGeoTelemetry,
}

impl LinuxTelemetry {
    /// Create an adapter reading the default sysfs tree
    pub fn new(geo: IpGeoTelemetry) -> Self {
        Self {
            battery: BatteryReader::system(),
            geo,
        }
    }

    /// Create an adapter reading a custom sysfs root (for testing)
    pub fn with_battery_reader(battery: BatteryReader, geo: IpGeoTelemetry) -> Self {
        Self { battery, geo }
    }
}

#[async_trait]
impl TelemetrySource for LinuxTelemetry {
    async fn location(&self) -> TelemetryResult<Coordinates> {
        self.geo.lookup().await
    }

    async fn battery_percent(&self) -> TelemetryResult<u8> {
        self.battery.capacity_percent()
    }

    async fn network_status(&self) -> NetworkStatus {
        self.geo.network_status().await
    }
}
