//! IP-geolocation fallback adapter
//!
//! Resolves a coarse location from the device's public IP. Used directly on
//! hosts without location hardware and as the fallback leg of the native
//! adapter. Battery is not observable this way, so battery reads report
//! `Unsupported` and the trait's fallback applies.

use async_trait::async_trait;
use beacon_api::{Coordinates, NetworkStatus};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{ReachabilityProbe, TelemetryError, TelemetryResult, TelemetrySource};

/// Response shape of the geolocation endpoint
#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Telemetry adapter backed by an IP-geolocation service
pub struct IpGeoTelemetry {
    client: Client,
    geo_url: String,
    probe: ReachabilityProbe,
}

impl IpGeoTelemetry {
    /// Create an adapter for the given geolocation endpoint
    pub fn new(geo_url: impl Into<String>, geo_timeout: Duration, probe: ReachabilityProbe) -> Self {
        let client = Client::builder()
            .timeout(geo_timeout)
            .connect_timeout(geo_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            geo_url: geo_url.into(),
            probe,
        }
    }

    /// Look up the device location from its public IP
    pub async fn lookup(&self) -> TelemetryResult<Coordinates> {
        let response = self
            .client
            .get(&self.geo_url)
            .send()
            .await
            .map_err(|e| TelemetryError::Lookup(format!("Geolocation request failed: {e}")))?;

        let geo: GeoResponse = response
            .json()
            .await
            .map_err(|e| TelemetryError::Lookup(format!("Failed to parse response: {e}")))?;

        if geo.status != "success" {
            return Err(TelemetryError::Lookup(format!(
                "Geolocation status '{}'",
                geo.status
            )));
        }

        match (geo.lat, geo.lon) {
            (Some(lat), Some(lon)) => {
                debug!(lat, lon, "IP geolocation fix");
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(TelemetryError::Lookup(
                "Geolocation response missing coordinates".into(),
            )),
        }
    }
}

#[async_trait]
impl TelemetrySource for IpGeoTelemetry {
    async fn location(&self) -> TelemetryResult<Coordinates> {
        self.lookup().await
    }

    async fn battery_percent(&self) -> TelemetryResult<u8> {
        Err(TelemetryError::Unsupported)
    }

    async fn network_status(&self) -> NetworkStatus {
        NetworkStatus::from_reachable(self.probe.is_reachable().await)
    }
}
