//! Telemetry sample types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Network reachability at collection time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    Online,
    Offline,
}

impl NetworkStatus {
    /// Map a reachability probe result to a status
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            NetworkStatus::Online
        } else {
            NetworkStatus::Offline
        }
    }
}

/// A location fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One telemetry reading, immutable once created.
///
/// The field names are fixed by the wire format: each sample travels as
/// `{timestamp, lat, lng, battery, network}`, with the timestamp as an
/// ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Local>,
    pub lat: f64,
    pub lng: f64,
    /// Battery percentage, 0-100
    pub battery: u8,
    pub network: NetworkStatus,
}

impl Sample {
    pub fn new(
        timestamp: DateTime<Local>,
        location: Coordinates,
        battery: u8,
        network: NetworkStatus,
    ) -> Self {
        Self {
            timestamp,
            lat: location.lat,
            lng: location.lng,
            battery,
            network,
        }
    }

    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}
