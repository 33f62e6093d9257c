//! Telemetry source capability for beacond
//!
//! This crate defines the interface between the agent core and whatever can
//! answer "where is the device, how full is the battery, is the network up".
//! The agent depends only on the [`TelemetrySource`] trait; concrete adapters
//! (native, IP-geolocation fallback, static stub, test mock) live alongside
//! it or in platform crates.

mod ip_geo;
mod mock;
mod probe;
mod static_adapter;
mod traits;

pub use ip_geo::*;
pub use mock::*;
pub use probe::*;
pub use static_adapter::*;
pub use traits::*;

use beacon_api::Coordinates;
use thiserror::Error;

/// Coordinate used when every location source fails
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    lat: -6.175,
    lng: 106.827,
};

/// Battery percentage reported when no battery sensor is available
pub const FALLBACK_BATTERY_PERCENT: u8 = 100;

/// Errors from telemetry adapters.
///
/// These never reach the agent's callers: [`TelemetrySource::sample`] absorbs
/// them into fallback values.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Sensor unavailable: {0}")]
    Unavailable(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Not supported by this adapter")]
    Unsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
