//! Request bodies and endpoint paths for the collection API

use beacon_util::DeviceId;
use serde::{Deserialize, Serialize};

use crate::Sample;

/// Path of the registration endpoint, relative to the base URL
pub const REGISTER_PATH: &str = "/devices/register";

/// Path of the submission endpoint, relative to the base URL
pub const SUBMIT_PATH: &str = "/locations/submit";

/// Body of `POST /devices/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub device_id: DeviceId,
    pub username: String,
    /// Explicit consent flag, always true for a registration the user asked for
    pub consent: bool,
}

impl RegisterRequest {
    pub fn new(device_id: DeviceId, username: impl Into<String>) -> Self {
        Self {
            device_id,
            username: username.into(),
            consent: true,
        }
    }
}

/// Body of `POST /locations/submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub device_id: DeviceId,
    pub locations: Vec<Sample>,
}

impl SubmitRequest {
    pub fn new(device_id: DeviceId, locations: Vec<Sample>) -> Self {
        Self {
            device_id,
            locations,
        }
    }
}
