//! Shared utilities for beacond
//!
//! This crate provides:
//! - The `DeviceId` identity type
//! - Wall-clock time helper
//! - Default data and log directories

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
