//! Wire types for the beacond collection protocol
//!
//! This crate defines the stable JSON surface between the agent and the
//! collection endpoint:
//! - Telemetry samples
//! - Registration and submission request bodies
//! - Endpoint paths

mod protocol;
mod types;

pub use protocol::*;
pub use types::*;
