//! Agent engine for beacond
//!
//! This crate owns the sync/cache core:
//! - The bounded, persisted sample cache (drop-oldest on overflow)
//! - Batch submission to the collection endpoint
//! - The sticky revocation flag
//! - The start/stop state machine around registration

mod agent;
mod remote;

pub use agent::*;
pub use remote::*;
