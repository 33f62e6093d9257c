//! Persistence layer for beacond
//!
//! Provides:
//! - Device identity (read-if-exists-else-create)
//! - Username persistence
//! - The pending-sample cache, mirrored to disk after every mutation
//!
//! The backing format is intentionally plain: one text file per value and a
//! JSON array for the cache, so an installation can be inspected or repaired
//! with nothing but a text editor.

mod file;
mod memory;
mod traits;

pub use file::*;
pub use memory::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
