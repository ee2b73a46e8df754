//! Error types for the store/storage boundary.
//!
//! The computation layer itself never fails: unresolvable references are
//! dropped from derived results and empty pools divide to zero. Errors
//! only arise where data is mutated or hits disk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("no home directory available to resolve the data path")]
    NoHomeDir,
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
