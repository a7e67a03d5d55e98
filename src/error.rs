//! Error types for MemStorage
//!
//! Every failure is surfaced to the immediate caller; nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::area::AreaKind;

/// Result type alias using StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

/// Unified error type for MemStorage operations
#[derive(Debug, Error)]
pub enum StorageError {
    // -------------------------------------------------------------------------
    // Initialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to create storage directory {}: {source}", .path.display())]
    Initialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid application name: {0:?}")]
    InvalidAppName(String),

    // -------------------------------------------------------------------------
    // Entry Errors
    // -------------------------------------------------------------------------
    #[error("The key {key} doesn't exist")]
    KeyNotFound { key: String },

    #[error("The key {key} already exists")]
    KeyAlreadyExists { key: String },

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Quota Errors
    // -------------------------------------------------------------------------
    #[error("Exceeds {area} memory limit ({used} of {ceiling} bytes used)")]
    CapacityExceeded {
        area: AreaKind,
        used: u64,
        ceiling: u64,
    },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn not_found(key: &str) -> Self {
        StorageError::KeyNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn already_exists(key: &str) -> Self {
        StorageError::KeyAlreadyExists {
            key: key.to_string(),
        }
    }

    /// True for a read, delete or append against an absent key
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::KeyNotFound { .. })
    }

    /// True for a create-only write against a present key
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StorageError::KeyAlreadyExists { .. })
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, StorageError::CapacityExceeded { .. })
    }
}
