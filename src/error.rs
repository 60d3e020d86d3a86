//! Unified error types for Stowage.
//!
//! This module provides a clean error type that wraps the storage and view
//! layers' errors and presents a consistent interface to users.

use thiserror::Error;

pub use stowage_core::UnavailableReason;

/// All Stowage errors.
///
/// This is the canonical error type for operations on the [`Shell`](crate::Shell).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid key or namespace
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// The storage backend refused a write
    #[error("storage unavailable: {0}")]
    StorageUnavailable(UnavailableReason),

    /// A stored entry could not be decoded
    #[error("cannot deserialize entry {key:?}: {message}")]
    Deserialization {
        /// Key of the corrupt entry
        key: String,
        /// Decoder message
        message: String,
    },

    /// A value could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backing file is not a valid store image
    #[error("storage corruption: {0}")]
    Corruption(String),

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Template load, compile or render failure
    #[error("view error: {0}")]
    View(#[from] stowage_view::ViewError),

    /// No view mounted under this name
    #[error("no view mounted as {0:?}")]
    ViewNotFound(String),
}

/// Result type for Stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the backend refused a write.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::StorageUnavailable(_))
    }

    /// Check if a stored entry failed to decode.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Error::Deserialization { .. })
    }

    /// Check if a key was rejected.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Error::InvalidKey { .. })
    }
}

// Convert from storage-layer errors
impl From<stowage_core::Error> for Error {
    fn from(e: stowage_core::Error) -> Self {
        use stowage_core::Error as CoreError;
        match e {
            CoreError::InvalidKey { key, reason } => Error::InvalidKey { key, reason },
            CoreError::StorageUnavailable { reason } => Error::StorageUnavailable(reason),
            CoreError::Deserialization { key, message } => Error::Deserialization { key, message },
            CoreError::Serialization(msg) => Error::Serialization(msg),
            CoreError::Corruption(msg) => Error::Corruption(msg),
            CoreError::Config(msg) => Error::Config(msg),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
