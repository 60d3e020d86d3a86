//! Error types for Stowage storage operations
//!
//! Absence of an entry is never an error: lookups return `Ok(None)`.
//! Everything here is surfaced synchronously to the immediate caller,
//! without retries or a fallback tier.

use std::fmt;
use thiserror::Error;

/// Why a backend refused a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The write would push the backend past its byte quota
    QuotaExceeded {
        /// Configured quota in bytes
        limit: usize,
        /// Bytes the backend would hold after the write
        requested: usize,
    },
    /// Storage is switched off (zero quota)
    Disabled,
    /// The backend was opened read-only
    ReadOnly,
    /// The underlying medium failed
    Io(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::QuotaExceeded { limit, requested } => {
                write!(f, "quota exceeded: {} > {} bytes", requested, limit)
            }
            UnavailableReason::Disabled => write!(f, "storage disabled"),
            UnavailableReason::ReadOnly => write!(f, "storage is read-only"),
            UnavailableReason::Io(msg) => write!(f, "I/O failure: {}", msg),
        }
    }
}

/// Errors raised by keys, configuration and storage backends.
#[derive(Debug, Error)]
pub enum Error {
    /// Key failed validation
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// The backend rejected a write
    #[error("storage unavailable: {reason}")]
    StorageUnavailable {
        /// What made the backend refuse
        reason: UnavailableReason,
    },

    /// Stored text under `key` could not be decoded
    #[error("cannot deserialize entry {key:?}: {message}")]
    Deserialization {
        /// Key whose stored text is corrupt
        key: String,
        /// Decoder message
        message: String,
    },

    /// A value could not be encoded as text
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A backing file exists but is not a valid store image
    #[error("corruption: {0}")]
    Corruption(String),

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for core and storage operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a `StorageUnavailable` error.
    pub fn unavailable(reason: UnavailableReason) -> Self {
        Error::StorageUnavailable { reason }
    }

    /// Check if the backend refused a write.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::StorageUnavailable { .. })
    }

    /// Check if stored data failed to decode.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Error::Deserialization { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::unavailable(UnavailableReason::Io(e.to_string()))
    }
}
