//! Core types for Stowage
//!
//! This crate defines the vocabulary shared by every other Stowage crate:
//! - [`Key`]: validated user key for a stored entry
//! - [`Namespace`]: isolation scope inside a storage backend
//! - [`StoreConfig`] and [`AccessMode`]: how a store is opened
//! - [`Error`] and [`UnavailableReason`]: the error taxonomy
//!
//! Values crossing the storage boundary are plain `serde_json` values,
//! re-exported here as [`Value`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{AccessMode, StoreConfig, DEFAULT_NAMESPACE, DEFAULT_QUOTA_BYTES};
pub use error::{Error, Result, UnavailableReason};
pub use types::{Key, Namespace, MAX_KEY_LEN};

/// Dynamic value stored in and read back from a store.
pub type Value = serde_json::Value;
