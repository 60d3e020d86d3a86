//! High-level primitives for Stowage
//!
//! - [`KeyValueStore`]: typed entries over any [`StorageBackend`]

#![warn(missing_docs)]
#![warn(clippy::all)]

mod finite;
pub mod kv;

pub use kv::KeyValueStore;
pub use stowage_storage::StorageBackend;
