//! Storage layer for Stowage
//!
//! This crate implements the platform text store that typed stores sit on:
//! - [`StorageBackend`]: namespaced, synchronous, string-keyed text storage
//! - [`MemoryBackend`]: DashMap-sharded in-process backend, gone on drop
//! - [`FileBackend`]: single JSON image on disk, rewritten on every write
//! - [`Quota`]: byte accounting shared by both backends

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::{entry_size, BackendOptions, Quota, StorageBackend};
pub use file::FileBackend;
pub use memory::MemoryBackend;
