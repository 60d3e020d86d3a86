//! Store configuration
//!
//! [`StoreConfig`] controls how a store is opened: which namespace it writes
//! into, how many bytes the backend may hold, whether writes are allowed,
//! and where a file-backed store lives.
//!
//! Configuration can be built in code or read from TOML:
//!
//! ```toml
//! namespace = "app"
//! quota_bytes = 1048576
//! access_mode = "read_only"
//! path = "./data/app.json"
//! ```

use crate::error::{Error, Result};
use crate::types::Namespace;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default backend quota (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Controls whether the store allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Reads and writes
    #[default]
    ReadWrite,
    /// Reads only; writes fail with `StorageUnavailable`
    ReadOnly,
}

/// Options for opening a store.
///
/// ```
/// use stowage_core::{AccessMode, StoreConfig};
///
/// let config = StoreConfig::new()
///     .namespace("app")
///     .quota_bytes(64 * 1024)
///     .access_mode(AccessMode::ReadOnly);
/// assert_eq!(config.namespace, "app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Namespace entries are written into
    pub namespace: String,
    /// Byte quota for the backend; `0` disables storage
    pub quota_bytes: usize,
    /// Read/write policy
    pub access_mode: AccessMode,
    /// Backing file for a file-backed store
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the byte quota.
    pub fn quota_bytes(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Set the access mode.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the backing file path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoreConfig =
            toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Validated namespace.
    pub fn namespace_id(&self) -> Result<Namespace> {
        Namespace::new(self.namespace.clone())
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.namespace_id().map(|_| ())
    }

    /// Whether writes are rejected outright.
    pub fn is_read_only(&self) -> bool {
        self.access_mode == AccessMode::ReadOnly
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            access_mode: AccessMode::ReadWrite,
            path: None,
        }
    }
}
