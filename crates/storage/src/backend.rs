//! Backend trait and quota accounting
//!
//! A backend stores text under `(namespace, key)`. It knows nothing about
//! the values it holds; encoding lives one layer up in the typed store.
//!
//! Every backend enforces the same write policy, checked in this order:
//! 1. read-only access mode rejects the write
//! 2. a zero quota means storage is disabled
//! 3. the byte total after the write must fit in the quota

use stowage_core::{AccessMode, Error, Key, Namespace, Result, StoreConfig, UnavailableReason};

/// Bytes an entry occupies against the quota.
///
/// Counts key and stored text; namespace names are free.
#[inline]
pub fn entry_size(key: &str, text: &str) -> usize {
    key.len() + text.len()
}

/// Write policy for a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendOptions {
    /// Byte quota; `0` disables storage
    pub quota_bytes: usize,
    /// Read/write policy
    pub access_mode: AccessMode,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for BackendOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            quota_bytes: config.quota_bytes,
            access_mode: config.access_mode,
        }
    }
}

/// Byte accounting for one backend.
///
/// Not synchronized: callers hold their write lock across
/// [`Quota::admit`] and [`Quota::commit`].
#[derive(Debug)]
pub struct Quota {
    options: BackendOptions,
    used: usize,
}

impl Quota {
    /// Start accounting with `used` bytes already held.
    pub fn new(options: BackendOptions, used: usize) -> Self {
        Self { options, used }
    }

    /// Bytes currently held.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Configured policy.
    pub fn options(&self) -> BackendOptions {
        self.options
    }

    /// Check whether replacing an entry of `old` bytes with one of `new`
    /// bytes is allowed. Returns the byte total after the write.
    pub fn admit(&self, old: usize, new: usize) -> Result<usize> {
        if self.options.access_mode == AccessMode::ReadOnly {
            return Err(Error::unavailable(UnavailableReason::ReadOnly));
        }
        if self.options.quota_bytes == 0 {
            return Err(Error::unavailable(UnavailableReason::Disabled));
        }
        let requested = self.used.saturating_sub(old) + new;
        if requested > self.options.quota_bytes {
            return Err(Error::unavailable(UnavailableReason::QuotaExceeded {
                limit: self.options.quota_bytes,
                requested,
            }));
        }
        Ok(requested)
    }

    /// Record a total previously returned by [`Quota::admit`].
    pub fn commit(&mut self, total: usize) {
        self.used = total;
    }
}

/// Namespaced, synchronous, string-keyed text store.
///
/// Implementations must be safe to share between threads, but the typed
/// store above assumes no concurrent external writer.
pub trait StorageBackend: Send + Sync {
    /// Read the text stored under `key`, or `None` if absent.
    fn get(&self, namespace: &Namespace, key: &Key) -> Result<Option<String>>;

    /// Write `text` under `key`, replacing any prior entry.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the write policy rejects it or the
    /// medium fails. A rejected write leaves the prior entry in place.
    fn set(&self, namespace: &Namespace, key: &Key, text: String) -> Result<()>;

    /// Check whether an entry exists.
    fn contains(&self, namespace: &Namespace, key: &Key) -> Result<bool> {
        Ok(self.get(namespace, key)?.is_some())
    }

    /// Keys in `namespace`, sorted.
    fn keys(&self, namespace: &Namespace) -> Result<Vec<String>>;

    /// Number of entries in `namespace`.
    fn len(&self, namespace: &Namespace) -> Result<usize>;

    /// Bytes held across all namespaces.
    fn used_bytes(&self) -> usize;

    /// Write policy this backend enforces.
    fn options(&self) -> BackendOptions;

    /// Force pending data to the medium.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
