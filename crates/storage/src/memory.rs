//! In-process backend
//!
//! DashMap keyed by namespace, FxHashMap within. Reads only touch the
//! namespace's shard. Writes are serialized by a single lock so the quota
//! check and the insert happen as one step.

use crate::backend::{entry_size, BackendOptions, Quota, StorageBackend};
use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use stowage_core::{Key, Namespace, Result};
use tracing::{debug, trace};

/// Per-namespace entries.
#[derive(Debug, Default)]
struct Shard {
    data: FxHashMap<String, String>,
}

/// Ephemeral backend: no files, everything is lost on drop.
///
/// # Example
///
/// ```
/// use stowage_core::{Key, Namespace};
/// use stowage_storage::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new();
/// let ns = Namespace::default();
/// let key = Key::new("greeting").unwrap();
///
/// backend.set(&ns, &key, "\"hi\"".to_string()).unwrap();
/// assert_eq!(backend.get(&ns, &key).unwrap().as_deref(), Some("\"hi\""));
/// ```
pub struct MemoryBackend {
    shards: DashMap<Namespace, Shard>,
    /// Held across admit + insert
    quota: Mutex<Quota>,
}

impl MemoryBackend {
    /// Backend with default options.
    pub fn new() -> Self {
        Self::with_options(BackendOptions::default())
    }

    /// Backend with an explicit write policy.
    pub fn with_options(options: BackendOptions) -> Self {
        debug!(
            quota_bytes = options.quota_bytes,
            access_mode = ?options.access_mode,
            "opened memory backend"
        );
        Self {
            shards: DashMap::new(),
            quota: Mutex::new(Quota::new(options, 0)),
        }
    }

    /// Number of namespaces holding data.
    pub fn namespace_count(&self) -> usize {
        self.shards.len()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, namespace: &Namespace, key: &Key) -> Result<Option<String>> {
        trace!(%namespace, %key, "memory get");
        Ok(self
            .shards
            .get(namespace)
            .and_then(|shard| shard.data.get(key.as_str()).cloned()))
    }

    fn set(&self, namespace: &Namespace, key: &Key, text: String) -> Result<()> {
        let mut quota = self.quota.lock();

        // Read guard must be released before `entry` locks the same shard
        let old = self
            .shards
            .get(namespace)
            .and_then(|shard| {
                shard
                    .data
                    .get(key.as_str())
                    .map(|prev| entry_size(key.as_str(), prev))
            })
            .unwrap_or(0);
        let new = entry_size(key.as_str(), &text);
        let total = quota.admit(old, new)?;

        debug!(%namespace, %key, bytes = text.len(), "memory set");
        self.shards
            .entry(namespace.clone())
            .or_default()
            .data
            .insert(key.as_str().to_string(), text);
        quota.commit(total);
        Ok(())
    }

    fn contains(&self, namespace: &Namespace, key: &Key) -> Result<bool> {
        Ok(self
            .shards
            .get(namespace)
            .map(|shard| shard.data.contains_key(key.as_str()))
            .unwrap_or(false))
    }

    fn keys(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .shards
            .get(namespace)
            .map(|shard| shard.data.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }

    fn len(&self, namespace: &Namespace) -> Result<usize> {
        Ok(self
            .shards
            .get(namespace)
            .map(|shard| shard.data.len())
            .unwrap_or(0))
    }

    fn used_bytes(&self) -> usize {
        self.quota.lock().used()
    }

    fn options(&self) -> BackendOptions {
        self.quota.lock().options()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("namespace_count", &self.namespace_count())
            .field("used_bytes", &self.used_bytes())
            .finish()
    }
}
