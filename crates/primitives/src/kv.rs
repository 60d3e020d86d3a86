//! KeyValueStore primitive
//!
//! Typed entries over a text backend. Values are encoded as JSON text on
//! the way in and decoded on the way out, so what comes back is
//! structurally equal to what went in, never the same object.
//!
//! ## Design
//!
//! KeyValueStore is a stateless facade over a shared [`StorageBackend`]:
//! - `create_item` / `get_item`: typed write and read
//! - Namespace isolation: each store writes into exactly one namespace
//! - No deletion and no expiry; entries are only created or overwritten
//!
//! ## Errors
//!
//! | Condition | Error |
//! |-----------|-------|
//! | Empty, oversized or NUL-containing key | `InvalidKey` |
//! | Backend refused the write | `StorageUnavailable` |
//! | Stored text does not decode | `Deserialization` |
//! | Value has no JSON form (e.g. NaN) | `Serialization` |
//!
//! A missing entry is `Ok(None)`; corrupt text is never reported as missing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use crate::finite;
use stowage_core::{Error, Key, Namespace, Result, Value};
use stowage_storage::{MemoryBackend, StorageBackend};
use tracing::{debug, trace};

/// Typed key/value store bound to one namespace of a backend.
///
/// # Example
///
/// ```
/// use stowage_primitives::KeyValueStore;
/// use serde_json::json;
///
/// let store = KeyValueStore::ephemeral();
/// store.create_item("test", &json!({"test": "test"})).unwrap();
///
/// let value: Option<serde_json::Value> = store.get_item("test").unwrap();
/// assert_eq!(value.unwrap().to_string(), r#"{"test":"test"}"#);
/// ```
#[derive(Clone)]
pub struct KeyValueStore {
    backend: Arc<dyn StorageBackend>,
    namespace: Namespace,
}

impl KeyValueStore {
    /// Store over `backend` in the default namespace.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_namespace(backend, Namespace::default())
    }

    /// Store over `backend` in `namespace`.
    pub fn with_namespace(backend: Arc<dyn StorageBackend>, namespace: Namespace) -> Self {
        Self { backend, namespace }
    }

    /// Store over a fresh in-memory backend.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Namespace this store reads and writes.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Backend this store sits on.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Encode `value` and store it under `key`, replacing any prior entry.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if `key` is empty
    /// - `Serialization` if `value` has no JSON form, including any
    ///   `NaN` or infinite float inside it
    /// - `StorageUnavailable` if the backend refuses the write
    pub fn create_item<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = Key::new(key)?;
        finite::check(value).map_err(|e| Error::Serialization(e.to_string()))?;
        let text = serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?;
        let bytes = text.len();
        self.backend.set(&self.namespace, &key, text)?;
        debug!(namespace = %self.namespace, %key, bytes, "create_item");
        Ok(())
    }

    /// Decode the entry stored under `key`.
    ///
    /// Returns `None` if no entry exists.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if `key` is empty
    /// - `Deserialization` if the stored text is not valid for `T`
    pub fn get_item<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let key = Key::new(key)?;
        trace!(namespace = %self.namespace, %key, "get_item");
        match self.backend.get(&self.namespace, &key)? {
            Some(text) => decode(&key, &text).map(Some),
            None => Ok(None),
        }
    }

    /// Decode the entry under `key` as a dynamic [`Value`].
    pub fn get_value(&self, key: &str) -> Result<Option<Value>> {
        self.get_item(key)
    }

    /// Check whether an entry exists, without decoding it.
    pub fn contains_item(&self, key: &str) -> Result<bool> {
        let key = Key::new(key)?;
        self.backend.contains(&self.namespace, &key)
    }

    /// Keys in this store's namespace, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys(&self.namespace)
    }

    /// Number of entries in this store's namespace.
    pub fn len(&self) -> Result<usize> {
        self.backend.len(&self.namespace)
    }

    /// Whether this store's namespace holds no entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Force pending backend data to its medium.
    pub fn flush(&self) -> Result<()> {
        self.backend.flush()
    }
}

fn decode<T: DeserializeOwned>(key: &Key, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::Deserialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("namespace", &self.namespace)
            .field("used_bytes", &self.backend.used_bytes())
            .finish()
    }
}
