//! File-backed backend
//!
//! The whole backend is one JSON document:
//!
//! ```json
//! {"<namespace>": {"<key>": "<stored text>"}}
//! ```
//!
//! Every accepted write rewrites the image to a sibling `.tmp` file, syncs
//! it, then renames it over the original, so a crash mid-write leaves either
//! the old or the new image on disk, never a torn one.

use crate::backend::{entry_size, BackendOptions, Quota, StorageBackend};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use stowage_core::{Error, Key, Namespace, Result};
use tracing::{debug, trace};

type Image = BTreeMap<String, BTreeMap<String, String>>;

struct FileState {
    image: Image,
    quota: Quota,
}

/// Backend persisted to a single JSON file.
pub struct FileBackend {
    path: PathBuf,
    state: RwLock<FileState>,
}

impl FileBackend {
    /// Open the backend at `path` with default options.
    ///
    /// A missing file is an empty backend; it is created on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, BackendOptions::default())
    }

    /// Open the backend at `path` with an explicit write policy.
    ///
    /// # Errors
    ///
    /// - `Corruption` if the file exists but is not a store image
    /// - `StorageUnavailable` if the file cannot be read
    pub fn open_with_options(path: impl AsRef<Path>, options: BackendOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let image = load_image(&path)?;
        let used = image
            .values()
            .flat_map(|entries| entries.iter())
            .map(|(k, v)| entry_size(k, v))
            .sum();

        debug!(
            path = %path.display(),
            namespaces = image.len(),
            used_bytes = used,
            "opened file backend"
        );

        Ok(Self {
            path,
            state: RwLock::new(FileState {
                image,
                quota: Quota::new(options, used),
            }),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_image(path: &Path) -> Result<Image> {
    if !path.exists() {
        return Ok(Image::new());
    }
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Image::new());
    }
    serde_json::from_str(&text)
        .map_err(|e| Error::Corruption(format!("{}: {}", path.display(), e)))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn persist(path: &Path, image: &Image) -> Result<()> {
    let text = serde_json::to_string(image).map_err(|e| Error::Serialization(e.to_string()))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)?;
    Ok(())
}

impl StorageBackend for FileBackend {
    fn get(&self, namespace: &Namespace, key: &Key) -> Result<Option<String>> {
        trace!(%namespace, %key, "file get");
        let state = self.state.read();
        Ok(state
            .image
            .get(namespace.as_str())
            .and_then(|entries| entries.get(key.as_str()).cloned()))
    }

    fn set(&self, namespace: &Namespace, key: &Key, text: String) -> Result<()> {
        let mut state = self.state.write();

        let previous = state
            .image
            .get(namespace.as_str())
            .and_then(|entries| entries.get(key.as_str()).cloned());
        let old = previous
            .as_deref()
            .map(|prev| entry_size(key.as_str(), prev))
            .unwrap_or(0);
        let new = entry_size(key.as_str(), &text);
        let total = state.quota.admit(old, new)?;

        let bytes = text.len();
        state
            .image
            .entry(namespace.as_str().to_string())
            .or_default()
            .insert(key.as_str().to_string(), text);

        if let Err(e) = persist(&self.path, &state.image) {
            // Memory must keep matching disk
            let entries = state.image.entry(namespace.as_str().to_string()).or_default();
            match previous {
                Some(prev) => {
                    entries.insert(key.as_str().to_string(), prev);
                }
                None => {
                    entries.remove(key.as_str());
                    if entries.is_empty() {
                        state.image.remove(namespace.as_str());
                    }
                }
            }
            return Err(e);
        }

        debug!(%namespace, %key, bytes, path = %self.path.display(), "file set");
        state.quota.commit(total);
        Ok(())
    }

    fn contains(&self, namespace: &Namespace, key: &Key) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .image
            .get(namespace.as_str())
            .map(|entries| entries.contains_key(key.as_str()))
            .unwrap_or(false))
    }

    fn keys(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let state = self.state.read();
        // BTreeMap iteration is already sorted
        Ok(state
            .image
            .get(namespace.as_str())
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn len(&self, namespace: &Namespace) -> Result<usize> {
        let state = self.state.read();
        Ok(state
            .image
            .get(namespace.as_str())
            .map(|entries| entries.len())
            .unwrap_or(0))
    }

    fn used_bytes(&self) -> usize {
        self.state.read().quota.used()
    }

    fn options(&self) -> BackendOptions {
        self.state.read().quota.options()
    }

    fn flush(&self) -> Result<()> {
        let state = self.state.read();
        if state.image.is_empty() && !self.path.exists() {
            return Ok(());
        }
        File::open(&self.path)?.sync_all()?;
        debug!(path = %self.path.display(), "flushed file backend");
        Ok(())
    }
}

impl std::fmt::Debug for FileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBackend")
            .field("path", &self.path)
            .field("used_bytes", &self.used_bytes())
            .finish()
    }
}
