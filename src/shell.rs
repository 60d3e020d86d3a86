//! Host shell for Stowage.
//!
//! This module provides the `Shell` struct, which composes a key/value
//! store and a set of named views. Everything is handed in explicitly:
//! nothing is resolved by name at runtime except the views the host itself
//! mounted.

use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use stowage_core::{AccessMode, StoreConfig};
use stowage_primitives::KeyValueStore;
use stowage_storage::{BackendOptions, FileBackend, MemoryBackend, StorageBackend};
use stowage_view::{RenderableView, ViewHandle};
use tracing::debug;

/// The application shell.
///
/// # Example
///
/// ```ignore
/// use stowage::prelude::*;
///
/// let mut shell = Shell::ephemeral()?;
/// shell.store().create_item("test", &json!({"test": "test"}))?;
///
/// let target = ElementHandle::new("app");
/// let template = JinjaTemplate::from_source("app", "<p>{{ title }}</p>")?;
/// shell.mount("app", Box::new(View::new(target, template).with_data(json!({"title": "Hi"}))));
/// shell.render_all()?;
/// ```
pub struct Shell {
    store: KeyValueStore,
    views: Vec<(String, Box<dyn RenderableView>)>,
}

impl Shell {
    /// Shell over an in-memory store with default settings.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().ephemeral()
    }

    /// Shell over a file-backed store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a builder for shell configuration.
    pub fn builder() -> ShellBuilder {
        ShellBuilder::new()
    }

    /// Shell around an already composed store.
    pub fn from_store(store: KeyValueStore) -> Self {
        Self {
            store,
            views: Vec::new(),
        }
    }

    /// The key/value store.
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Mount `view` under `name`, after all views mounted so far.
    ///
    /// Replacing a mounted view keeps its position and returns the old
    /// one; dropping it detaches its listeners.
    pub fn mount(
        &mut self,
        name: impl Into<String>,
        view: Box<dyn RenderableView>,
    ) -> Option<Box<dyn RenderableView>> {
        let name = name.into();
        debug!(view = %name, element = view.target().id(), "mount");
        match self.views.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, view)),
            None => {
                self.views.push((name, view));
                None
            }
        }
    }

    /// Remove a mounted view.
    pub fn unmount(&mut self, name: &str) -> Option<Box<dyn RenderableView>> {
        let index = self.views.iter().position(|(n, _)| n == name)?;
        Some(self.views.remove(index).1)
    }

    /// Mounted view by name.
    pub fn view(&self, name: &str) -> Option<&dyn RenderableView> {
        self.views
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| &**v)
    }

    /// Mounted view by name, mutably.
    pub fn view_mut(&mut self, name: &str) -> Option<&mut Box<dyn RenderableView>> {
        self.views
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Names of mounted views, in mount order.
    pub fn view_names(&self) -> Vec<&str> {
        self.views.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Render one mounted view.
    pub fn render(&mut self, name: &str) -> Result<()> {
        let view = self
            .view_mut(name)
            .ok_or_else(|| Error::ViewNotFound(name.to_string()))?;
        view.render()?;
        Ok(())
    }

    /// Render every mounted view in mount order, stopping at the first
    /// failure.
    pub fn render_all(&mut self) -> Result<()> {
        for (_, view) in &mut self.views {
            view.render()?;
        }
        Ok(())
    }

    /// Bind every mounted view. Views already bound keep their handle.
    pub fn bind_all(&mut self) -> Vec<ViewHandle> {
        self.views
            .iter_mut()
            .map(|(_, view)| view.bind_events())
            .collect()
    }

    /// Unbind every mounted view.
    pub fn unbind_all(&mut self) {
        for (_, view) in &mut self.views {
            view.unbind_events();
        }
    }

    /// Force pending store data to its medium.
    pub fn flush(&self) -> Result<()> {
        self.store.flush().map_err(Into::into)
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("store", &self.store)
            .field("views", &self.view_names())
            .finish()
    }
}

/// Builder for shell configuration.
///
/// # Example
///
/// ```ignore
/// // File-backed, custom namespace and quota
/// let shell = Shell::builder()
///     .path("./data/app.json")
///     .namespace("app")
///     .quota_bytes(1024 * 1024)
///     .open()?;
///
/// // From a TOML file
/// let shell = Shell::builder()
///     .config(StoreConfig::from_toml_file("stowage.toml")?)
///     .open()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShellBuilder {
    config: StoreConfig,
}

impl ShellBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the namespace the store writes into.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config = self.config.namespace(namespace);
        self
    }

    /// Set the backend byte quota. `0` disables storage.
    pub fn quota_bytes(mut self, quota_bytes: usize) -> Self {
        self.config = self.config.quota_bytes(quota_bytes);
        self
    }

    /// Open the store read-only.
    pub fn read_only(mut self) -> Self {
        self.config = self.config.access_mode(AccessMode::ReadOnly);
        self
    }

    /// Set the backing file.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.config = self.config.path(path);
        self
    }

    /// Open a file-backed shell at the configured path.
    pub fn open(self) -> Result<Shell> {
        let path = self
            .config
            .path
            .clone()
            .ok_or_else(|| Error::Config("no path configured; use ephemeral()".to_string()))?;
        self.config.validate()?;
        let backend = FileBackend::open_with_options(path, BackendOptions::from(&self.config))?;
        self.finish(Arc::new(backend))
    }

    /// Open an in-memory shell. Any configured path is ignored.
    pub fn ephemeral(self) -> Result<Shell> {
        self.config.validate()?;
        let backend = MemoryBackend::with_options(BackendOptions::from(&self.config));
        self.finish(Arc::new(backend))
    }

    fn finish(self, backend: Arc<dyn StorageBackend>) -> Result<Shell> {
        let namespace = self.config.namespace_id()?;
        Ok(Shell::from_store(KeyValueStore::with_namespace(
            backend, namespace,
        )))
    }
}
