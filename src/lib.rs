//! # Stowage
//!
//! Typed key/value storage and template-bound views for host application
//! shells.
//!
//! Stowage provides two independent components and a shell that composes
//! them:
//!
//! - [`KeyValueStore`]: serializes values under keys in a namespaced text
//!   backend, reads them back, and reports absence
//! - [`View`]: renders a payload through a template into a target element
//!   and manages the listeners it attaches there
//! - [`Shell`]: owns one store and the mounted views
//!
//! ## Quick Start
//!
//! ```ignore
//! use stowage::prelude::*;
//!
//! // Open a file-backed shell
//! let mut shell = Shell::open("./data/app.json")?;
//!
//! // Key-value operations
//! shell.store().create_item("test", &json!({"test": "test"}))?;
//! let value: Option<Value> = shell.store().get_item("test")?;
//!
//! // Views
//! let target = ElementHandle::new("app");
//! let template = JinjaTemplate::from_source("app", "<h1>{{ title }}</h1>")?;
//! let mut view = View::new(target.clone(), template).with_data(json!({"title": "Hello"}));
//! view.on("click", |event| println!("clicked: {:?}", event.detail));
//! shell.mount("app", Box::new(view));
//!
//! shell.render_all()?;
//! shell.bind_all();
//! ```
//!
//! ## Errors
//!
//! A missing entry is `Ok(None)`. A backend that refuses a write yields
//! [`Error::StorageUnavailable`]; stored text that no longer decodes yields
//! [`Error::Deserialization`]. Neither is retried.

#![warn(missing_docs)]

mod error;
mod shell;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result, UnavailableReason};
pub use shell::{Shell, ShellBuilder};

// Re-export components
pub use stowage_core::{AccessMode, Key, Namespace, StoreConfig, Value};
pub use stowage_primitives::KeyValueStore;
pub use stowage_storage::{BackendOptions, FileBackend, MemoryBackend, StorageBackend};
pub use stowage_view::{
    ElementHandle, Event, JinjaTemplate, Listener, ListenerHandle, Payload, RenderableView,
    TemplateEngine, View, ViewError, ViewHandle,
};
