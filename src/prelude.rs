//! Convenient imports for Stowage.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use stowage::prelude::*;
//!
//! let shell = Shell::ephemeral()?;
//! shell.store().create_item("key", &"value")?;
//! ```

// Main entry point
pub use crate::shell::{Shell, ShellBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Storage
pub use crate::{KeyValueStore, StoreConfig, Value};

// Views
pub use crate::{ElementHandle, Event, JinjaTemplate, RenderableView, TemplateEngine, View};

// Re-export serde_json for convenience
pub use serde_json::json;
