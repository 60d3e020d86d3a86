//! Views for Stowage
//!
//! A view binds a JSON payload to a template and writes the markup into a
//! target element. It also owns the listeners it attaches to that element:
//!
//! - [`ElementHandle`]: shared target element (markup + listeners)
//! - [`TemplateEngine`] / [`JinjaTemplate`]: payload to markup
//! - [`RenderableView`]: the `render` / `bind_events` / `unbind_events` capability
//! - [`View`]: the concrete view, generic over its engine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod element;
pub mod error;
pub mod template;
pub mod view;

pub use element::{ElementHandle, Event, Listener, ListenerHandle};
pub use error::{Result, ViewError};
pub use template::{JinjaTemplate, TemplateEngine};
pub use view::{RenderableView, View, ViewHandle};

/// Payload a view renders.
pub type Payload = serde_json::Value;
