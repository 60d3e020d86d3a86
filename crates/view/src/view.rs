//! Renderable views
//!
//! ## Lifecycle
//!
//! ```text
//! Unbound --bind_events--> Bound --unbind_events--> Unbound
//! ```
//!
//! `render` works in either state and never changes it. Binding twice
//! without an unbind in between returns the existing [`ViewHandle`] and
//! registers nothing new. Unbinding with nothing bound is a no-op. Both
//! cascade to attached child views.
//!
//! Dropping a bound view detaches its listeners.

use crate::element::{ElementHandle, Event, Listener, ListenerHandle};
use crate::error::Result;
use crate::template::TemplateEngine;
use crate::Payload;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Opaque token for the listeners one `bind_events` call attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(Uuid);

impl ViewHandle {
    fn new() -> Self {
        ViewHandle(Uuid::new_v4())
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// Capability set of a view.
pub trait RenderableView {
    /// Render the payload into the target, replacing its markup, then
    /// re-render child views.
    fn render(&mut self) -> Result<()>;

    /// Attach this view's listeners to its target.
    fn bind_events(&mut self) -> ViewHandle;

    /// Detach everything `bind_events` attached.
    fn unbind_events(&mut self);

    /// Whether listeners are currently attached.
    fn is_bound(&self) -> bool;

    /// Element this view renders into.
    fn target(&self) -> &ElementHandle;
}

struct Binding {
    handle: ViewHandle,
    listeners: Vec<ListenerHandle>,
}

/// Concrete view rendering a payload through engine `E`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use stowage_view::{ElementHandle, JinjaTemplate, RenderableView, View};
///
/// let target = ElementHandle::new("greeting");
/// let template = JinjaTemplate::from_source("greeting", "<p>Hi {{ name }}</p>").unwrap();
/// let mut view = View::new(target.clone(), template).with_data(json!({"name": "Alice"}));
///
/// view.render().unwrap();
/// assert_eq!(target.inner_html(), "<p>Hi Alice</p>");
/// ```
pub struct View<E: TemplateEngine> {
    target: ElementHandle,
    data: Payload,
    engine: E,
    declared: Vec<(String, Listener)>,
    binding: Option<Binding>,
    children: Vec<Box<dyn RenderableView>>,
}

impl<E: TemplateEngine> View<E> {
    /// View over `target` with an empty object payload.
    pub fn new(target: ElementHandle, engine: E) -> Self {
        Self {
            target,
            data: Payload::Object(Default::default()),
            engine,
            declared: Vec::new(),
            binding: None,
            children: Vec::new(),
        }
    }

    /// Builder form of [`View::set_data`].
    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    /// Replace the payload. Does not render.
    pub fn set_data(&mut self, data: Payload) {
        self.data = data;
    }

    /// Current payload.
    pub fn data(&self) -> &Payload {
        &self.data
    }

    /// Declare a listener for `event`.
    ///
    /// Attached on the next `bind_events`, or right away if the view is
    /// already bound.
    pub fn on<F>(&mut self, event: &str, listener: F) -> &mut Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        if let Some(binding) = &mut self.binding {
            let handle = self.target.add_listener(event, Arc::clone(&listener));
            binding.listeners.push(handle);
        }
        self.declared.push((event.to_string(), listener));
        self
    }

    /// Attach a child view, re-rendered after every render of this view.
    ///
    /// A child attached to a bound parent is bound immediately.
    pub fn attach_child(&mut self, mut child: Box<dyn RenderableView>) {
        if self.binding.is_some() {
            child.bind_events();
        }
        self.children.push(child);
    }

    /// Attached child views, in attach order.
    pub fn children(&self) -> &[Box<dyn RenderableView>] {
        &self.children
    }

    /// Number of listeners this view itself currently has attached.
    pub fn bound_listener_count(&self) -> usize {
        self.binding
            .as_ref()
            .map(|b| b.listeners.len())
            .unwrap_or(0)
    }
}

impl<E: TemplateEngine> RenderableView for View<E> {
    fn render(&mut self) -> Result<()> {
        let markup = self.engine.render(&self.data)?;
        debug!(element = self.target.id(), bytes = markup.len(), "render");
        self.target.set_inner_html(markup);

        for child in &mut self.children {
            child.render()?;
        }
        Ok(())
    }

    fn bind_events(&mut self) -> ViewHandle {
        if let Some(binding) = &self.binding {
            return binding.handle;
        }

        let listeners: Vec<ListenerHandle> = self
            .declared
            .iter()
            .map(|(event, listener)| self.target.add_listener(event, Arc::clone(listener)))
            .collect();
        for child in &mut self.children {
            child.bind_events();
        }

        let handle = ViewHandle::new();
        debug!(
            element = self.target.id(),
            listeners = listeners.len(),
            %handle,
            "bind_events"
        );
        self.binding = Some(Binding { handle, listeners });
        handle
    }

    fn unbind_events(&mut self) {
        for child in &mut self.children {
            child.unbind_events();
        }
        if let Some(binding) = self.binding.take() {
            for listener in &binding.listeners {
                self.target.remove_listener(*listener);
            }
            debug!(
                element = self.target.id(),
                listeners = binding.listeners.len(),
                handle = %binding.handle,
                "unbind_events"
            );
        }
    }

    fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    fn target(&self) -> &ElementHandle {
        &self.target
    }
}

impl<E: TemplateEngine> Drop for View<E> {
    fn drop(&mut self) {
        self.unbind_events();
    }
}

impl<E: TemplateEngine> fmt::Debug for View<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("target", &self.target)
            .field("bound", &self.is_bound())
            .field("children", &self.children.len())
            .finish()
    }
}
