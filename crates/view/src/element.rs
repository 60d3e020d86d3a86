//! Target elements
//!
//! An [`ElementHandle`] stands in for a DOM node: it holds the markup last
//! written into it and the listeners registered on it. Handles are cheap to
//! clone and every clone refers to the same element.

use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Callback invoked when an event is dispatched to an element.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Event dispatched to an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event name listeners match on, e.g. `"click"`
    pub name: String,
    /// Event payload
    pub detail: Value,
}

impl Event {
    /// Event with no payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_detail(name, Value::Null)
    }

    /// Event carrying `detail`.
    pub fn with_detail(name: impl Into<String>, detail: Value) -> Self {
        Self {
            name: name.into(),
            detail,
        }
    }
}

/// Identifies one listener registered on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

struct Registered {
    handle: ListenerHandle,
    event: String,
    listener: Listener,
}

#[derive(Default)]
struct ElementState {
    inner_html: String,
    listeners: Vec<Registered>,
    next_listener: u64,
    writes: u64,
}

/// Shared handle to a target element.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use stowage_view::{ElementHandle, Event};
///
/// let el = ElementHandle::new("app");
/// let handle = el.add_listener("click", Arc::new(|_| {}));
///
/// assert_eq!(el.dispatch(&Event::new("click")), 1);
/// assert!(el.remove_listener(handle));
/// assert_eq!(el.dispatch(&Event::new("click")), 0);
/// ```
#[derive(Clone)]
pub struct ElementHandle {
    id: Arc<str>,
    state: Arc<Mutex<ElementState>>,
}

impl ElementHandle {
    /// New empty element.
    pub fn new(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self {
            id: Arc::from(id),
            state: Arc::new(Mutex::new(ElementState::default())),
        }
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Markup currently held by the element.
    pub fn inner_html(&self) -> String {
        self.state.lock().inner_html.clone()
    }

    /// Replace the element's markup wholesale.
    pub fn set_inner_html(&self, markup: String) {
        let mut state = self.state.lock();
        state.inner_html = markup;
        state.writes += 1;
    }

    /// How many times markup has been written.
    pub fn write_count(&self) -> u64 {
        self.state.lock().writes
    }

    /// Register `listener` for events named `event`.
    pub fn add_listener(&self, event: &str, listener: Listener) -> ListenerHandle {
        let mut state = self.state.lock();
        let handle = ListenerHandle(state.next_listener);
        state.next_listener += 1;
        state.listeners.push(Registered {
            handle,
            event: event.to_string(),
            listener,
        });
        handle
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        let mut state = self.state.lock();
        let before = state.listeners.len();
        state.listeners.retain(|r| r.handle != handle);
        state.listeners.len() != before
    }

    /// Number of registered listeners, across all event names.
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }

    /// Invoke every listener registered for `event.name`, in registration
    /// order. Returns how many ran.
    ///
    /// Listeners run without the element lock held, so they may read or
    /// write this element.
    pub fn dispatch(&self, event: &Event) -> usize {
        let matching: Vec<Listener> = {
            let state = self.state.lock();
            state
                .listeners
                .iter()
                .filter(|r| r.event == event.name)
                .map(|r| Arc::clone(&r.listener))
                .collect()
        };
        for listener in &matching {
            listener(event);
        }
        matching.len()
    }

    /// Whether both handles refer to the same element.
    pub fn same_element(&self, other: &ElementHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementHandle")
            .field("id", &self.id)
            .field("listeners", &self.listener_count())
            .finish()
    }
}
