//! Shell View Registry Tests
//!
//! Tests for mounting, rendering and binding views through the shell.

use crate::*;
use serde_json::json;
use stowage::Error;

// =============================================================================
// MOUNT TESTS
// =============================================================================

#[test]
fn test_mount_keeps_order() {
    let mut shell = create_shell();
    shell.mount("header", Box::new(title_view(&ElementHandle::new("h"), "h")));
    shell.mount("body", Box::new(title_view(&ElementHandle::new("b"), "b")));
    shell.mount("footer", Box::new(title_view(&ElementHandle::new("f"), "f")));

    assert_eq!(shell.view_names(), vec!["header", "body", "footer"]);
}

#[test]
fn test_mount_replaces_in_place() {
    let mut shell = create_shell();
    let old_el = ElementHandle::new("old");
    let new_el = ElementHandle::new("new");
    shell.mount("a", Box::new(title_view(&old_el, "a")));
    shell.mount("b", Box::new(title_view(&ElementHandle::new("b"), "b")));

    let replaced = shell.mount("a", Box::new(title_view(&new_el, "a2")));

    assert!(replaced.is_some());
    assert_eq!(shell.view_names(), vec!["a", "b"]);
    assert!(shell.view("a").unwrap().target().same_element(&new_el));
}

#[test]
fn test_unmount() {
    let mut shell = create_shell();
    shell.mount("a", Box::new(title_view(&ElementHandle::new("a"), "a")));

    assert!(shell.unmount("a").is_some());
    assert!(shell.unmount("a").is_none());
    assert!(shell.view("a").is_none());
}

// =============================================================================
// RENDER TESTS
// =============================================================================

#[test]
fn test_render_all() {
    let mut shell = create_shell();
    let a = ElementHandle::new("a");
    let b = ElementHandle::new("b");
    shell.mount("a", Box::new(title_view(&a, "A")));
    shell.mount("b", Box::new(title_view(&b, "B")));

    shell.render_all().unwrap();

    assert_eq!(a.inner_html(), "<h1>A</h1>");
    assert_eq!(b.inner_html(), "<h1>B</h1>");
}

#[test]
fn test_render_by_name() {
    let mut shell = create_shell();
    let a = ElementHandle::new("a");
    shell.mount("a", Box::new(title_view(&a, "A")));

    shell.render("a").unwrap();
    assert_eq!(a.inner_html(), "<h1>A</h1>");
}

#[test]
fn test_render_unknown_view() {
    let mut shell = create_shell();

    let err = shell.render("missing").unwrap_err();
    assert!(matches!(err, Error::ViewNotFound(ref name) if name == "missing"));
}

#[test]
fn test_render_error_surfaces_as_view_error() {
    let mut shell = create_shell();
    let engine = |_: &Payload| Err::<String, _>(stowage::ViewError::Render("bad".into()));
    shell.mount("broken", Box::new(View::new(ElementHandle::new("x"), engine)));

    let err = shell.render_all().unwrap_err();
    assert!(matches!(err, Error::View(_)));
}

// =============================================================================
// BINDING TESTS
// =============================================================================

#[test]
fn test_bind_all_and_unbind_all() {
    let mut shell = create_shell();
    let a = ElementHandle::new("a");
    let b = ElementHandle::new("b");
    let (view_a, clicks_a) = clicking_view(&a);
    let (view_b, clicks_b) = clicking_view(&b);
    shell.mount("a", Box::new(view_a));
    shell.mount("b", Box::new(view_b));

    let first = shell.bind_all();
    let second = shell.bind_all();
    assert_eq!(first, second);

    click(&a);
    click(&b);
    assert_eq!((count(&clicks_a), count(&clicks_b)), (1, 1));

    shell.unbind_all();
    shell.unbind_all();
    click(&a);
    assert_eq!(count(&clicks_a), 1);
}

#[test]
fn test_unmount_then_drop_detaches() {
    let mut shell = create_shell();
    let a = ElementHandle::new("a");
    let (view, _clicks) = clicking_view(&a);
    shell.mount("a", Box::new(view));
    shell.bind_all();

    drop(shell.unmount("a"));
    assert_eq!(a.listener_count(), 0);
}

// =============================================================================
// STORE + VIEW TESTS
// =============================================================================

#[test]
fn test_click_persists_through_store() {
    let shell = create_shell();
    let store = shell.store().clone();
    let target = ElementHandle::new("counter");
    let mut view = title_view(&target, "counter");
    view.on("click", move |_| {
        let n: u64 = store.get_item("clicks").ok().flatten().unwrap_or(0);
        store.create_item("clicks", &(n + 1)).unwrap();
    });
    view.bind_events();

    click(&target);
    click(&target);

    assert_eq!(shell.store().get_value("clicks").unwrap(), Some(json!(2)));
}
