//! Render Tests
//!
//! Tests that render writes the payload's markup and is idempotent.

use crate::*;
use serde_json::json;
use stowage::{TemplateEngine, ViewError};

// =============================================================================
// RENDER OUTPUT TESTS
// =============================================================================

#[test]
fn test_render_writes_payload_markup() {
    let target = ElementHandle::new("app");
    let mut view = title_view(&target, "Hello");

    view.render().unwrap();
    assert_eq!(target.inner_html(), "<h1>Hello</h1>");
}

#[test]
fn test_render_twice_is_identical() {
    let target = ElementHandle::new("app");
    let mut view = title_view(&target, "Same");

    view.render().unwrap();
    let first = target.inner_html();
    view.render().unwrap();

    assert_eq!(target.inner_html(), first);
    assert_eq!(target.write_count(), 2);
}

#[test]
fn test_render_after_set_data() {
    let target = ElementHandle::new("app");
    let mut view = title_view(&target, "Before");
    view.render().unwrap();

    view.set_data(payload(json!({"title": "After"})));
    assert_eq!(target.inner_html(), "<h1>Before</h1>");

    view.render().unwrap();
    assert_eq!(target.inner_html(), "<h1>After</h1>");
}

#[test]
fn test_render_escapes_payload() {
    let target = ElementHandle::new("app");
    let mut view = title_view(&target, "<script>alert(1)</script>");

    view.render().unwrap();
    assert!(!target.inner_html().contains("<script>"));
    assert!(target.inner_html().contains("&lt;script&gt;"));
}

#[test]
fn test_render_from_stored_payload() {
    let shell = create_shell();
    shell
        .store()
        .create_item("test", &json!({"test": "test"}))
        .unwrap();

    let target = ElementHandle::new("app");
    let template = JinjaTemplate::from_source("t", "<p>{{ test }}</p>").unwrap();
    let data = shell.store().get_value("test").unwrap().unwrap();
    let mut view = View::new(target.clone(), template).with_data(data);

    view.render().unwrap();
    assert_eq!(target.inner_html(), "<p>test</p>");
}

// =============================================================================
// ENGINE TESTS
// =============================================================================

#[test]
fn test_closure_engine_view() {
    let target = ElementHandle::new("count");
    let engine = |p: &Payload| Ok::<_, ViewError>(format!("<span>{}</span>", p["n"]));
    let mut view = View::new(target.clone(), engine).with_data(json!({"n": 5}));

    view.render().unwrap();
    assert_eq!(target.inner_html(), "<span>5</span>");
}

#[test]
fn test_failing_engine_keeps_previous_markup() {
    let target = ElementHandle::new("app");
    target.set_inner_html("<p>old</p>".to_string());
    let engine = |_: &Payload| Err::<String, _>(ViewError::Render("boom".into()));
    let mut view = View::new(target.clone(), engine);

    let err = view.render().unwrap_err();
    assert!(matches!(err, ViewError::Render(_)));
    assert_eq!(target.inner_html(), "<p>old</p>");
}

#[test]
fn test_template_file_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("row.html");
    std::fs::write(&path, "{% for r in rows %}<tr><td>{{ r }}</td></tr>{% endfor %}").unwrap();

    let template = JinjaTemplate::from_file(&path).unwrap();
    assert_eq!(
        template.render(&json!({"rows": [1, 2]})).unwrap(),
        "<tr><td>1</td></tr><tr><td>2</td></tr>"
    );
}

// =============================================================================
// CHILD VIEW TESTS
// =============================================================================

#[test]
fn test_children_rendered_with_parent() {
    let parent_el = ElementHandle::new("parent");
    let child_el = ElementHandle::new("child");
    let mut parent = title_view(&parent_el, "Parent");
    parent.attach_child(Box::new(title_view(&child_el, "Child")));

    parent.render().unwrap();
    assert_eq!(parent_el.inner_html(), "<h1>Parent</h1>");
    assert_eq!(child_el.inner_html(), "<h1>Child</h1>");

    parent.render().unwrap();
    assert_eq!(child_el.write_count(), 2);
    assert_eq!(parent.children().len(), 1);
}
