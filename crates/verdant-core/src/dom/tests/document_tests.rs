use crate::dom::{resolve_target, Document, DomHost, ElementId, MountTarget};
use crate::mount::error::MountError;
use crate::vdom::{VElement, VNode};

const PAGE: &str = r#"<html><body>
  <div id="app" class="root"><p class="msg">{{ message }}</p></div>
  <div class="root second"><span>two</span></div>
</body></html>"#;

#[test]
fn test_query_selector_returns_first_match_in_document_order() {
    let doc = Document::parse(PAGE).expect("page parses");
    let all = doc.query_selector_all(".root");
    assert_eq!(all.len(), 2);
    assert_eq!(doc.query_selector(".root"), Some(all[0]));
    assert_eq!(doc.attribute(all[0], "id"), Some("app"));
    assert_eq!(doc.query_selector("#app"), Some(all[0]));
    assert!(doc.query_selector("#nowhere").is_none());
    assert!(doc.query_selector("div > p").is_none());
}

#[test]
fn test_outer_html_includes_the_element_itself() {
    let doc = Document::parse(PAGE).expect("page parses");
    let app = doc.query_selector("#app").expect("app");
    assert_eq!(
        doc.outer_html(app).as_deref(),
        Some(r#"<div id="app" class="root"><p class="msg">{{ message }}</p></div>"#)
    );
    assert_eq!(doc.tag_name(app), Some("div"));
    assert_eq!(doc.text_content(app).as_deref(), Some("{{ message }}"));
    assert_eq!(doc.child_elements(app).len(), 1);
}

#[test]
fn test_replace_with_swaps_subtree_and_detaches_old() {
    let mut doc = Document::parse("<main><div id=\"app\">old</div><footer></footer></main>")
        .expect("parses");
    let app = doc.query_selector("#app").expect("app");
    let vnode = VNode::Element(
        VElement::new("section")
            .with_attr("id", "app")
            .with_child(VNode::text("new")),
    );

    let root = doc.replace_with(app, &vnode).expect("replace");
    assert_ne!(root, app);
    assert!(!doc.is_attached(app));
    assert!(doc.is_attached(root));
    assert_eq!(doc.tag_name(root), Some("section"));
    assert_eq!(
        doc.to_html(),
        "<main><section id=\"app\">new</section><footer></footer></main>"
    );
    assert_eq!(doc.query_selector("#app"), Some(root));
}

#[test]
fn test_replace_top_level_element() {
    let mut doc = Document::parse("<div id=\"app\"></div>").expect("parses");
    let app = doc.query_selector("#app").expect("app");
    doc.replace_with(app, &VNode::Element(VElement::new("p")))
        .expect("replace root");
    assert_eq!(doc.to_html(), "<p></p>");
}

#[test]
fn test_replacing_detached_element_fails() {
    let mut doc = Document::parse("<div id=\"app\"></div>").expect("parses");
    let app = doc.query_selector("#app").expect("app");
    doc.replace_with(app, &VNode::Element(VElement::new("p")))
        .expect("first replace");
    let err = doc
        .replace_with(app, &VNode::Element(VElement::new("p")))
        .expect_err("stale handle");
    assert!(matches!(err, MountError::DetachedElement { element } if element == app));
}

#[test]
fn test_resolve_target() {
    let doc = Document::parse(PAGE).expect("page parses");
    let app = doc.query_selector("#app").expect("app");

    assert_eq!(resolve_target(&doc, &"#app".into()).ok(), Some(app));
    assert_eq!(resolve_target(&doc, &MountTarget::Element(app)).ok(), Some(app));

    let err = resolve_target(&doc, &"#missing".into()).expect_err("missing selector");
    assert!(matches!(err, MountError::TargetNotFound { ref target } if target == "#missing"));

    let err = resolve_target(&doc, &MountTarget::Element(ElementId(9_999)))
        .expect_err("unknown handle");
    assert!(matches!(err, MountError::TargetNotFound { .. }));
}
