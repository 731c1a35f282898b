//! End-to-end scenarios for the construction and mount pipeline.
use std::sync::Arc;

use serde_json::json;

use crate::compiler::compile_to_function;
use crate::dom::{Document, DomHost};
use crate::kernel::Runtime;
use crate::lifecycle::{Hook, LifecyclePhase};
use crate::options::ComponentOptions;
use crate::render::RenderFn;
use crate::tests::common::{CountingCompiler, EventLog};
use crate::vdom::{VElement, VNode};

#[test]
fn test_parent_hooks_dispatch_before_child_hooks() {
    let log = EventLog::new();
    let runtime = Runtime::new();
    let parent = runtime.extend(
        &runtime.root(),
        ComponentOptions::new().hook(Hook::BeforeCreate, log.recorder("f0")),
    );

    runtime
        .construct(
            &parent,
            ComponentOptions::new().hook(Hook::BeforeCreate, log.recorder("f1")),
        )
        .expect("construct");
    assert_eq!(log.events(), vec!["f0", "f1"]);
}

#[test]
fn test_el_markup_compiles_like_direct_markup() {
    let markup = r#"<div id="app"><span :title="tip">{{ count }} items</span></div>"#;
    let runtime = Runtime::new();
    let mut doc = Document::parse(markup).expect("doc");
    let mut vm = runtime
        .construct(
            &runtime.root(),
            ComponentOptions::new().data(|| json!({ "count": 2, "tip": "cart" })),
        )
        .expect("construct");

    runtime.mount(&mut vm, "#app", &mut doc).expect("mount");

    let from_el = vm.render_fn().expect("resolved render").call(&vm);
    let direct = compile_to_function(markup).expect("direct compile").call(&vm);
    assert_eq!(from_el, direct);
    assert_eq!(
        doc.to_html(),
        r#"<div id="app"><span title="cart">2 items</span></div>"#
    );
}

#[test]
fn test_explicit_render_is_used_as_is() {
    let compiler = CountingCompiler::new();
    let runtime = Runtime::builder().compiler(compiler.clone()).build();
    let render = RenderFn::new(|vm| {
        let label = vm.get("label").and_then(|v| v.as_str().map(str::to_string));
        let text = VNode::text(&label.unwrap_or_default());
        VNode::Element(VElement::new("strong").with_child(text))
    });
    let mut doc = Document::parse("<p><span id=\"slot\">{{ ignored }}</span></p>").expect("doc");

    let vm = runtime
        .create(
            &runtime.root(),
            ComponentOptions::new()
                .el("#slot")
                .render(render.clone())
                .data(|| json!({ "label": "rendered" })),
            &mut doc,
        )
        .expect("create");

    assert_eq!(compiler.calls(), 0);
    assert!(vm.render_fn().expect("render").ptr_eq(&render));
    assert_eq!(doc.to_html(), "<p><strong>rendered</strong></p>");
}

#[test]
fn test_template_is_compiled_once_and_cached() {
    let compiler = CountingCompiler::new();
    let runtime = Runtime::builder().compiler(compiler.clone()).build();
    let class = runtime.extend(
        &runtime.root(),
        ComponentOptions::new()
            .template("<div>{{x}}</div>")
            .data(|| json!({ "x": 1 })),
    );
    let mut doc =
        Document::parse("<main><i id=\"one\"></i><i id=\"two\"></i></main>").expect("doc");

    for target in ["#one", "#two"] {
        let mut vm = runtime
            .construct(&class, ComponentOptions::new())
            .expect("construct");
        runtime.mount(&mut vm, target, &mut doc).expect("mount");
    }

    assert_eq!(compiler.calls(), 1);
    assert_eq!(runtime.resolver().cache().len(), 1);
    assert_eq!(doc.to_html(), "<main><div>1</div><div>1</div></main>");
}

#[test]
fn test_missing_target_keeps_initialized_state() {
    let log = EventLog::new();
    let runtime = Runtime::new();
    let mut doc = Document::parse("<div id=\"elsewhere\"></div>").expect("doc");
    let mut vm = runtime
        .construct(
            &runtime.root(),
            ComponentOptions::new()
                .template("<p>{{ message }}</p>")
                .data(|| json!({ "message": "kept" }))
                .hook(Hook::BeforeMount, log.recorder("beforeMount")),
        )
        .expect("construct");

    let err = runtime
        .mount(&mut vm, "#app", &mut doc)
        .expect_err("no element matches");
    assert!(err.is_target_not_found());
    assert_eq!(vm.get("message"), Some(json!("kept")));
    assert_eq!(vm.phase(), LifecyclePhase::CreatedFired);
    assert!(vm.render_fn().is_none());
    assert!(log.events().is_empty());
    assert_eq!(doc.to_html(), "<div id=\"elsewhere\"></div>");
}

#[test]
fn test_create_with_missing_el_target_reports_error() {
    let runtime = Runtime::new();
    let mut doc = Document::new();
    let err = runtime
        .create(
            &runtime.root(),
            ComponentOptions::new().el("#app").template("<p></p>"),
            &mut doc,
        )
        .expect_err("missing target");
    assert!(err.is_target_not_found());
}

#[test]
fn test_no_render_source_without_mount_is_not_an_error() {
    let log = EventLog::new();
    let runtime = Runtime::new();
    let mut doc = Document::new();
    let vm = runtime
        .create(
            &runtime.root(),
            ComponentOptions::new()
                .data(|| json!({ "a": 1 }))
                .hook(Hook::Created, log.recorder("created"))
                .hook(Hook::BeforeMount, log.recorder("beforeMount")),
            &mut doc,
        )
        .expect("create without render source");

    assert_eq!(vm.phase(), LifecyclePhase::CreatedFired);
    assert_eq!(log.events(), vec!["created"]);
}

#[test]
fn test_instances_are_independent_across_threads() {
    let compiler = CountingCompiler::new();
    let runtime = Arc::new(Runtime::builder().compiler(compiler.clone()).build());
    let class = runtime.extend(
        &runtime.root(),
        ComponentOptions::new()
            .template("<p>{{ n }}</p>")
            .data(|| json!({ "n": 0 })),
    );

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let runtime = Arc::clone(&runtime);
            let class = class.clone();
            std::thread::spawn(move || {
                let mut doc = Document::parse("<div id=\"app\"></div>").expect("doc");
                let mut vm = runtime
                    .construct(&class, ComponentOptions::new())
                    .expect("construct");
                vm.set("n", n);
                runtime.mount(&mut vm, "#app", &mut doc).expect("mount");
                let root = vm.el().expect("mounted root");
                doc.outer_html(root).expect("attached root")
            })
        })
        .collect();

    let mut rendered: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    rendered.sort();
    assert_eq!(rendered, vec!["<p>0</p>", "<p>1</p>", "<p>2</p>", "<p>3</p>"]);
    assert_eq!(runtime.resolver().cache().len(), 1);
    assert!(compiler.calls() >= 1);
}
