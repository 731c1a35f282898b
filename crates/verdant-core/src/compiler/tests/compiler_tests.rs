use std::sync::Arc;

use serde_json::{json, Value};

use crate::compiler::{compile_to_function, MarkupCompiler, TemplateCompiler};
use crate::instance::{ClassId, Instance};
use crate::options::ComponentOptions;
use crate::vdom::{VElement, VNode};

fn instance_with(options: ComponentOptions, state: Value) -> Instance {
    let mut vm = Instance::new(ClassId::next(), Arc::new(options));
    if let Value::Object(map) = state {
        for (key, value) in map {
            vm.set(&key, value);
        }
    }
    vm
}

fn render(markup: &str, options: ComponentOptions, state: Value) -> String {
    let vm = instance_with(options, state);
    compile_to_function(markup)
        .expect("template compiles")
        .call(&vm)
        .to_html()
}

#[test]
fn test_interpolates_state() {
    let html = render(
        "<p>Hello, {{ name }}! You have {{ inbox.count }} messages.</p>",
        ComponentOptions::new(),
        json!({ "name": "Ada", "inbox": { "count": 3 } }),
    );
    assert_eq!(html, "<p>Hello, Ada! You have 3 messages.</p>");
}

#[test]
fn test_missing_and_null_values_render_empty() {
    let html = render(
        "<p>[{{ missing }}][{{ nothing }}]</p>",
        ComponentOptions::new(),
        json!({ "nothing": null }),
    );
    assert_eq!(html, "<p>[][]</p>");
}

#[test]
fn test_interpolated_text_is_escaped() {
    let html = render(
        "<p>{{ raw }}</p>",
        ComponentOptions::new(),
        json!({ "raw": "<b>&</b>" }),
    );
    assert_eq!(html, "<p>&lt;b&gt;&amp;&lt;/b&gt;</p>");
}

#[test]
fn test_bound_attributes() {
    let html = render(
        r#"<input :value="text" v-bind:disabled="locked" :title="none" :checked="off" type="text">"#,
        ComponentOptions::new(),
        json!({ "text": "hi", "locked": true, "none": null, "off": false }),
    );
    assert_eq!(html, r#"<input value="hi" disabled="disabled" type="text">"#);
}

#[test]
fn test_filters_apply_in_order() {
    let options = ComponentOptions::new()
        .filter("upper", |v| json!(v.as_str().unwrap_or_default().to_uppercase()))
        .filter("exclaim", |v| json!(format!("{}!", v.as_str().unwrap_or_default())));
    let html = render(
        "<h1>{{ greeting | upper | exclaim }}</h1>",
        options,
        json!({ "greeting": "hey" }),
    );
    assert_eq!(html, "<h1>HEY!</h1>");
}

#[test]
fn test_unknown_filter_passes_value_through() {
    let html = render(
        "<h1>{{ greeting | missing }}</h1>",
        ComponentOptions::new(),
        json!({ "greeting": "hey" }),
    );
    assert_eq!(html, "<h1>hey</h1>");
}

#[test]
fn test_directives_run_after_children() {
    let options = ComponentOptions::new().directive("count", |el: &mut VElement, value: &Value| {
        let children = el.children.len().to_string();
        el.set_attr("data-children", &children);
        el.set_attr("data-value", &value.to_string());
    });
    let html = render(
        r#"<ul v-count="limit"><li>a</li><li>b</li></ul>"#,
        options,
        json!({ "limit": 5 }),
    );
    assert_eq!(html, r#"<ul data-children="2" data-value="5"><li>a</li><li>b</li></ul>"#);
}

#[test]
fn test_computed_values_render() {
    let options = ComponentOptions::new().computed("full", |vm: &Instance| {
        let first = vm.get("first").unwrap_or(Value::Null);
        let last = vm.get("last").unwrap_or(Value::Null);
        json!(format!(
            "{} {}",
            first.as_str().unwrap_or_default(),
            last.as_str().unwrap_or_default()
        ))
    });
    let html = render(
        "<span>{{ full }}</span>",
        options,
        json!({ "first": "Grace", "last": "Hopper" }),
    );
    assert_eq!(html, "<span>Grace Hopper</span>");
}

#[test]
fn test_render_output_tracks_state() {
    let render = compile_to_function("<b>{{ n }}</b>").expect("compiles");
    let mut vm = instance_with(ComponentOptions::new(), json!({ "n": 1 }));
    assert_eq!(render.call(&vm).text_content(), "1");
    vm.set("n", 2);
    assert_eq!(render.call(&vm).text_content(), "2");
}

#[test]
fn test_requires_single_root() {
    let err = MarkupCompiler.compile("<p>a</p><p>b</p>").expect_err("two roots");
    assert_eq!(err.message, "template must contain exactly one root element");
    assert_eq!(err.position, 8);

    let err = MarkupCompiler.compile("loose <p>a</p>").expect_err("text root");
    assert_eq!(err.message, "text outside the root element");

    let err = MarkupCompiler.compile("<!-- only a comment -->").expect_err("empty");
    assert_eq!(err.message, "template has no root element");
}

#[test]
fn test_expression_errors() {
    let err = MarkupCompiler.compile("<p>{{ }}</p>").expect_err("empty expr");
    assert_eq!(err.message, "empty expression");
    assert_eq!(err.position, 3);

    let err = MarkupCompiler.compile("<p>{{ a + b }}</p>").expect_err("operator");
    assert_eq!(err.message, "invalid expression 'a + b'");

    let err = MarkupCompiler.compile("<p>{{ a | 9x }}</p>").expect_err("bad filter");
    assert_eq!(err.message, "invalid filter name '9x'");

    let err = MarkupCompiler.compile("<p>{{ a </p>").expect_err("unterminated");
    assert_eq!(err.message, "unterminated interpolation, expected '}}'");

    let err = MarkupCompiler.compile(r#"<p :title="x y"></p>"#).expect_err("bad binding");
    assert_eq!(err.message, "invalid expression 'x y'");
    assert_eq!(err.position, 3);
}

#[test]
fn test_compiled_vnode_shape() {
    let vm = instance_with(ComponentOptions::new(), json!({ "who": "you" }));
    let vnode = compile_to_function(r#"<div class="card"><h2>Hi {{ who }}</h2></div>"#)
        .expect("compiles")
        .call(&vm);
    let expected = VNode::Element(
        VElement::new("div").with_attr("class", "card").with_child(VNode::Element(
            VElement::new("h2").with_child(VNode::text("Hi you")),
        )),
    );
    assert_eq!(vnode, expected);
}
