//! Turns a parsed element tree into a render template and evaluates it
//! against an instance.
use serde_json::Value;

use crate::compiler::error::TemplateSyntaxError;
use crate::compiler::parser::{ElementNode, Node};
use crate::instance::Instance;
use crate::kernel::constants::{BIND_PREFIX, DIRECTIVE_PREFIX};
use crate::vdom::{VElement, VNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplateNode {
    Element {
        tag: String,
        attrs: Vec<AttrBinding>,
        children: Vec<TemplateNode>,
    },
    Text(Vec<Segment>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrBinding {
    Static { name: String, value: String },
    Bound { name: String, expr: Expr },
    Directive { name: String, expr: Option<Expr> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Interpolation(Expr),
}

/// `path | filter | filter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expr {
    pub path: String,
    pub filters: Vec<String>,
}

pub(crate) fn generate(
    root: &ElementNode,
    markup: &str,
) -> Result<TemplateNode, TemplateSyntaxError> {
    let mut attrs = Vec::with_capacity(root.attrs.len());
    for attr in &root.attrs {
        let err = |message: String| TemplateSyntaxError::new(markup, attr.position, message);
        let binding = if let Some(name) = attr
            .name
            .strip_prefix(BIND_PREFIX)
            .or_else(|| attr.name.strip_prefix("v-bind:"))
        {
            AttrBinding::Bound {
                name: name.to_string(),
                expr: parse_expr(&attr.value).map_err(err)?,
            }
        } else if let Some(name) = attr.name.strip_prefix(DIRECTIVE_PREFIX) {
            let expr = if attr.value.trim().is_empty() {
                None
            } else {
                Some(parse_expr(&attr.value).map_err(err)?)
            };
            AttrBinding::Directive {
                name: name.to_string(),
                expr,
            }
        } else {
            AttrBinding::Static {
                name: attr.name.clone(),
                value: attr.value.clone(),
            }
        };
        attrs.push(binding);
    }

    let mut children = Vec::with_capacity(root.children.len());
    for child in &root.children {
        children.push(match child {
            Node::Element(el) => generate(el, markup)?,
            Node::Text(text) => {
                TemplateNode::Text(parse_text(&text.content, text.position, markup)?)
            }
        });
    }

    Ok(TemplateNode::Element {
        tag: root.tag.clone(),
        attrs,
        children,
    })
}

/// Split text into literals and `{{ expr }}` interpolations.
///
/// Positions in errors are relative to `markup`; `base` is the offset of the
/// text node. Entity decoding may shift offsets inside a node slightly.
fn parse_text(
    content: &str,
    base: usize,
    markup: &str,
) -> Result<Vec<Segment>, TemplateSyntaxError> {
    let mut segments = Vec::new();
    let mut rest = content;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            return Err(TemplateSyntaxError::new(
                markup,
                base + offset + open,
                "unterminated interpolation, expected '}}'",
            ));
        };
        let expr = parse_expr(&after_open[..close]).map_err(|message| {
            TemplateSyntaxError::new(markup, base + offset + open, message)
        })?;
        segments.push(Segment::Interpolation(expr));

        let consumed = open + 2 + close + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}

fn parse_expr(source: &str) -> Result<Expr, String> {
    let mut parts = source.split('|').map(str::trim);
    let path = parts.next().unwrap_or_default();
    if path.is_empty() {
        return Err("empty expression".to_string());
    }
    if !is_valid_path(path) {
        return Err(format!("invalid expression '{}'", path));
    }

    let mut filters = Vec::new();
    for filter in parts {
        if !is_identifier(filter) {
            return Err(format!("invalid filter name '{}'", filter));
        }
        filters.push(filter.to_string());
    }
    Ok(Expr {
        path: path.to_string(),
        filters,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_valid_path(path: &str) -> bool {
    let mut segments = path.split('.');
    segments.next().is_some_and(is_identifier)
        && segments.all(|s| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

pub(crate) fn render(node: &TemplateNode, vm: &Instance) -> VNode {
    match node {
        TemplateNode::Text(segments) => {
            let mut text = String::new();
            for segment in segments {
                match segment {
                    Segment::Literal(literal) => text.push_str(literal),
                    Segment::Interpolation(expr) => {
                        text.push_str(&display_value(&evaluate(expr, vm)))
                    }
                }
            }
            VNode::Text(text)
        }
        TemplateNode::Element {
            tag,
            attrs,
            children,
        } => {
            let mut el = VElement::new(tag);
            let mut directives = Vec::new();
            for attr in attrs {
                match attr {
                    AttrBinding::Static { name, value } => el.set_attr(name, value),
                    AttrBinding::Bound { name, expr } => match evaluate(expr, vm) {
                        Value::Null | Value::Bool(false) => {}
                        Value::Bool(true) => el.set_attr(name, name),
                        value => el.set_attr(name, &display_value(&value)),
                    },
                    AttrBinding::Directive { name, expr } => directives.push((name, expr)),
                }
            }
            el.children = children.iter().map(|child| render(child, vm)).collect();

            for (name, expr) in directives {
                let value = expr.as_ref().map_or(Value::Null, |e| evaluate(e, vm));
                match vm.options().directives.get(name) {
                    Some(directive) => directive(&mut el, &value),
                    None => log::warn!("{}: failed to resolve directive 'v-{}'", vm.name(), name),
                }
            }
            VNode::Element(el)
        }
    }
}

fn evaluate(expr: &Expr, vm: &Instance) -> Value {
    let mut value = vm.get(&expr.path).unwrap_or(Value::Null);
    for name in &expr.filters {
        match vm.options().filters.get(name) {
            Some(filter) => value = filter(&value),
            None => log::warn!("{}: failed to resolve filter '{}'", vm.name(), name),
        }
    }
    value
}

/// Text form of a state value: strings verbatim, null as empty, the rest as JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
