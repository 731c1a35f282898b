//! Virtual DOM description produced by render functions.
use std::fmt::Write;

use crate::kernel::constants::VOID_ELEMENTS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Element(VElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<VNode>,
}

impl VElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing one of the same name
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        self.children.push(child);
        self
    }
}

impl VNode {
    pub fn text(content: &str) -> Self {
        VNode::Text(content.to_string())
    }

    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            VNode::Element(el) => Some(el),
            VNode::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text(text) => text.clone(),
            VNode::Element(el) => el.children.iter().map(VNode::text_content).collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

impl From<VElement> for VNode {
    fn from(el: VElement) -> Self {
        VNode::Element(el)
    }
}

fn write_node(out: &mut String, node: &VNode) {
    match node {
        VNode::Text(text) => out.push_str(&escape_text(text)),
        VNode::Element(el) => {
            write_open_tag(out, &el.tag, &el.attrs);
            if is_void_element(&el.tag) {
                return;
            }
            for child in &el.children {
                write_node(out, child);
            }
            write_close_tag(out, &el.tag);
        }
    }
}

pub(crate) fn write_open_tag(out: &mut String, tag: &str, attrs: &[(String, String)]) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        // Writing to a String cannot fail.
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    out.push('>');
}

pub(crate) fn write_close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Decode the entities produced by [`escape_text`]/[`escape_attr`] plus `&#39;`
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let node: VNode = VElement::new("p")
            .with_attr("title", "a \"b\" & c")
            .with_child(VNode::text("1 < 2"))
            .into();
        assert_eq!(
            node.to_html(),
            "<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2</p>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: VNode = VElement::new("div")
            .with_child(VElement::new("br").into())
            .with_child(VElement::new("img").with_attr("src", "x.png").into())
            .into();
        assert_eq!(node.to_html(), "<div><br><img src=\"x.png\"></div>");
    }

    #[test]
    fn test_set_attr_replaces_existing() {
        let mut el = VElement::new("a").with_attr("href", "/old");
        el.set_attr("href", "/new");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.attr("href"), Some("/new"));
    }

    #[test]
    fn test_decode_entities_reverses_escaping() {
        let raw = "<a href=\"x\">Tom & Jerry's</a>";
        assert_eq!(decode_entities(&escape_text(raw)), raw);
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }
}
