use std::fmt;

use crate::compiler::error::TemplateSyntaxError;
use crate::compiler::parser::{self, Node};
use crate::dom::selector::Selector;
use crate::dom::{DomHost, ElementId};
use crate::mount::error::MountError;
use crate::vdom::{escape_text, is_void_element, write_close_tag, write_open_tag, VNode};

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<usize>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct DomNode {
    kind: NodeKind,
    parent: Option<usize>,
    attached: bool,
}

/// In-memory document: an arena of nodes addressed by [`ElementId`].
///
/// Replaced nodes stay in the arena but are marked detached, so stale
/// handles are detected instead of aliasing new nodes.
#[derive(Clone, Default)]
pub struct Document {
    nodes: Vec<DomNode>,
    roots: Vec<usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an HTML fragment or page. Comments and doctype are dropped.
    pub fn parse(html: &str) -> Result<Self, TemplateSyntaxError> {
        let mut doc = Document::new();
        for node in parser::parse_fragment(html)? {
            let id = doc.insert_parsed(node, None);
            doc.roots.push(id);
        }
        Ok(doc)
    }

    fn insert_parsed(&mut self, node: Node, parent: Option<usize>) -> usize {
        match node {
            Node::Text(text) => self.push(NodeKind::Text(text.content), parent),
            Node::Element(el) => {
                let attrs = el.attrs.into_iter().map(|a| (a.name, a.value)).collect();
                let id = self.push(
                    NodeKind::Element {
                        tag: el.tag,
                        attrs,
                        children: Vec::new(),
                    },
                    parent,
                );
                let children: Vec<usize> = el
                    .children
                    .into_iter()
                    .map(|child| self.insert_parsed(child, Some(id)))
                    .collect();
                self.set_children(id, children);
                id
            }
        }
    }

    fn insert_vnode(&mut self, vnode: &VNode, parent: Option<usize>) -> usize {
        match vnode {
            VNode::Text(text) => self.push(NodeKind::Text(text.clone()), parent),
            VNode::Element(el) => {
                let id = self.push(
                    NodeKind::Element {
                        tag: el.tag.clone(),
                        attrs: el.attrs.clone(),
                        children: Vec::new(),
                    },
                    parent,
                );
                let children: Vec<usize> = el
                    .children
                    .iter()
                    .map(|child| self.insert_vnode(child, Some(id)))
                    .collect();
                self.set_children(id, children);
                id
            }
        }
    }

    fn push(&mut self, kind: NodeKind, parent: Option<usize>) -> usize {
        self.nodes.push(DomNode {
            kind,
            parent,
            attached: true,
        });
        self.nodes.len() - 1
    }

    fn set_children(&mut self, id: usize, new_children: Vec<usize>) {
        if let NodeKind::Element { children, .. } = &mut self.nodes[id].kind {
            *children = new_children;
        }
    }

    fn detach(&mut self, id: usize) {
        self.nodes[id].attached = false;
        let children = match &self.nodes[id].kind {
            NodeKind::Element { children, .. } => children.clone(),
            NodeKind::Text(_) => Vec::new(),
        };
        for child in children {
            self.detach(child);
        }
    }

    fn element(&self, el: ElementId) -> Option<&DomNode> {
        self.nodes
            .get(el.0)
            .filter(|node| node.attached && matches!(node.kind, NodeKind::Element { .. }))
    }

    /// Every attached element matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            log::debug!("Unsupported selector '{}'", selector);
            return Vec::new();
        };
        let mut found = Vec::new();
        for root in &self.roots {
            self.collect_matches(*root, &selector, &mut found);
        }
        found
    }

    fn collect_matches(&self, id: usize, selector: &Selector, found: &mut Vec<ElementId>) {
        if let NodeKind::Element {
            tag,
            attrs,
            children,
        } = &self.nodes[id].kind
        {
            if selector.matches(tag, attrs) {
                found.push(ElementId(id));
            }
            for child in children {
                self.collect_matches(*child, selector, found);
            }
        }
    }

    pub fn tag_name(&self, el: ElementId) -> Option<&str> {
        match &self.element(el)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        match &self.element(el)?.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn text_content(&self, el: ElementId) -> Option<String> {
        self.element(el)?;
        let mut out = String::new();
        self.collect_text(el.0, &mut out);
        Some(out)
    }

    fn collect_text(&self, id: usize, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { children, .. } => {
                for child in children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Children of `el` that are elements
    pub fn child_elements(&self, el: ElementId) -> Vec<ElementId> {
        match self.element(el).map(|node| &node.kind) {
            Some(NodeKind::Element { children, .. }) => children
                .iter()
                .filter(|c| matches!(self.nodes[**c].kind, NodeKind::Element { .. }))
                .map(|c| ElementId(*c))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            self.write_html(*root, &mut out);
        }
        out
    }

    fn write_html(&self, id: usize, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element {
                tag,
                attrs,
                children,
            } => {
                write_open_tag(out, tag, attrs);
                if is_void_element(tag) {
                    return;
                }
                for child in children {
                    self.write_html(*child, out);
                }
                write_close_tag(out, tag);
            }
        }
    }
}

impl DomHost for Document {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn is_attached(&self, el: ElementId) -> bool {
        self.element(el).is_some()
    }

    fn outer_html(&self, el: ElementId) -> Option<String> {
        self.element(el)?;
        let mut out = String::new();
        self.write_html(el.0, &mut out);
        Some(out)
    }

    fn replace_with(&mut self, el: ElementId, vnode: &VNode) -> Result<ElementId, MountError> {
        let parent = match self.element(el) {
            Some(node) => node.parent,
            None => return Err(MountError::DetachedElement { element: el }),
        };

        let new_id = self.insert_vnode(vnode, parent);
        let siblings = match parent {
            Some(parent) => match &mut self.nodes[parent].kind {
                NodeKind::Element { children, .. } => children,
                NodeKind::Text(_) => {
                    return Err(MountError::Patch {
                        reason: format!("parent of {} is not an element", el),
                    });
                }
            },
            None => &mut self.roots,
        };
        match siblings.iter().position(|c| *c == el.0) {
            Some(slot) => siblings[slot] = new_id,
            None => {
                return Err(MountError::Patch {
                    reason: format!("{} is missing from its parent", el),
                });
            }
        }
        self.detach(el.0);
        log::trace!("Replaced {} with element#{}", el, new_id);
        Ok(ElementId(new_id))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots.len())
            .finish()
    }
}
