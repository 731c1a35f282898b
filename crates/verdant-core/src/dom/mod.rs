//! # Verdant Host DOM
//!
//! The pipeline reaches the host document only through [`DomHost`]:
//! resolving a mount target, reading a target's outer markup for
//! template extraction, and replacing the target with rendered output.
//! [`Document`] is an in-memory implementation used by the CLI and tests.
pub mod document;
pub mod selector;

use std::fmt;

use crate::mount::error::MountError;
use crate::vdom::VNode;

/// Handle to an element owned by a [`DomHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Where to mount: a selector or an element handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    Selector(String),
    Element(ElementId),
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountTarget::Selector(selector) => write!(f, "'{}'", selector),
            MountTarget::Element(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for MountTarget {
    fn from(selector: &str) -> Self {
        MountTarget::Selector(selector.to_string())
    }
}

impl From<String> for MountTarget {
    fn from(selector: String) -> Self {
        MountTarget::Selector(selector)
    }
}

impl From<ElementId> for MountTarget {
    fn from(id: ElementId) -> Self {
        MountTarget::Element(id)
    }
}

/// Host document operations consumed by the mount pipeline
pub trait DomHost {
    /// First attached element matching `selector`, in document order
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// True when `el` refers to an element still present in the document
    fn is_attached(&self, el: ElementId) -> bool;

    /// The element's own tag plus its full subtree, serialized
    fn outer_html(&self, el: ElementId) -> Option<String>;

    /// Replace `el` with the DOM built from `vnode`; returns the new root
    fn replace_with(&mut self, el: ElementId, vnode: &VNode) -> Result<ElementId, MountError>;
}

/// Resolve a mount target to an attached element
pub fn resolve_target(dom: &dyn DomHost, target: &MountTarget) -> Result<ElementId, MountError> {
    match target {
        MountTarget::Selector(selector) => {
            dom.query_selector(selector)
                .ok_or_else(|| MountError::TargetNotFound {
                    target: selector.clone(),
                })
        }
        MountTarget::Element(id) if dom.is_attached(*id) => Ok(*id),
        MountTarget::Element(id) => Err(MountError::TargetNotFound {
            target: id.to_string(),
        }),
    }
}

pub use document::Document;
pub use selector::Selector;

// Test module declaration
#[cfg(test)]
mod tests;
