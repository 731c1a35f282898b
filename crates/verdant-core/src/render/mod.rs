//! # Verdant Render Resolution
//!
//! A [`RenderFn`] maps an instance's state to a [`VNode`]. The
//! [`RenderResolver`] picks where it comes from, in strict precedence:
//!
//! 1. an explicit `render` option, used unchanged;
//! 2. a non-empty `template`, compiled;
//! 3. the outer markup of the mount target, compiled;
//! 4. otherwise [`ConfigurationError::NoRenderSource`].
//!
//! Compiled functions are memoized per component class and markup in a
//! [`RenderCache`], so sibling instances of one class compile once.
pub mod error;
pub mod resolver;

use std::fmt;
use std::sync::Arc;

use crate::instance::Instance;
use crate::vdom::VNode;

/// Render function: instance state to virtual DOM
#[derive(Clone)]
pub struct RenderFn(Arc<dyn Fn(&Instance) -> VNode + Send + Sync>);

impl RenderFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Instance) -> VNode + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, vm: &Instance) -> VNode {
        (self.0)(vm)
    }

    /// True when both handles point to the same function
    pub fn ptr_eq(&self, other: &RenderFn) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFn").finish_non_exhaustive()
    }
}

pub use error::ConfigurationError;
pub use resolver::{RenderCache, RenderResolver};
