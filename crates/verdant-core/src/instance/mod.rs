//! # Verdant Instances
//!
//! An [`Instance`] is one live component: its resolved options, its state
//! table, its lifecycle phase and, once mounted, its root element. Instances
//! are produced by [`Runtime::construct`](crate::Runtime::construct) and
//! belong to a [`ComponentClass`], whose identity keys the render cache.
pub mod error;
pub mod state;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::dom::ElementId;
use crate::instance::error::StateError;
use crate::kernel::error::Result;
use crate::lifecycle::LifecyclePhase;
use crate::options::{ComponentDef, ComponentOptions};
use crate::render::RenderFn;

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_INSTANCE_UID: AtomicU64 = AtomicU64::new(1);

/// Identity of a component class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    pub(crate) fn next() -> Self {
        ClassId(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// A component class: merged class-level options plus an identity.
///
/// The root class carries the runtime's global options; subclasses come
/// from [`Runtime::extend`](crate::Runtime::extend).
#[derive(Debug, Clone)]
pub struct ComponentClass {
    id: ClassId,
    options: Arc<ComponentOptions>,
}

impl ComponentClass {
    pub(crate) fn new(id: ClassId, options: Arc<ComponentOptions>) -> Self {
        Self { id, options }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn options(&self) -> &Arc<ComponentOptions> {
        &self.options
    }

    pub fn name(&self) -> &str {
        self.options.display_name()
    }
}

/// One live component
pub struct Instance {
    uid: u64,
    class_id: ClassId,
    options: Arc<ComponentOptions>,
    state: Map<String, Value>,
    phase: LifecyclePhase,
    el: Option<ElementId>,
    render: Option<RenderFn>,
}

impl Instance {
    /// Wrap resolved options. The instance starts in
    /// [`LifecyclePhase::OptionsResolved`] with an empty state table.
    pub(crate) fn new(class_id: ClassId, options: Arc<ComponentOptions>) -> Self {
        Self {
            uid: NEXT_INSTANCE_UID.fetch_add(1, Ordering::Relaxed),
            class_id,
            options,
            state: Map::new(),
            phase: LifecyclePhase::OptionsResolved,
            el: None,
            render: None,
        }
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// Resolved options
    pub fn options(&self) -> &Arc<ComponentOptions> {
        &self.options
    }

    pub fn name(&self) -> &str {
        self.options.display_name()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == LifecyclePhase::Mounted
    }

    /// Target element during mount, root mounted element afterwards
    pub fn el(&self) -> Option<ElementId> {
        self.el
    }

    pub fn render_fn(&self) -> Option<&RenderFn> {
        self.render.as_ref()
    }

    /// Raw state table (props and data)
    pub fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    /// Read a value by dotted path (`user.name`, `items.0`).
    ///
    /// The first segment is looked up in the state table and then among the
    /// computed getters; remaining segments descend into objects and arrays.
    pub fn get(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let head = segments.next()?;
        let root = match self.state.get(head) {
            Some(value) => value.clone(),
            None => {
                let getter = self.options.computed.get(head)?;
                getter(self)
            }
        };
        segments.try_fold(root, |value, segment| match value {
            Value::Object(mut map) => map.remove(segment),
            Value::Array(mut items) => {
                let index: usize = segment.parse().ok()?;
                (index < items.len()).then(|| items.swap_remove(index))
            }
            _ => None,
        })
    }

    /// Write a top-level state key. When the value changed and a watcher is
    /// declared for the key, the watcher runs synchronously with
    /// `(new, old)`; a key that did not exist reports `old` as null.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let old = self.state.insert(key.to_string(), value.clone());
        if old.as_ref() == Some(&value) {
            return;
        }
        let watcher = self.options.watch.get(key).cloned();
        if let Some(watcher) = watcher {
            log::trace!("Running watcher for '{}' on {}", key, self.name());
            watcher(self, &value, &old.unwrap_or(Value::Null));
        }
    }

    /// Call a declared method with the instance
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value> {
        let f = self.options.methods.get(method).cloned().ok_or_else(|| {
            StateError::UnknownMethod {
                component: self.name().to_string(),
                method: method.to_string(),
            }
        })?;
        Ok(f(self, args))
    }

    /// Look up a component definition through the registry chain
    pub fn resolve_component(&self, name: &str) -> Option<ComponentDef> {
        self.options.components.get(name)
    }

    pub(crate) fn state_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.state
    }

    pub(crate) fn advance(&mut self, phase: LifecyclePhase) {
        log::trace!("{} (uid {}): {} -> {}", self.name(), self.uid, self.phase, phase);
        self.phase = phase;
    }

    pub(crate) fn set_el(&mut self, el: ElementId) {
        self.el = Some(el);
    }

    pub(crate) fn set_render(&mut self, render: RenderFn) {
        self.render = Some(render);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("uid", &self.uid)
            .field("class_id", &self.class_id)
            .field("name", &self.name())
            .field("phase", &self.phase)
            .field("el", &self.el)
            .field("state_keys", &self.state.keys().collect::<Vec<_>>())
            .field("has_render", &self.render.is_some())
            .finish()
    }
}

pub use state::{DefaultStateInitializer, StateInitializer};
