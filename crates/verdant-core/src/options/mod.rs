//! # Verdant Component Options
//!
//! A component is described by [`ComponentOptions`]: an explicitly enumerated
//! set of optional fields rather than a free-form map. Each field has a fixed
//! merge strategy, applied by [`merge::merge_options`]:
//!
//! | field                                   | strategy                          |
//! |-----------------------------------------|-----------------------------------|
//! | `data`, `methods`, `computed`, `watch`, `props` | child overrides parent per key |
//! | lifecycle hooks                         | concatenated, parent first        |
//! | `components`, `directives`, `filters`   | child registry falls back to parent |
//! | `el`, `template`, `render`, `props_data`| child only                        |
//! | `name`                                  | child, else parent                |
//!
//! Options can also be loaded from JSON, YAML or TOML files through the
//! [`format`] submodule; only the declarative fields are available there.
pub mod error;
pub mod format;
pub mod merge;
pub mod registry;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dom::MountTarget;
use crate::instance::Instance;
use crate::kernel::constants::ANONYMOUS_COMPONENT;
use crate::kernel::error::BoxError;
use crate::lifecycle::{Hook, HookFn};
use crate::render::RenderFn;
use crate::vdom::VElement;

/// Produces the initial data object of an instance
pub type DataFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Instance method. Receives the instance explicitly and the call arguments.
pub type MethodFn = Arc<dyn Fn(&mut Instance, &[Value]) -> Value + Send + Sync>;

/// Computed getter, evaluated on read
pub type ComputedFn = Arc<dyn Fn(&Instance) -> Value + Send + Sync>;

/// Watcher called with `(instance, new, old)` after a state key changes
pub type WatchFn = Arc<dyn Fn(&mut Instance, &Value, &Value) + Send + Sync>;

/// Value transformer referenced from templates as `{{ path | name }}`
pub type FilterFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Directive applied to a rendered element (`v-name="path"`) with the bound value
pub type DirectiveFn = Arc<dyn Fn(&mut VElement, &Value) + Send + Sync>;

/// Component definition stored in a `components` registry
pub type ComponentDef = Arc<ComponentOptions>;

/// Declared property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropDef {
    /// Value used when the parent does not pass one
    pub default: Option<Value>,
    /// Missing required props are reported during state initialization
    pub required: bool,
}

impl PropDef {
    pub fn required() -> Self {
        Self {
            default: None,
            required: true,
        }
    }

    pub fn with_default(default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            required: false,
        }
    }
}

/// Component configuration, either locally declared or resolved by merging.
#[derive(Clone, Default)]
pub struct ComponentOptions {
    pub name: Option<String>,
    pub data: Option<DataFn>,
    pub props: BTreeMap<String, PropDef>,
    /// Values passed to the declared props at construction
    pub props_data: Map<String, Value>,
    pub methods: BTreeMap<String, MethodFn>,
    pub computed: BTreeMap<String, ComputedFn>,
    pub watch: BTreeMap<String, WatchFn>,
    pub hooks: HashMap<Hook, Vec<HookFn>>,
    pub components: Arc<registry::AssetRegistry<ComponentDef>>,
    pub directives: Arc<registry::AssetRegistry<DirectiveFn>>,
    pub filters: Arc<registry::AssetRegistry<FilterFn>>,
    pub el: Option<MountTarget>,
    pub template: Option<String>,
    pub render: Option<RenderFn>,
}

impl ComponentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for logs and error messages
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS_COMPONENT)
    }

    /// Callbacks registered for `hook`, in dispatch order
    pub fn hooks_for(&self, hook: Hook) -> &[HookFn] {
        self.hooks.get(&hook).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when a template, render function or mount target could produce
    /// a render function
    pub fn has_render_source(&self) -> bool {
        self.render.is_some()
            || self.template.as_deref().is_some_and(|t| !t.is_empty())
            || self.el.is_some()
    }

    // --- builder methods ---

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Data factory; must return a JSON object
    pub fn data<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.data = Some(Arc::new(f));
        self
    }

    /// Static data object, cloned for each instance
    pub fn data_value(mut self, value: Value) -> Self {
        self.data = Some(Arc::new(move || value.clone()));
        self
    }

    pub fn prop(mut self, name: &str, def: PropDef) -> Self {
        self.props.insert(name.to_string(), def);
        self
    }

    pub fn prop_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.props_data.insert(name.to_string(), value.into());
        self
    }

    pub fn method<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(f));
        self
    }

    pub fn computed<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&Instance) -> Value + Send + Sync + 'static,
    {
        self.computed.insert(name.to_string(), Arc::new(f));
        self
    }

    pub fn watch<F>(mut self, key: &str, f: F) -> Self
    where
        F: Fn(&mut Instance, &Value, &Value) + Send + Sync + 'static,
    {
        self.watch.insert(key.to_string(), Arc::new(f));
        self
    }

    /// Append a lifecycle callback. Several callbacks per hook run in the
    /// order they were added.
    pub fn hook<F>(mut self, hook: Hook, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hooks.entry(hook).or_default().push(Arc::new(f));
        self
    }

    pub fn component(mut self, name: &str, definition: ComponentOptions) -> Self {
        Arc::make_mut(&mut self.components).register(name, Arc::new(definition));
        self
    }

    pub fn directive<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&mut VElement, &Value) + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.directives).register(name, Arc::new(f));
        self
    }

    pub fn filter<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.filters).register(name, Arc::new(f));
        self
    }

    pub fn el(mut self, target: impl Into<MountTarget>) -> Self {
        self.el = Some(target.into());
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.template = Some(template.to_string());
        self
    }

    pub fn render(mut self, render: RenderFn) -> Self {
        self.render = Some(render);
        self
    }
}

impl fmt::Debug for ComponentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hook_counts: BTreeMap<String, usize> = self
            .hooks
            .iter()
            .map(|(hook, fns)| (hook.to_string(), fns.len()))
            .collect();
        f.debug_struct("ComponentOptions")
            .field("name", &self.name)
            .field("has_data", &self.data.is_some())
            .field("props", &self.props.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("computed", &self.computed.keys().collect::<Vec<_>>())
            .field("watch", &self.watch.keys().collect::<Vec<_>>())
            .field("hooks", &hook_counts)
            .field("components", &self.components)
            .field("directives", &self.directives)
            .field("filters", &self.filters)
            .field("el", &self.el)
            .field("template", &self.template)
            .field("render", &self.render)
            .finish()
    }
}

pub use format::{FileFormat, OptionsFile};
pub use merge::merge_options;
pub use registry::AssetRegistry;
