use std::fmt;
use std::sync::Arc;

use crate::compiler::{MarkupCompiler, TemplateCompiler};
use crate::dom::{DomHost, MountTarget};
use crate::instance::{ClassId, ComponentClass, DefaultStateInitializer, Instance, StateInitializer};
use crate::kernel::config::RuntimeConfig;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::lifecycle::{call_hook, Hook, LifecyclePhase};
use crate::mount::{mount_instance, MountEngine, PatchEngine};
use crate::options::{merge_options, ComponentOptions};
use crate::render::RenderResolver;
use crate::vdom::VElement;

/// Entry point of the runtime: global options, collaborators and the
/// construction/mount pipeline.
pub struct Runtime {
    config: RuntimeConfig,
    global: Arc<ComponentOptions>,
    root_id: ClassId,
    state: Arc<dyn StateInitializer>,
    resolver: RenderResolver,
    engine: Arc<dyn MountEngine>,
}

impl Runtime {
    /// Runtime with the built-in compiler, state initializer and engine
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::default()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn resolver(&self) -> &RenderResolver {
        &self.resolver
    }

    /// Global options every class inherits from
    pub fn global_options(&self) -> &Arc<ComponentOptions> {
        &self.global
    }

    // --- global registration ---

    /// Merge `mixin` into the global options. Render sources (`el`,
    /// `template`, `render`) are instance specific and are dropped. Assets
    /// the mixin declares are registered into the global registries in
    /// place, so existing classes see them too.
    pub fn mixin(&mut self, mut mixin: ComponentOptions) -> &mut Self {
        strip_render_sources(&mut mixin, "Global mixin");
        let mut merged = merge_options(&self.global, &mixin);
        merged.components = Arc::clone(&self.global.components);
        merged.directives = Arc::clone(&self.global.directives);
        merged.filters = Arc::clone(&self.global.filters);
        merged.components.absorb(&mixin.components);
        merged.directives.absorb(&mixin.directives);
        merged.filters.absorb(&mixin.filters);
        self.global = Arc::new(merged);
        self
    }

    /// Register a component definition visible to every class, including
    /// classes derived before the call
    pub fn component(&mut self, name: &str, definition: ComponentOptions) -> &mut Self {
        let definition = if definition.name.is_some() {
            definition
        } else {
            definition.name(name)
        };
        self.global.components.register(name, Arc::new(definition));
        self
    }

    pub fn directive<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&mut VElement, &serde_json::Value) + Send + Sync + 'static,
    {
        self.global.directives.register(name, Arc::new(f));
        self
    }

    pub fn filter<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
    {
        self.global.filters.register(name, Arc::new(f));
        self
    }

    // --- classes ---

    /// Root class carrying the current global options
    pub fn root(&self) -> ComponentClass {
        ComponentClass::new(self.root_id, Arc::clone(&self.global))
    }

    /// Derive a subclass. The definition's own `template`/`render` become
    /// the class-level render source shared by its instances.
    pub fn extend(&self, parent: &ComponentClass, definition: ComponentOptions) -> ComponentClass {
        let id = ClassId::next();
        log::debug!(
            "Extending {} ({}) into {} ({})",
            parent.name(),
            parent.id(),
            definition.display_name(),
            id
        );
        ComponentClass::new(id, Arc::new(merge_options(parent.options(), &definition)))
    }

    // --- instances ---

    /// Build an instance up to `created`: merge options, fire `beforeCreate`,
    /// initialize state, fire `created`. Never mounts.
    pub fn construct(&self, class: &ComponentClass, options: ComponentOptions) -> Result<Instance> {
        let mut resolved = merge_options(class.options(), &options);
        if resolved.render.is_none() && resolved.template.is_none() {
            // Class-level render source, not inherited from the parent chain.
            resolved.render = class.options().render.clone();
            resolved.template = class.options().template.clone();
        }

        let mut vm = Instance::new(class.id(), Arc::new(resolved));
        log::info!("Constructing {} (uid {}, {})", vm.name(), vm.uid(), class.id());

        call_hook(&mut vm, Hook::BeforeCreate)?;
        vm.advance(LifecyclePhase::BeforeCreateFired);

        self.state.init_state(&mut vm, &self.config)?;
        vm.advance(LifecyclePhase::StateInitialized);

        call_hook(&mut vm, Hook::Created)?;
        vm.advance(LifecyclePhase::CreatedFired);
        Ok(vm)
    }

    /// [`construct`](Self::construct), then mount when the options name an
    /// `el`. Mount failures are returned and the instance is dropped; use
    /// `construct` + [`mount`](Self::mount) to keep it.
    pub fn create(
        &self,
        class: &ComponentClass,
        options: ComponentOptions,
        dom: &mut dyn DomHost,
    ) -> Result<Instance> {
        let mut vm = self.construct(class, options)?;
        if let Some(target) = vm.options().el.clone() {
            self.mount(&mut vm, target, dom)?;
        } else {
            log::debug!("{} has no el; leaving it unmounted", vm.name());
        }
        Ok(vm)
    }

    /// Mount a constructed instance at `target`
    pub fn mount(
        &self,
        vm: &mut Instance,
        target: impl Into<MountTarget>,
        dom: &mut dyn DomHost,
    ) -> Result<()> {
        mount_instance(vm, &target.into(), dom, &self.resolver, self.engine.as_ref())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("root_id", &self.root_id)
            .field("state", &self.state.name())
            .field("resolver", &self.resolver)
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Configures the collaborators of a [`Runtime`]
#[derive(Default)]
pub struct RuntimeBuilder {
    config: Option<RuntimeConfig>,
    global: Option<ComponentOptions>,
    compiler: Option<Arc<dyn TemplateCompiler>>,
    state: Option<Arc<dyn StateInitializer>>,
    engine: Option<Arc<dyn MountEngine>>,
}

impl RuntimeBuilder {
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Initial global options. `el`, `template` and `render` are dropped
    /// when the runtime is built.
    pub fn global_options(mut self, options: ComponentOptions) -> Self {
        self.global = Some(options);
        self
    }

    pub fn compiler(mut self, compiler: Arc<dyn TemplateCompiler>) -> Self {
        self.compiler = Some(compiler);
        self
    }

    pub fn state_initializer(mut self, state: Arc<dyn StateInitializer>) -> Self {
        self.state = Some(state);
        self
    }

    pub fn engine(mut self, engine: Arc<dyn MountEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Runtime {
        let config = self.config.unwrap_or_default();
        let compiler = self.compiler.unwrap_or_else(|| Arc::new(MarkupCompiler));
        let state = self
            .state
            .unwrap_or_else(|| Arc::new(DefaultStateInitializer));
        let engine = self.engine.unwrap_or_else(|| Arc::new(PatchEngine));

        log::info!(
            "Initializing {} v{} (compiler: {}, state: {}, engine: {})",
            constants::FRAMEWORK_NAME,
            constants::FRAMEWORK_VERSION,
            compiler.name(),
            state.name(),
            engine.name()
        );

        let mut global = self.global.unwrap_or_default();
        strip_render_sources(&mut global, "Global options");
        // Private registries: global registration must not leak into a
        // caller-held copy of these options.
        global.components = Arc::new(global.components.flattened());
        global.directives = Arc::new(global.directives.flattened());
        global.filters = Arc::new(global.filters.flattened());

        Runtime {
            resolver: RenderResolver::new(compiler).with_caching(config.cache_renders),
            config,
            global: Arc::new(global),
            root_id: ClassId::next(),
            state,
            engine,
        }
    }
}

/// Global options never carry a render source: instances would inherit it.
fn strip_render_sources(options: &mut ComponentOptions, origin: &str) {
    if options.has_render_source() {
        log::warn!(
            "{} '{}' declares el/template/render; ignoring them",
            origin,
            options.display_name()
        );
    }
    options.el = None;
    options.template = None;
    options.render = None;
}
