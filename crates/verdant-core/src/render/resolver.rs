use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::compiler::TemplateCompiler;
use crate::instance::ClassId;
use crate::kernel::error::Result;
use crate::options::ComponentOptions;
use crate::render::error::ConfigurationError;
use crate::render::RenderFn;

/// Compiled render functions keyed by component class and source markup.
///
/// Entries are never invalidated implicitly: a class's markup is fixed once
/// its options are merged, and target-element markup is part of the key.
/// Entries are grouped per class so lookups borrow the markup.
#[derive(Default)]
pub struct RenderCache {
    entries: RwLock<HashMap<ClassId, HashMap<String, RenderFn>>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, class: ClassId, markup: &str) -> Option<RenderFn> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&class)?.get(markup).cloned()
    }

    /// Store `render` unless another thread got there first; returns the
    /// function that ended up in the cache.
    pub fn insert(&self, class: ClassId, markup: &str, render: RenderFn) -> RenderFn {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let per_class = entries.entry(class).or_default();
        if let Some(existing) = per_class.get(markup) {
            return existing.clone();
        }
        per_class.insert(markup.to_string(), render.clone());
        render
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl fmt::Debug for RenderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCache")
            .field("entries", &self.len())
            .finish()
    }
}

/// Decides which render source an instance uses and compiles it if needed
pub struct RenderResolver {
    compiler: Arc<dyn TemplateCompiler>,
    cache: RenderCache,
    caching: bool,
}

impl RenderResolver {
    pub fn new(compiler: Arc<dyn TemplateCompiler>) -> Self {
        Self {
            compiler,
            cache: RenderCache::new(),
            caching: true,
        }
    }

    /// Enable or disable memoization of compiled functions
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    pub fn compiler(&self) -> &Arc<dyn TemplateCompiler> {
        &self.compiler
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Resolve the render function for an instance of `class` with resolved
    /// `options`. `target_markup` is the outer markup of the mount target,
    /// consulted only when neither `render` nor `template` is usable.
    pub fn resolve(
        &self,
        class: ClassId,
        options: &ComponentOptions,
        target_markup: Option<&str>,
    ) -> Result<RenderFn> {
        self.resolve_with(class, options, || target_markup.map(str::to_string))
    }

    /// Like [`resolve`](Self::resolve), but the target markup is only
    /// produced when the precedence reaches it.
    pub fn resolve_with<F>(
        &self,
        class: ClassId,
        options: &ComponentOptions,
        target_markup: F,
    ) -> Result<RenderFn>
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(render) = &options.render {
            log::debug!("{}: using explicit render function", options.display_name());
            return Ok(render.clone());
        }

        let fallback;
        let markup = match options.template.as_deref() {
            Some(template) if !template.is_empty() => {
                log::debug!("{}: compiling template option", options.display_name());
                template
            }
            _ => match target_markup() {
                Some(markup) => {
                    log::debug!("{}: compiling mount element markup", options.display_name());
                    fallback = markup;
                    fallback.as_str()
                }
                None => {
                    return Err(ConfigurationError::NoRenderSource {
                        component: options.display_name().to_string(),
                    }
                    .into());
                }
            },
        };

        if self.caching {
            if let Some(render) = self.cache.get(class, markup) {
                log::trace!("{}: render cache hit for {}", options.display_name(), class);
                return Ok(render);
            }
        }

        let render = self.compiler.compile(markup)?;
        if self.caching {
            return Ok(self.cache.insert(class, markup, render));
        }
        Ok(render)
    }
}

impl fmt::Debug for RenderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderResolver")
            .field("compiler", &self.compiler.name())
            .field("cache", &self.cache)
            .field("caching", &self.caching)
            .finish()
    }
}
