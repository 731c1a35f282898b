use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Named asset registry (components, directives, filters) with a fallback
/// chain to the registry it was merged under.
///
/// Lookups that miss locally continue into the parent, so an asset
/// registered globally is visible to every component without being copied
/// into each component's registry. Registration takes `&self`: a registry
/// shared behind an `Arc` stays live for every chain that points at it.
pub struct AssetRegistry<T> {
    entries: RwLock<HashMap<String, T>>,
    parent: Option<Arc<AssetRegistry<T>>>,
}

impl<T> AssetRegistry<T> {
    /// Create a new empty registry with no parent
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            parent: None,
        }
    }

    /// Create an empty registry that falls back to `parent`
    pub fn with_parent(parent: Arc<AssetRegistry<T>>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            parent: Some(parent),
        }
    }

    /// Register an asset, replacing any local entry of the same name.
    /// Entries further up the chain are shadowed, not modified.
    pub fn register(&self, name: &str, asset: T) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), asset);
    }

    pub fn contains(&self, name: &str) -> bool {
        let mut current = Some(self);
        while let Some(registry) = current {
            if registry.contains_own(name) {
                return true;
            }
            current = registry.parent.as_deref();
        }
        false
    }

    /// True when the name is registered in this registry itself
    pub fn contains_own(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names registered locally, sorted
    pub fn own_names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Every name resolvable through this registry, sorted and deduplicated
    pub fn names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        let mut current = Some(self);
        while let Some(registry) = current {
            names.extend(registry.own_names());
            current = registry.parent.as_deref();
        }
        names.into_iter().collect()
    }

    pub fn parent(&self) -> Option<&Arc<AssetRegistry<T>>> {
        self.parent.as_ref()
    }

    /// Number of registries in the chain, including this one
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }

    /// No local entries and no parent
    pub fn is_empty(&self) -> bool {
        self.parent.is_none()
            && self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty()
    }
}

impl<T: Clone> AssetRegistry<T> {
    /// Look an asset up locally, then through the parent chain.
    pub fn get(&self, name: &str) -> Option<T> {
        let mut current = Some(self);
        while let Some(registry) = current {
            let entries = registry.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(asset) = entries.get(name) {
                return Some(asset.clone());
            }
            current = registry.parent.as_deref();
        }
        None
    }

    /// Copy every resolvable entry into a parentless registry (nearer
    /// entries win).
    pub fn flattened(&self) -> AssetRegistry<T> {
        let mut entries = HashMap::new();
        let mut current = Some(self);
        while let Some(registry) = current {
            let own = registry.entries.read().unwrap_or_else(PoisonError::into_inner);
            for (name, asset) in own.iter() {
                entries.entry(name.clone()).or_insert_with(|| asset.clone());
            }
            current = registry.parent.as_deref();
        }
        AssetRegistry {
            entries: RwLock::new(entries),
            parent: None,
        }
    }

    /// Re-root a locally declared registry under `parent`.
    ///
    /// The result keeps this registry's own entries and delegates misses to
    /// `parent`. If this registry already had a chain of its own, that chain
    /// is flattened into the local entries first (local names win).
    pub fn rebased_on(&self, parent: &Arc<AssetRegistry<T>>) -> AssetRegistry<T> {
        AssetRegistry {
            parent: Some(Arc::clone(parent)),
            ..self.flattened()
        }
    }

    /// Register every entry resolvable through `other` into this registry
    pub fn absorb(&self, other: &AssetRegistry<T>) {
        let incoming = other.flattened().into_entries();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(incoming);
    }

    fn into_entries(self) -> HashMap<String, T> {
        self.entries.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for AssetRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for AssetRegistry<T> {
    fn clone(&self) -> Self {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Self {
            entries: RwLock::new(entries.clone()),
            parent: self.parent.clone(),
        }
    }
}

impl<T> fmt::Debug for AssetRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("own", &self.own_names())
            .field("depth", &self.depth())
            .finish()
    }
}
