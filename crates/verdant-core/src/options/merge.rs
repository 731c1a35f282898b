use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::options::registry::AssetRegistry;
use crate::options::{ComponentOptions, DataFn};

/// Merge a locally declared configuration (`child`) under an inherited one
/// (`parent`), producing the resolved configuration of an instance or class.
///
/// Pure and total. `el`, `template`, `render` and `props_data` are taken from
/// the child only; see the module docs of [`crate::options`] for the other
/// fields.
pub fn merge_options(parent: &ComponentOptions, child: &ComponentOptions) -> ComponentOptions {
    let mut hooks = parent.hooks.clone();
    for (hook, fns) in &child.hooks {
        hooks.entry(*hook).or_default().extend(fns.iter().cloned());
    }

    ComponentOptions {
        name: child.name.clone().or_else(|| parent.name.clone()),
        data: merge_data(parent.data.as_ref(), child.data.as_ref()),
        props: override_keys(&parent.props, &child.props),
        props_data: child.props_data.clone(),
        methods: override_keys(&parent.methods, &child.methods),
        computed: override_keys(&parent.computed, &child.computed),
        watch: override_keys(&parent.watch, &child.watch),
        hooks,
        components: merge_registry(&parent.components, &child.components),
        directives: merge_registry(&parent.directives, &child.directives),
        filters: merge_registry(&parent.filters, &child.filters),
        el: child.el.clone(),
        template: child.template.clone(),
        render: child.render.clone(),
    }
}

fn override_keys<V: Clone>(
    parent: &BTreeMap<String, V>,
    child: &BTreeMap<String, V>,
) -> BTreeMap<String, V> {
    let mut merged = parent.clone();
    merged.extend(child.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Both factories run per instance; child keys replace parent keys. A
/// non-object result from either side is passed through so state
/// initialization can report it.
fn merge_data(parent: Option<&DataFn>, child: Option<&DataFn>) -> Option<DataFn> {
    match (parent, child) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(Arc::clone(only)),
        (Some(parent), Some(child)) => {
            let parent = Arc::clone(parent);
            let child = Arc::clone(child);
            Some(Arc::new(move || match (parent(), child()) {
                (Value::Object(mut base), Value::Object(overrides)) => {
                    base.extend(overrides);
                    Value::Object(base)
                }
                (_, child_value) => child_value,
            }))
        }
    }
}

fn merge_registry<T: Clone>(
    parent: &Arc<AssetRegistry<T>>,
    child: &Arc<AssetRegistry<T>>,
) -> Arc<AssetRegistry<T>> {
    if child.is_empty() {
        // Nothing declared locally: share the parent's chain as-is.
        return Arc::clone(parent);
    }
    // Always chain, even to an empty parent: the parent may be filled later.
    Arc::new(child.rebased_on(parent))
}
