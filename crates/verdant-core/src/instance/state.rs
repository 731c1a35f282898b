use serde_json::Value;

use crate::instance::error::StateError;
use crate::instance::Instance;
use crate::kernel::config::RuntimeConfig;
use crate::kernel::error::Result;

/// Installs reactive state on a freshly constructed instance.
///
/// Called exactly once per instance, after `beforeCreate` and before
/// `created`.
pub trait StateInitializer: Send + Sync {
    fn name(&self) -> &'static str {
        "state-initializer"
    }

    fn init_state(&self, vm: &mut Instance, config: &RuntimeConfig) -> Result<()>;
}

/// Flat state table without dependency tracking.
///
/// Props, methods, data, computed and watch are processed in that order.
/// Props always win over data; a data key colliding with a prop is skipped.
/// Methods and computed getters are resolved on demand by
/// [`Instance::call`] and [`Instance::get`], so here they are only checked
/// for collisions.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStateInitializer;

impl StateInitializer for DefaultStateInitializer {
    fn name(&self) -> &'static str {
        "default-state-initializer"
    }

    fn init_state(&self, vm: &mut Instance, config: &RuntimeConfig) -> Result<()> {
        init_props(vm, config)?;
        check_methods(vm, config);
        init_data(vm, config)?;
        check_computed(vm, config);
        check_watchers(vm);
        log::debug!(
            "Initialized state for {} (uid {}): {} keys",
            vm.name(),
            vm.uid(),
            vm.state().len()
        );
        Ok(())
    }
}

fn init_props(vm: &mut Instance, config: &RuntimeConfig) -> Result<()> {
    let options = std::sync::Arc::clone(vm.options());

    for key in options.props_data.keys() {
        if !options.props.contains_key(key) {
            log::debug!("{}: ignoring undeclared prop '{}'", vm.name(), key);
        }
    }

    for (name, def) in &options.props {
        let value = match options.props_data.get(name) {
            Some(value) => value.clone(),
            None => {
                if def.required {
                    if config.strict_props {
                        return Err(StateError::MissingRequiredProp {
                            component: vm.name().to_string(),
                            prop: name.clone(),
                        }
                        .into());
                    }
                    log::warn!("{}: missing required prop '{}'", vm.name(), name);
                }
                def.default.clone().unwrap_or(Value::Null)
            }
        };
        vm.state_mut().insert(name.clone(), value);
    }
    Ok(())
}

fn check_methods(vm: &Instance, config: &RuntimeConfig) {
    if !config.warn_on_shadowing {
        return;
    }
    for name in vm.options().methods.keys() {
        if vm.options().props.contains_key(name) {
            log::warn!(
                "{}: method '{}' has already been defined as a prop",
                vm.name(),
                name
            );
        }
    }
}

fn init_data(vm: &mut Instance, config: &RuntimeConfig) -> Result<()> {
    let Some(factory) = vm.options().data.clone() else {
        return Ok(());
    };
    let data = match factory() {
        Value::Object(map) => map,
        Value::Null => return Ok(()),
        other => {
            return Err(StateError::DataNotObject {
                component: vm.name().to_string(),
                found: json_type_name(&other).to_string(),
            }
            .into());
        }
    };

    for (key, value) in data {
        if vm.options().props.contains_key(&key) {
            if config.warn_on_shadowing {
                log::warn!(
                    "{}: data key '{}' is already declared as a prop, keeping the prop",
                    vm.name(),
                    key
                );
            }
            continue;
        }
        if config.warn_on_shadowing && vm.options().methods.contains_key(&key) {
            log::warn!(
                "{}: data key '{}' shadows a method of the same name",
                vm.name(),
                key
            );
        }
        vm.state_mut().insert(key, value);
    }
    Ok(())
}

fn check_computed(vm: &Instance, config: &RuntimeConfig) {
    if !config.warn_on_shadowing {
        return;
    }
    for name in vm.options().computed.keys() {
        if vm.state().contains_key(name) {
            log::warn!(
                "{}: computed '{}' is hidden by a data key or prop of the same name",
                vm.name(),
                name
            );
        }
    }
}

fn check_watchers(vm: &Instance) {
    for key in vm.options().watch.keys() {
        if !vm.state().contains_key(key) && !vm.options().computed.contains_key(key) {
            log::warn!("{}: watcher for unknown key '{}'", vm.name(), key);
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
