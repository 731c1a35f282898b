use std::sync::Arc;

use crate::instance::Instance;
use crate::kernel::error::{Error, Result};
use crate::lifecycle::Hook;

/// Invoke every callback registered for `hook` on the instance's resolved
/// options, synchronously and in order.
///
/// No-op when nothing is registered. The first callback error is returned
/// as [`Error::Hook`] and the remaining callbacks are skipped.
pub fn call_hook(vm: &mut Instance, hook: Hook) -> Result<()> {
    // Hold our own handle so callbacks can borrow the instance mutably.
    let options = Arc::clone(vm.options());
    let handlers = options.hooks_for(hook);
    if handlers.is_empty() {
        return Ok(());
    }

    for (index, handler) in handlers.iter().enumerate() {
        log::trace!(
            "Calling {} hook {}/{} on {} (uid {})",
            hook,
            index + 1,
            handlers.len(),
            vm.name(),
            vm.uid()
        );
        if let Err(source) = handler(vm) {
            log::error!("{} hook failed on {}: {}", hook, vm.name(), source);
            return Err(Error::Hook {
                hook,
                component: vm.name().to_string(),
                source,
            });
        }
    }
    Ok(())
}
