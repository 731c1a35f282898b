use crate::dom::{DomHost, ElementId};
use crate::instance::Instance;
use crate::kernel::error::Result;
use crate::lifecycle::{call_hook, Hook, LifecyclePhase};
use crate::mount::error::MountError;

/// Builds and attaches DOM for an instance whose render function is resolved.
///
/// Owns the `beforeMount` and `mounted` hooks. Called exactly once per
/// instance by the mount orchestrator; once the target has been replaced
/// the instance is never handed to an engine again, even if `mounted`
/// fails.
pub trait MountEngine: Send + Sync {
    fn name(&self) -> &'static str {
        "mount-engine"
    }

    /// Mount `vm` in place of `target`; returns the root mounted element
    fn mount_component(
        &self,
        vm: &mut Instance,
        target: ElementId,
        dom: &mut dyn DomHost,
    ) -> Result<ElementId>;
}

/// Renders the whole virtual DOM once and swaps it in for the target element
#[derive(Debug, Default, Clone, Copy)]
pub struct PatchEngine;

impl MountEngine for PatchEngine {
    fn name(&self) -> &'static str {
        "patch"
    }

    fn mount_component(
        &self,
        vm: &mut Instance,
        target: ElementId,
        dom: &mut dyn DomHost,
    ) -> Result<ElementId> {
        call_hook(vm, Hook::BeforeMount)?;

        let render = vm.render_fn().cloned().ok_or_else(|| MountError::Patch {
            reason: format!("{} reached the mount engine without a render function", vm.name()),
        })?;
        let vnode = render.call(vm);
        let root = dom.replace_with(target, &vnode)?;
        vm.set_el(root);
        vm.advance(LifecyclePhase::Patched);
        log::debug!("{} (uid {}) patched into {}", vm.name(), vm.uid(), root);

        call_hook(vm, Hook::Mounted)?;
        Ok(root)
    }
}
