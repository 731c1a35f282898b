//! # Verdant Mount Orchestration
//!
//! [`mount_instance`] takes a constructed instance (phase `CreatedFired`)
//! to `Mounted`:
//!
//! 1. resolve the target and store it on the instance;
//! 2. resolve the render function if the instance has none yet;
//! 3. hand off to the [`MountEngine`] exactly once.
//!
//! Any failure leaves the instance in the last phase it reached. Mounting an
//! instance twice is rejected rather than repeated, and so is mounting one
//! whose DOM was already patched in by a failed attempt (phase `Patched`).
pub mod engine;
pub mod error;

use crate::dom::{resolve_target, DomHost, MountTarget};
use crate::instance::Instance;
use crate::kernel::error::{Error, Result};
use crate::lifecycle::LifecyclePhase;
use crate::mount::error::MountError;
use crate::render::RenderResolver;

pub use engine::{MountEngine, PatchEngine};

/// Mount `vm` at `target`.
pub fn mount_instance(
    vm: &mut Instance,
    target: &MountTarget,
    dom: &mut dyn DomHost,
    resolver: &RenderResolver,
    engine: &dyn MountEngine,
) -> Result<()> {
    if vm.phase() >= LifecyclePhase::Patched {
        return Err(MountError::AlreadyMounted {
            component: vm.name().to_string(),
            uid: vm.uid(),
        }
        .into());
    }
    if vm.phase() < LifecyclePhase::CreatedFired {
        return Err(Error::Lifecycle {
            phase: vm.phase(),
            message: format!("{} cannot be mounted before it is created", vm.name()),
        });
    }

    log::info!("Mounting {} (uid {}) at {}", vm.name(), vm.uid(), target);
    let el = resolve_target(dom, target)?;
    vm.set_el(el);

    if vm.render_fn().is_none() {
        let render = resolver.resolve_with(vm.class_id(), vm.options(), || dom.outer_html(el))?;
        vm.set_render(render);
    }
    if vm.phase() < LifecyclePhase::RenderResolved {
        vm.advance(LifecyclePhase::RenderResolved);
    }

    if let Err(err) = engine.mount_component(vm, el, dom) {
        // A detached target means the engine swapped in new DOM before failing.
        if vm.phase() < LifecyclePhase::Patched && !dom.is_attached(el) {
            vm.advance(LifecyclePhase::Patched);
        }
        return Err(err);
    }
    vm.advance(LifecyclePhase::Mounted);
    log::info!("Mounted {} (uid {})", vm.name(), vm.uid());
    Ok(())
}
