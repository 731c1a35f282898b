use std::sync::Arc;

use serde_json::json;

use crate::instance::{ClassId, Instance};
use crate::kernel::error::Error;
use crate::lifecycle::{call_hook, Hook, LifecyclePhase};
use crate::options::ComponentOptions;
use crate::tests::common::EventLog;

fn instance(options: ComponentOptions) -> Instance {
    Instance::new(ClassId::next(), Arc::new(options))
}

#[test]
fn test_no_callbacks_is_noop() {
    let mut vm = instance(ComponentOptions::new());
    for hook in Hook::ALL {
        assert!(call_hook(&mut vm, hook).is_ok());
    }
    assert_eq!(vm.phase(), LifecyclePhase::OptionsResolved);
}

#[test]
fn test_callbacks_run_in_registration_order() {
    let log = EventLog::new();
    let mut vm = instance(
        ComponentOptions::new()
            .hook(Hook::Created, log.recorder("first"))
            .hook(Hook::Created, log.recorder("second"))
            .hook(Hook::Mounted, log.recorder("mounted")),
    );

    call_hook(&mut vm, Hook::Created).expect("created hooks");
    assert_eq!(log.events(), vec!["first", "second"]);
}

#[test]
fn test_callbacks_can_mutate_the_instance() {
    let mut vm = instance(ComponentOptions::new().hook(Hook::Created, |vm: &mut Instance| {
        vm.set("greeting", "hi");
        Ok(())
    }));

    call_hook(&mut vm, Hook::Created).expect("created hook");
    assert_eq!(vm.get("greeting"), Some(json!("hi")));
}

#[test]
fn test_first_error_stops_dispatch() {
    let log = EventLog::new();
    let mut vm = instance(
        ComponentOptions::new()
            .name("Broken")
            .hook(Hook::BeforeCreate, log.recorder("before"))
            .hook(Hook::BeforeCreate, |_vm: &mut Instance| Err("boom".into()))
            .hook(Hook::BeforeCreate, log.recorder("after")),
    );

    let err = call_hook(&mut vm, Hook::BeforeCreate).expect_err("hook error");
    assert_eq!(log.events(), vec!["before"]);
    match &err {
        Error::Hook { hook, component, .. } => {
            assert_eq!(*hook, Hook::BeforeCreate);
            assert_eq!(component, "Broken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.hook_source().map(|e| e.to_string()), Some("boom".to_string()));
    assert!(err.to_string().contains("'beforeCreate' hook failed"));
}

#[test]
fn test_hook_names_parse_and_display() {
    for hook in Hook::ALL {
        assert_eq!(hook.as_str().parse::<Hook>(), Ok(hook));
        assert_eq!(hook.to_string(), hook.as_str());
    }
    assert_eq!("mounted".parse::<Hook>(), Ok(Hook::Mounted));
    assert!("onMount".parse::<Hook>().is_err());
}

#[test]
fn test_phases_are_ordered() {
    assert!(LifecyclePhase::Unconstructed < LifecyclePhase::OptionsResolved);
    assert!(LifecyclePhase::BeforeCreateFired < LifecyclePhase::StateInitialized);
    assert!(LifecyclePhase::CreatedFired < LifecyclePhase::RenderResolved);
    assert!(LifecyclePhase::RenderResolved < LifecyclePhase::Patched);
    assert!(LifecyclePhase::Patched < LifecyclePhase::Mounted);
    assert_eq!(LifecyclePhase::default(), LifecyclePhase::Unconstructed);
    assert_eq!(LifecyclePhase::CreatedFired.to_string(), "CreatedFired");
}
