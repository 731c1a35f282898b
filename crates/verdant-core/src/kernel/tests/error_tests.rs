use std::error::Error as StdError;

use crate::compiler::error::TemplateSyntaxError;
use crate::kernel::error::Error;
use crate::lifecycle::{Hook, LifecyclePhase};
use crate::mount::error::MountError;
use crate::render::error::ConfigurationError;

#[test]
fn test_subsystem_errors_convert() {
    let err: Error = MountError::TargetNotFound {
        target: "#app".to_string(),
    }
    .into();
    assert!(err.is_target_not_found());
    assert_eq!(
        err.to_string(),
        "Mount error: Mount target #app did not match any element"
    );

    let err: Error = ConfigurationError::NoRenderSource {
        component: "Card".to_string(),
    }
    .into();
    assert!(!err.is_target_not_found());
    assert!(err.to_string().starts_with("Configuration error: Component 'Card'"));
}

#[test]
fn test_template_syntax_errors_are_transparent() {
    let syntax = TemplateSyntaxError::new("<p>", 0, "unclosed element <p>");
    let err: Error = syntax.clone().into();
    assert_eq!(err.to_string(), syntax.to_string());
}

#[test]
fn test_hook_error_keeps_its_source() {
    let err = Error::Hook {
        hook: Hook::Created,
        component: "Card".to_string(),
        source: "bad state".into(),
    };
    assert_eq!(err.to_string(), "'created' hook failed in component 'Card': bad state");
    assert_eq!(err.source().map(|e| e.to_string()), Some("bad state".to_string()));
    assert!(err.hook_source().is_some());
}

#[test]
fn test_lifecycle_and_other_messages() {
    let err = Error::Lifecycle {
        phase: LifecyclePhase::StateInitialized,
        message: "not yet".to_string(),
    };
    assert_eq!(err.to_string(), "Lifecycle error during StateInitialized: not yet");
    assert!(err.hook_source().is_none());

    let err: Error = "plain".into();
    assert_eq!(err.to_string(), "Error: plain");
}
