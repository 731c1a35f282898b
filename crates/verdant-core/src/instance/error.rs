//! # Verdant Instance State Errors
//!
//! Errors raised while installing reactive state on an instance or while
//! accessing it afterwards.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Component '{component}': data must produce an object, got {found}")]
    DataNotObject { component: String, found: String },

    #[error("Component '{component}': missing required prop '{prop}'")]
    MissingRequiredProp { component: String, prop: String },

    #[error("Component '{component}': no method named '{method}'")]
    UnknownMethod { component: String, method: String },
}
