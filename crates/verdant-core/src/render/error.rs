//! # Verdant Render Resolution Errors
//!
//! [`ConfigurationError`] is raised when a component is mounted but none of
//! `render`, `template` or the mount target's markup can produce a render
//! function. Template syntax errors are not wrapped here; they surface as
//! [`TemplateSyntaxError`](crate::compiler::error::TemplateSyntaxError).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Component '{component}' has no render function, template or mount element")]
    NoRenderSource { component: String },
}
