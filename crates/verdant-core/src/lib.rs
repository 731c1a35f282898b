//! # verdant-core
//!
//! Construction and mount pipeline of the Verdant component runtime.
//!
//! ```ignore
//! use verdant_core::{ComponentOptions, Document, Runtime};
//! use serde_json::json;
//!
//! let runtime = Runtime::new();
//! let mut doc = Document::parse(r#"<div id="app"></div>"#)?;
//! let options = ComponentOptions::new()
//!     .data(|| json!({ "message": "Hello" }))
//!     .template("<p>{{ message }}</p>")
//!     .el("#app");
//! let vm = runtime.create(&runtime.root(), options, &mut doc)?;
//! assert_eq!(doc.to_html(), "<p>Hello</p>");
//! ```
pub mod compiler;
pub mod dom;
pub mod instance;
pub mod kernel;
pub mod lifecycle;
pub mod mount;
pub mod options;
pub mod render;
pub mod vdom;

// Re-export key public types/traits for easier use by the binary and embedders
pub use compiler::{MarkupCompiler, TemplateCompiler, compile_to_function};
pub use compiler::error::TemplateSyntaxError;
pub use dom::{Document, DomHost, ElementId, MountTarget};
pub use instance::{ClassId, ComponentClass, Instance, StateInitializer};
pub use kernel::{Error, Result, Runtime, RuntimeBuilder, RuntimeConfig};
pub use lifecycle::{Hook, LifecyclePhase};
pub use mount::{MountEngine, PatchEngine};
pub use mount::error::MountError;
pub use options::{ComponentOptions, FileFormat, PropDef};
pub use render::{ConfigurationError, RenderFn};
pub use vdom::{VElement, VNode};

// Test module declaration
#[cfg(test)]
mod tests;
