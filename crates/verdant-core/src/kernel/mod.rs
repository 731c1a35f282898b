//! # Verdant Kernel
//!
//! The `kernel` module ties the pipeline together.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Runtime Bootstrapping**: [`Runtime`](bootstrap::Runtime) owns the global
//!   options, the render resolver and the external collaborators (state
//!   initializer, template compiler, mount engine), and sequences instance
//!   construction: options merge, `beforeCreate`, state initialization,
//!   `created`, then an optional mount.
//! - **Configuration**: [`RuntimeConfig`](config::RuntimeConfig), loadable from
//!   JSON, YAML or TOML.
//! - **Core Constants**: framework name/version and markup constants in the
//!   `constants` submodule.
//! - **Error Handling**: the aggregate [`Error`](error::Error) type and a
//!   `Result` alias in the `error` submodule.
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error;

pub use bootstrap::{Runtime, RuntimeBuilder};
pub use config::RuntimeConfig;
pub use error::{Error, Result};
// Test module declaration
#[cfg(test)]
mod tests;
