//! # Verdant Kernel Errors
//!
//! Defines the aggregate error type returned by the construction and mount
//! pipeline.
//!
//! Each subsystem owns a typed error enum (options loading, template
//! compilation, render resolution, mounting, reactive state). [`Error`] wraps
//! all of them through `#[from]` conversions so pipeline code can use `?`
//! throughout, and adds the two failures that belong to the pipeline itself:
//! user hook errors and lifecycle misuse.
use std::error::Error as StdError;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::compiler::error::TemplateSyntaxError;
use crate::instance::error::StateError;
use crate::lifecycle::{Hook, LifecyclePhase};
use crate::mount::error::MountError;
use crate::options::error::OptionsError;
use crate::render::error::ConfigurationError;

/// Boxed error produced by user code (hook bodies, external collaborators).
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Custom error type for the Verdant runtime
#[derive(Debug, ThisError)]
pub enum Error {
    /// Failure while reading or decoding an options/config file
    #[error("Options error: {0}")]
    Options(#[from] OptionsError),

    /// Malformed markup, surfaced unchanged from the template compiler
    #[error(transparent)]
    TemplateSyntax(#[from] TemplateSyntaxError),

    /// No usable render source
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Mount target or mount engine failure
    #[error("Mount error: {0}")]
    Mount(#[from] MountError),

    /// Reactive state initialization failure
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// A user hook callback returned an error. Later callbacks for the same
    /// hook, and the rest of the pipeline, did not run.
    #[error("'{hook}' hook failed in component '{component}': {source}")]
    Hook {
        hook: Hook,
        component: String,
        #[source]
        source: BoxError,
    },

    /// An operation was requested in a phase that does not allow it.
    #[error("Lifecycle error during {phase}: {message}")]
    Lifecycle {
        phase: LifecyclePhase,
        message: String,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Returns the user error carried by a [`Error::Hook`] failure.
    pub fn hook_source(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Error::Hook { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// True when this is [`MountError::TargetNotFound`].
    pub fn is_target_not_found(&self) -> bool {
        matches!(self, Error::Mount(MountError::TargetNotFound { .. }))
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
