//! # Verdant Options Errors
//!
//! Errors raised while loading declarative component options or runtime
//! configuration from disk. Merging itself is total and never fails.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("I/O error while reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported options format for path '{0}'")]
    UnsupportedFormat(PathBuf),

    #[error("Deserialization from '{format}' failed: {source}")]
    Deserialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Invalid value for option '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}
