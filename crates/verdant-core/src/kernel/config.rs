use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::options::error::OptionsError;
use crate::options::format::FileFormat;

/// Runtime-wide settings.
///
/// Loaded from a JSON, YAML or TOML file with [`RuntimeConfig::from_path`];
/// missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Fail construction when a required prop is missing instead of warning
    pub strict_props: bool,
    /// Memoize compiled render functions per component class and markup
    pub cache_renders: bool,
    /// Warn when a data, computed or method name collides with another member
    pub warn_on_shadowing: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            strict_props: false,
            cache_renders: true,
            warn_on_shadowing: true,
        }
    }
}

impl RuntimeConfig {
    pub fn from_path(path: &Path) -> Result<Self, OptionsError> {
        FileFormat::load(path)
    }

    pub fn from_str_format(data: &str, format: FileFormat) -> Result<Self, OptionsError> {
        format.decode(data)
    }
}
