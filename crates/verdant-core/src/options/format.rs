use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::dom::MountTarget;
use crate::options::error::OptionsError;
use crate::options::{ComponentOptions, PropDef};

/// Supported options/config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl FileFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            FileFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            FileFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(FileFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(FileFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(FileFormat::Toml),
                _ => None,
            })
    }

    /// Deserialize `data` in this format
    pub fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T, OptionsError> {
        let wrap = |source: Box<dyn std::error::Error + Send + Sync + 'static>| {
            OptionsError::Deserialization {
                format: self.extension().to_string(),
                source,
            }
        };
        match self {
            FileFormat::Json => serde_json::from_str(data).map_err(|e| wrap(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            FileFormat::Yaml => serde_yaml::from_str(data).map_err(|e| wrap(Box::new(e))),
            #[cfg(feature = "toml-config")]
            FileFormat::Toml => toml::from_str(data).map_err(|e| wrap(Box::new(e))),
        }
    }

    /// Read and deserialize a file, picking the format from its extension
    pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, OptionsError> {
        let format = Self::from_path(path)
            .ok_or_else(|| OptionsError::UnsupportedFormat(path.to_path_buf()))?;
        let data = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading {} as {:?}", path.display(), format);
        format.decode(&data)
    }
}

/// Declarative subset of [`ComponentOptions`] that can live in a file.
///
/// Functions (methods, computed getters, watchers, hooks, render) cannot be
/// expressed here and must be attached in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionsFile {
    pub name: Option<String>,
    pub el: Option<String>,
    pub template: Option<String>,
    pub data: Option<Value>,
    pub props: BTreeMap<String, PropDef>,
    pub props_data: Map<String, Value>,
    pub components: BTreeMap<String, OptionsFile>,
}

impl OptionsFile {
    /// Convert into component options, failing on malformed fields.
    pub fn into_options(self) -> Result<ComponentOptions, OptionsError> {
        let mut options = ComponentOptions::new();
        options.name = self.name;
        options.el = self.el.map(MountTarget::Selector);
        options.template = self.template;
        options.props = self.props;
        options.props_data = self.props_data;

        if let Some(data) = self.data {
            if !data.is_object() {
                return Err(OptionsError::InvalidField {
                    field: "data".to_string(),
                    reason: "expected an object".to_string(),
                });
            }
            options.data = Some(Arc::new(move || data.clone()));
        }

        for (name, child) in self.components {
            let mut child = child.into_options()?;
            if child.name.is_none() {
                child.name = Some(name.clone());
            }
            options = options.component(&name, child);
        }
        Ok(options)
    }
}

impl ComponentOptions {
    /// Load declarative options from a JSON, YAML or TOML file.
    pub fn from_path(path: &Path) -> Result<Self, OptionsError> {
        FileFormat::load::<OptionsFile>(path)?.into_options()
    }

    /// Parse declarative options from a string in the given format.
    pub fn from_str_format(data: &str, format: FileFormat) -> Result<Self, OptionsError> {
        format.decode::<OptionsFile>(data)?.into_options()
    }
}
