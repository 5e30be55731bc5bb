use crate::error::{GeoformatError, Result};
use geoformat_api::{ConfigError, OperationKind};
use geoformat_plugin::{EncoderDescriptor, PublishMode, RequiresParameter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Operation kinds treated as feature queries, compared ignoring ASCII case.
    pub recognized_operations: Vec<String>,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            recognized_operations: vec![
                OperationKind::GET_FEATURE.to_string(),
                OperationKind::GET_FEATURE_WITH_LOCK.to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Upper bound callers put on a single catalog lookup.
    pub lookup_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 5_000,
        }
    }
}

/// An encoder declared in configuration rather than in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    pub aliases: Vec<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub publish_all_aliases: bool,
    #[serde(default)]
    pub type_name: Option<String>,
    /// Only serve operations carrying this parameter.
    #[serde(default)]
    pub requires_parameter: Option<String>,
}

impl FormatConfig {
    pub fn to_descriptor(&self) -> std::result::Result<EncoderDescriptor, ConfigError> {
        let mut builder = EncoderDescriptor::builder(self.aliases.iter().cloned());
        if let Some(identifier) = &self.identifier {
            builder = builder.identifier(identifier.clone());
        }
        if let Some(mime_type) = &self.mime_type {
            builder = builder.mime_type(mime_type.clone());
        }
        if let Some(type_name) = &self.type_name {
            builder = builder.type_name(type_name.clone());
        }
        if let Some(parameter) = &self.requires_parameter {
            builder = builder.predicate(RequiresParameter::new(parameter.clone()));
        }
        if self.publish_all_aliases {
            builder = builder.publish_mode(PublishMode::AllAliases);
        }
        builder.build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub negotiation: NegotiationConfig,
    pub directory: DirectoryConfig,
    pub formats: Vec<FormatConfig>,
}

impl ServiceConfig {
    /// `~/.geoformat/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".geoformat").join("config.json"))
    }

    /// Loads from `path`, which must exist, or else from the default location
    /// if a file is there, or else returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(GeoformatError::MissingConfig(path.display().to_string()));
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn format_descriptors(&self) -> std::result::Result<Vec<EncoderDescriptor>, ConfigError> {
        self.formats.iter().map(FormatConfig::to_descriptor).collect()
    }
}
