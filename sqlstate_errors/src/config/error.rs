//! Configuration loading errors

use crate::category::Category;
use std::path::PathBuf;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read overrides file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid overrides TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Class 01 always classifies as Warning: '{key}' cannot be mapped to {category}")]
    WarningClassOverride { key: String, category: Category },

    #[error("Duplicate override for '{key}'")]
    DuplicateEntry { key: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn warning_class_override(key: &str, category: Category) -> Self {
        Self::WarningClassOverride {
            key: key.to_string(),
            category,
        }
    }

    pub fn duplicate_entry(key: &str) -> Self {
        Self::DuplicateEntry {
            key: key.to_string(),
        }
    }
}
