//! Classification overrides loaded from TOML
//!
//! Same `class` / `condition` shape as the build-time registry, minus the
//! names, with a mandatory category:
//!
//! ```toml
//! class = [
//!     { class = "72", category = "OperationalError" },
//! ]
//! condition = [
//!     { code = "XX001", category = "DataError" },
//! ]
//! ```

use super::error::{ConfigError, ConfigResult};
use crate::category::Category;
use crate::sqlstate::{SqlState, SqlStateClass};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTable {
    #[serde(default)]
    pub class: Vec<ClassOverride>,
    #[serde(default)]
    pub condition: Vec<CodeOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOverride {
    pub class: SqlStateClass,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOverride {
    pub code: SqlState,
    pub category: Category,
}

impl OverrideTable {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
        let table = Self::from_toml_str(&content)?;

        log::info!(
            "Loaded {} class and {} code overrides from {}",
            table.class.len(),
            table.condition.len(),
            path.display()
        );

        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_empty() && self.condition.is_empty()
    }
}
