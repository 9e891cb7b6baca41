//! Configuration module for SQLSTATE classification
//!
//! The built-in registry is compiled from TOML by build.rs; runtime
//! preferences come from environment variables and overrides from TOML files.

pub mod error;
pub mod overrides;
pub mod runtime;

pub use error::{ConfigError, ConfigResult};
pub use overrides::{ClassOverride, CodeOverride, OverrideTable};
pub use runtime::ClassifierPreferences;

/// Build information and registry metadata
pub mod build_info {
    use crate::table;

    /// Returns the registry profile used during build
    pub fn profile() -> &'static str {
        table::PROFILE
    }

    /// Returns the database engine the registry describes
    pub fn engine() -> &'static str {
        table::ENGINE
    }

    /// Returns registry source information
    pub fn source_info() -> String {
        if table::SOURCE.is_empty() {
            format!("Generated from config/{}.toml", profile())
        } else {
            format!(
                "Generated from config/{}.toml ({})",
                profile(),
                table::SOURCE
            )
        }
    }

    pub fn condition_count() -> usize {
        table::CONDITIONS.len()
    }

    pub fn class_count() -> usize {
        table::CLASSES.len()
    }
}
