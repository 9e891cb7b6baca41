// RUNTIME PREFERENCES

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierPreferences {
    /// TOML file with classification overrides layered over the registry
    pub overrides_file: Option<PathBuf>,

    /// Whether to log codes whose class the registry does not know
    pub log_unknown_classes: bool,
}

impl ClassifierPreferences {
    /// Build preferences from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            overrides_file: var(env_vars::OVERRIDES_FILE)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_unknown_classes: var(env_vars::LOG_UNKNOWN_CLASSES)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }
}

impl Default for ClassifierPreferences {
    fn default() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }
}

/// Parse a boolean flag (used for environment variables)
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const OVERRIDES_FILE: &str = "SQLSTATE_OVERRIDES_FILE";
    pub const LOG_UNKNOWN_CLASSES: &str = "SQLSTATE_LOG_UNKNOWN_CLASSES";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_defaults_without_variables() {
        let prefs = ClassifierPreferences::from_vars(vars(&[]));
        assert_eq!(prefs.overrides_file, None);
        assert!(prefs.log_unknown_classes);
    }

    #[test]
    fn test_reads_variables() {
        let prefs = ClassifierPreferences::from_vars(vars(&[
            (env_vars::OVERRIDES_FILE, "/etc/sqlstate/overrides.toml"),
            (env_vars::LOG_UNKNOWN_CLASSES, "false"),
        ]));
        assert_eq!(
            prefs.overrides_file,
            Some(PathBuf::from("/etc/sqlstate/overrides.toml"))
        );
        assert!(!prefs.log_unknown_classes);
    }

    #[test]
    fn test_blank_path_is_ignored() {
        let prefs = ClassifierPreferences::from_vars(vars(&[(env_vars::OVERRIDES_FILE, "  ")]));
        assert_eq!(prefs.overrides_file, None);
    }

    #[test]
    fn test_invalid_flag_falls_back_to_default() {
        let prefs =
            ClassifierPreferences::from_vars(vars(&[(env_vars::LOG_UNKNOWN_CLASSES, "sometimes")]));
        assert!(prefs.log_unknown_classes);
    }
}
