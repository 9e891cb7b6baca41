//! SQLSTATE classification
//!
//! Maps a five-character code onto exactly one [`Category`]. Rules are tried
//! in order and the first that applies wins:
//!
//! 1. no code at all: `InterfaceError`
//! 2. text that is not a well-formed SQLSTATE: `Error`
//! 3. class `01`: `Warning`, whatever the subclass
//! 4. exact code match (overrides, then the built-in registry)
//! 5. class match on the first two characters (overrides, then built-in)
//! 6. anything else: `DatabaseError`
//!
//! Classification never fails and holds no mutable state.

use crate::category::Category;
use crate::config::{ClassifierPreferences, ConfigError, ConfigResult, OverrideTable};
use crate::sqlstate::{SqlState, SqlStateClass};
use crate::table;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Which rule produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchRule {
    /// No code was reported
    Absent,
    /// The reported code is not five characters of `[0-9A-Z]`
    Malformed,
    /// Class `01`
    WarningClass,
    /// Exact code entry
    Exact,
    /// Class entry
    Class,
    /// Nothing matched
    Default,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Absent => "absent",
            MatchRule::Malformed => "malformed",
            MatchRule::WarningClass => "warning-class",
            MatchRule::Exact => "exact",
            MatchRule::Class => "class",
            MatchRule::Default => "default",
        }
    }
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub rule: MatchRule,
}

impl Classification {
    const fn new(category: Category, rule: MatchRule) -> Self {
        Self { category, rule }
    }
}

/// The built-in registry plus optional overrides layered on top
///
/// Overrides win over built-in entries of the same tier; an exact entry
/// still beats a class entry regardless of where either comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    exact: BTreeMap<SqlState, Category>,
    classes: BTreeMap<SqlStateClass, Category>,
    log_unknown_classes: bool,
}

static STANDARD: Classifier = Classifier::standard();

impl Classifier {
    /// Classifier over the built-in registry with no overrides
    pub const fn standard() -> Self {
        Self {
            exact: BTreeMap::new(),
            classes: BTreeMap::new(),
            log_unknown_classes: true,
        }
    }

    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::default()
    }

    pub fn from_overrides(table: &OverrideTable) -> ConfigResult<Self> {
        Self::builder().overrides(table).build()
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::from_overrides(&OverrideTable::from_toml_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_overrides(&OverrideTable::from_file(path)?)
    }

    pub fn from_preferences(prefs: &ClassifierPreferences) -> ConfigResult<Self> {
        let mut builder = Self::builder().log_unknown_classes(prefs.log_unknown_classes);
        if let Some(path) = &prefs.overrides_file {
            builder = builder.overrides(&OverrideTable::from_file(path)?);
        }
        builder.build()
    }

    /// Classifier configured from `SQLSTATE_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_preferences(&ClassifierPreferences::default())
    }

    pub fn override_count(&self) -> usize {
        self.exact.len() + self.classes.len()
    }

    pub fn classify(&self, code: Option<&SqlState>) -> Category {
        self.explain(code).category
    }

    pub fn classify_str(&self, code: Option<&str>) -> Category {
        self.explain_str(code).category
    }

    pub fn explain(&self, code: Option<&SqlState>) -> Classification {
        let classification = match code {
            Some(code) => self.explain_code(code),
            None => Classification::new(Category::InterfaceError, MatchRule::Absent),
        };

        log::trace!(
            "Classified SQLSTATE {} as {} ({})",
            code.map(SqlState::as_str).unwrap_or("<absent>"),
            classification.category,
            classification.rule
        );

        classification
    }

    /// Classify raw code text as reported by the server
    pub fn explain_str(&self, code: Option<&str>) -> Classification {
        match code {
            None => self.explain(None),
            Some(text) => match SqlState::parse(text) {
                Ok(code) => self.explain(Some(&code)),
                Err(e) => {
                    log::debug!("Treating malformed SQLSTATE as generic error: {}", e);
                    Classification::new(Category::Error, MatchRule::Malformed)
                }
            },
        }
    }

    fn explain_code(&self, code: &SqlState) -> Classification {
        let class = code.class();
        if class == SqlStateClass::WARNING {
            return Classification::new(Category::Warning, MatchRule::WarningClass);
        }

        let exact = self
            .exact
            .get(code)
            .copied()
            .or_else(|| table::find_condition(code).and_then(|entry| entry.category));
        if let Some(category) = exact {
            return Classification::new(category, MatchRule::Exact);
        }

        let known_class = table::find_class(&class);
        let by_class = self
            .classes
            .get(&class)
            .copied()
            .or_else(|| known_class.and_then(|entry| entry.category));
        if let Some(category) = by_class {
            return Classification::new(category, MatchRule::Class);
        }

        if self.log_unknown_classes && known_class.is_none() {
            log::debug!(
                "SQLSTATE {} belongs to unknown class {}, defaulting to {}",
                code,
                class,
                Category::DatabaseError
            );
        }

        Classification::new(Category::DatabaseError, MatchRule::Default)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classify a code with the built-in registry
pub fn classify(code: Option<&SqlState>) -> Category {
    STANDARD.classify(code)
}

/// Classify raw code text with the built-in registry
pub fn classify_str(code: Option<&str>) -> Category {
    STANDARD.classify_str(code)
}

pub fn explain(code: Option<&SqlState>) -> Classification {
    STANDARD.explain(code)
}

pub fn explain_str(code: Option<&str>) -> Classification {
    STANDARD.explain_str(code)
}

/// The classifier used by the free functions
pub fn standard() -> &'static Classifier {
    &STANDARD
}

#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    exact: Vec<(SqlState, Category)>,
    classes: Vec<(SqlStateClass, Category)>,
    log_unknown_classes: bool,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self {
            exact: Vec::new(),
            classes: Vec::new(),
            log_unknown_classes: true,
        }
    }
}

impl ClassifierBuilder {
    pub fn code(mut self, code: SqlState, category: Category) -> Self {
        self.exact.push((code, category));
        self
    }

    pub fn class(mut self, class: SqlStateClass, category: Category) -> Self {
        self.classes.push((class, category));
        self
    }

    pub fn overrides(mut self, table: &OverrideTable) -> Self {
        self.exact
            .extend(table.condition.iter().map(|entry| (entry.code, entry.category)));
        self.classes
            .extend(table.class.iter().map(|entry| (entry.class, entry.category)));
        self
    }

    pub fn log_unknown_classes(mut self, enabled: bool) -> Self {
        self.log_unknown_classes = enabled;
        self
    }

    pub fn build(self) -> ConfigResult<Classifier> {
        let mut seen_codes = BTreeSet::new();
        for (code, category) in &self.exact {
            if !seen_codes.insert(*code) {
                return Err(ConfigError::duplicate_entry(code.as_str()));
            }
            if code.class() == SqlStateClass::WARNING && *category != Category::Warning {
                return Err(ConfigError::warning_class_override(code.as_str(), *category));
            }
        }

        let mut seen_classes = BTreeSet::new();
        for (class, category) in &self.classes {
            if !seen_classes.insert(*class) {
                return Err(ConfigError::duplicate_entry(class.as_str()));
            }
            if *class == SqlStateClass::WARNING && *category != Category::Warning {
                return Err(ConfigError::warning_class_override(class.as_str(), *category));
            }
        }

        Ok(Classifier {
            exact: self.exact.into_iter().collect(),
            classes: self.classes.into_iter().collect(),
            log_unknown_classes: self.log_unknown_classes,
        })
    }
}
