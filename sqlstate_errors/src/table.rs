//! Built-in SQLSTATE registry
//!
//! Exact-code and class tables generated by `build.rs` from the
//! `config/<profile>.toml` registry at the workspace root. Both tables are
//! sorted by code, contain no duplicates and are never modified at runtime.

use crate::category::Category;
use crate::sqlstate::{SqlState, SqlStateClass};

/// A known five-character condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub code: &'static str,
    /// Engine condition name, e.g. `unique_violation`
    pub name: &'static str,
    /// Category pinned for this exact code; `None` defers to the class table
    pub category: Option<Category>,
}

/// A known two-character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassEntry {
    pub class: &'static str,
    pub name: &'static str,
    /// Category for every code of the class; `None` falls through to the
    /// default
    pub category: Option<Category>,
}

// PROFILE, ENGINE, SOURCE, CLASSES, CONDITIONS
include!(concat!(env!("OUT_DIR"), "/sqlstate_table.rs"));

/// Exact lookup of a condition by code
pub fn find_condition(code: &SqlState) -> Option<&'static Condition> {
    CONDITIONS
        .binary_search_by(|entry| entry.code.as_bytes().cmp(code.as_str().as_bytes()))
        .ok()
        .map(|index| &CONDITIONS[index])
}

/// Lookup of a class entry by its two-character prefix
pub fn find_class(class: &SqlStateClass) -> Option<&'static ClassEntry> {
    CLASSES
        .binary_search_by(|entry| entry.class.as_bytes().cmp(class.as_str().as_bytes()))
        .ok()
        .map(|index| &CLASSES[index])
}

/// Lookup of a condition by name, ignoring ASCII case
pub fn find_condition_by_name(name: &str) -> Option<&'static Condition> {
    CONDITIONS
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

/// Look up a condition by code or by name
///
/// Accepts `"23505"`, `"unique_violation"` or `"UNIQUE_VIOLATION"`.
pub fn lookup(name_or_code: &str) -> Option<&'static Condition> {
    let key = name_or_code.trim();
    match SqlState::parse(key) {
        Ok(code) => find_condition(&code).or_else(|| find_condition_by_name(key)),
        Err(_) => find_condition_by_name(key),
    }
}

/// Every condition registered under `class`, in code order
pub fn conditions_in_class(class: &SqlStateClass) -> impl Iterator<Item = &'static Condition> + '_ {
    CONDITIONS
        .iter()
        .filter(move |entry| entry.code.starts_with(class.as_str()))
}
