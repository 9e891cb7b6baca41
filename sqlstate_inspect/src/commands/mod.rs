//! Subcommand implementations
//!
//! Each command renders its output to a `String` so `main` only decides
//! where it goes.

pub mod build;
pub mod classify;
pub mod lookup;
pub mod table;

use sqlstate_errors::Category;

/// `DataError < DatabaseError < Error`
pub fn format_lineage(category: Category) -> String {
    category
        .lineage()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(" < ")
}

fn to_json<T: serde::Serialize>(value: &T) -> crate::error::InspectResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lineage() {
        assert_eq!(
            format_lineage(Category::DataError),
            "DataError < DatabaseError < Error"
        );
        assert_eq!(format_lineage(Category::Warning), "Warning");
    }
}
