//! DB-API error categories
//!
//! The closed set of categories a classification can yield. Categories are
//! plain enum variants; the conceptual nesting is exposed through
//! [`Category::parent`] and [`Category::is_a`] so callers can match an exact
//! variant or any ancestor group:
//!
//! ```text
//! Warning
//! Error
//!  |__ InterfaceError
//!  |__ DatabaseError
//!       |__ DataError
//!       |__ OperationalError
//!       |__ IntegrityError
//!       |__ InternalError
//!       |__ ProgrammingError
//!       |__ NotSupportedError
//! ```

use serde::{Deserialize, Serialize};

/// Category of a classified database error
///
/// Variants are declared broadest first, so the derived `Ord` follows
/// [`Category::depth`] and then declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Important non-fatal condition, e.g. data truncation
    Warning,
    /// Root of every error category
    Error,
    /// Failure in the client library itself rather than the database
    InterfaceError,
    /// Database-reported condition with no more specific category
    DatabaseError,
    /// Problem with the processed data (division by zero, value out of range)
    DataError,
    /// Failure outside programmer control (disconnects, resource exhaustion,
    /// transaction aborts)
    OperationalError,
    /// Violation of a declared relational constraint
    IntegrityError,
    /// Internal inconsistency reported by the database (stale cursor,
    /// transaction out of sync)
    InternalError,
    /// Caller misuse: syntax errors, missing objects, wrong argument counts
    ProgrammingError,
    /// Capability not implemented by the target database
    NotSupportedError,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Warning,
        Category::Error,
        Category::InterfaceError,
        Category::DatabaseError,
        Category::DataError,
        Category::OperationalError,
        Category::IntegrityError,
        Category::InternalError,
        Category::ProgrammingError,
        Category::NotSupportedError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Warning => "Warning",
            Category::Error => "Error",
            Category::InterfaceError => "InterfaceError",
            Category::DatabaseError => "DatabaseError",
            Category::DataError => "DataError",
            Category::OperationalError => "OperationalError",
            Category::IntegrityError => "IntegrityError",
            Category::InternalError => "InternalError",
            Category::ProgrammingError => "ProgrammingError",
            Category::NotSupportedError => "NotSupportedError",
        }
    }

    /// Parse a category from its variant name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }

    /// Immediate broader category, `None` for the roots
    pub const fn parent(&self) -> Option<Category> {
        match self {
            Category::Warning | Category::Error => None,
            Category::InterfaceError | Category::DatabaseError => Some(Category::Error),
            Category::DataError
            | Category::OperationalError
            | Category::IntegrityError
            | Category::InternalError
            | Category::ProgrammingError
            | Category::NotSupportedError => Some(Category::DatabaseError),
        }
    }

    /// Distance from the root of this category's tree: 0 for `Warning` and
    /// `Error`, 2 for the database leaf categories
    pub fn depth(&self) -> usize {
        self.lineage().count() - 1
    }

    /// This category followed by each ancestor up to its root
    pub fn lineage(&self) -> impl Iterator<Item = Category> {
        std::iter::successors(Some(*self), Category::parent)
    }

    /// Whether `self` is `ancestor` or nested under it
    pub fn is_a(&self, ancestor: Category) -> bool {
        self.lineage().any(|category| category == ancestor)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Category::Warning)
    }

    /// Whether the condition was reported by the database rather than raised
    /// by the client library
    pub fn is_database_error(&self) -> bool {
        self.is_a(Category::DatabaseError)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_name("integrityerror"), None);
        assert_eq!(Category::from_name("Exception"), None);
    }

    #[test]
    fn test_ancestry() {
        assert!(Category::IntegrityError.is_a(Category::IntegrityError));
        assert!(Category::IntegrityError.is_a(Category::DatabaseError));
        assert!(Category::IntegrityError.is_a(Category::Error));
        assert!(!Category::IntegrityError.is_a(Category::DataError));
        assert!(!Category::IntegrityError.is_a(Category::InterfaceError));

        assert!(Category::InterfaceError.is_a(Category::Error));
        assert!(!Category::InterfaceError.is_a(Category::DatabaseError));

        // Warnings are not errors
        assert!(!Category::Warning.is_a(Category::Error));
        assert!(!Category::Error.is_a(Category::Warning));
    }

    #[test]
    fn test_lineage_and_depth() {
        let lineage: Vec<_> = Category::OperationalError.lineage().collect();
        assert_eq!(
            lineage,
            vec![
                Category::OperationalError,
                Category::DatabaseError,
                Category::Error
            ]
        );

        assert_eq!(Category::Warning.depth(), 0);
        assert_eq!(Category::Error.depth(), 0);
        assert_eq!(Category::InterfaceError.depth(), 1);
        assert_eq!(Category::DatabaseError.depth(), 1);
        assert_eq!(Category::NotSupportedError.depth(), 2);
    }

    #[test]
    fn test_ordering_is_broad_to_narrow() {
        for pair in Category::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].depth() <= pair[1].depth());
        }
        assert!(Category::DatabaseError < Category::IntegrityError);
    }

    #[test]
    fn test_database_error_predicate() {
        assert!(Category::DataError.is_database_error());
        assert!(Category::DatabaseError.is_database_error());
        assert!(!Category::InterfaceError.is_database_error());
        assert!(!Category::Warning.is_database_error());
    }
}
