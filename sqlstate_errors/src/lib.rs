//! SQLSTATE error classification
//!
//! Turns the diagnostic fields a database engine reports into a typed error
//! of the DB-API category hierarchy:
//!
//! ```ignore
//! use sqlstate_errors::{build_error, Category, DiagnosticRecord};
//!
//! let error = build_error(
//!     DiagnosticRecord::new("duplicate key value violates unique constraint")
//!         .with_sqlstate("23505"),
//! );
//! assert_eq!(error.category(), Category::IntegrityError);
//! assert_eq!(error.condition_name(), Some("unique_violation"));
//! ```

// Internal modules
pub mod category;
pub mod classifier;
pub mod config;
pub mod diagnostic;
pub mod factory;
pub mod sqlstate;
pub mod table;

// Re-export key types for library consumers
pub use category::Category;
pub use classifier::{
    classify, classify_str, explain, explain_str, Classification, Classifier, ClassifierBuilder,
    MatchRule,
};
pub use config::{ConfigError, ConfigResult};
pub use diagnostic::{DiagnosticField, DiagnosticRecord};
pub use factory::{build_error, ClassifiedError, DbResult, ErrorFactory, NO_DETAILS};
pub use sqlstate::{SqlState, SqlStateClass, SqlStateError, SqlStateResult};
pub use table::lookup;
