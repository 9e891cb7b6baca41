//! Construction of classified errors from diagnostic records

use crate::category::Category;
use crate::classifier::{self, Classifier};
use crate::diagnostic::DiagnosticRecord;
use crate::table;
use serde::Serialize;

/// Display text used when the engine reported no primary message
pub const NO_DETAILS: &str = "no details available";

/// Result type for operations that surface database errors
pub type DbResult<T> = Result<T, ClassifiedError>;

/// An error value of exactly one [`Category`]
///
/// Displays as the primary message, verbatim. The diagnostic record it was
/// built from travels with it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ClassifiedError {
    category: Category,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<DiagnosticRecord>,
}

impl ClassifiedError {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `None` only for client-side errors
    pub fn diagnostic(&self) -> Option<&DiagnosticRecord> {
        self.diagnostic.as_ref()
    }

    /// The SQLSTATE text as reported, even if malformed
    pub fn sqlstate(&self) -> Option<&str> {
        self.diagnostic.as_ref().and_then(DiagnosticRecord::sqlstate)
    }

    /// Registry name of the reported condition, e.g. `unique_violation`
    pub fn condition_name(&self) -> Option<&'static str> {
        let code = self.diagnostic.as_ref()?.sqlstate_code()?;
        table::find_condition(&code).map(|entry| entry.name)
    }

    pub fn is_a(&self, category: Category) -> bool {
        self.category.is_a(category)
    }

    pub fn is_warning(&self) -> bool {
        self.category.is_warning()
    }

    pub fn into_diagnostic(self) -> Option<DiagnosticRecord> {
        self.diagnostic
    }
}

impl From<DiagnosticRecord> for ClassifiedError {
    fn from(record: DiagnosticRecord) -> Self {
        build_error(record)
    }
}

/// Builds classified errors with a given classifier
#[derive(Debug, Clone, Default)]
pub struct ErrorFactory {
    classifier: Classifier,
}

impl ErrorFactory {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn build(&self, record: DiagnosticRecord) -> ClassifiedError {
        make_error(&self.classifier, record)
    }

    /// Error raised by the client itself, with no server diagnostic
    pub fn client_error(&self, category: Category, message: impl Into<String>) -> ClassifiedError {
        ClassifiedError {
            category,
            message: message.into(),
            diagnostic: None,
        }
    }

    pub fn interface_error(&self, message: impl Into<String>) -> ClassifiedError {
        self.client_error(Category::InterfaceError, message)
    }
}

/// Classify a diagnostic record with the built-in registry
pub fn build_error(record: DiagnosticRecord) -> ClassifiedError {
    make_error(classifier::standard(), record)
}

fn make_error(classifier: &Classifier, record: DiagnosticRecord) -> ClassifiedError {
    let category = classifier.classify_str(record.sqlstate());
    let message = match record.message_primary() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => NO_DETAILS.to_string(),
    };

    ClassifiedError {
        category,
        message,
        diagnostic: Some(record),
    }
}
