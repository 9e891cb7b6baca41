use super::{format_lineage, to_json};
use crate::error::{InspectError, InspectResult};
use serde::Serialize;
use sqlstate_errors::table::{self, find_class};
use sqlstate_errors::{Category, Classifier, SqlState};

#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub code: &'static str,
    pub name: &'static str,
    pub class: &'static str,
    pub class_name: Option<&'static str>,
    /// Category pinned on the entry itself, if any
    pub pinned: Option<Category>,
    /// Category the classifier actually yields for the code
    pub category: Category,
}

pub fn report(classifier: &Classifier, key: &str) -> InspectResult<LookupReport> {
    let entry = table::lookup(key).ok_or_else(|| InspectError::NotFound(key.trim().to_string()))?;
    let code = SqlState::parse(entry.code)?;
    let class = code.class();

    Ok(LookupReport {
        code: entry.code,
        name: entry.name,
        class: &entry.code[..2],
        class_name: find_class(&class).map(|c| c.name),
        pinned: entry.category,
        category: classifier.classify(Some(&code)),
    })
}

pub fn run(classifier: &Classifier, key: &str, json: bool) -> InspectResult<String> {
    let report = report(classifier, key)?;
    if json {
        return to_json(&report);
    }

    let mut out = vec![
        format!("code:     {}", report.code),
        format!("name:     {}", report.name),
        format!(
            "class:    {} ({})",
            report.class,
            report.class_name.unwrap_or("unregistered")
        ),
        format!("category: {}", format_lineage(report.category)),
    ];
    if let Some(pinned) = report.pinned {
        out.push(format!("pinned:   {}", pinned));
    }
    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_lookup_by_name() {
        let report = report(&Classifier::standard(), "deadlock_detected").unwrap();
        assert_eq!(report.code, "40P01");
        assert_eq!(report.class, "40");
        assert_eq!(report.class_name, Some("transaction_rollback"));
        assert_eq!(report.pinned, None);
        assert_eq!(report.category, Category::OperationalError);
    }

    #[test]
    fn test_lookup_pinned_entry() {
        let report = report(&Classifier::standard(), "40002").unwrap();
        assert_eq!(report.pinned, Some(Category::IntegrityError));

        let text = run(&Classifier::standard(), "40002", false).unwrap();
        assert!(text.contains("pinned:   IntegrityError"));
    }

    #[test]
    fn test_lookup_missing() {
        assert_matches!(
            report(&Classifier::standard(), "no_such_thing"),
            Err(InspectError::NotFound(key)) if key == "no_such_thing"
        );
    }
}
