use super::{format_lineage, to_json};
use crate::error::InspectResult;
use serde::Serialize;
use sqlstate_errors::table::find_condition;
use sqlstate_errors::{Category, Classifier, MatchRule, SqlState};

#[derive(Debug, Serialize)]
pub struct ClassifyReport<'a> {
    pub code: &'a str,
    pub category: Category,
    pub rule: MatchRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<&'static str>,
    pub lineage: Vec<Category>,
}

pub fn report<'a>(classifier: &Classifier, code: &'a str) -> ClassifyReport<'a> {
    let classification = classifier.explain_str(Some(code));
    let condition = SqlState::parse(code)
        .ok()
        .and_then(|parsed| find_condition(&parsed))
        .map(|entry| entry.name);

    ClassifyReport {
        code,
        category: classification.category,
        rule: classification.rule,
        condition,
        lineage: classification.category.lineage().collect(),
    }
}

pub fn run(classifier: &Classifier, codes: &[String], json: bool) -> InspectResult<String> {
    let reports: Vec<_> = codes.iter().map(|code| report(classifier, code)).collect();
    if json {
        return to_json(&reports);
    }

    let lines: Vec<String> = reports
        .iter()
        .map(|r| {
            format!(
                "{:<7} {:<18} {:<13} {:<45} {}",
                r.code,
                r.category.as_str(),
                r.rule.as_str(),
                r.condition.unwrap_or("-"),
                format_lineage(r.category)
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
