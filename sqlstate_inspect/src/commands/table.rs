use super::to_json;
use crate::error::InspectResult;
use serde::Serialize;
use sqlstate_errors::table::{self, conditions_in_class, find_class, Condition};
use sqlstate_errors::{Category, Classifier, SqlStateClass};

#[derive(Debug, Serialize)]
pub struct TableRow {
    pub code: &'static str,
    pub name: &'static str,
    pub category: Category,
}

pub fn rows(classifier: &Classifier, class: Option<&SqlStateClass>) -> Vec<TableRow> {
    let to_row = |entry: &'static Condition| TableRow {
        code: entry.code,
        name: entry.name,
        category: classifier.classify_str(Some(entry.code)),
    };

    match class {
        Some(class) => conditions_in_class(class).map(to_row).collect(),
        None => table::CONDITIONS.iter().map(to_row).collect(),
    }
}

pub fn run(classifier: &Classifier, class: Option<&str>, json: bool) -> InspectResult<String> {
    let class = class.map(SqlStateClass::parse).transpose()?;
    let rows = rows(classifier, class.as_ref());
    if json {
        return to_json(&rows);
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    if let Some(class) = &class {
        out.push(format!(
            "class {} ({}): {}",
            class,
            find_class(class).map_or("unregistered", |entry| entry.name),
            class_category(classifier, class)
        ));
    }
    out.extend(
        rows.iter()
            .map(|row| format!("{}  {:<18} {}", row.code, row.category.as_str(), row.name)),
    );
    out.push(format!(
        "{} conditions ({} {})",
        rows.len(),
        table::ENGINE,
        table::PROFILE
    ));
    Ok(out.join("\n"))
}

/// Category of a code in `class` with no exact entry of its own
pub fn class_category(classifier: &Classifier, class: &SqlStateClass) -> Category {
    // No registry uses subclass ZZZ
    classifier.classify_str(Some(&format!("{}ZZZ", class)))
}
