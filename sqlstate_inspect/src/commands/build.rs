//! Classify a JSON diagnostic record read from a file or stdin

use super::to_json;
use crate::error::{InspectError, InspectResult};
use sqlstate_errors::{ClassifiedError, DiagnosticRecord, ErrorFactory};
use std::io::Read;
use std::path::Path;

/// Read the whole input; `None` or `-` means stdin
pub fn read_input(file: Option<&Path>) -> InspectResult<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|e| InspectError::io(path, e))
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| InspectError::io("<stdin>", e))?;
            Ok(buffer)
        }
    }
}

pub fn classify_json(factory: &ErrorFactory, input: &str) -> InspectResult<ClassifiedError> {
    let record: DiagnosticRecord = serde_json::from_str(input)?;
    Ok(factory.build(record))
}

pub fn run(factory: &ErrorFactory, input: &str, json: bool) -> InspectResult<String> {
    let error = classify_json(factory, input)?;
    if json {
        return to_json(&error);
    }

    let mut out = vec![format!("{}: {}", error.category(), error)];
    if let Some(name) = error.condition_name() {
        out.push(format!("  condition: {}", name));
    }
    if let Some(record) = error.diagnostic() {
        for (field, value) in record.fields() {
            out.push(format!("  {}: {}", field, value));
        }
        for (code, value) in record.extra() {
            out.push(format!("  [{}]: {}", code, value));
        }
    }
    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use sqlstate_errors::Category;
    use std::io::Write;

    const INPUT: &str = r#"{
        "severity": "ERROR",
        "sqlstate": "42P01",
        "message_primary": "relation \"missing\" does not exist",
        "statement_position": "15"
    }"#;

    #[test]
    fn test_classify_json() {
        let error = classify_json(&ErrorFactory::default(), INPUT).unwrap();
        assert_eq!(error.category(), Category::ProgrammingError);
        assert_eq!(error.to_string(), "relation \"missing\" does not exist");
        assert_eq!(error.condition_name(), Some("undefined_table"));
    }

    #[test]
    fn test_run_text() {
        let text = run(&ErrorFactory::default(), INPUT, false).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "ProgrammingError: relation \"missing\" does not exist"
        );
        assert!(text.contains("  statement_position: 15"));
    }

    #[test]
    fn test_run_json_keeps_diagnostic() {
        let out = run(&ErrorFactory::default(), INPUT, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["category"], "ProgrammingError");
        assert_eq!(value["diagnostic"]["statement_position"], "15");
    }

    #[test]
    fn test_invalid_json() {
        assert_matches!(
            classify_json(&ErrorFactory::default(), "{ not json"),
            Err(InspectError::Json(_))
        );
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(INPUT.as_bytes()).unwrap();

        let content = read_input(Some(file.path())).unwrap();
        assert_eq!(content, INPUT);

        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            read_input(Some(&dir.path().join("absent.json"))),
            Err(InspectError::Io { .. })
        );
    }
}
