use sqlstate_errors::{
    build_error, classify, classify_str, explain, Category, ClassifiedError, Classifier,
    DiagnosticField, DiagnosticRecord, ErrorFactory, MatchRule, SqlState,
};
use std::io::Write;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn code(text: &str) -> SqlState {
    SqlState::parse(text).unwrap()
}

fn record(sqlstate: &str, message: &str) -> DiagnosticRecord {
    DiagnosticRecord::new(message).with_sqlstate(sqlstate)
}

#[test]
fn reported_codes_map_to_expected_categories() {
    let cases = [
        ("23505", Category::IntegrityError),
        ("42601", Category::ProgrammingError),
        ("08006", Category::OperationalError),
        ("01004", Category::Warning),
        ("99XYZ", Category::DatabaseError),
    ];

    for (sqlstate, expected) in cases {
        let error = build_error(record(sqlstate, "boom"));
        assert_eq!(error.category(), expected, "{}", sqlstate);
        assert_eq!(error.to_string(), "boom");
    }
}

#[test]
fn absent_code_is_an_interface_error() {
    let error = build_error(DiagnosticRecord::new("connection pool exhausted"));
    assert_eq!(error.category(), Category::InterfaceError);
    assert_eq!(error.to_string(), "connection pool exhausted");
    assert!(error.diagnostic().is_some());
}

#[test]
fn classification_is_total_across_every_class() {
    // Every class, with a spread of subclasses per class
    let subclasses = ["000", "001", "P01", "ZZZ", "9A9"];

    for first in ALPHABET {
        for second in ALPHABET {
            for subclass in subclasses {
                let text = format!("{}{}{}", *first as char, *second as char, subclass);
                let parsed = code(&text);
                let category = classify(Some(&parsed));

                assert!(Category::ALL.contains(&category));
                assert_ne!(category, Category::InterfaceError, "{}", text);
                if text.starts_with("01") {
                    assert_eq!(category, Category::Warning, "{}", text);
                }
            }
        }
    }
}

#[test]
fn classification_is_deterministic() {
    for text in ["23505", "40002", "57P01", "99XYZ", "01000"] {
        let parsed = code(text);
        let first = explain(Some(&parsed));
        for _ in 0..10 {
            assert_eq!(explain(Some(&parsed)), first);
        }
    }
}

#[test]
fn exact_entry_beats_class() {
    assert_eq!(
        classify(Some(&code("40002"))),
        Category::IntegrityError
    );
    assert_eq!(
        classify(Some(&code("40P01"))),
        Category::OperationalError
    );
}

#[test]
fn unknown_code_in_known_class_uses_class() {
    let result = explain(Some(&code("42ZZZ")));
    assert_eq!(result.category, Category::ProgrammingError);
    assert_eq!(result.rule, MatchRule::Class);
}

#[test]
fn unknown_class_defaults_to_database_error() {
    let result = explain(Some(&code("99XYZ")));
    assert_eq!(result.category, Category::DatabaseError);
    assert_eq!(result.rule, MatchRule::Default);
}

#[test]
fn malformed_code_is_generic_error_and_preserved() {
    assert_eq!(classify_str(Some("2350")), Category::Error);

    let error = build_error(record("2350", "weird server"));
    assert_eq!(error.category(), Category::Error);
    assert_eq!(error.sqlstate(), Some("2350"));
}

#[test]
fn diagnostic_is_preserved_verbatim() {
    let original = DiagnosticRecord::from_raw_fields(vec![
        (b'S', "ERROR"),
        (b'V', "ERROR"),
        (b'C', "23503"),
        (b'M', "insert or update on table \"orders\" violates foreign key constraint"),
        (b'D', "Key (user_id)=(42) is not present in table \"users\"."),
        (b's', "public"),
        (b't', "orders"),
        (b'n', "orders_user_id_fkey"),
        (b'F', "ri_triggers.c"),
        (b'L', "2596"),
        (b'R', "ri_ReportViolation"),
        (b'Y', "unknown to this client"),
    ]);

    let error = build_error(original.clone());
    assert_eq!(error.category(), Category::IntegrityError);
    assert_eq!(error.condition_name(), Some("foreign_key_violation"));
    assert_eq!(
        error.diagnostic().and_then(|d| d.get(DiagnosticField::ConstraintName)),
        Some("orders_user_id_fkey")
    );
    assert_eq!(error.into_diagnostic(), Some(original));
}

#[test]
fn errors_compose_with_question_mark() {
    fn run(sqlstate: &str) -> Result<(), Box<dyn std::error::Error>> {
        let result: Result<(), ClassifiedError> =
            Err(record(sqlstate, "canceling statement due to user request").into());
        result?;
        Ok(())
    }

    let err = run("57014").unwrap_err();
    let classified = err.downcast_ref::<ClassifiedError>().unwrap();
    assert_eq!(classified.category(), Category::OperationalError);
    assert_eq!(err.to_string(), "canceling statement due to user request");
}

#[test]
fn overrides_file_changes_classification() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
class = [{{ class = "YB", category = "OperationalError" }}]
condition = [{{ code = "40001", category = "InternalError" }}]
"#
    )
    .unwrap();

    let factory = ErrorFactory::new(Classifier::from_file(file.path()).unwrap());

    assert_eq!(
        factory.build(record("YB123", "remote")).category(),
        Category::OperationalError
    );
    assert_eq!(
        factory.build(record("40001", "could not serialize")).category(),
        Category::InternalError
    );
    assert_eq!(
        factory.build(record("40P01", "deadlock detected")).category(),
        Category::OperationalError
    );
    assert_eq!(
        factory.build(record("01000", "warning")).category(),
        Category::Warning
    );
}

#[test]
fn classifier_is_shareable_across_threads() {
    let classifier = std::sync::Arc::new(Classifier::standard());
    let handles: Vec<_> = ["23505", "42601", "08006", "22012"]
        .into_iter()
        .map(|text| {
            let classifier = classifier.clone();
            std::thread::spawn(move || classifier.classify_str(Some(text)))
        })
        .collect();

    let categories: Vec<Category> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        categories,
        vec![
            Category::IntegrityError,
            Category::ProgrammingError,
            Category::OperationalError,
            Category::DataError,
        ]
    );
}
