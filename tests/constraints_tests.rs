use serde_json::json;
use wirecheck::report::{ConstraintKind, ErrorKind};
use wirecheck::schema::{FieldBuilder, FieldType, Schema};
use wirecheck::validate::RawInput;

fn length_schema() -> Schema {
    Schema::builder("Search")
        .field(
            FieldBuilder::query("q", FieldType::String)
                .min_length(2)
                .max_length(10)
                .title("String Validation")
                .description("Bounded free-text query"),
        )
        .build()
        .expect("static schema")
}

fn bounded_path_schema() -> Schema {
    Schema::builder("PathValidation")
        .field(
            FieldBuilder::path("item_id", FieldType::Float)
                .gt(2.0)
                .lt(10.0),
        )
        .build()
        .expect("static schema")
}

#[test]
fn test_length_bounds_are_inclusive() {
    let schema = length_schema();
    for q in ["ab", "abcde", "abcdefghij"] {
        assert!(
            schema
                .validate(&RawInput::new().query_param("q", q))
                .is_ok(),
            "{q} should pass"
        );
    }
    for q in ["a", "abcdefghijk"] {
        let errors = schema
            .validate(&RawInput::new().query_param("q", q))
            .unwrap_err();
        assert_eq!(errors.len(), 1, "{q}");
        assert_eq!(errors[0].kind, ErrorKind::Constraint(ConstraintKind::Length));
        assert_eq!(errors[0].field_path, "q");
        assert_eq!(errors[0].attempted_value, Some(json!(q)));
    }
}

#[test]
fn test_empty_query_value_is_present_but_empty() {
    // "" is a present value, so the length constraint fires; emptiness is
    // never treated as absence.
    let errors = length_schema()
        .validate(&RawInput::new().query_param("q", ""))
        .unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::Constraint(ConstraintKind::Length));
}

#[test]
fn test_exclusive_numeric_bounds() {
    let schema = bounded_path_schema();
    for id in ["2.5", "5.5", "9.9"] {
        assert!(
            schema
                .validate(&RawInput::new().path_param("item_id", id))
                .is_ok(),
            "{id} should pass"
        );
    }
    // The bounds themselves fail: gt and lt are exclusive.
    for id in ["2", "10"] {
        let errors = schema
            .validate(&RawInput::new().path_param("item_id", id))
            .unwrap_err();
        assert_eq!(errors.len(), 1, "{id}");
        assert_eq!(
            errors[0].kind,
            ErrorKind::Constraint(ConstraintKind::NumericBound)
        );
        assert_eq!(errors[0].field_path, "item_id");
    }
}

#[test]
fn test_inclusive_numeric_bounds() {
    let schema = Schema::builder("Paged")
        .field(
            FieldBuilder::query("limit", FieldType::Integer)
                .ge(1.0)
                .le(100.0),
        )
        .build()
        .expect("static schema");
    for limit in ["1", "100"] {
        assert!(schema
            .validate(&RawInput::new().query_param("limit", limit))
            .is_ok());
    }
    for limit in ["0", "101"] {
        let errors = schema
            .validate(&RawInput::new().query_param("limit", limit))
            .unwrap_err();
        assert_eq!(
            errors[0].kind,
            ErrorKind::Constraint(ConstraintKind::NumericBound)
        );
    }
}

#[test]
fn test_pattern_constraint() {
    let schema = Schema::builder("Search")
        .field(FieldBuilder::query("q", FieldType::String).pattern("^fixedquery$"))
        .build()
        .expect("static schema");
    assert!(schema
        .validate(&RawInput::new().query_param("q", "fixedquery"))
        .is_ok());
    let errors = schema
        .validate(&RawInput::new().query_param("q", "something"))
        .unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::Constraint(ConstraintKind::Pattern));
}

#[test]
fn test_constraints_apply_in_fixed_order() {
    // One value violating both length and pattern reports both, length first.
    let schema = Schema::builder("Search")
        .field(
            FieldBuilder::query("q", FieldType::String)
                .min_length(5)
                .pattern("^a"),
        )
        .build()
        .expect("static schema");
    let errors = schema
        .validate(&RawInput::new().query_param("q", "b"))
        .unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind, ErrorKind::Constraint(ConstraintKind::Length));
    assert_eq!(errors[1].kind, ErrorKind::Constraint(ConstraintKind::Pattern));
}

#[test]
fn test_sequence_length_bounds() {
    let schema = Schema::builder("Tagged")
        .field(
            FieldBuilder::body("tags", FieldType::Sequence(Box::new(FieldType::String)))
                .max_length(2),
        )
        .build()
        .expect("static schema");
    assert!(schema
        .validate(&RawInput::new().body(json!({ "tags": ["a", "b"] })))
        .is_ok());
    let errors = schema
        .validate(&RawInput::new().body(json!({ "tags": ["a", "b", "c"] })))
        .unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::Constraint(ConstraintKind::Length));
    assert_eq!(errors[0].field_path, "tags");
}

#[test]
fn test_coercion_failure_skips_constraint_checks() {
    // A value that never coerced reports only the coercion failure.
    let errors = bounded_path_schema()
        .validate(&RawInput::new().path_param("item_id", "ten"))
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::TypeCoercion);
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let errors = length_schema()
        .validate(&RawInput::new().query_param("q", "ü"))
        .unwrap_err();
    // One character, two bytes: still below min_length 2.
    assert_eq!(errors[0].kind, ErrorKind::Constraint(ConstraintKind::Length));
    assert!(length_schema()
        .validate(&RawInput::new().query_param("q", "üö"))
        .is_ok());
}
