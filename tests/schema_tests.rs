use serde_json::json;
use wirecheck::error::SchemaError;
use wirecheck::schema::load_schema;
use wirecheck::validate::RawInput;

fn item_document() -> &'static str {
    r#"name: Item
fields:
  - name: item_id
    in: path
    type: float
    gt: 2
    lt: 10
    title: Path Validation
  - name: q
    in: query
    type: string
    alias: q-test
    required: false
    min_length: 2
    max_length: 10
  - name: name
    type: string
  - name: price
    type: float
  - name: tax
    type: float
    required: false
  - name: tags
    type: sequence
    items: { type: string }
    default: []
  - name: image
    type: object
    schema:
      name: Image
      fields:
        - { name: url, type: url }
        - { name: name, type: string }
"#
}

fn write_doc(dir: &tempfile::TempDir, file_name: &str, content: &str) -> String {
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).expect("failed to write schema document");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_load_yaml_document_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&dir, "item.yaml", item_document());
    let schema = load_schema(&path).expect("document should load");
    assert_eq!(schema.name, "Item");
    assert_eq!(schema.fields.len(), 7);

    let input = RawInput::new()
        .path_param("item_id", "3")
        .query_param("q-test", "hello")
        .body(json!({
            "name": "Foo",
            "price": 10.5,
            "image": { "url": "http://x/y", "name": "pic" },
        }));
    let tree = schema.validate(&input).expect("valid input");
    assert_eq!(tree["item_id"], json!(3.0));
    assert_eq!(tree["q"], json!("hello"));
    assert_eq!(tree["tags"], json!([]));
    assert!(tree.get("tax").is_none());
}

#[test]
fn test_load_json_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let doc = json!({
        "name": "Paging",
        "fields": [
            { "name": "skip", "in": "query", "type": "integer", "default": 0 },
            { "name": "limit", "in": "query", "type": "integer", "default": 10 },
        ]
    });
    let path = write_doc(&dir, "paging.json", &doc.to_string());
    let schema = load_schema(&path).expect("document should load");
    let tree = schema.validate(&RawInput::new()).expect("defaults only");
    assert_eq!(tree, json!({ "skip": 0, "limit": 10 }));
}

#[test]
fn test_document_with_required_default_fails_fast() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_doc(
        &dir,
        "bad.yaml",
        r#"name: Bad
fields:
  - name: limit
    in: query
    type: integer
    required: true
    default: 10
"#,
    );
    let err = load_schema(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SchemaError>(),
        Some(SchemaError::RequiredWithDefault { .. })
    ));
}

#[test]
fn test_document_with_contradictory_bounds_fails_fast() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_doc(
        &dir,
        "bad.yaml",
        r#"name: Bad
fields:
  - name: item_id
    in: path
    type: float
    gt: 10
    lt: 5
"#,
    );
    let err = load_schema(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SchemaError>(),
        Some(SchemaError::ContradictoryBounds { .. })
    ));
}

#[test]
fn test_document_with_bad_default_fails_fast() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_doc(
        &dir,
        "bad.yaml",
        r#"name: Bad
fields:
  - name: limit
    in: query
    type: integer
    le: 100
    default: 500
"#,
    );
    let err = load_schema(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SchemaError>(),
        Some(SchemaError::InvalidDefault { .. })
    ));
}

#[test]
fn test_mapping_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_doc(
        &dir,
        "weights.yaml",
        r#"name: Weights
fields:
  - name: weights
    type: mapping
    keys: integer
    values: { type: string }
"#,
    );
    let schema = load_schema(&path).expect("document should load");
    let tree = schema
        .validate(&RawInput::new().body(json!({ "weights": { "1": "a" } })))
        .expect("valid input");
    assert_eq!(tree["weights"], json!({ "1": "a" }));
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(load_schema("/nonexistent/schema.yaml").is_err());
}
