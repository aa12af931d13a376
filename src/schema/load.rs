use super::build::FieldBuilder;
use super::types::{FieldType, KeyType, Schema, Source};
use crate::error::SchemaError;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// Declarative schema document, parsed from YAML or JSON.
///
/// ```yaml
/// name: Item
/// fields:
///   - name: name
///     type: string
///   - name: price
///     type: float
///     gt: 2
///     lt: 10
///   - name: tags
///     type: sequence
///     items: { type: string }
///     default: []
///   - name: image
///     type: object
///     schema:
///       name: Image
///       fields:
///         - { name: url, type: url }
///         - { name: name, type: string }
/// ```
#[derive(Debug, Deserialize)]
pub struct SchemaDoc {
    pub name: String,
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Deserialize)]
pub struct FieldDoc {
    pub name: String,
    /// Wire source: `path`, `query`, or `body` (the default).
    #[serde(rename = "in", default)]
    pub location: Option<String>,
    #[serde(flatten)]
    pub ty: TypeNode,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub gt: Option<f64>,
    #[serde(default)]
    pub ge: Option<f64>,
    #[serde(default)]
    pub lt: Option<f64>,
    #[serde(default)]
    pub le: Option<f64>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeNode {
    #[serde(rename = "type")]
    pub ty: String,
    /// Item type for `sequence`.
    #[serde(default)]
    pub items: Option<Box<TypeNode>>,
    /// Key type for `mapping`: `integer` or `string` (the default).
    #[serde(default)]
    pub keys: Option<String>,
    /// Value type for `mapping`.
    #[serde(default)]
    pub values: Option<Box<TypeNode>>,
    /// Nested schema for `object`.
    #[serde(default)]
    pub schema: Option<Box<SchemaDoc>>,
}

fn field_type_from_node(field: &str, node: &TypeNode) -> Result<FieldType, SchemaError> {
    match node.ty.as_str() {
        "integer" => Ok(FieldType::Integer),
        "float" | "number" => Ok(FieldType::Float),
        "string" => Ok(FieldType::String),
        "boolean" => Ok(FieldType::Boolean),
        "url" => Ok(FieldType::Url),
        "object" => {
            let doc = node.schema.as_ref().ok_or_else(|| SchemaError::MalformedType {
                field: field.to_string(),
                detail: "object type requires a nested `schema`".to_string(),
            })?;
            Ok(FieldType::Object(schema_from_doc(doc)?))
        }
        "sequence" | "array" => {
            let items = node.items.as_ref().ok_or_else(|| SchemaError::MalformedType {
                field: field.to_string(),
                detail: "sequence type requires `items`".to_string(),
            })?;
            Ok(FieldType::Sequence(Box::new(field_type_from_node(
                field, items,
            )?)))
        }
        "mapping" => {
            let keys = match node.keys.as_deref() {
                Some("integer") => KeyType::Integer,
                Some("string") | None => KeyType::String,
                Some(other) => {
                    return Err(SchemaError::MalformedType {
                        field: field.to_string(),
                        detail: format!("unknown mapping key type `{other}`"),
                    })
                }
            };
            let values = node.values.as_ref().ok_or_else(|| SchemaError::MalformedType {
                field: field.to_string(),
                detail: "mapping type requires `values`".to_string(),
            })?;
            Ok(FieldType::Mapping {
                keys,
                values: Box::new(field_type_from_node(field, values)?),
            })
        }
        other => Err(SchemaError::UnknownType {
            field: field.to_string(),
            ty: other.to_string(),
        }),
    }
}

/// Build a [`Schema`] from a parsed document, running every
/// construction-time check on the way through the builder.
pub fn schema_from_doc(doc: &SchemaDoc) -> Result<Schema, SchemaError> {
    let mut builder = Schema::builder(&doc.name);
    for field_doc in &doc.fields {
        let source = match field_doc.location.as_deref() {
            Some("path") => Source::Path,
            Some("query") => Source::Query,
            Some("body") | None => Source::Body,
            Some(other) => {
                return Err(SchemaError::UnknownSource {
                    field: field_doc.name.clone(),
                    value: other.to_string(),
                })
            }
        };
        let ty = field_type_from_node(&field_doc.name, &field_doc.ty)?;

        let mut field = FieldBuilder::new(&field_doc.name, source, ty);
        if let Some(default) = &field_doc.default {
            field = field.default_value(default.clone());
        }
        if let Some(required) = field_doc.required {
            field = field.required(required);
        }
        if let Some(min) = field_doc.min_length {
            field = field.min_length(min);
        }
        if let Some(max) = field_doc.max_length {
            field = field.max_length(max);
        }
        if let Some(bound) = field_doc.gt {
            field = field.gt(bound);
        }
        if let Some(bound) = field_doc.ge {
            field = field.ge(bound);
        }
        if let Some(bound) = field_doc.lt {
            field = field.lt(bound);
        }
        if let Some(bound) = field_doc.le {
            field = field.le(bound);
        }
        if let Some(pattern) = &field_doc.pattern {
            field = field.pattern(pattern);
        }
        if let Some(title) = &field_doc.title {
            field = field.title(title);
        }
        if let Some(description) = &field_doc.description {
            field = field.description(description);
        }
        if let Some(alias) = &field_doc.alias {
            field = field.alias(alias);
        }
        builder = builder.field(field);
    }
    builder.build()
}

/// Load a schema from a YAML or JSON document on disk, sniffing the format
/// from the file extension.
pub fn load_schema(file_path: &str) -> anyhow::Result<Schema> {
    let content = std::fs::read_to_string(file_path)?;
    let doc: SchemaDoc = if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    let schema = schema_from_doc(&doc)?;
    info!(
        schema = %schema.name,
        field_count = schema.fields.len(),
        path = %file_path,
        "schema document loaded"
    );
    Ok(schema)
}
