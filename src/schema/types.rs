use regex::Regex;
use serde_json::Value;

/// Where on the wire a field's raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Path,
    Query,
    Body,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path => write!(f, "path"),
            Source::Query => write!(f, "query"),
            Source::Body => write!(f, "body"),
        }
    }
}

/// Key type for mapping fields. JSON object keys are always strings on the
/// wire; `Integer` keys are checked to parse as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Integer,
    String,
}

/// Declared type of a field's coerced value.
#[derive(Debug, Clone)]
pub enum FieldType {
    Integer,
    Float,
    String,
    Boolean,
    Url,
    /// A nested schema; failures inside it are reported with a path prefix.
    Object(Schema),
    Sequence(Box<FieldType>),
    Mapping {
        keys: KeyType,
        values: Box<FieldType>,
    },
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::String => write!(f, "string"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Url => write!(f, "url"),
            FieldType::Object(schema) => write!(f, "object({})", schema.name),
            FieldType::Sequence(items) => write!(f, "sequence({items})"),
            FieldType::Mapping { values, .. } => write!(f, "mapping({values})"),
        }
    }
}

/// Constraints applied to a field's value after coercion, in fixed order:
/// length bounds, numeric bounds, pattern.
///
/// The pattern is compiled once when the schema is built; a pattern that does
/// not compile is a [`SchemaError`](crate::error::SchemaError), not a request
/// failure.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub gt: Option<f64>,
    pub ge: Option<f64>,
    pub lt: Option<f64>,
    pub le: Option<f64>,
    pub pattern: Option<Regex>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.gt.is_none()
            && self.ge.is_none()
            && self.lt.is_none()
            && self.le.is_none()
            && self.pattern.is_none()
    }
}

/// Declarative description of one input field.
///
/// Built through [`FieldBuilder`](crate::schema::FieldBuilder); a spec that
/// reaches validation has already passed every construction-time check.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub source: Source,
    pub ty: FieldType,
    pub required: bool,
    pub default: Option<Value>,
    pub constraints: Constraints,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Name used on the wire when it differs from the internal name.
    pub alias: Option<String>,
}

impl FieldSpec {
    /// The name this field is resolved by on the wire: the alias when one is
    /// declared, the internal name otherwise.
    pub fn wire_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A named, ordered collection of field specifications.
///
/// Schemas are immutable once built and carry no interior state, so a single
/// schema can serve any number of concurrent `validate` calls.
#[derive(Debug, Clone)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
