use super::coerce::{self, RawValue};
use crate::report::{ConstraintKind, ErrorKind, FieldError};
use crate::schema::{FieldSpec, FieldType, Schema, Source};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::debug;

/// Raw wire input for one request: path and query parameters as decoded
/// strings, and an optional already-parsed JSON body.
///
/// Built once per request; validation never mutates it, so one input can be
/// validated against several schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    pub(crate) path: HashMap<String, String>,
    pub(crate) query: HashMap<String, String>,
    pub(crate) body: Option<Value>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone)]
enum PathSeg {
    Key(String),
    Index(usize),
}

// Validation rarely nests more than a few levels; keep the path on the stack.
type FieldPath = SmallVec<[PathSeg; 4]>;

fn render_path(segs: &FieldPath) -> String {
    let mut out = String::new();
    for seg in segs {
        match seg {
            PathSeg::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSeg::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
        }
    }
    out
}

impl Schema {
    /// Validate raw wire input against this schema.
    ///
    /// Walks every field in declaration order, resolving by wire name,
    /// substituting defaults, coercing, and constraint-checking. All failures
    /// are collected; validation never stops at the first error, so a caller
    /// can report every problem in one response.
    ///
    /// On success the returned tree is keyed by internal field names and
    /// every value satisfies its declared type and constraints. Optional
    /// fields that were absent (or explicitly `null`) and carry no default do
    /// not appear in the tree at all.
    pub fn validate(&self, input: &RawInput) -> Result<Value, Vec<FieldError>> {
        debug!(
            schema = %self.name,
            field_count = self.fields.len(),
            has_body = input.body.is_some(),
            "validating input"
        );
        let mut errors = Vec::new();
        let mut path = FieldPath::new();
        let body = input.body.as_ref().and_then(|v| v.as_object());
        let out = collect_fields(self, &mut path, &mut errors, |field| {
            resolve_top(field, input, body)
        });
        if errors.is_empty() {
            Ok(Value::Object(out))
        } else {
            debug!(
                schema = %self.name,
                error_count = errors.len(),
                "validation failed"
            );
            Err(errors)
        }
    }
}

fn resolve_top<'a>(
    field: &FieldSpec,
    input: &'a RawInput,
    body: Option<&'a Map<String, Value>>,
) -> Option<RawValue<'a>> {
    let key = field.wire_name();
    match field.source {
        Source::Path => input.path.get(key).map(|s| RawValue::Text(s)),
        Source::Query => input.query.get(key).map(|s| RawValue::Text(s)),
        Source::Body => body.and_then(|m| m.get(key)).map(RawValue::Json),
    }
}

/// Walk a schema's fields against a resolver, accumulating the output tree
/// and every error found. Shared between the top level (resolution by source)
/// and nested objects (resolution inside a JSON map).
fn collect_fields<'a, F>(
    schema: &Schema,
    path: &mut FieldPath,
    errors: &mut Vec<FieldError>,
    resolve: F,
) -> Map<String, Value>
where
    F: Fn(&FieldSpec) -> Option<RawValue<'a>>,
{
    let mut out = Map::new();
    for field in &schema.fields {
        path.push(PathSeg::Key(field.wire_name().to_string()));
        // An explicit null marker behaves like absence.
        let raw = match resolve(field) {
            Some(RawValue::Json(Value::Null)) => None,
            other => other,
        };
        match raw {
            None => {
                if field.required {
                    errors.push(FieldError::new(
                        render_path(path),
                        ErrorKind::MissingRequired,
                        "required field is missing",
                        None,
                    ));
                } else if let Some(default) = &field.default {
                    out.insert(field.name.clone(), default.clone());
                }
                // Optional with no default: omitted from the output entirely.
            }
            Some(raw) => {
                if let Some(value) = coerce_value(&field.ty, raw, path, errors) {
                    apply_constraints(field, &value, path, errors);
                    out.insert(field.name.clone(), value);
                }
            }
        }
        path.pop();
    }
    out
}

fn attempted_value(raw: RawValue<'_>) -> Value {
    match raw {
        RawValue::Text(s) => Value::String(s.to_string()),
        RawValue::Json(v) => v.clone(),
    }
}

fn coerce_value(
    ty: &FieldType,
    raw: RawValue<'_>,
    path: &mut FieldPath,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match ty {
        FieldType::Object(schema) => coerce_object(schema, raw, path, errors),
        FieldType::Sequence(items) => coerce_sequence(items, raw, path, errors),
        FieldType::Mapping { keys, values } => coerce_mapping(*keys, values, raw, path, errors),
        scalar => {
            let result = match raw {
                RawValue::Text(s) => coerce::scalar_from_text(s, scalar),
                RawValue::Json(v) => coerce::scalar_from_json(v, scalar),
            };
            match result {
                Ok(value) => Some(value),
                Err(message) => {
                    errors.push(FieldError::new(
                        render_path(path),
                        ErrorKind::TypeCoercion,
                        message,
                        Some(attempted_value(raw)),
                    ));
                    None
                }
            }
        }
    }
}

fn coerce_object(
    schema: &Schema,
    raw: RawValue<'_>,
    path: &mut FieldPath,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match raw {
        RawValue::Json(Value::Object(map)) => {
            let before = errors.len();
            let out = collect_fields(schema, path, errors, |field| {
                map.get(field.wire_name()).map(RawValue::Json)
            });
            (errors.len() == before).then(|| Value::Object(out))
        }
        // Object values arriving as text (e.g. an object-typed query
        // parameter) are parsed as JSON first.
        RawValue::Text(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) if parsed.is_object() => {
                coerce_object(schema, RawValue::Json(&parsed), path, errors)
            }
            _ => {
                errors.push(FieldError::new(
                    render_path(path),
                    ErrorKind::TypeCoercion,
                    format!("cannot coerce `{s}` to object({})", schema.name),
                    Some(attempted_value(raw)),
                ));
                None
            }
        },
        RawValue::Json(other) => {
            errors.push(FieldError::new(
                render_path(path),
                ErrorKind::TypeCoercion,
                format!(
                    "expected object({}), got {}",
                    schema.name,
                    coerce::type_name(other)
                ),
                Some(other.clone()),
            ));
            None
        }
    }
}

fn coerce_sequence(
    items: &FieldType,
    raw: RawValue<'_>,
    path: &mut FieldPath,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match raw {
        RawValue::Json(Value::Array(arr)) => {
            let before = errors.len();
            let mut out = Vec::with_capacity(arr.len());
            for (i, item) in arr.iter().enumerate() {
                path.push(PathSeg::Index(i));
                if let Some(value) = coerce_value(items, RawValue::Json(item), path, errors) {
                    out.push(value);
                }
                path.pop();
            }
            (errors.len() == before).then(|| Value::Array(out))
        }
        // Form-style text: comma-separated items.
        RawValue::Text(s) => {
            let before = errors.len();
            let mut out = Vec::new();
            for (i, part) in s
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .enumerate()
            {
                path.push(PathSeg::Index(i));
                if let Some(value) = coerce_value(items, RawValue::Text(part), path, errors) {
                    out.push(value);
                }
                path.pop();
            }
            (errors.len() == before).then(|| Value::Array(out))
        }
        RawValue::Json(other) => {
            errors.push(FieldError::new(
                render_path(path),
                ErrorKind::TypeCoercion,
                format!("expected array, got {}", coerce::type_name(other)),
                Some(other.clone()),
            ));
            None
        }
    }
}

fn coerce_mapping(
    keys: crate::schema::KeyType,
    values: &FieldType,
    raw: RawValue<'_>,
    path: &mut FieldPath,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match raw {
        RawValue::Json(Value::Object(map)) => {
            let before = errors.len();
            let mut out = Map::new();
            for (key, value) in map {
                path.push(PathSeg::Key(key.clone()));
                if let Err(message) = coerce::check_key(key, keys) {
                    errors.push(FieldError::new(
                        render_path(path),
                        ErrorKind::TypeCoercion,
                        message,
                        Some(Value::String(key.clone())),
                    ));
                } else if let Some(coerced) = coerce_value(values, RawValue::Json(value), path, errors)
                {
                    out.insert(key.clone(), coerced);
                }
                path.pop();
            }
            (errors.len() == before).then(|| Value::Object(out))
        }
        RawValue::Text(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) if parsed.is_object() => {
                coerce_mapping(keys, values, RawValue::Json(&parsed), path, errors)
            }
            _ => {
                errors.push(FieldError::new(
                    render_path(path),
                    ErrorKind::TypeCoercion,
                    format!("cannot coerce `{s}` to mapping"),
                    Some(attempted_value(raw)),
                ));
                None
            }
        },
        RawValue::Json(other) => {
            errors.push(FieldError::new(
                render_path(path),
                ErrorKind::TypeCoercion,
                format!("expected mapping, got {}", coerce::type_name(other)),
                Some(other.clone()),
            ));
            None
        }
    }
}

/// Apply a field's constraints to its coerced value, in fixed order: length
/// bounds, numeric bounds, pattern.
fn apply_constraints(
    field: &FieldSpec,
    value: &Value,
    path: &mut FieldPath,
    errors: &mut Vec<FieldError>,
) {
    let c = &field.constraints;
    if c.is_empty() {
        return;
    }
    let rendered = render_path(path);
    let mut violation = |kind: ConstraintKind, message: String| {
        errors.push(FieldError::new(
            rendered.clone(),
            ErrorKind::Constraint(kind),
            message,
            Some(value.clone()),
        ));
    };

    let len = match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        Value::Object(o) => Some(o.len()),
        _ => None,
    };
    if let Some(len) = len {
        if let Some(min) = c.min_length {
            if len < min {
                violation(
                    ConstraintKind::Length,
                    format!("length {len} is below min_length {min}"),
                );
            }
        }
        if let Some(max) = c.max_length {
            if len > max {
                violation(
                    ConstraintKind::Length,
                    format!("length {len} exceeds max_length {max}"),
                );
            }
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(bound) = c.gt {
            if n <= bound {
                violation(
                    ConstraintKind::NumericBound,
                    format!("value must be greater than {bound}"),
                );
            }
        }
        if let Some(bound) = c.ge {
            if n < bound {
                violation(
                    ConstraintKind::NumericBound,
                    format!("value must be greater than or equal to {bound}"),
                );
            }
        }
        if let Some(bound) = c.lt {
            if n >= bound {
                violation(
                    ConstraintKind::NumericBound,
                    format!("value must be less than {bound}"),
                );
            }
        }
        if let Some(bound) = c.le {
            if n > bound {
                violation(
                    ConstraintKind::NumericBound,
                    format!("value must be less than or equal to {bound}"),
                );
            }
        }
    }

    if let (Some(re), Some(s)) = (&c.pattern, value.as_str()) {
        if !re.is_match(s) {
            violation(
                ConstraintKind::Pattern,
                format!("value does not match pattern `{re}`"),
            );
        }
    }
}

/// Check a standalone JSON value against one field's type and constraints.
/// Used at schema-construction time to reject defaults that could never pass
/// their own field.
pub(crate) fn check_value(field: &FieldSpec, value: &Value) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let mut path = FieldPath::new();
    path.push(PathSeg::Key(field.wire_name().to_string()));
    if let Some(coerced) = coerce_value(&field.ty, RawValue::Json(value), &mut path, &mut errors) {
        apply_constraints(field, &coerced, &mut path, &mut errors);
    }
    errors
}
