// sample.rs

use crate::schema::{Constraints, FieldSpec, FieldType, KeyType, Schema};
use serde_json::{json, Map, Value};

/// Produce an example value tree for a schema: declared defaults where they
/// exist, placeholder values nudged into the declared bounds otherwise.
///
/// Best effort for `pattern` constraints: no value is synthesized from a
/// regex, so a pattern-constrained field gets the plain placeholder string.
pub fn sample_value(schema: &Schema) -> Value {
    let mut out = Map::new();
    for field in &schema.fields {
        out.insert(field.name.clone(), sample_field(field));
    }
    Value::Object(out)
}

fn sample_field(field: &FieldSpec) -> Value {
    if let Some(default) = &field.default {
        return default.clone();
    }
    sample_type(&field.ty, &field.constraints)
}

fn sample_type(ty: &FieldType, constraints: &Constraints) -> Value {
    match ty {
        FieldType::Integer => json!(numeric_sample(constraints, 42.0).round() as i64),
        FieldType::Float => json!(numeric_sample(constraints, 3.14)),
        FieldType::String => Value::String(string_sample(constraints)),
        FieldType::Boolean => json!(true),
        FieldType::Url => json!("https://example.com/"),
        FieldType::Object(schema) => sample_value(schema),
        FieldType::Sequence(items) => {
            let count = constraints.min_length.unwrap_or(1).max(1);
            let item = sample_type(items, &Constraints::default());
            Value::Array(vec![item; count])
        }
        FieldType::Mapping { keys, values } => {
            let key = match keys {
                KeyType::Integer => "1",
                KeyType::String => "example",
            };
            let mut out = Map::new();
            out.insert(
                key.to_string(),
                sample_type(values, &Constraints::default()),
            );
            Value::Object(out)
        }
    }
}

fn numeric_sample(c: &Constraints, fallback: f64) -> f64 {
    let lower = c.ge.or(c.gt);
    let upper = c.le.or(c.lt);
    match (lower, upper) {
        (Some(lo), Some(hi)) => (lo + hi) / 2.0,
        (Some(lo), None) => lo + 1.0,
        (None, Some(hi)) => hi - 1.0,
        (None, None) => fallback,
    }
}

fn string_sample(c: &Constraints) -> String {
    let mut s = "example".to_string();
    if let Some(min) = c.min_length {
        while s.chars().count() < min {
            s.push('x');
        }
    }
    if let Some(max) = c.max_length {
        s = s.chars().take(max).collect();
    }
    s
}
