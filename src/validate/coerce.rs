use crate::schema::{FieldType, KeyType};
use serde_json::Value;

/// A raw wire value before coercion: text from the URL path or query string,
/// or an already-decoded JSON value from the request body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RawValue<'a> {
    Text(&'a str),
    Json(&'a Value),
}

/// Coerce raw text to a scalar of the declared type.
///
/// Total over its inputs: every outcome is a tagged success or a message
/// describing why coercion is impossible, never a panic.
pub(crate) fn scalar_from_text(text: &str, ty: &FieldType) -> Result<Value, String> {
    match ty {
        FieldType::Integer => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("cannot coerce `{text}` to integer")),
        FieldType::Float => text
            .trim()
            .parse::<f64>()
            .map(Value::from)
            .map_err(|_| format!("cannot coerce `{text}` to float")),
        FieldType::String => Ok(Value::String(text.to_string())),
        FieldType::Boolean => parse_bool(text)
            .map(Value::from)
            .ok_or_else(|| format!("cannot coerce `{text}` to boolean")),
        FieldType::Url => parse_url(text),
        // Containers are handled by the recursive walk; reaching here with one
        // means the caller skipped that path.
        other => Err(format!("cannot coerce text to {other}")),
    }
}

/// Coerce a decoded JSON value to a scalar of the declared type.
///
/// A JSON string carrying a numeric or boolean spelling coerces the same way
/// the text path does, so `{"price": "10.5"}` validates like `price=10.5`.
pub(crate) fn scalar_from_json(value: &Value, ty: &FieldType) -> Result<Value, String> {
    if let Value::String(text) = value {
        if matches!(
            ty,
            FieldType::Integer | FieldType::Float | FieldType::Boolean
        ) {
            return scalar_from_text(text, ty);
        }
    }
    match ty {
        FieldType::Integer => value
            .as_i64()
            .map(Value::from)
            .ok_or_else(|| format!("expected integer, got {}", type_name(value))),
        FieldType::Float => value
            .as_f64()
            .map(Value::from)
            .ok_or_else(|| format!("expected float, got {}", type_name(value))),
        FieldType::String => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| format!("expected string, got {}", type_name(value))),
        FieldType::Boolean => value
            .as_bool()
            .map(Value::from)
            .ok_or_else(|| format!("expected boolean, got {}", type_name(value))),
        FieldType::Url => match value.as_str() {
            Some(s) => parse_url(s),
            None => Err(format!("expected url string, got {}", type_name(value))),
        },
        other => Err(format!("expected {other}, got {}", type_name(value))),
    }
}

/// Check that a mapping key parses as the declared key type. Keys stay
/// strings in the output tree; JSON cannot carry anything else.
pub(crate) fn check_key(key: &str, keys: KeyType) -> Result<(), String> {
    match keys {
        KeyType::Integer => key
            .trim()
            .parse::<i64>()
            .map(|_| ())
            .map_err(|_| format!("mapping key `{key}` is not an integer")),
        KeyType::String => Ok(()),
    }
}

/// Booleans on the wire come in several spellings; accept the usual set,
/// case-insensitively.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_url(text: &str) -> Result<Value, String> {
    url::Url::parse(text)
        .map(|u| Value::String(u.to_string()))
        .map_err(|e| format!("cannot coerce `{text}` to url: {e}"))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
