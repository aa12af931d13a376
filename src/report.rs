use serde::Serialize;
use serde_json::Value;

/// Which constraint a value violated after coercing successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Length,
    NumericBound,
    Pattern,
}

/// Classification of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field had no value on the wire.
    MissingRequired,
    /// The raw value could not be coerced to the declared type.
    TypeCoercion,
    /// The coerced value violated a declared constraint.
    Constraint(ConstraintKind),
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::Length => write!(f, "length"),
            ConstraintKind::NumericBound => write!(f, "numeric_bound"),
            ConstraintKind::Pattern => write!(f, "pattern"),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingRequired => write!(f, "missing_required"),
            ErrorKind::TypeCoercion => write!(f, "type_coercion"),
            ErrorKind::Constraint(kind) => write!(f, "constraint({kind})"),
        }
    }
}

/// One validation failure, reported as plain data so the surrounding layer
/// can format it into a response however it likes.
///
/// `field_path` uses dotted wire names with bracketed indices, e.g.
/// `image.url` or `tags[2]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field_path: String,
    pub kind: ErrorKind,
    pub message: String,
    /// The raw value that was rejected, when one was present.
    pub attempted_value: Option<Value>,
}

impl FieldError {
    pub fn new(
        field_path: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
        attempted_value: Option<Value>,
    ) -> Self {
        FieldError {
            field_path: field_path.into(),
            kind,
            message: message.into(),
            attempted_value,
        }
    }
}

pub fn print_errors(errors: &[FieldError]) {
    eprintln!(
        "\n❌ Request validation failed. {} error(s) found:\n",
        errors.len()
    );
    for err in errors {
        match &err.attempted_value {
            Some(value) => eprintln!(
                "[{}] {}: {} (got {})",
                err.kind, err.field_path, err.message, value
            ),
            None => eprintln!("[{}] {}: {}", err.kind, err.field_path, err.message),
        }
    }
    eprintln!();
}

pub fn fail_if_errors(errors: Vec<FieldError>) {
    if !errors.is_empty() {
        print_errors(&errors);
        std::process::exit(1);
    }
}
