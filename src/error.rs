use thiserror::Error;

/// Errors raised while a [`Schema`](crate::schema::Schema) is being
/// constructed, either programmatically or from a document.
///
/// These are configuration mistakes, not request failures: a schema that
/// carries contradictory bounds or an unparseable pattern is rejected before
/// it can ever see a request, so `validate` never has to re-check them.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field `{field}`: a required field cannot carry a default")]
    RequiredWithDefault { field: String },

    #[error("field `{field}`: contradictory numeric bounds ({detail})")]
    ContradictoryBounds { field: String, detail: String },

    #[error("field `{field}`: min_length {min} exceeds max_length {max}")]
    ContradictoryLength {
        field: String,
        min: usize,
        max: usize,
    },

    #[error("field `{field}`: invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("field `{field}`: `{constraint}` does not apply to {ty} fields")]
    InapplicableConstraint {
        field: String,
        constraint: &'static str,
        ty: String,
    },

    #[error("field `{field}`: default value rejected: {detail}")]
    InvalidDefault { field: String, detail: String },

    #[error("schema `{schema}`: duplicate {location} field `{field}`")]
    DuplicateField {
        schema: String,
        location: String,
        field: String,
    },

    #[error("field `{field}`: unknown type `{ty}`")]
    UnknownType { field: String, ty: String },

    #[error("field `{field}`: unknown source `{value}` (expected path, query, or body)")]
    UnknownSource { field: String, value: String },

    #[error("field `{field}`: {detail}")]
    MalformedType { field: String, detail: String },
}
