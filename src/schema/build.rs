use super::types::{Constraints, FieldSpec, FieldType, Schema, Source};
use crate::error::SchemaError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Builder for a single [`FieldSpec`].
///
/// Fields are required by default, matching the wire convention that an
/// undeclared default means the caller must send a value. Setting a default
/// makes the field optional; setting `required(true)` on top of a default is
/// caught when the schema is built.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    source: Source,
    ty: FieldType,
    required: bool,
    default: Option<Value>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    gt: Option<f64>,
    ge: Option<f64>,
    lt: Option<f64>,
    le: Option<f64>,
    pattern: Option<String>,
    title: Option<String>,
    description: Option<String>,
    alias: Option<String>,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>, source: Source, ty: FieldType) -> Self {
        FieldBuilder {
            name: name.into(),
            source,
            ty,
            required: true,
            default: None,
            min_length: None,
            max_length: None,
            gt: None,
            ge: None,
            lt: None,
            le: None,
            pattern: None,
            title: None,
            description: None,
            alias: None,
        }
    }

    /// A field taken from the URL path.
    pub fn path(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, Source::Path, ty)
    }

    /// A field taken from the query string.
    pub fn query(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, Source::Query, ty)
    }

    /// A field taken from the decoded request body.
    pub fn body(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, Source::Body, ty)
    }

    /// Mark the field optional with no default: when absent it is simply
    /// omitted from the output tree.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self, yes: bool) -> Self {
        self.required = yes;
        self
    }

    /// Declare a default, which implies the field is optional.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Exclusive lower bound.
    pub fn gt(mut self, bound: f64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Inclusive lower bound.
    pub fn ge(mut self, bound: f64) -> Self {
        self.ge = Some(bound);
        self
    }

    /// Exclusive upper bound.
    pub fn lt(mut self, bound: f64) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Inclusive upper bound.
    pub fn le(mut self, bound: f64) -> Self {
        self.le = Some(bound);
        self
    }

    /// Regular expression the coerced string must match. Compiled when the
    /// schema is built.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name the field goes by on the wire.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn check_constraint_applicability(&self) -> Result<(), SchemaError> {
        let lengthy = matches!(
            self.ty,
            FieldType::String | FieldType::Sequence(_) | FieldType::Mapping { .. }
        );
        let numeric = matches!(self.ty, FieldType::Integer | FieldType::Float);
        let textual = matches!(self.ty, FieldType::String);

        let inapplicable = |constraint: &'static str| SchemaError::InapplicableConstraint {
            field: self.name.clone(),
            constraint,
            ty: self.ty.to_string(),
        };

        if !lengthy {
            if self.min_length.is_some() {
                return Err(inapplicable("min_length"));
            }
            if self.max_length.is_some() {
                return Err(inapplicable("max_length"));
            }
        }
        if !numeric {
            for (constraint, bound) in [
                ("gt", self.gt),
                ("ge", self.ge),
                ("lt", self.lt),
                ("le", self.le),
            ] {
                if bound.is_some() {
                    return Err(inapplicable(constraint));
                }
            }
        }
        if !textual && self.pattern.is_some() {
            return Err(inapplicable("pattern"));
        }
        Ok(())
    }

    fn check_bounds(&self) -> Result<(), SchemaError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaError::ContradictoryLength {
                    field: self.name.clone(),
                    min,
                    max,
                });
            }
        }

        // lower = the tightest lower bound, upper = the tightest upper bound.
        // Contradictory when lower > upper, or equal with an exclusive side.
        let lower = match (self.gt, self.ge) {
            (Some(g), Some(e)) => Some((g.max(e), g >= e)),
            (Some(g), None) => Some((g, true)),
            (None, Some(e)) => Some((e, false)),
            (None, None) => None,
        };
        let upper = match (self.lt, self.le) {
            (Some(l), Some(e)) => Some((l.min(e), l <= e)),
            (Some(l), None) => Some((l, true)),
            (None, Some(e)) => Some((e, false)),
            (None, None) => None,
        };
        if let (Some((lo, lo_excl)), Some((hi, hi_excl))) = (lower, upper) {
            if lo > hi || (lo == hi && (lo_excl || hi_excl)) {
                return Err(SchemaError::ContradictoryBounds {
                    field: self.name.clone(),
                    detail: format!("no value satisfies lower bound {lo} and upper bound {hi}"),
                });
            }
        }
        Ok(())
    }

    fn build(self) -> Result<FieldSpec, SchemaError> {
        if self.required && self.default.is_some() {
            return Err(SchemaError::RequiredWithDefault { field: self.name });
        }
        self.check_constraint_applicability()?;
        self.check_bounds()?;

        let pattern = match self.pattern {
            Some(src) => Some(Regex::new(&src).map_err(|e| SchemaError::InvalidPattern {
                field: self.name.clone(),
                source: Box::new(e),
            })?),
            None => None,
        };

        let spec = FieldSpec {
            name: self.name,
            source: self.source,
            ty: self.ty,
            required: self.required,
            default: self.default,
            constraints: Constraints {
                min_length: self.min_length,
                max_length: self.max_length,
                gt: self.gt,
                ge: self.ge,
                lt: self.lt,
                le: self.le,
                pattern,
            },
            title: self.title,
            description: self.description,
            alias: self.alias,
        };

        // A default must satisfy the field's own type and constraints, so a
        // substituted default can never fail at validation time.
        if let Some(default) = spec.default.clone() {
            let errors = crate::validate::check_value(&spec, &default);
            if let Some(first) = errors.first() {
                return Err(SchemaError::InvalidDefault {
                    field: spec.name,
                    detail: first.message.clone(),
                });
            }
        }

        Ok(spec)
    }
}

/// Builder for a [`Schema`]. Collects field builders and runs every
/// construction-time check in [`build`](SchemaBuilder::build).
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldBuilder>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen: HashSet<(Source, String)> = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for builder in self.fields {
            let spec = builder.build()?;
            if !seen.insert((spec.source, spec.wire_name().to_string())) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    location: spec.source.to_string(),
                    field: spec.wire_name().to_string(),
                });
            }
            fields.push(spec);
        }
        Ok(Schema {
            name: self.name,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_implies_optional() {
        let schema = Schema::builder("q")
            .field(FieldBuilder::query("limit", FieldType::Integer).default_value(10))
            .build()
            .unwrap();
        let field = schema.field("limit").unwrap();
        assert!(!field.required);
        assert_eq!(field.default, Some(serde_json::json!(10)));
    }

    #[test]
    fn test_required_with_default_rejected() {
        let err = Schema::builder("q")
            .field(
                FieldBuilder::query("limit", FieldType::Integer)
                    .default_value(10)
                    .required(true),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::RequiredWithDefault { .. }));
    }

    #[test]
    fn test_contradictory_numeric_bounds_rejected() {
        let err = Schema::builder("q")
            .field(FieldBuilder::path("id", FieldType::Float).gt(10.0).lt(5.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));
    }

    #[test]
    fn test_equal_bounds_with_exclusive_side_rejected() {
        let err = Schema::builder("q")
            .field(FieldBuilder::path("id", FieldType::Float).gt(5.0).le(5.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));
    }

    #[test]
    fn test_equal_inclusive_bounds_allowed() {
        let schema = Schema::builder("q")
            .field(FieldBuilder::path("id", FieldType::Float).ge(5.0).le(5.0))
            .build();
        assert!(schema.is_ok());
    }

    #[test]
    fn test_min_length_over_max_rejected() {
        let err = Schema::builder("q")
            .field(
                FieldBuilder::query("q", FieldType::String)
                    .min_length(10)
                    .max_length(2),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryLength { .. }));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = Schema::builder("q")
            .field(FieldBuilder::query("q", FieldType::String).pattern("[unclosed"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_numeric_bound_on_string_rejected() {
        let err = Schema::builder("q")
            .field(FieldBuilder::query("q", FieldType::String).gt(2.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InapplicableConstraint { .. }));
    }

    #[test]
    fn test_default_violating_constraints_rejected() {
        let err = Schema::builder("q")
            .field(
                FieldBuilder::query("q", FieldType::String)
                    .max_length(3)
                    .default_value("too long"),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { .. }));
    }

    #[test]
    fn test_duplicate_wire_name_rejected() {
        let err = Schema::builder("q")
            .field(FieldBuilder::query("q", FieldType::String).optional())
            .field(FieldBuilder::query("other", FieldType::String).alias("q"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
        assert_eq!(err.to_string(), "schema `q`: duplicate query field `q`");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_same_name_across_sources_allowed() {
        let schema = Schema::builder("q")
            .field(FieldBuilder::path("id", FieldType::Integer))
            .field(FieldBuilder::body("id", FieldType::Integer))
            .build();
        assert!(schema.is_ok());
    }
}
