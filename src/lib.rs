//! # wirecheck
//!
//! **wirecheck** is a declarative request-validation library: it converts
//! untyped wire input (strings from a URL path or query string, decoded JSON
//! from a request body) into typed, constrained values, or rejects it with a
//! complete list of structured errors.
//!
//! ## Overview
//!
//! A [`Schema`](schema::Schema) is an ordered list of
//! [`FieldSpec`](schema::FieldSpec)s, each declaring where its value comes
//! from ([`Source`](schema::Source)), its type
//! ([`FieldType`](schema::FieldType)), whether it is required or carries a
//! default, and its constraints (length bounds, numeric bounds `gt`/`ge`/
//! `lt`/`le`, pattern). Schemas are built once at startup, either through
//! the builder API or from a YAML/JSON document, and every configuration
//! mistake (contradictory bounds, a default that violates its own field, an
//! unparseable pattern) is rejected at that point, never at request time.
//!
//! Validation itself is a pure function: [`Schema::validate`] takes a
//! [`RawInput`](validate::RawInput) and returns either a coerced value tree
//! or every violation found, as data the caller can format into a response.
//! Schemas are immutable after construction, so one schema serves any number
//! of concurrent requests.
//!
//! ## Architecture
//!
//! - **[`schema`]** - field and schema types, the builder with its
//!   construction-time checks, and document loading
//! - **[`validate`]** - per-type coercion and the validation walk
//! - **[`report`]** - validation errors as serializable data, plus printing
//!   helpers
//! - **[`error`]** - schema construction errors
//! - **[`sample`]** - example value trees for a schema
//! - **[`cli`]** - the `wirecheck` command-line interface
//!
//! ## Quick Start
//!
//! ```
//! use wirecheck::schema::{FieldBuilder, FieldType, Schema};
//! use wirecheck::validate::RawInput;
//!
//! let item = Schema::builder("Item")
//!     .field(FieldBuilder::body("name", FieldType::String))
//!     .field(FieldBuilder::body("price", FieldType::Float).gt(0.0))
//!     .field(FieldBuilder::body("tax", FieldType::Float).optional())
//!     .build()
//!     .expect("static schema");
//!
//! let input = RawInput::new().body(serde_json::json!({
//!     "name": "Foo",
//!     "price": 10.5,
//! }));
//!
//! let tree = item.validate(&input).expect("valid input");
//! assert_eq!(tree["price"], serde_json::json!(10.5));
//! assert!(tree.get("tax").is_none());
//! ```

pub mod cli;
pub mod error;
pub mod report;
pub mod sample;
pub mod schema;
pub mod validate;

pub use error::SchemaError;
pub use report::{fail_if_errors, print_errors, ConstraintKind, ErrorKind, FieldError};
pub use schema::{
    load_schema, Constraints, FieldBuilder, FieldSpec, FieldType, KeyType, Schema, SchemaBuilder,
    Source,
};
pub use validate::RawInput;
