//! # Validate Module
//!
//! The request-validation core: coercion of raw wire values into typed JSON
//! values ([`coerce`]) and the schema walk that resolves, defaults,
//! constraint-checks, and recurses into nested structures ([`core`]).
//!
//! Validation is a pure function of a [`Schema`](crate::schema::Schema) and a
//! [`RawInput`]: no shared state, no side effects, every failure returned as
//! data.

mod coerce;
mod core;

pub use core::RawInput;

pub(crate) use core::check_value;
