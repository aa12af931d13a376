//! # CLI Module
//!
//! Command-line interface for exercising schema documents without writing a
//! program against the library.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Validate wire input against a schema document:
//!
//! ```bash
//! wirecheck check --schema item.yaml --body request.json \
//!     --path item_id=3 --query q=hello
//! ```
//!
//! Prints the coerced value tree on success; prints every validation error
//! and exits non-zero on failure.
//!
//! ### `sample`
//!
//! Print an example value tree for a schema document:
//!
//! ```bash
//! wirecheck sample --schema item.yaml
//! ```

mod commands;

pub use commands::*;
