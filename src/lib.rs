//! # vld-spec: Declarative JSON specs with conditional rules
//!
//! `vld-spec` validates JSON data against a declarative [`Spec`](spec::Spec):
//! static type and range constraints plus data-dependent conditions written
//! in a small boolean expression language. Specs are plain JSON, so the same
//! document can validate a form payload in the browser and again on the
//! server.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use vld_spec::prelude::*;
//!
//! let spec: Spec = r#"{
//!     "type": "object",
//!     "properties": {
//!         "enabled": {"type": "boolean"},
//!         "value": {"type": "string"}
//!     },
//!     "conditions": [
//!         {"if": "enabled == true", "then": {"value": {"minLength": 1}}}
//!     ]
//! }"#
//! .parse()
//! .unwrap();
//!
//! let result = vld_spec::validate(&json!({"enabled": true, "value": ""}), &spec);
//! assert!(!result.is_valid());
//! assert_eq!(result.errors()[0].path, "value");
//!
//! assert!(vld_spec::validate(&json!({"enabled": false, "value": ""}), &spec).is_valid());
//! ```
//!
//! Validation never aborts early: every violation in the tree is reported in
//! one pass, each qualified by a path such as `user.tags[2]`.

pub mod conditions;
pub mod error;
pub mod expr;
pub mod format;
pub mod input;
mod merge;
pub mod spec;
mod validate;
pub mod value;

pub use merge::merge;
pub use validate::{validate, validate_into, validate_json};

// Re-export serde_json, the value model every entry point works with.
#[doc(hidden)]
pub use serde_json;

/// Whether `spec` (or any spec nested in its properties or items) has
/// conditions.
///
/// A spec without conditions depends only on static constraints; callers
/// that run a second, remote validation pass can skip it in that case.
///
/// ```
/// use vld_spec::spec::Condition;
///
/// let plain = vld_spec::object().property("a", vld_spec::string());
/// assert!(!vld_spec::has_expressions(&plain));
///
/// let nested = vld_spec::array(vld_spec::object().condition(Condition::when("a")));
/// assert!(vld_spec::has_expressions(&nested));
/// ```
pub fn has_expressions(spec: &spec::Spec) -> bool {
    spec.has_expressions()
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a string spec.
pub fn string() -> spec::Spec {
    spec::Spec::of(spec::SpecType::String)
}

/// Create a number spec (any JSON number).
pub fn number() -> spec::Spec {
    spec::Spec::of(spec::SpecType::Number)
}

/// Create an integer spec (a JSON number with no fractional part).
pub fn integer() -> spec::Spec {
    spec::Spec::of(spec::SpecType::Integer)
}

/// Create a boolean spec.
pub fn boolean() -> spec::Spec {
    spec::Spec::of(spec::SpecType::Boolean)
}

/// Create an object spec with no properties.
pub fn object() -> spec::Spec {
    spec::Spec::of(spec::SpecType::Object)
}

/// Create an array spec validating every element with `items`.
pub fn array(items: spec::Spec) -> spec::Spec {
    spec::Spec::of(spec::SpecType::Array).items(items)
}

/// Create a spec that only accepts `null`.
pub fn null() -> spec::Spec {
    spec::Spec::of(spec::SpecType::Null)
}

/// Create a typeless spec.
///
/// Typeless specs are the usual shape of condition overrides: they carry
/// only the constraints they change and inherit the type when merged.
pub fn any() -> spec::Spec {
    spec::Spec::new()
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `vld-spec`.
pub mod prelude {
    pub use crate::error::{InputError, SpecError, ValidationError, ValidationResult};
    pub use crate::expr::ExprError;
    pub use crate::format::{flatten_result, prettify_result};
    pub use crate::input::JsonInput;
    pub use crate::spec::{Condition, Spec, SpecType};
    pub use crate::{has_expressions, merge, validate, validate_into, validate_json};
}
