//! The boolean expression language used in a condition's `if`.
//!
//! ```text
//! enabled == true
//! count > 0 AND status == "active"
//! (age < 18 AND country == 'US') OR requireVerification
//! referrer != null
//! ```
//!
//! The left side of a comparison always names a field of the object being
//! validated. A bare name is true when the field is `true`, or when it is
//! present with any non-null, non-boolean value. Missing fields never raise
//! errors: they compare equal only to `null`.

mod parser;
mod token;

use std::fmt;

use serde_json::{Map, Value};

pub use token::{tokenize, CmpOp, Token};

/// A malformed expression, or a comparison that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprError {
    message: String,
}

impl ExprError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExprError {}

/// Evaluate `expression` against the fields of an object.
///
/// ```
/// use serde_json::json;
/// use vld_spec::expr::evaluate;
///
/// let ctx = json!({"a": true, "b": false, "c": true});
/// let ctx = ctx.as_object().unwrap();
/// assert_eq!(evaluate("(a OR b) AND c", ctx), Ok(true));
/// assert!(evaluate("a AND", ctx).is_err());
/// ```
pub fn evaluate(expression: &str, context: &Map<String, Value>) -> Result<bool, ExprError> {
    let tokens = tokenize(expression)?;
    parser::Parser::new(&tokens, context).evaluate()
}
