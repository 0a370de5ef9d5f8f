//! Coercion helpers over `serde_json::Value`.
//!
//! `serde_json` keeps integers and floats apart (`3 != 3.0`), while specs and
//! expressions treat every number by its numeric value.

use serde_json::Value;

/// Numeric view of a value. Only JSON numbers qualify; strings are never
/// coerced.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Equality used by `enum` and by the `==`/`!=` operators.
///
/// Two numbers compare by value regardless of their integer/float
/// representation. Everything else (null included) must match in kind and
/// value.
///
/// ```
/// use serde_json::json;
/// use vld_spec::value::loose_eq;
///
/// assert!(loose_eq(&json!(3), &json!(3.0)));
/// assert!(loose_eq(&json!(null), &json!(null)));
/// assert!(!loose_eq(&json!("3"), &json!(3)));
/// ```
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

/// Whether `num` has no fractional part.
pub fn is_integral(num: f64) -> bool {
    num.is_finite() && num.fract() == 0.0
}
