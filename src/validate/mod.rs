//! Structural validation of a value tree against a spec tree.

mod array;
mod number;
mod object;
mod string;

use std::collections::HashMap;

use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{format_value_short, ValidationResult};
use crate::input::JsonInput;
use crate::spec::{Spec, SpecType};
use crate::value::loose_eq;

/// Validate `value` against `spec`, reporting every violation found.
///
/// Never fails: malformed expressions and patterns inside the spec are
/// reported as ordinary errors. Passing `None` as the spec yields a single
/// `spec is nil` error.
///
/// ```
/// use serde_json::json;
///
/// let spec = vld_spec::array(vld_spec::integer().min(0.0).max(100.0));
/// let result = vld_spec::validate(&json!([10, 200, 30]), &spec);
/// assert!(!result.is_valid());
/// assert_eq!(result.errors().len(), 1);
/// assert_eq!(result.errors()[0].path, "[1]");
/// ```
pub fn validate<'s>(value: &Value, spec: impl Into<Option<&'s Spec>>) -> ValidationResult {
    let spec = match spec.into() {
        Some(spec) => spec,
        None => return ValidationResult::single("", "spec is nil"),
    };
    let mut validator = Validator::new();
    validator.check(value, spec, "");
    validator.result
}

/// Parse `input` as JSON, then validate it.
///
/// Unparseable input yields a single root error starting with
/// `invalid JSON: `.
///
/// ```
/// let spec = vld_spec::object();
/// let result = vld_spec::validate_json("{invalid json}", &spec);
/// assert!(!result.is_valid());
/// assert!(result.errors()[0].message.starts_with("invalid JSON: "));
/// ```
pub fn validate_json<'s, I>(input: &I, spec: impl Into<Option<&'s Spec>>) -> ValidationResult
where
    I: JsonInput + ?Sized,
{
    match input.to_json_value() {
        Ok(value) => validate(&value, spec),
        Err(err) => ValidationResult::single("", err.to_string()),
    }
}

/// Validate `value`, then deserialize it into `T`.
///
/// A value that passes validation but does not fit `T` yields a single root
/// error starting with `failed to convert value: `.
pub fn validate_into<T: DeserializeOwned>(value: &Value, spec: &Spec) -> Result<T, ValidationResult> {
    validate(value, spec).into_result()?;
    T::deserialize(value)
        .map_err(|e| ValidationResult::single("", format!("failed to convert value: {}", e)))
}

/// Accumulator for one validation pass.
pub(crate) struct Validator {
    result: ValidationResult,
    /// Compiled `pattern`s, or the compile error to report again.
    patterns: HashMap<String, Result<Regex, String>>,
}

impl Validator {
    fn new() -> Self {
        Self {
            result: ValidationResult::new(),
            patterns: HashMap::new(),
        }
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.result.push(path, message);
    }

    fn check(&mut self, value: &Value, spec: &Spec, path: &str) {
        let spec_type = match &spec.spec_type {
            Some(spec_type) => spec_type,
            None => return,
        };

        if value.is_null() {
            if *spec_type != SpecType::Null {
                self.error(path, format!("expected type {}, got null", spec_type));
            }
            return;
        }

        match spec_type {
            SpecType::String => self.check_string(value, spec, path),
            SpecType::Number => self.check_number(value, spec, path),
            SpecType::Integer => self.check_integer(value, spec, path),
            SpecType::Boolean => {
                if !value.is_boolean() {
                    self.type_mismatch("boolean", value, path);
                }
            }
            SpecType::Object => self.check_object(value, spec, path),
            SpecType::Array => self.check_array(value, spec, path),
            SpecType::Null => self.error(path, "expected null, got non-null value"),
            SpecType::Unknown(name) => self.error(path, format!("unknown type: {}", name)),
        }

        if let Some(allowed) = &spec.enumeration {
            if !allowed.is_empty() {
                self.check_enum(value, allowed, path);
            }
        }
    }

    fn type_mismatch(&mut self, expected: &str, value: &Value, path: &str) {
        self.error(
            path,
            format!(
                "expected {}, got {}",
                expected,
                crate::error::value_type_name(value)
            ),
        );
    }

    fn check_enum(&mut self, value: &Value, allowed: &[Value], path: &str) {
        if allowed.iter().any(|candidate| loose_eq(value, candidate)) {
            return;
        }
        let listed: Vec<String> = allowed.iter().map(format_value_short).collect();
        self.error(
            path,
            format!(
                "value not in enum: {} (allowed: [{}])",
                format_value_short(value),
                listed.join(", ")
            ),
        );
    }
}
