use std::collections::BTreeMap;

use crate::error::ValidationResult;

/// Flat error structure, useful for form validation.
///
/// - `form_errors`: errors at the root path (including condition errors)
/// - `field_errors`: errors grouped by top-level field name
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FlatErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

/// Group the errors of a result by the top-level field they belong to.
///
/// # Example
/// ```
/// use serde_json::json;
/// use vld_spec::format::flatten_result;
///
/// let spec = vld_spec::object()
///     .property("user", vld_spec::object().property("name", vld_spec::string().min_length(3)));
/// let result = vld_spec::validate(&json!({"user": {"name": "ab"}}), &spec);
/// let flat = flatten_result(&result);
/// assert_eq!(flat.field_errors["user"].len(), 1);
/// ```
pub fn flatten_result(result: &ValidationResult) -> FlatErrors {
    let mut flat = FlatErrors::default();

    for error in result.errors() {
        if error.path.is_empty() {
            flat.form_errors.push(error.message.clone());
            continue;
        }
        // The first segment: `user` of `user.name`, `[3]` of `[3].id`.
        let first = error.path.chars().next().map_or(0, char::len_utf8);
        let end = error.path[first..]
            .find(['.', '['])
            .map_or(error.path.len(), |i| i + first);
        flat.field_errors
            .entry(error.path[..end].to_string())
            .or_default()
            .push(error.message.clone());
    }

    flat
}

/// Format a result into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ string length 1 is less than minimum 2
///   → at user.name
/// ✖ required field is missing
///   → at email
/// ```
pub fn prettify_result(result: &ValidationResult) -> String {
    let mut lines = Vec::new();

    for error in result.errors() {
        lines.push(format!("✖ {}", error.message));
        if !error.path.is_empty() {
            lines.push(format!("  → at {}", error.path));
        }
    }

    lines.join("\n")
}
