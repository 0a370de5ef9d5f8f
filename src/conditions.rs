use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::expr::evaluate;
use crate::merge::merge;
use crate::spec::Spec;

/// Effective specs produced for one object by its conditions.
pub type EffectiveSpecs = BTreeMap<String, Spec>;

/// Decide which condition overrides apply to `object` and fold them into
/// per-field effective specs.
///
/// Conditions run in declaration order, each against the object's original
/// field values. For every field named by the selected branch the override
/// is merged onto the field's effective spec from an earlier condition, or
/// onto its declared property spec, or taken verbatim for an undeclared
/// field. Later conditions therefore win over earlier ones.
///
/// A guard that fails to evaluate contributes nothing and yields an error
/// at the root path; the remaining conditions still run.
///
/// ```
/// use serde_json::json;
/// use vld_spec::conditions::resolve_conditions;
/// use vld_spec::spec::Condition;
///
/// let spec = vld_spec::object()
///     .property("value", vld_spec::string())
///     .condition(Condition::when("enabled").then("value", vld_spec::any().min_length(1)));
/// let data = json!({"enabled": true});
///
/// let (effective, errors) = resolve_conditions(data.as_object().unwrap(), &spec);
/// assert!(errors.is_empty());
/// assert_eq!(effective["value"].min_length, Some(1));
/// ```
pub fn resolve_conditions(
    object: &Map<String, Value>,
    spec: &Spec,
) -> (EffectiveSpecs, Vec<ValidationError>) {
    let mut effective = EffectiveSpecs::new();
    let mut errors = Vec::new();
    let conditions = match &spec.conditions {
        Some(conditions) => conditions,
        None => return (effective, errors),
    };

    for condition in conditions {
        let outcome = match evaluate(&condition.if_expr, object) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    condition = %condition.if_expr,
                    error = %err,
                    "condition could not be evaluated; skipping"
                );
                errors.push(ValidationError::new(
                    "",
                    format!("error evaluating condition '{}': {}", condition.if_expr, err),
                ));
                continue;
            }
        };
        tracing::debug!(condition = %condition.if_expr, outcome, "condition evaluated");

        let Some(overrides) = condition.branch(outcome) else {
            continue;
        };
        for (field, over) in overrides {
            let declared = spec.properties.as_ref().and_then(|p| p.get(field));
            let merged = match effective.get(field).or(declared) {
                Some(current) => merge(current, over),
                None => over.clone(),
            };
            effective.insert(field.clone(), merged);
        }
    }

    (effective, errors)
}
