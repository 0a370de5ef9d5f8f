use std::collections::BTreeMap;

use crate::spec::Spec;

/// Merge `over` onto `base`, returning a new spec. Neither input is modified.
///
/// The merge is right-biased:
/// - `type` and the scalar constraints (`min`, `max`, `minLength`,
///   `maxLength`, `pattern`, `enum`, `allowEmpty`) come from `over` when
///   present there, otherwise from `base`;
/// - `required` and `conditions` from `over` replace the base lists
///   outright (no union);
/// - `properties` are unioned key by key, keys present on both sides are
///   merged recursively;
/// - `items` from `over` replace the base item spec outright.
///
/// ```
/// use vld_spec::merge;
///
/// let base = vld_spec::string().min_length(1).max_length(10);
/// let merged = merge(&base, &vld_spec::any().min_length(5));
/// assert_eq!(merged.min_length, Some(5));
/// assert_eq!(merged.max_length, Some(10));
/// assert_eq!(merged.spec_type, base.spec_type);
/// ```
pub fn merge(base: &Spec, over: &Spec) -> Spec {
    Spec {
        spec_type: over.spec_type.clone().or_else(|| base.spec_type.clone()),
        properties: merge_properties(base.properties.as_ref(), over.properties.as_ref()),
        items: over.items.clone().or_else(|| base.items.clone()),
        required: over.required.clone().or_else(|| base.required.clone()),
        conditions: over
            .conditions
            .clone()
            .or_else(|| base.conditions.clone()),
        min: over.min.or(base.min),
        max: over.max.or(base.max),
        min_length: over.min_length.or(base.min_length),
        max_length: over.max_length.or(base.max_length),
        pattern: over.pattern.clone().or_else(|| base.pattern.clone()),
        enumeration: over
            .enumeration
            .clone()
            .or_else(|| base.enumeration.clone()),
        allow_empty: over.allow_empty.or(base.allow_empty),
    }
}

fn merge_properties(
    base: Option<&BTreeMap<String, Spec>>,
    over: Option<&BTreeMap<String, Spec>>,
) -> Option<BTreeMap<String, Spec>> {
    match (base, over) {
        (None, None) => None,
        (Some(b), None) => Some(b.clone()),
        (None, Some(o)) => Some(o.clone()),
        (Some(b), Some(o)) => {
            let mut merged = b.clone();
            for (key, spec) in o {
                let entry = match merged.get(key) {
                    Some(existing) => merge(existing, spec),
                    None => spec.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Some(merged)
        }
    }
}
