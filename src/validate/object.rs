use serde_json::Value;

use super::Validator;
use crate::conditions::resolve_conditions;
use crate::error::PathSegment;
use crate::spec::Spec;

impl Validator {
    pub(super) fn check_object(&mut self, value: &Value, spec: &Spec, path: &str) {
        let object = match value.as_object() {
            Some(object) => object,
            None => return self.type_mismatch("object", value, path),
        };

        let (effective, errors) = resolve_conditions(object, spec);
        self.result.extend(errors);

        // Only the declared list counts; conditions never add or drop names.
        if let Some(required) = &spec.required {
            for name in required {
                if !object.contains_key(name) {
                    self.error(
                        &PathSegment::Field(name).append(path),
                        "required field is missing",
                    );
                }
            }
        }

        // Undeclared keys are ignored.
        if let Some(properties) = &spec.properties {
            for (name, declared) in properties {
                if let Some(field) = object.get(name) {
                    let field_spec = effective.get(name).unwrap_or(declared);
                    self.check(field, field_spec, &PathSegment::Field(name).append(path));
                }
            }
        }
    }
}
