use serde_json::Value;

use super::Validator;
use crate::error::PathSegment;
use crate::spec::Spec;

impl Validator {
    pub(super) fn check_array(&mut self, value: &Value, spec: &Spec, path: &str) {
        let items = match value.as_array() {
            Some(items) => items,
            None => return self.type_mismatch("array", value, path),
        };

        if let Some(min) = spec.min_length {
            if items.len() < min {
                self.error(
                    path,
                    format!("array length {} is less than minimum {}", items.len(), min),
                );
            }
        }
        if let Some(max) = spec.max_length {
            if items.len() > max {
                self.error(
                    path,
                    format!("array length {} is greater than maximum {}", items.len(), max),
                );
            }
        }

        if let Some(item_spec) = &spec.items {
            for (i, item) in items.iter().enumerate() {
                self.check(item, item_spec, &PathSegment::Index(i).append(path));
            }
        }
    }
}
